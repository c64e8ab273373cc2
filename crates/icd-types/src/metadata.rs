//! Code-metadata entry type.

use crate::IcdCode;

/// A read-only metadata entry for one ICD-10-CM code, as supplied by
/// the external code-metadata source.
///
/// Entries are looked up by exact or longest-prefix match and are
/// never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeMetadataEntry {
    /// The code this entry describes.
    pub code: IcdCode,
    /// Codes (or code prefixes) that may never be coded together with
    /// this code.
    pub excludes1: Vec<String>,
    /// Codes that are not inherently related; coexistence is allowed
    /// but advisory.
    pub excludes2: Vec<String>,
    /// Conditions included under this code.
    pub includes: Vec<String>,
    /// Tabular notes.
    pub notes: Vec<String>,
    /// "Code first" / "code also" / "use additional code" rule text.
    pub rules: Vec<String>,
    /// Chapter title, when the source overrides the derived chapter.
    pub chapter: Option<String>,
    /// Whether the code is billable.
    pub billable: bool,
}

impl CodeMetadataEntry {
    /// Creates an empty entry for a code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            billable: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_billable_and_empty() {
        let entry = CodeMetadataEntry::new("E11.22");
        assert_eq!(entry.code, "E11.22");
        assert!(entry.billable);
        assert!(entry.excludes1.is_empty());
        assert!(entry.rules.is_empty());
    }
}
