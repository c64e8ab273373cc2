//! Code-metadata store.
//!
//! The external, read-only code-metadata source: Excludes1/Excludes2
//! lists, Includes notes, "code first/also" rule text, chapter and
//! billability per code. Loaded once at process start (or lazily on
//! first use through [`SharedMetadata`]) and read-only afterward.
//!
//! All lookups return empty collections or `None` for unknown codes;
//! the store never raises for a missing code.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use csv::ReaderBuilder;
use icd_types::{code, CodeMetadataEntry};
use tokio::sync::OnceCell;

use crate::error::{EngineError, EngineResult};

/// Expected columns of a metadata TSV file.
const EXPECTED_COLUMNS: &[&str] = &[
    "code",
    "excludes1",
    "excludes2",
    "includes",
    "notes",
    "rules",
    "chapter",
    "billable",
];

/// In-memory store for ICD-10-CM code metadata.
///
/// Entries are indexed by code and looked up by exact match first,
/// then by longest decimal-prefix match, so a category-level entry
/// (`"F32"`) serves all of its children (`"F32.1"`, `"F32.3"`).
///
/// # Example
///
/// ```
/// use icd_engine::CodeMetadataStore;
///
/// let store = CodeMetadataStore::builtin();
/// let excludes = store.get_excludes1_codes("E11.610");
/// assert!(excludes.contains(&"M14.6".to_string()));
/// assert!(store.get_excludes1_codes("ZZZ.99").is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CodeMetadataStore {
    /// Entries indexed by code or code prefix.
    entries: HashMap<String, CodeMetadataEntry>,
}

impl CodeMetadataStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk inserts entries.
    pub fn insert_entries(&mut self, entries: impl IntoIterator<Item = CodeMetadataEntry>) {
        for entry in entries {
            self.entries.insert(entry.code.clone(), entry);
        }
    }

    /// Returns the number of entries in the store.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Gets the entry for a code by exact or longest-prefix match.
    pub fn get_entry(&self, icd_code: &str) -> Option<&CodeMetadataEntry> {
        if let Some(entry) = self.entries.get(icd_code) {
            return Some(entry);
        }
        // Walk shorter prefixes down to the three-character category.
        let mut end = icd_code.len();
        while end > 3 {
            end -= 1;
            let key = icd_code[..end].trim_end_matches('.');
            if let Some(entry) = self.entries.get(key) {
                return Some(entry);
            }
        }
        None
    }

    /// Returns the Excludes1 codes for a code, or empty if unknown.
    pub fn get_excludes1_codes(&self, icd_code: &str) -> Vec<String> {
        self.get_entry(icd_code)
            .map(|e| e.excludes1.clone())
            .unwrap_or_default()
    }

    /// Returns the Excludes2 codes for a code, or empty if unknown.
    pub fn get_excludes2_codes(&self, icd_code: &str) -> Vec<String> {
        self.get_entry(icd_code)
            .map(|e| e.excludes2.clone())
            .unwrap_or_default()
    }

    /// Returns the Includes strings for a code, or empty if unknown.
    pub fn get_includes_strings(&self, icd_code: &str) -> Vec<String> {
        self.get_entry(icd_code)
            .map(|e| e.includes.clone())
            .unwrap_or_default()
    }

    /// Returns the rule strings ("code first", "code also", "use
    /// additional code") for a code, or empty if unknown.
    pub fn get_rules_strings(&self, icd_code: &str) -> Vec<String> {
        self.get_entry(icd_code)
            .map(|e| e.rules.clone())
            .unwrap_or_default()
    }

    /// Returns the chapter title for a code.
    ///
    /// A stored chapter overrides the one derived from the code's
    /// category range; unknown codes fall back to the derived chapter.
    pub fn get_chapter_for_code(&self, icd_code: &str) -> Option<String> {
        if let Some(entry) = self.get_entry(icd_code) {
            if let Some(ref chapter) = entry.chapter {
                return Some(chapter.clone());
            }
        }
        code::chapter_for_code(icd_code).map(str::to_string)
    }

    /// Creates a store with the curated builtin table.
    ///
    /// The builtin table covers every Excludes1 and companion-rule
    /// relationship the domain resolvers can emit, so the engine is
    /// usable without an external metadata file. A full tabular
    /// dictionary loaded with [`CodeMetadataStore::load_tsv`] replaces
    /// it without code changes.
    pub fn builtin() -> Self {
        let mut store = Self::new();

        let mut charcot = CodeMetadataEntry::new("E11.610");
        charcot.excludes1 = vec!["M14.6".to_string()];
        charcot.notes = vec!["Diabetic neuropathic arthropathy".to_string()];

        let mut charcot_t1 = CodeMetadataEntry::new("E10.610");
        charcot_t1.excludes1 = vec!["M14.6".to_string()];

        // Diabetes-with-CKD combination codes across all families.
        let ckd_rule = "Code also chronic kidney disease (N18.-)".to_string();
        let dm_ckd = ["E08.22", "E09.22", "E10.22", "E11.22", "E13.22"].map(|c| {
            let mut entry = CodeMetadataEntry::new(c);
            entry.rules = vec![ckd_rule.clone()];
            entry
        });

        let mut htn_hf = CodeMetadataEntry::new("I11.0");
        htn_hf.rules =
            vec!["Use additional code to identify type of heart failure (I50.-)".to_string()];

        let mut htn_ckd = CodeMetadataEntry::new("I12");
        htn_ckd.rules = vec![
            "Use additional code to identify the stage of chronic kidney disease (N18.1-N18.6, N18.9)"
                .to_string(),
        ];

        let mut htn_heart_ckd = CodeMetadataEntry::new("I13");
        htn_heart_ckd.rules = vec![
            "Use additional code to identify type of heart failure (I50.-)".to_string(),
            "Use additional code to identify the stage of chronic kidney disease (N18.1-N18.6, N18.9)"
                .to_string(),
        ];

        let mut severe_sepsis = CodeMetadataEntry::new("R65.2");
        severe_sepsis.rules = vec!["Code first underlying infection".to_string()];

        let mut postproc = CodeMetadataEntry::new("T81.44");
        postproc.rules = vec!["Use additional code to identify the infection".to_string()];

        let mut gi_bleed = CodeMetadataEntry::new("K92.2");
        gi_bleed.excludes1 = vec![
            "K25.0".to_string(),
            "K25.2".to_string(),
            "K26.0".to_string(),
            "K26.2".to_string(),
        ];

        let mut depression_single = CodeMetadataEntry::new("F32");
        depression_single.excludes1 = vec!["F31".to_string()];
        let mut depression_recurrent = CodeMetadataEntry::new("F33");
        depression_recurrent.excludes1 = vec!["F31".to_string()];

        let mut copd = CodeMetadataEntry::new("J44.9");
        copd.excludes2 = vec!["J45".to_string()];

        let mut ckd = CodeMetadataEntry::new("N18");
        ckd.rules = vec![
            "Code first any associated diabetic chronic kidney disease (E08.22, E09.22, E10.22, E11.22, E13.22)"
                .to_string(),
            "Code first any associated hypertensive chronic kidney disease (I12.-, I13.-)".to_string(),
        ];

        let mut pain = CodeMetadataEntry::new("G89");
        pain.notes = vec!["Pain not elsewhere classified".to_string()];

        store.insert_entries([charcot, charcot_t1]);
        store.insert_entries(dm_ckd);
        store.insert_entries([
            htn_hf,
            htn_ckd,
            htn_heart_ckd,
            severe_sepsis,
            postproc,
            gi_bleed,
            depression_single,
            depression_recurrent,
            copd,
            ckd,
            pain,
        ]);
        store
    }

    /// Loads entries from a tab-delimited metadata file.
    ///
    /// Expected columns: `code`, `excludes1`, `excludes2`, `includes`,
    /// `notes`, `rules`, `chapter`, `billable`; list columns are
    /// pipe-separated.
    pub fn load_tsv<P: AsRef<Path>>(&mut self, path: P) -> EngineResult<usize> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let file = File::open(path)?;
        self.load_tsv_reader(BufReader::new(file))
    }

    /// Loads entries from a tab-delimited reader.
    pub fn load_tsv_reader<R: Read>(&mut self, reader: R) -> EngineResult<usize> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        validate_headers(&mut csv_reader)?;

        let mut count = 0;
        for record in csv_reader.records() {
            let record = record?;
            if let Some(entry) = parse_entry_fields(record.iter()) {
                self.entries.insert(entry.code.clone(), entry);
                count += 1;
            }
        }
        Ok(count)
    }

    /// Loads entries from a tab-delimited metadata file using parallel
    /// line parsing.
    ///
    /// Reads all lines into memory, then parses them in parallel using
    /// rayon. Faster for a full tabular dictionary on multi-core
    /// systems.
    #[cfg(feature = "parallel")]
    pub fn load_tsv_parallel<P: AsRef<Path>>(&mut self, path: P) -> EngineResult<usize> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let lines: Vec<String> = reader
            .lines()
            .skip(1) // Skip header
            .filter_map(Result::ok)
            .filter(|line| !line.is_empty())
            .collect();

        let entries: Vec<CodeMetadataEntry> = lines
            .par_iter()
            .filter_map(|line| parse_entry_fields(line.split('\t')))
            .collect();

        let count = entries.len();
        self.insert_entries(entries);
        Ok(count)
    }
}

/// Validates that the file has the expected column headers.
fn validate_headers<R: Read>(reader: &mut csv::Reader<R>) -> EngineResult<()> {
    let headers = reader.headers()?;
    if headers.len() < EXPECTED_COLUMNS.len() {
        return Err(EngineError::InvalidHeader {
            expected: EXPECTED_COLUMNS.len(),
            found: headers.len(),
        });
    }
    for (i, expected_col) in EXPECTED_COLUMNS.iter().enumerate() {
        let found = headers.get(i).unwrap_or("");
        let found = found.trim_start_matches('\u{feff}');
        if found != *expected_col {
            return Err(EngineError::UnexpectedColumn {
                position: i,
                expected: expected_col.to_string(),
                found: found.to_string(),
            });
        }
    }
    Ok(())
}

/// Parses one metadata row from its fields.
fn parse_entry_fields<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<CodeMetadataEntry> {
    let icd_code = fields.next()?.trim();
    if icd_code.is_empty() {
        return None;
    }
    let mut entry = CodeMetadataEntry::new(icd_code);
    entry.excludes1 = split_list(fields.next()?);
    entry.excludes2 = split_list(fields.next()?);
    entry.includes = split_list(fields.next()?);
    entry.notes = split_list(fields.next()?);
    entry.rules = split_list(fields.next()?);
    let chapter = fields.next()?.trim();
    entry.chapter = (!chapter.is_empty()).then(|| chapter.to_string());
    entry.billable = fields.next()? != "0";
    Some(entry)
}

/// Splits a pipe-separated list column.
fn split_list(field: &str) -> Vec<String> {
    field
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Single-flight, load-once wrapper for a shared metadata store.
///
/// Safe to await from multiple concurrent requests: a single in-flight
/// load is shared, never repeated, and the store is read-only for the
/// remainder of the process lifetime after it resolves.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use icd_engine::{CodeMetadataStore, SharedMetadata};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let shared = SharedMetadata::new();
/// let store: Arc<CodeMetadataStore> = shared
///     .get_or_load(|| async { Ok(CodeMetadataStore::builtin()) })
///     .await
///     .unwrap();
/// assert!(store.entry_count() > 0);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SharedMetadata {
    cell: OnceCell<Arc<CodeMetadataStore>>,
}

impl SharedMetadata {
    /// Creates an empty, not-yet-loaded handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store, loading it with `load` if this is the first
    /// caller. Concurrent callers share one in-flight load.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> EngineResult<Arc<CodeMetadataStore>>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = EngineResult<CodeMetadataStore>>,
    {
        self.cell
            .get_or_try_init(|| async { Ok(Arc::new(load().await?)) })
            .await
            .cloned()
    }

    /// Returns the store if it has already been loaded.
    pub fn get(&self) -> Option<Arc<CodeMetadataStore>> {
        self.cell.get().cloned()
    }
}
