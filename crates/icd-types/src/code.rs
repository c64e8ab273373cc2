//! ICD-10-CM code string helpers.
//!
//! Codes are stored as their canonical dotted form (`"E11.22"`,
//! `"T50.905A"`, `"I10"`). This module provides the comparisons the
//! engine relies on: specificity, decimal-prefix descent, chapter
//! classification, and family predicates.

/// An ICD-10-CM code in canonical dotted form.
///
/// Codes are three to eight characters: a category (letter plus two
/// digits), an optional decimal point, and up to four trailing
/// characters including placeholder `X` and a 7th character.
///
/// # Examples
///
/// ```
/// use icd_types::IcdCode;
///
/// let sepsis: IcdCode = "A41.9".to_string();
/// let shock: IcdCode = "R65.21".to_string();
/// ```
pub type IcdCode = String;

/// Returns the specificity of a code: the number of meaningful
/// characters after removing the decimal point.
///
/// More specific codes win Excludes1 tie-breaks.
///
/// # Examples
///
/// ```
/// use icd_types::code::specificity;
///
/// assert_eq!(specificity("I10"), 3);
/// assert_eq!(specificity("E11.22"), 5);
/// assert_eq!(specificity("T50.905A"), 7);
/// ```
pub fn specificity(code: &str) -> usize {
    code.chars().filter(|c| *c != '.').count()
}

/// Returns true if `child` is a strictly more specific descendant of
/// `parent` by the decimal-prefix relationship.
///
/// `"E11.22"` descends from `"E11.2"` and from `"E11"`; a code never
/// descends from itself.
///
/// # Examples
///
/// ```
/// use icd_types::code::is_descendant_of;
///
/// assert!(is_descendant_of("E11.22", "E11.2"));
/// assert!(is_descendant_of("N18.4", "N18"));
/// assert!(!is_descendant_of("N18.4", "N18.4"));
/// assert!(!is_descendant_of("N18", "N18.4"));
/// ```
pub fn is_descendant_of(child: &str, parent: &str) -> bool {
    child.len() > parent.len() && parent.len() >= 3 && child.starts_with(parent)
}

/// Returns true if `code` falls under a category prefix.
///
/// The prefix may be a bare category (`"M14.6"` matches `"M14.60"`,
/// `"M14.61"`, and `"M14.6"` itself).
pub fn matches_prefix(code: &str, prefix: &str) -> bool {
    code == prefix || is_descendant_of(code, prefix)
}

/// Returns true if the code is an external-cause code (V/W/X/Y chapter).
///
/// External-cause codes must always be sequenced last.
pub fn is_external_cause(code: &str) -> bool {
    matches!(code.as_bytes().first(), Some(b'V' | b'W' | b'X' | b'Y'))
}

/// Returns true if the code belongs to the diabetes family (E08–E13).
pub fn is_diabetes_family(code: &str) -> bool {
    let bytes = code.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'E' {
        return false;
    }
    matches!(&code[1..3], "08" | "09" | "10" | "11" | "13")
}

/// Returns true if the code is a systemic-infection (sepsis) code.
pub fn is_sepsis_code(code: &str) -> bool {
    code.starts_with("A40") || code.starts_with("A41")
}

/// Returns true if the code is a traumatic injury code: the S chapter,
/// or T-chapter injuries outside the poisoning/adverse-effect
/// (T36-T65) and complication (T79-T88) ranges.
///
/// Post-traumatic pain anchors on this predicate, so a poisoning or
/// procedural-complication T-code is never mistaken for the injury.
pub fn is_traumatic_injury(code: &str) -> bool {
    match code.as_bytes().first() {
        Some(b'S') => true,
        Some(b'T') => {
            let Some(category) = code.get(1..3).and_then(|c| c.parse::<u8>().ok()) else {
                return false;
            };
            !(36..=65).contains(&category) && !(79..=88).contains(&category)
        }
        _ => false,
    }
}

/// Returns the ICD-10-CM chapter title for a code, derived from its
/// category range.
///
/// Returns `None` for strings that do not start with a letter and two
/// digits.
///
/// # Examples
///
/// ```
/// use icd_types::code::chapter_for_code;
///
/// assert_eq!(
///     chapter_for_code("A41.9"),
///     Some("Certain infectious and parasitic diseases (A00-B99)")
/// );
/// assert_eq!(chapter_for_code("bogus"), None);
/// ```
pub fn chapter_for_code(code: &str) -> Option<&'static str> {
    let bytes = code.as_bytes();
    if bytes.len() < 3 || !bytes[0].is_ascii_uppercase() {
        return None;
    }
    let category: u8 = code.get(1..3)?.parse().ok()?;

    // Category ranges from the ICD-10-CM tabular list.
    let chapter = match (bytes[0], category) {
        (b'A' | b'B', _) => "Certain infectious and parasitic diseases (A00-B99)",
        (b'C', _) | (b'D', 0..=49) => "Neoplasms (C00-D49)",
        (b'D', 50..=89) => {
            "Diseases of the blood and blood-forming organs and certain disorders involving the immune mechanism (D50-D89)"
        }
        (b'D', _) => return None,
        (b'E', 0..=89) => "Endocrine, nutritional and metabolic diseases (E00-E89)",
        (b'E', _) => return None,
        (b'F', _) => "Mental, behavioral and neurodevelopmental disorders (F01-F99)",
        (b'G', _) => "Diseases of the nervous system (G00-G99)",
        (b'H', 0..=59) => "Diseases of the eye and adnexa (H00-H59)",
        (b'H', 60..=95) => "Diseases of the ear and mastoid process (H60-H95)",
        (b'H', _) => return None,
        (b'I', _) => "Diseases of the circulatory system (I00-I99)",
        (b'J', _) => "Diseases of the respiratory system (J00-J99)",
        (b'K', 0..=95) => "Diseases of the digestive system (K00-K95)",
        (b'K', _) => return None,
        (b'L', _) => "Diseases of the skin and subcutaneous tissue (L00-L99)",
        (b'M', _) => "Diseases of the musculoskeletal system and connective tissue (M00-M99)",
        (b'N', _) => "Diseases of the genitourinary system (N00-N99)",
        (b'O', _) => "Pregnancy, childbirth and the puerperium (O00-O9A)",
        (b'P', 0..=96) => "Certain conditions originating in the perinatal period (P00-P96)",
        (b'P', _) => return None,
        (b'Q', _) => "Congenital malformations, deformations and chromosomal abnormalities (Q00-Q99)",
        (b'R', _) => {
            "Symptoms, signs and abnormal clinical and laboratory findings, not elsewhere classified (R00-R99)"
        }
        (b'S' | b'T', _) => "Injury, poisoning and certain other consequences of external causes (S00-T88)",
        (b'V' | b'W' | b'X' | b'Y', _) => "External causes of morbidity (V00-Y99)",
        (b'Z', _) => "Factors influencing health status and contact with health services (Z00-Z99)",
        _ => return None,
    };
    Some(chapter)
}
