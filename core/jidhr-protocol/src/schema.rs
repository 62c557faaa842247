//! Column names of the merged input table and the flattened tree table.

use alloc::vec::Vec;

pub const ROOT: &str = "ROOT";
pub const LEMMA: &str = "LEMMA";
pub const POS: &str = "POS";
pub const LEMMA_ARA: &str = "LEMMA_ARA";
pub const CHILD_DER_CAT: &str = "CHILD_DER_CAT";
pub const GLOSS: &str = "GLOSS";
pub const FUNCTION: &str = "FUNCTION";
pub const PATTERN_ABSTRACT: &str = "PATTERN_ABSTRACT";
pub const PARENT_POS: &str = "PARENT_POS";
pub const PARENT_PATTERN_ABSTRACT: &str = "PARENT_PATTERN_ABSTRACT";

/// Columns the tree builder refuses to run without. `LEMMA_ARA` may be absent.
pub const REQUIRED_INPUT_COLUMNS: [&str; 9] = [
    ROOT,
    LEMMA,
    POS,
    CHILD_DER_CAT,
    GLOSS,
    FUNCTION,
    PARENT_POS,
    PARENT_PATTERN_ABSTRACT,
    PATTERN_ABSTRACT,
];

pub const OUTPUT_COLUMNS: [&str; 15] = [
    "ROOT",
    "LEMMA",
    "POS",
    "LEMMA_ARA",
    "DER_CLASS",
    "GLOSS",
    "FUNCTION",
    "PATTERN_ABSTRACT",
    "PARENT_LEMMA",
    "PARENT_POS",
    "PARENT_LEMMA_ARA",
    "PARENT_DER_CLASS",
    "PARENT_GLOSS",
    "PARENT_FUNCTION",
    "PARENT_PATTERN_ABSTRACT",
];

/// Columns a flattened tree table must carry to be read back. The Arabic-script
/// columns may be absent.
pub const REQUIRED_OUTPUT_COLUMNS: [&str; 13] = [
    "ROOT",
    "LEMMA",
    "POS",
    "DER_CLASS",
    "GLOSS",
    "FUNCTION",
    "PATTERN_ABSTRACT",
    "PARENT_LEMMA",
    "PARENT_POS",
    "PARENT_DER_CLASS",
    "PARENT_GLOSS",
    "PARENT_FUNCTION",
    "PARENT_PATTERN_ABSTRACT",
];

/// Returns the entries of `required` not present in `header`, in `required` order.
pub fn missing_columns<'r, H, S>(required: &[&'r str], header: H) -> Vec<&'r str>
where
    H: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let present: Vec<S> = header.into_iter().collect();
    required
        .iter()
        .copied()
        .filter(|name| !present.iter().any(|column| column.as_ref() == *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_reports_in_schema_order() {
        let header = ["LEMMA", "ROOT", "POS", "GLOSS", "FUNCTION", "PATTERN_ABSTRACT"];
        let missing = missing_columns(&REQUIRED_INPUT_COLUMNS, header);
        assert_eq!(
            missing,
            [CHILD_DER_CAT, PARENT_POS, PARENT_PATTERN_ABSTRACT]
        );
    }

    #[test]
    fn test_lemma_ara_is_optional() {
        let missing = missing_columns(&REQUIRED_INPUT_COLUMNS, REQUIRED_INPUT_COLUMNS);
        assert!(missing.is_empty());
        assert!(!REQUIRED_INPUT_COLUMNS.contains(&LEMMA_ARA));
    }
}
