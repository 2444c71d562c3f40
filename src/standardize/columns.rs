use once_cell::sync::Lazy;
use regex::Regex;

pub const ADDRESS_COLUMN: &str = "ADDRESS";
pub const SPECIFIC_ADDRESS_COLUMN: &str = "SPECIFIC ADDRESS";
pub const ATTENDANT_COLUMN: &str = "ATTENDANT";

/// Readers label blank header cells with this word
pub const UNLABELED_COLUMN_MARKER: &str = "UNNAMED";

/// Personal names and resolver-only working data, removed from the output
const DROPPED_COLUMNS: &[&str] = &["NAME", "MOTHER'S NAME", SPECIFIC_ADDRESS_COLUMN];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Trim, uppercase and collapse internal whitespace of a header
pub fn normalize_column_name(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(name.trim(), " ")
        .to_uppercase()
}

/// Whether a normalized column name is excluded from the cleaned output
pub fn is_dropped_column(name: &str) -> bool {
    DROPPED_COLUMNS.contains(&name) || name.contains(UNLABELED_COLUMN_MARKER)
}

/// Positions of the columns to remove, in table order
pub fn columns_to_drop(columns: &[String]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, name)| is_dropped_column(name))
        .map(|(idx, _)| idx)
        .collect()
}
