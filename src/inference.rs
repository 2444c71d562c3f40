use crate::types::Cell;

/// Tokens read as missing values in delimited text
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Storage kind inferred for a delimited-text column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// Type inference state for a column
#[derive(Debug, Clone, Default)]
pub struct KindInferencer {
    /// Current inferred kind, `None` until a non-missing value is seen
    current: Option<ColumnKind>,
}

impl KindInferencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the inferred kind to accommodate `value`
    pub fn observe(&mut self, value: &str) {
        if is_missing(value) {
            return;
        }

        let kind = if is_integer(value) {
            ColumnKind::Integer
        } else if is_numeric(value) {
            ColumnKind::Float
        } else {
            ColumnKind::Text
        };

        self.current = Some(match (self.current, kind) {
            (None, k) => k,
            (Some(ColumnKind::Text), _) | (_, ColumnKind::Text) => ColumnKind::Text,
            (Some(ColumnKind::Float), _) | (_, ColumnKind::Float) => ColumnKind::Float,
            _ => ColumnKind::Integer,
        });
    }

    /// Inferred kind; columns with only missing values are text
    pub fn inferred_kind(&self) -> ColumnKind {
        self.current.unwrap_or(ColumnKind::Text)
    }
}

/// Convert a raw field to a cell of the column's inferred kind
pub fn to_cell(value: &str, kind: ColumnKind) -> Cell {
    if is_missing(value) {
        return Cell::Empty;
    }
    match kind {
        ColumnKind::Integer => value
            .trim()
            .parse::<i64>()
            .map(Cell::Int)
            .unwrap_or_else(|_| Cell::Text(value.to_string())),
        ColumnKind::Float => parse_numeric(value)
            .map(Cell::Float)
            .unwrap_or_else(|| Cell::Text(value.to_string())),
        ColumnKind::Text => Cell::Text(value.to_string()),
    }
}

/// Check if a value represents a missing value
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    MISSING_TOKENS.contains(&trimmed)
}

/// Check if a value is an integer
pub fn is_integer(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.parse::<i64>().is_ok()
}

/// Check if a value is numeric (integer or float)
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}

/// Parse a finite numeric value
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_missing() {
        assert!(is_missing(""));
        assert!(is_missing("NA"));
        assert!(is_missing(" N/A "));
        assert!(is_missing("nan"));
        assert!(is_missing("None"));
        assert!(!is_missing("NONE OF THE ABOVE"));
        assert!(!is_missing("0"));
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer("42"));
        assert!(is_integer("-7"));
        assert!(!is_integer("4.2"));
        assert!(!is_integer("abc"));
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("4.2"));
        assert!(is_numeric("1e3"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("3 kg"));
    }

    #[test]
    fn test_inferencer_integer() {
        let mut inf = KindInferencer::new();
        for v in ["1", "2", "", "3"] {
            inf.observe(v);
        }
        assert_eq!(inf.inferred_kind(), ColumnKind::Integer);
    }

    #[test]
    fn test_inferencer_upgrade_integer_to_float() {
        let mut inf = KindInferencer::new();
        for v in ["1", "2.5", "3"] {
            inf.observe(v);
        }
        assert_eq!(inf.inferred_kind(), ColumnKind::Float);
    }

    #[test]
    fn test_inferencer_upgrade_to_text() {
        let mut inf = KindInferencer::new();
        for v in ["1", "2.5", "Gusa", "3"] {
            inf.observe(v);
        }
        assert_eq!(inf.inferred_kind(), ColumnKind::Text);
    }

    #[test]
    fn test_inferencer_all_missing() {
        let mut inf = KindInferencer::new();
        inf.observe("NA");
        assert_eq!(inf.inferred_kind(), ColumnKind::Text);
    }

    #[test]
    fn test_to_cell() {
        assert_eq!(to_cell("12", ColumnKind::Integer), Cell::Int(12));
        assert_eq!(to_cell("12", ColumnKind::Float), Cell::Float(12.0));
        assert_eq!(to_cell("12", ColumnKind::Text), Cell::Text("12".into()));
        assert_eq!(to_cell("NA", ColumnKind::Text), Cell::Empty);
    }
}
