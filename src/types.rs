use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::transform::TransformSummary;

/// Sheet name used for the cleaned workbook
pub const DEFAULT_SHEET_NAME: &str = "Birth Records";

/// File name offered for the cleaned workbook
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "OFFICIAL_CHO_BIRTH_RECORDS.xlsx";

/// Number of cleaned rows shown in previews
pub const DEFAULT_PREVIEW_ROWS: usize = 15;

/// Excel refuses sheet names longer than this
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Excel keeps this sheet name for its own change tracking
const RESERVED_SHEET_NAME: &str = "History";

/// A single table value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Elapsed time, e.g. a `[h]:mm` spreadsheet cell
    Duration(Duration),
}

impl Cell {
    /// Text rendering of the value, `None` for an empty cell
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Bool(b) => f.write_str(if *b { "True" } else { "False" }),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Cell::Duration(d) => {
                let sign = if *d < Duration::zero() { "-" } else { "" };
                let secs = d.num_seconds().abs();
                write!(f, "{}{}:{:02}:{:02}", sign, secs / 3600, secs / 60 % 60, secs % 60)
            }
        }
    }
}

/// In-memory table: named columns and rows holding one cell per column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with empty cells
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of the first column with exactly this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Positions of every column with exactly this name
    pub fn column_indices(&self, name: &str) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.as_str() == name)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Value of `column` in row `row`, if both exist
    #[cfg(test)]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    pub fn rename_columns<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> String,
    {
        for column in &mut self.columns {
            *column = rename(column);
        }
    }

    /// Mutable access to every cell of one column, top to bottom
    pub fn column_cells_mut(&mut self, idx: usize) -> impl Iterator<Item = &mut Cell> + '_ {
        self.rows.iter_mut().filter_map(move |row| row.get_mut(idx))
    }

    /// Remove the columns at the given positions, keeping the order of the rest
    pub fn drop_columns(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let keep: Vec<bool> = (0..self.columns.len())
            .map(|i| !indices.contains(&i))
            .collect();

        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));

        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> &[Vec<Cell>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Tsv,
    Excel,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" | "tab" => Some(FileFormat::Tsv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(FileFormat::Excel),
            _ => None,
        }
    }
}

/// Processing options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingOptions {
    /// Name of the single sheet in the cleaned workbook
    pub sheet_name: String,

    /// Rows shown in previews
    pub preview_rows: usize,

    /// Whether to hash the input file for the run report
    pub hash_file: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            hash_file: true,
        }
    }
}

impl ProcessingOptions {
    /// Reject options the workbook writer cannot honour
    pub fn validate(&self) -> Result<()> {
        let name = self.sheet_name.as_str();
        if name.trim().is_empty() {
            return Err(crate::error::Error::InvalidInput(
                "Sheet name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(crate::error::Error::InvalidInput(format!(
                "Sheet name '{}' is longer than {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
            return Err(crate::error::Error::InvalidInput(format!(
                "Sheet name '{}' contains forbidden character '{}'",
                name, c
            )));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(crate::error::Error::InvalidInput(format!(
                "Sheet name '{}' must not start or end with an apostrophe",
                name
            )));
        }
        if name.eq_ignore_ascii_case(RESERVED_SHEET_NAME) {
            return Err(crate::error::Error::InvalidInput(format!(
                "Sheet name '{}' is reserved by Excel",
                name
            )));
        }
        Ok(())
    }
}

/// Summary of one cleaning run, written as the JSON run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Report version
    pub version: String,

    /// Input file name (without path)
    pub file_name: String,

    /// Input file hash (SHA-256)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,

    /// Input file format
    pub format: FileFormat,

    /// Rows in the cleaned table
    pub row_count: usize,

    /// Columns in the cleaned table
    pub columns: Vec<String>,

    /// What the transform did
    pub summary: TransformSummary,

    /// Processing options used
    pub options: ProcessingOptions,
}

impl CleaningReport {
    pub fn new(file_name: String, format: FileFormat, summary: TransformSummary) -> Self {
        Self {
            version: "1.0.0".to_string(),
            file_name,
            file_hash: None,
            format,
            row_count: summary.rows,
            columns: Vec::new(),
            summary,
            options: ProcessingOptions::default(),
        }
    }
}

/// Result type for the application
pub type Result<T> = std::result::Result<T, crate::error::Error>;
