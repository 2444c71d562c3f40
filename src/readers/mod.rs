pub mod csv;
pub mod excel;

use std::collections::HashMap;
use std::path::Path;

use crate::types::{FileFormat, Result, Table};

/// Common trait for data file readers
pub trait DataReader {
    /// Read the file into a table; the first row supplies the headers
    fn read(&mut self) -> Result<Table>;
}

/// Create a reader for the given file path
pub fn create_reader(path: &Path) -> Result<Box<dyn DataReader>> {
    let format = detect_format(path)?;

    match format {
        FileFormat::Csv => Ok(Box::new(csv::CsvReader::new(path)?)),
        FileFormat::Tsv => Ok(Box::new(csv::CsvReader::new_tsv(path)?)),
        FileFormat::Excel => Ok(Box::new(excel::ExcelReader::new(path)?)),
    }
}

/// Determine the file format from the path's extension
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    FileFormat::from_extension(ext).ok_or_else(|| {
        crate::error::Error::UnsupportedFormat(format!(
            "Unsupported file extension: .{}",
            ext
        ))
    })
}

/// Label for a header cell left blank
pub fn unlabeled_column_name(index: usize) -> String {
    format!("Unnamed: {}", index)
}

/// Turn raw header cells into unique column labels.
///
/// Blank headers become `Unnamed: <index>`; repeats of an earlier label get
/// `.1`, `.2`, ... appended.
pub fn label_headers<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();

    raw.into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.trim().is_empty() {
                unlabeled_column_name(idx)
            } else {
                header
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let label = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            label
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        label_headers(raw.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_blank_headers_are_unnamed() {
        assert_eq!(labels(&["ADDRESS", "", " "]), vec!["ADDRESS", "Unnamed: 1", "Unnamed: 2"]);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        assert_eq!(labels(&["A", "B", "A", "A"]), vec!["A", "B", "A.1", "A.2"]);
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(create_reader(Path::new("records.pdf")).is_err());
        assert!(detect_format(Path::new("records")).is_err());
        assert_eq!(detect_format(Path::new("r.XLSX")).unwrap(), FileFormat::Excel);
    }
}
