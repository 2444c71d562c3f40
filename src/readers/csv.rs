use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, WINDOWS_1252};
use log::debug;

use crate::error::Error;
use crate::inference::{to_cell, KindInferencer};
use crate::types::{Result, Table};

use super::{label_headers, DataReader};

/// CSV/TSV file reader
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    /// Create a new CSV reader
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b',',
        })
    }

    /// Create a new TSV reader
    pub fn new_tsv(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b'\t',
        })
    }
}

impl DataReader for CsvReader {
    fn read(&mut self) -> Result<Table> {
        let bytes = std::fs::read(&self.path)?;
        let text = decode_text(&bytes)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let raw_headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        if raw_headers.is_empty() {
            return Err(Error::InvalidInput(
                "No columns to parse from file".to_string(),
            ));
        }
        let num_cols = raw_headers.len();

        let mut records: Vec<StringRecord> = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.len() > num_cols {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(Error::InvalidInput(format!(
                    "Expected {} fields in line {}, saw {}",
                    num_cols,
                    line,
                    record.len()
                )));
            }
            records.push(record);
        }

        // Type each column from all of its values
        let mut inferencers: Vec<KindInferencer> =
            (0..num_cols).map(|_| KindInferencer::new()).collect();
        for record in &records {
            for (col_idx, field) in record.iter().enumerate() {
                inferencers[col_idx].observe(field);
            }
        }
        let kinds: Vec<_> = inferencers.iter().map(|i| i.inferred_kind()).collect();

        let mut table = Table::new(label_headers(raw_headers));
        for record in &records {
            table.push_row(
                record
                    .iter()
                    .zip(&kinds)
                    .map(|(field, kind)| to_cell(field, *kind))
                    .collect(),
            );
        }

        debug!(
            "Read {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            self.path.display()
        );
        Ok(table)
    }
}

/// Decode delimited text: BOM-declared encoding, else UTF-8, else Windows-1252
fn decode_text(bytes: &[u8]) -> Result<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            return Err(Error::InvalidInput(format!(
                "File is not valid {}",
                encoding.name()
            )));
        }
        return Ok(text.into_owned());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            debug!("Input is not UTF-8; decoding as {}", WINDOWS_1252.name());
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            Ok(text.into_owned())
        }
    }
}
