use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader, Sheets};
use log::{debug, warn};

use crate::inference::is_missing;
use crate::types::{Cell, Result, Table};

use super::{label_headers, DataReader};

/// Largest float that still converts to an integer exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Excel file reader (supports .xlsx, .xls, .xlsm, .xlsb, .ods)
pub struct ExcelReader {
    path: PathBuf,
}

impl ExcelReader {
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Convert a header cell to its label text
    fn data_to_string(dt: &Data) -> String {
        match dt {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Float(f) => f.to_string(),
            Data::Int(i) => i.to_string(),
            Data::Bool(b) => b.to_string(),
            Data::DateTime(d) => Self::excel_datetime_to_cell(d).to_string(),
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
            Data::Error(e) => format!("#{:?}", e),
        }
    }

    /// Convert a data cell to a table cell
    fn data_to_cell(dt: &Data) -> Cell {
        match dt {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) if is_missing(s) => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => {
                Cell::Int(*f as i64)
            }
            Data::Float(f) => Cell::Float(*f),
            Data::Int(i) => Cell::Int(*i),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(d) => Self::excel_datetime_to_cell(d),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        }
    }

    /// Date cells honour the workbook's 1900/1904 date system; elapsed-time
    /// cells stay durations. Out-of-range serials are kept as numbers.
    fn excel_datetime_to_cell(d: &ExcelDateTime) -> Cell {
        let converted = if d.is_duration() {
            d.as_duration().map(Cell::Duration)
        } else {
            d.as_datetime().map(Cell::DateTime)
        };
        converted.unwrap_or(Cell::Float(d.as_f64()))
    }
}

impl DataReader for ExcelReader {
    fn read(&mut self) -> Result<Table> {
        let mut workbook: Sheets<std::io::BufReader<std::fs::File>> =
            open_workbook_auto(&self.path)?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        let sheet_name = sheet_names.first().ok_or_else(|| {
            crate::error::Error::InvalidInput("Workbook contains no sheets".to_string())
        })?;
        if sheet_names.len() > 1 {
            warn!(
                "Workbook has {} sheets; only '{}' is processed",
                sheet_names.len(),
                sheet_name
            );
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(crate::error::Error::Excel)?;

        let mut rows = range.rows();

        // First row is headers
        let headers: Vec<String> = match rows.next() {
            Some(row) => row.iter().map(Self::data_to_string).collect(),
            None => return Ok(Table::default()),
        };

        let mut table = Table::new(label_headers(headers));
        for row in rows {
            table.push_row(row.iter().map(Self::data_to_cell).collect());
        }

        debug!(
            "Read {} rows x {} columns from sheet '{}'",
            table.row_count(),
            table.column_count(),
            sheet_name
        );
        Ok(table)
    }
}
