//! Single-sheet workbook writer: bold header row, date-time and duration
//! number formats, one typed cell per table value.

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};

use crate::error::Error;
use crate::types::{Cell, Result, Table};

/// Excel refuses cell text longer than this many characters
pub const MAX_CELL_CHARS: usize = 32_767;

const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const DURATION_NUM_FORMAT: &str = "[h]:mm:ss";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

struct CellFormats {
    header: Format,
    datetime: Format,
    duration: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            datetime: Format::new().set_num_format(DATETIME_NUM_FORMAT),
            duration: Format::new().set_num_format(DURATION_NUM_FORMAT),
        }
    }
}

/// Serialize `table` as an `.xlsx` workbook with a single sheet
pub fn workbook_bytes(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
    let formats = CellFormats::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col_idx, name) in table.columns().iter().enumerate() {
        let col = column_number(col_idx)?;
        check_cell_length(name, 0, col_idx, table)?;
        worksheet.write_string_with_format(0, col, name.as_str(), &formats.header)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = row_number(row_idx + 1)?;
        for (col_idx, cell) in row.iter().enumerate() {
            if let Cell::Text(s) = cell {
                check_cell_length(s, row_idx + 1, col_idx, table)?;
            }
            write_cell(worksheet, row_num, column_number(col_idx)?, cell, &formats)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &Cell,
    formats: &CellFormats,
) -> Result<()> {
    match cell {
        Cell::Empty => {}
        Cell::Text(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        Cell::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        Cell::Float(f) if f.is_finite() => {
            worksheet.write_number(row, col, *f)?;
        }
        Cell::Float(_) => {}
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Cell::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, &formats.datetime)?;
        }
        Cell::Duration(d) => {
            let days = d.num_milliseconds() as f64 / MILLIS_PER_DAY;
            worksheet.write_number_with_format(row, col, days, &formats.duration)?;
        }
    }
    Ok(())
}

fn check_cell_length(text: &str, row_idx: usize, col_idx: usize, table: &Table) -> Result<()> {
    if text.chars().count() > MAX_CELL_CHARS {
        let column = table.columns().get(col_idx).map(String::as_str).unwrap_or("");
        return Err(Error::InvalidInput(format!(
            "Value in column '{}' row {} is longer than {} characters",
            column,
            row_idx + 1,
            MAX_CELL_CHARS
        )));
    }
    Ok(())
}

fn row_number(idx: usize) -> Result<RowNum> {
    RowNum::try_from(idx)
        .map_err(|_| Error::InvalidInput(format!("Row {} is beyond the sheet limit", idx + 1)))
}

fn column_number(idx: usize) -> Result<ColNum> {
    ColNum::try_from(idx)
        .map_err(|_| Error::InvalidInput(format!("Column {} is beyond the sheet limit", idx + 1)))
}
