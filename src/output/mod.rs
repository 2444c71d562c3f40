pub mod xlsx;

use std::io::Write;
use std::path::Path;

use crate::types::{CleaningReport, Result, Table};

pub use xlsx::workbook_bytes;

/// Write the cleaned table to an `.xlsx` file
pub fn write_workbook_file(table: &Table, sheet_name: &str, path: &Path) -> Result<()> {
    // Build the whole package first so a failure leaves no partial file
    let bytes = workbook_bytes(table, sheet_name)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Write run report to JSON file
pub fn write_report_file(report: &CleaningReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Write run report to JSON string
pub fn report_to_json_string(report: &CleaningReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the header and first `rows` rows as tab-separated text
pub fn write_preview<W: Write>(table: &Table, rows: usize, out: &mut W) -> Result<()> {
    writeln!(out, "{}", table.columns().join("\t"))?;
    for row in table.head(rows) {
        let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        writeln!(out, "{}", line.join("\t"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::excel::ExcelReader;
    use crate::readers::DataReader;
    use crate::transform::TransformSummary;
    use crate::types::{Cell, FileFormat};
    use chrono::{Duration, NaiveDate};
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_serialization() {
        let summary = TransformSummary {
            rows: 3,
            resolved: 2,
            missing: 1,
            address_standardized: true,
            ..TransformSummary::default()
        };
        let report = CleaningReport::new("births.csv".to_string(), FileFormat::Csv, summary);

        let json = report_to_json_string(&report).unwrap();
        assert!(json.contains("\"file_name\": \"births.csv\""));
        assert!(json.contains("\"format\": \"csv\""));
        assert!(json.contains("\"resolved\": 2"));
        assert!(!json.contains("file_hash"));
    }

    #[test]
    fn test_preview() {
        let mut table = Table::new(vec!["ADDRESS".into(), "ATTENDANT".into()]);
        for _ in 0..20 {
            table.push_row(vec![Cell::Text("GUSA".into()), Cell::Text("RHM".into())]);
        }

        let mut out = Vec::new();
        write_preview(&table, 15, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 16);
        assert_eq!(text.lines().next(), Some("ADDRESS\tATTENDANT"));
    }

    #[test]
    fn test_workbook_reads_back() {
        let birth = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();

        let mut table = Table::new(vec![
            "ADDRESS".into(),
            "ATTENDANT".into(),
            "WEIGHT".into(),
            "DATE OF BIRTH".into(),
            "REMARKS".into(),
            "LABOR".into(),
        ]);
        table.push_row(vec![
            Cell::Text("CARMEN".into()),
            Cell::Text("RHM".into()),
            Cell::Float(3.25),
            Cell::DateTime(birth),
            Cell::Text("<twins> & \"healthy\"".into()),
            Cell::Duration(Duration::minutes(90)),
        ]);
        table.push_row(vec![
            Cell::Text("MISSING".into()),
            Cell::Empty,
            Cell::Int(3),
            Cell::Empty,
            Cell::Text("a\u{1}b".into()),
            Cell::Empty,
        ]);

        let file = NamedTempFile::with_suffix(".xlsx").unwrap();
        write_workbook_file(&table, "Birth Records", file.path()).unwrap();

        let read_back = ExcelReader::new(file.path()).unwrap().read().unwrap();
        assert_eq!(read_back.columns(), table.columns());
        assert_eq!(read_back.row_count(), 2);
        assert_eq!(read_back.cell(0, "ADDRESS"), Some(&Cell::Text("CARMEN".into())));
        assert_eq!(read_back.cell(0, "WEIGHT"), Some(&Cell::Float(3.25)));
        assert_eq!(read_back.cell(0, "DATE OF BIRTH"), Some(&Cell::DateTime(birth)));
        assert_eq!(
            read_back.cell(0, "REMARKS"),
            Some(&Cell::Text("<twins> & \"healthy\"".into()))
        );
        assert_eq!(
            read_back.cell(0, "LABOR"),
            Some(&Cell::Duration(Duration::minutes(90)))
        );
        assert_eq!(read_back.cell(1, "ATTENDANT"), Some(&Cell::Empty));
        assert_eq!(read_back.cell(1, "WEIGHT"), Some(&Cell::Int(3)));

        // Control characters are encoded, not silently removed
        let remarks = read_back.cell(1, "REMARKS").unwrap().to_string();
        assert_ne!(remarks, "ab");
        assert!(remarks.starts_with('a') && remarks.ends_with('b'));
    }
}
