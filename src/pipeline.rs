use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;
use sha2::{Digest, Sha256};

use crate::readers::{create_reader, detect_format};
use crate::transform::{transform, Transformed};
use crate::types::{CleaningReport, ProcessingOptions, Result, Table};

/// Cleaned table plus the report describing the run
pub struct CleanResult {
    pub table: Table,
    pub report: CleaningReport,
}

/// Load, standardize and prune a records file
pub fn clean_file(path: &Path, options: ProcessingOptions) -> Result<CleanResult> {
    options.validate()?;
    let format = detect_format(path)?;

    // Get file name
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let mut reader = create_reader(path)?;
    let table = reader.read()?;
    info!(
        "Loaded {} records with {} columns from {}",
        table.row_count(),
        table.column_count(),
        file_name
    );

    let Transformed { table, summary } = transform(table);
    info!("{}", summary.headline());

    let mut report = CleaningReport::new(file_name, format, summary);
    report.columns = table.columns().to_vec();
    report.options = options.clone();

    // Compute file hash if requested
    if options.hash_file {
        report.file_hash = Some(compute_file_hash(path)?);
    }

    Ok(CleanResult { table, report })
}

/// Compute SHA-256 hash of a file (streaming to handle large files)
fn compute_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output;
    use crate::readers::excel::ExcelReader;
    use crate::readers::DataReader;
    use crate::types::{Cell, FileFormat, DEFAULT_SHEET_NAME};
    use chrono::NaiveDate;
    use rust_xlsxwriter::{Format, Workbook};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BIRTHS_CSV: &str = "Name,Address,Specific Address,Attendant,Mother's Name,,Weight\n\
        Ana,brgy carmen near market,,midwife,Maria,,3.1\n\
        Ben,Purok 2,Calaanan,Physician,Rosa,,2.9\n\
        Cris,,,nurse,Luz,,3\n\
        Dan,somewhere unlisted,NA,,Joy,,\n";

    #[test]
    fn test_compute_file_hash() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "test content").unwrap();

        let hash = compute_file_hash(file.path()).unwrap();
        assert!(!hash.is_empty());
        assert_eq!(hash.len(), 64); // SHA-256 produces 64 hex chars
    }

    #[test]
    fn test_clean_csv() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "{}", BIRTHS_CSV).unwrap();

        let result = clean_file(file.path(), ProcessingOptions::default()).unwrap();
        let table = &result.table;

        assert_eq!(table.columns(), &["ADDRESS", "ATTENDANT", "WEIGHT"]);
        let addresses: Vec<String> = table.rows().iter().map(|r| r[0].to_string()).collect();
        assert_eq!(addresses, vec!["CARMEN", "CANITOAN", "MISSING", "TRANSIENT"]);
        assert_eq!(table.cell(0, "ATTENDANT"), Some(&Cell::Text("RHM".into())));
        assert_eq!(table.cell(1, "ATTENDANT"), Some(&Cell::Text("MD".into())));
        assert_eq!(table.cell(2, "ATTENDANT"), Some(&Cell::Text("NURSE".into())));
        assert_eq!(table.cell(2, "WEIGHT"), Some(&Cell::Float(3.0)));

        let report = &result.report;
        assert_eq!(report.format, FileFormat::Csv);
        assert_eq!(report.row_count, 4);
        assert!(report.file_hash.is_some());
        assert_eq!(
            report.summary.dropped_columns,
            vec!["NAME", "SPECIFIC ADDRESS", "MOTHER'S NAME", "UNNAMED: 5"]
        );
    }

    #[test]
    fn test_clean_xlsx_end_to_end() {
        let birth = NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();

        let input = NamedTempFile::with_suffix(".xlsx").unwrap();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        // Third header cell left blank
        sheet.write_string(0, 0, "Name").unwrap();
        sheet.write_string(0, 1, "Address").unwrap();
        sheet.write_string(0, 3, "Attendant").unwrap();
        sheet.write_string(0, 4, "Date of Birth").unwrap();
        sheet.write_string(1, 0, "Ana").unwrap();
        sheet.write_string(1, 1, "Zone 1 Pasil").unwrap();
        sheet.write_string(1, 2, "scratch").unwrap();
        sheet.write_string(1, 3, "midwife").unwrap();
        let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");
        sheet
            .write_datetime_with_format(1, 4, &birth, &date_format)
            .unwrap();
        workbook.save(input.path()).unwrap();

        let result = clean_file(input.path(), ProcessingOptions::default()).unwrap();
        let table = &result.table;
        assert_eq!(table.columns(), &["ADDRESS", "ATTENDANT", "DATE OF BIRTH"]);
        assert_eq!(
            table.rows()[0],
            vec![
                Cell::Text("KAUSWAGAN".into()),
                Cell::Text("RHM".into()),
                Cell::DateTime(birth),
            ]
        );
        assert_eq!(result.report.format, FileFormat::Excel);
        assert_eq!(result.report.summary.dropped_columns, vec!["NAME", "UNNAMED: 2"]);

        let cleaned = NamedTempFile::with_suffix(".xlsx").unwrap();
        output::write_workbook_file(table, DEFAULT_SHEET_NAME, cleaned.path()).unwrap();
        let read_back = ExcelReader::new(cleaned.path()).unwrap().read().unwrap();
        assert_eq!(&read_back, table);
    }

    #[test]
    fn test_clean_without_hash() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "ADDRESS\nGusa\n").unwrap();

        let options = ProcessingOptions {
            hash_file: false,
            ..ProcessingOptions::default()
        };
        let result = clean_file(file.path(), options).unwrap();
        assert!(result.report.file_hash.is_none());
    }

    #[test]
    fn test_clean_unsupported() {
        let file = NamedTempFile::with_suffix(".xyz").unwrap();
        assert!(clean_file(file.path(), ProcessingOptions::default()).is_err());
    }

    #[test]
    fn test_clean_rejects_bad_sheet_name() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "ADDRESS\nGusa\n").unwrap();

        let options = ProcessingOptions {
            sheet_name: "Births?".to_string(),
            ..ProcessingOptions::default()
        };
        assert!(clean_file(file.path(), options).is_err());
    }

    #[test]
    fn test_clean_malformed_csv() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "ADDRESS,ATTENDANT\nGusa,midwife,extra\n").unwrap();
        assert!(clean_file(file.path(), ProcessingOptions::default()).is_err());
    }
}
