use std::io::Write;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use super::model::{TransactionTable, REQUIRED_COLUMNS};

/// File name offered by the download button.
pub const DEFAULT_EXPORT_FILENAME: &str = "realisasi.xlsx";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported export extension: .{0}")]
    UnsupportedExtension(String),
}

/// `num_days_from_ce` of 1899-12-30, day zero of the Excel date serial.
const EXCEL_EPOCH_DAYS_FROM_CE: i32 = 693_594;

fn excel_serial(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce() - EXCEL_EPOCH_DAYS_FROM_CE)
}

/// Build a single-sheet workbook with the raw (unformatted) values.
fn build_workbook(table: &TransactionTable) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (col, name) in REQUIRED_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, rec) in table.records().iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number_with_format(row, 0, excel_serial(rec.transaction_date), &date_format)?;
        sheet.write_string(row, 1, rec.expense_account.as_str())?;
        sheet.write_string(row, 2, rec.expense_type.as_str())?;
        sheet.write_number(row, 3, rec.transaction_value)?;
    }

    sheet.set_column_width(0, 18)?;
    sheet.set_column_width(1, 14)?;
    sheet.set_column_width(2, 24)?;
    sheet.set_column_width(3, 18)?;

    Ok(workbook)
}

/// Write the view to an `.xlsx` file. The workbook is serialized in full
/// before the file is touched, so a failed build leaves no partial file.
pub fn export_xlsx(table: &TransactionTable, path: &Path) -> Result<(), ExportError> {
    let bytes = export_xlsx_to_buffer(table)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialize the view to `.xlsx` bytes.
pub fn export_xlsx_to_buffer(table: &TransactionTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = build_workbook(table)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write the view as CSV with the source column headers.
pub fn export_csv<W: Write>(table: &TransactionTable, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(REQUIRED_COLUMNS)?;
    for rec in table.records() {
        wtr.write_record([
            rec.transaction_date.format("%Y-%m-%d").to_string(),
            rec.expense_account.clone(),
            rec.expense_type.clone(),
            rec.transaction_value.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export to `path`, choosing the format from its extension.
pub fn export_to_path(table: &TransactionTable, path: &Path) -> Result<(), ExportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" => export_xlsx(table, path),
        "csv" => {
            let file = std::fs::File::create(path)?;
            export_csv(table, std::io::BufWriter::new(file))
        }
        other => Err(ExportError::UnsupportedExtension(other.to_string())),
    }?;

    log::info!("Exported {} transactions to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load;
    use crate::data::model::TransactionRecord;

    fn view() -> TransactionTable {
        let d = |day| NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
        TransactionTable::from_records(vec![
            TransactionRecord::new(d(1), "521211", "Belanja Barang", 1_250_000.0),
            TransactionRecord::new(d(14), "524111", "Perjalanan Dinas", 730_500.25),
            TransactionRecord::new(d(29), "00123", "Belanja Modal", 0.0),
        ])
    }

    #[test]
    fn exported_workbook_loads_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILENAME);

        export_to_path(&view(), &path).unwrap();
        let (loaded, err) = load(&path);

        assert!(err.is_none(), "{err:?}");
        assert_eq!(loaded, view());
    }

    #[test]
    fn exported_csv_loads_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("realisasi.csv");

        export_to_path(&view(), &path).unwrap();
        let (loaded, err) = load(&path);

        assert!(err.is_none(), "{err:?}");
        assert_eq!(loaded, view());
    }

    #[test]
    fn csv_values_are_unformatted() {
        let mut out = Vec::new();
        export_csv(&view(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Tanggal Transaksi,Akun Belanja,Jenis Belanja,Nilai Transaksi")
        );
        assert_eq!(lines.next(), Some("2024-02-01,521211,Belanja Barang,1250000"));
    }

    #[test]
    fn serial_matches_excel() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(excel_serial(d), 45292.0);
    }

    #[test]
    fn buffer_is_a_zip_archive() {
        let bytes = export_xlsx_to_buffer(&TransactionTable::default()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(DEFAULT_EXPORT_FILENAME);

        let err = export_xlsx(&view(), &path).unwrap_err();

        assert!(matches!(err, ExportError::Io(_)), "{err}");
        assert!(!path.exists());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_to_path(&view(), &dir.path().join("out.pdf")).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedExtension(ext) if ext == "pdf"));
    }
}
