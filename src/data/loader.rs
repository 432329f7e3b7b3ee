use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type};
use calamine::{open_workbook_auto, Data, DataType as _, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{
    TransactionRecord, TransactionTable, COL_ACCOUNT, COL_DATE, COL_TYPE, COL_VALUE,
};

// ---------------------------------------------------------------------------
// Error signal
// ---------------------------------------------------------------------------

/// The only way loading can fail.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file is missing, unreadable, malformed, or lacks a required column.
    #[error("Gagal memuat data dari {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the transaction source, degrading to an empty table on failure.
///
/// Never panics: every failure comes back as `Some(LoadError::SourceUnavailable)`
/// next to an empty [`TransactionTable`].
pub fn load(path: &Path) -> (TransactionTable, Option<LoadError>) {
    match load_file(path) {
        Ok(table) => {
            log::info!(
                "Loaded {} transactions ({} expense types) from {}",
                table.len(),
                table.expense_types().len(),
                path.display()
            );
            (table, None)
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            let err = LoadError::SourceUnavailable {
                path: path.to_path_buf(),
                reason: format!("{e:#}"),
            };
            (TransactionTable::default(), Some(err))
        }
    }
}

/// Load a transaction table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first worksheet, header in the first row
/// * `.csv`     – header row, one transaction per line
/// * `.parquet` – one column per required field, cast to the expected types
pub fn load_file(path: &Path) -> Result<TransactionTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => load_spreadsheet(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Column lookup and row assembly shared by all formats
// ---------------------------------------------------------------------------

/// Positions of the required columns in a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    account: usize,
    expense_type: usize,
    value: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("missing '{name}' column"))
        };
        Ok(Self {
            date: find(COL_DATE)?,
            account: find(COL_ACCOUNT)?,
            expense_type: find(COL_TYPE)?,
            value: find(COL_VALUE)?,
        })
    }
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// Validate one row's parsed fields. `row` is the 1-based data row number.
fn build_record(
    row: usize,
    date: Option<NaiveDate>,
    account: String,
    expense_type: String,
    value: Option<f64>,
) -> Result<TransactionRecord> {
    let transaction_date =
        date.with_context(|| format!("row {row}: '{COL_DATE}' is empty or not a date"))?;
    if expense_type.is_empty() {
        bail!("row {row}: '{COL_TYPE}' is empty");
    }
    let transaction_value =
        value.with_context(|| format!("row {row}: '{COL_VALUE}' is empty or not a number"))?;

    Ok(TransactionRecord::new(
        transaction_date,
        account,
        expense_type,
        transaction_value,
    ))
}

/// Parse a textual date, dropping any time-of-day.
fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    const DATETIME_FORMATS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%d/%m/%Y %H:%M:%S",
    ];

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Convert an Excel serial date (days since 1899-12-30) to a calendar date.
pub(crate) fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(chrono::Days::new(serial.floor() as u64))
}

/// Account codes stored as numbers render without a fractional part.
fn account_text_from_f64(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

fn parse_value_text(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Workbook layout: first worksheet, first row is the header.
/// Date cells may be real Excel dates, serial numbers, or text.
fn load_spreadsheet(path: &Path) -> Result<TransactionTable> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .context("worksheet is empty")?
        .iter()
        .map(|c| clean_header(&c.to_string()))
        .collect();
    let cols = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();
    for (i, row) in rows.enumerate() {
        if row.iter().all(sheet_cell_is_blank) {
            continue;
        }
        let cell = |idx: usize| row.get(idx).unwrap_or(EMPTY_CELL);
        records.push(build_record(
            i + 1,
            sheet_date(cell(cols.date)),
            sheet_text(cell(cols.account)),
            sheet_text(cell(cols.expense_type)),
            sheet_value(cell(cols.value)),
        )?);
    }

    Ok(TransactionTable::from_records(records))
}

const EMPTY_CELL: &Data = &Data::Empty;

fn sheet_cell_is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn sheet_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_datetime().map(|dt| dt.date()),
        Data::Float(f) => excel_serial_to_date(*f),
        Data::Int(i) => excel_serial_to_date(*i as f64),
        Data::String(s) => parse_date_text(s),
        _ => None,
    }
}

fn sheet_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => account_text_from_f64(*f),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

fn sheet_value(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f).filter(|v| v.is_finite()),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_value_text(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, extra columns ignored.
fn load_csv(path: &Path) -> Result<TransactionTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(clean_header)
        .collect();
    let cols = ColumnIndex::locate(&headers)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.with_context(|| format!("CSV row {row}"))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();
        records.push(build_record(
            row,
            parse_date_text(field(cols.date)),
            field(cols.account).to_string(),
            field(cols.expense_type).to_string(),
            parse_value_text(field(cols.value)),
        )?);
    }

    Ok(TransactionTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the four required columns.
///
/// Columns are cast rather than matched exactly, so files written by
/// dataframe tools (`datetime64[ns]` dates, `int64` account codes) load as-is.
fn load_parquet(path: &Path) -> Result<TransactionTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &str| -> Result<ArrayRef> {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow!("missing '{name}' column"))?;
            Ok(batch.column(idx).clone())
        };

        let dates = cast(&column(COL_DATE)?, &DataType::Date32)
            .with_context(|| format!("'{COL_DATE}' is not a date column"))?;
        let dates = dates.as_primitive::<Date32Type>();
        let accounts = text_column(&column(COL_ACCOUNT)?)?;
        let types = text_column(&column(COL_TYPE)?)?;
        let values = cast(&column(COL_VALUE)?, &DataType::Float64)
            .with_context(|| format!("'{COL_VALUE}' is not numeric"))?;
        let values = values.as_primitive::<Float64Type>();

        for i in 0..batch.num_rows() {
            row += 1;
            let blank = dates.is_null(i)
                && values.is_null(i)
                && accounts[i].is_empty()
                && types[i].is_empty();
            if blank {
                continue;
            }
            let date = if dates.is_null(i) { None } else { dates.value_as_date(i) };
            let value = if values.is_null(i) {
                None
            } else {
                Some(values.value(i)).filter(|v| v.is_finite())
            };
            records.push(build_record(
                row,
                date,
                accounts[i].clone(),
                types[i].clone(),
                value,
            )?);
        }
    }

    Ok(TransactionTable::from_records(records))
}

/// Read any scalar Arrow column as text; nulls become empty strings.
fn text_column(col: &ArrayRef) -> Result<Vec<String>> {
    if matches!(col.data_type(), DataType::Float32 | DataType::Float64) {
        let floats = cast(col, &DataType::Float64).context("casting column to float")?;
        let floats = floats.as_primitive::<Float64Type>();
        return Ok((0..floats.len())
            .map(|i| {
                if floats.is_null(i) {
                    String::new()
                } else {
                    account_text_from_f64(floats.value(i))
                }
            })
            .collect());
    }

    let strings = cast(col, &DataType::Utf8).context("casting column to text")?;
    let strings = strings.as_string::<i32>();
    Ok((0..strings.len())
        .map(|i| {
            if strings.is_null(i) {
                String::new()
            } else {
                strings.value(i).trim().to_string()
            }
        })
        .collect())
}
