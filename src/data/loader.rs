use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Float32Type, Float64Type, Int32Type, Int64Type,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{columns, JobDataset, Listing};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the scraped export, one listing per row (primary format)
/// * `.json`    – `[{ "Tanggal": "...", "Lokasi": "...", ... }, ...]`
/// * `.parquet` – same columns as the CSV, string or numeric typed
///
/// Rows whose date cannot be parsed are dropped.  A missing column or an
/// unreadable file fails the whole load.
pub fn load_file(path: &Path) -> Result<JobDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedExtension(other.to_string()).into()),
    };

    let total = rows.len();
    let listings: Vec<Listing> = rows.into_iter().filter_map(RawRow::into_listing).collect();
    let dropped = total - listings.len();
    if dropped > 0 {
        log::warn!("Dropped {dropped} of {total} rows with unparseable dates");
    }
    log::info!("Loaded {} listings from {}", listings.len(), path.display());

    Ok(JobDataset::from_listings(listings))
}

// ---------------------------------------------------------------------------
// Format-independent cell / row representation
// ---------------------------------------------------------------------------

/// One source cell before normalisation.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Missing,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Missing
        } else {
            Cell::Text(s.to_string())
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Text(s) => Some(s),
            Cell::Number(n) if n.is_nan() => None,
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", n as i64)),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Date(d) => Some(d.to_string()),
        }
    }

    fn to_number(&self) -> Option<f64> {
        let n = match self {
            Cell::Number(n) => *n,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Missing | Cell::Date(_) => return None,
        };
        (!n.is_nan()).then_some(n)
    }

    fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::Text(s) => parse_date(s),
            Cell::Missing | Cell::Number(_) => None,
        }
    }
}

/// The eight required cells of one row, in `columns::REQUIRED` order.
struct RawRow([Cell; 8]);

impl RawRow {
    fn into_listing(self) -> Option<Listing> {
        let [date, company, location, experience, career, salary_min, salary_max, description] =
            self.0;
        let posted_date = date.to_date()?;
        Some(Listing::new(
            posted_date,
            company.into_text(),
            location.into_text(),
            experience.into_text(),
            career.into_text(),
            salary_min.to_number(),
            salary_max.to_number(),
            description.into_text(),
        ))
    }
}

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%d %b %Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a posting date, truncating any time component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with at least the required column names, in any
/// order.  Extra columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let mut indices = [0usize; 8];
    for (slot, name) in indices.iter_mut().zip(columns::REQUIRED) {
        *slot = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name)
            .ok_or(DataError::MissingColumn(name))?;
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells = indices.map(|i| Cell::from_text(record.get(i).unwrap_or("")));
        rows.push(RawRow(cells));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Tanggal": "2024-01-01", "Perusahaan": "PT Maju", "Gaji Minimum": 4000000, ... },
///   ...
/// ]
/// ```
///
/// Every record must carry every required key; `null` marks a missing value.
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or(DataError::NotAnObject { row: i })?;

        let mut cells: [Cell; 8] = std::array::from_fn(|_| Cell::Missing);
        for (cell, name) in cells.iter_mut().zip(columns::REQUIRED) {
            let val = obj.get(name).ok_or(DataError::MissingColumn(name))?;
            *cell = json_to_cell(val);
        }
        rows.push(RawRow(cells));
    }
    Ok(rows)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Missing,
        JsonValue::String(s) => Cell::from_text(s),
        JsonValue::Number(n) => n.as_f64().map_or(Cell::Missing, Cell::Number),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same columns as the CSV export.
///
/// The schema is checked once, before any batch is read, so a file with
/// the wrong columns fails even when it holds no rows.
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    let mut indices = [0usize; 8];
    for (slot, name) in indices.iter_mut().zip(columns::REQUIRED) {
        *slot = schema
            .index_of(name)
            .map_err(|_| DataError::MissingColumn(name))?;
        check_arrow_type(name, schema.field(*slot).data_type())?;
    }

    let reader = builder.build().context("building parquet reader")?;
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let cols = indices.map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let cells = cols.map(|col| arrow_cell(col, row));
            rows.push(RawRow(cells));
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Accepted Arrow types per column:
/// * `Tanggal` – strings or Date32/Date64
/// * salaries  – strings or numbers
/// * the rest  – strings
fn check_arrow_type(column: &'static str, data_type: &DataType) -> Result<(), DataError> {
    let text = matches!(data_type, DataType::Utf8 | DataType::LargeUtf8 | DataType::Null);
    let ok = match column {
        columns::DATE => text || matches!(data_type, DataType::Date32 | DataType::Date64),
        columns::SALARY_MIN | columns::SALARY_MAX => {
            text || matches!(
                data_type,
                DataType::Int32 | DataType::Int64 | DataType::Float32 | DataType::Float64
            )
        }
        _ => text,
    };
    if ok {
        Ok(())
    } else {
        Err(DataError::UnsupportedColumnType {
            column,
            found: format!("{data_type:?}"),
        })
    }
}

/// Extract a single cell from an Arrow column at a given row.
/// The column type has already been checked by [`check_arrow_type`].
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Missing;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::from_text(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Cell::from_text(col.as_string::<i64>().value(row)),
        DataType::Int32 => Cell::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => Cell::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => Cell::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .value_as_date(row)
            .map_or(Cell::Missing, Cell::Date),
        DataType::Date64 => col
            .as_primitive::<Date64Type>()
            .value_as_date(row)
            .map_or(Cell::Missing, Cell::Date),
        _ => Cell::Missing,
    }
}
