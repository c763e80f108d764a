use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::clean::{clean, RawTable};
use super::error::LoadError;
use super::model::Table;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Result of a load: always a table, plus the error that emptied it, if any.
#[derive(Debug)]
pub struct LoadOutcome {
    pub table: Table,
    pub error: Option<LoadError>,
}

/// Load and clean a dataset. Failures never escape: they come back as an
/// empty table together with the error.
pub fn load(path: &Path) -> LoadOutcome {
    match load_file(path) {
        Ok(table) => {
            log::info!(
                "Loaded {} tests from {} with columns {:?}",
                table.len(),
                path.display(),
                table.schema().columns
            );
            LoadOutcome { table, error: None }
        }
        Err(e) => {
            log::error!("Error loading data from {}: {e}", path.display());
            LoadOutcome {
                table: Table::empty(),
                error: Some(e),
            }
        }
    }
}

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one test per line
/// * `.json`    – `[{ "WEAPON SOURCE COUNTRY": "USA", "Date.Year": 1945, ... }, ...]`
/// * `.parquet` – flat columns, any primitive types
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };
    clean(raw)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Rows may be short or long: missing trailing cells are absent, extra cells
/// are dropped. Bytes that are not UTF-8 are replaced rather than rejected.
fn read_csv(path: &Path) -> Result<RawTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_from(file)
}

fn read_csv_from<R: std::io::Read>(input: R) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result?;
        let row = (0..headers.len())
            .map(|i| record.get(i).map(|c| String::from_utf8_lossy(c).into_owned()))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Columns appear in first-seen order across records (serde_json is built
/// with `preserve_order`, so object keys keep their file order).
fn read_json(path: &Path) -> Result<RawTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_json_str(&text)
}

fn read_json_str(text: &str) -> Result<RawTable, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).and_then(json_to_text))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

/// Floats go through `f64`'s `Display`, so `1945.0` becomes `"1945"` just
/// like an Arrow float cell.
fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<RawTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(headers.len());
            for col in batch.columns() {
                cells.push(cell_text(col, row)?);
            }
            rows.push(cells);
        }
    }

    Ok(RawTable { headers, rows })
}

/// Render one Arrow cell as text. Integral floats print without a fraction
/// so year columns stored as float still parse as integers.
fn cell_text(col: &ArrayRef, row: usize) -> Result<Option<String>, LoadError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row).to_string(),
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row).to_string(),
        DataType::Boolean => col.as_boolean().value(row).to_string(),
        _ => array_value_to_string(col, row)?,
    };
    Ok(Some(text))
}
