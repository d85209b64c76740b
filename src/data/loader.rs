use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Date32Type, Float32Type, Float64Type, Int32Type, Int64Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{LoadError, ShapeError};
use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by data rows (OWID exports)
/// * `.parquet` – flat columns of strings, numbers, booleans or dates
/// * `.json`    – `[{ "location": "...", "date": "...", ... }, ...]`
///
/// Column names have spaces replaced by underscores. The file is closed
/// before this returns, on success and on error.
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedFormat {
            ext: other.to_string(),
        }),
    }?;

    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

/// `"total cases"` → `"total_cases"`.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

fn open(path: &Path) -> Result<File, LoadError> {
    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => io_error(source),
    })?;
    // Opening a directory succeeds on Unix; reading it does not.
    if file.metadata().map_err(io_error)?.is_dir() {
        return Err(io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "is a directory",
        )));
    }
    Ok(file)
}

fn ragged(path: &Path, row: usize, err: ShapeError) -> LoadError {
    LoadError::Ragged {
        path: path.to_path_buf(),
        row,
        expected: err.expected,
        found: err.found,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Rows are numbered from 1 (the first row after the header).
fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let headers = reader.headers().map_err(|e| csv_error(path, e))?;
    if headers.is_empty() {
        return Err(LoadError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    let columns: Vec<String> = headers.iter().map(normalize_column_name).collect();
    log::debug!("CSV columns: {columns:?}");

    let mut table = Table::new(columns);
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let row = record.iter().map(CellValue::parse).collect();
        table
            .push_row(row)
            .map_err(|e| ragged(path, row_no + 1, e))?;
    }
    Ok(table)
}

fn csv_error(path: &Path, err: csv::Error) -> LoadError {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return LoadError::Ragged {
            path: path.to_path_buf(),
            row: pos.as_ref().map_or(0, |p| p.record() as usize),
            expected: *expected_len as usize,
            found: *len as usize,
        };
    }
    LoadError::Csv {
        path: path.to_path_buf(),
        source: err,
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). The first record
/// fixes the column set; every later record must carry the same keys.
fn load_json(path: &Path) -> Result<Table, LoadError> {
    let file = open(path)?;
    let json_error = |reason: String| LoadError::Json {
        path: path.to_path_buf(),
        reason,
    };

    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| json_error(e.to_string()))?;
    let records = root
        .as_array()
        .ok_or_else(|| json_error("expected a top-level array".into()))?;

    let Some(first) = records.first() else {
        return Err(LoadError::MissingHeader {
            path: path.to_path_buf(),
        });
    };
    let columns: Vec<String> = first
        .as_object()
        .ok_or_else(|| json_error("row 1 is not an object".into()))?
        .keys()
        .map(|k| normalize_column_name(k))
        .collect();

    let mut table = Table::new(columns.clone());
    for (i, rec) in records.iter().enumerate() {
        let row_no = i + 1;
        let obj = rec
            .as_object()
            .ok_or_else(|| json_error(format!("row {row_no} is not an object")))?;

        let by_name: BTreeMap<String, &JsonValue> = obj
            .iter()
            .map(|(k, v)| (normalize_column_name(k), v))
            .collect();
        if by_name.len() != columns.len() || columns.iter().any(|c| !by_name.contains_key(c)) {
            return Err(LoadError::Ragged {
                path: path.to_path_buf(),
                row: row_no,
                expected: columns.len(),
                found: by_name.len(),
            });
        }

        let row = columns.iter().map(|c| json_to_cell(by_name[c])).collect();
        table.push_row(row).map_err(|e| ragged(path, row_no, e))?;
    }
    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat columns. Works with files written by
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table, LoadError> {
    let parquet_error = |reason: String| LoadError::Parquet {
        path: path.to_path_buf(),
        reason,
    };

    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| parquet_error(e.to_string()))?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| normalize_column_name(f.name()))
        .collect();
    let reader = builder.build().map_err(|e| parquet_error(e.to_string()))?;

    let mut table = Table::new(columns);
    let mut row_no = 0;
    for batch_result in reader {
        let batch = batch_result.map_err(|e| parquet_error(e.to_string()))?;
        for row in 0..batch.num_rows() {
            row_no += 1;
            let cells = batch
                .columns()
                .iter()
                .map(|col| arrow_cell(col, row))
                .collect();
            table.push_row(cells).map_err(|e| ragged(path, row_no, e))?;
        }
    }
    Ok(table)
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Number(a.value(row) as f64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Number(a.value(row) as f64)),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Number(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Number(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        DataType::Date32 => col
            .as_primitive_opt::<Date32Type>()
            .and_then(|a| a.value_as_date(row))
            .map(|d| CellValue::Text(d.format("%Y-%m-%d").to_string())),
        other => {
            log::debug!("Reading {other:?} column as text");
            arrow::util::display::array_value_to_string(col, row)
                .ok()
                .map(CellValue::Text)
        }
    };
    cell.unwrap_or(CellValue::Null)
}
