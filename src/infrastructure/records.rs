use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::table::{Record, Value};
use crate::domain::config::{ColumnKind, ColumnSpec};
use crate::domain::error::{RowdeskError, RowdeskResult};

/// Load a headed CSV file. Columns are matched to headers by name.
pub fn load_records(path: &Path, delimiter: u8, columns: &[ColumnSpec]) -> RowdeskResult<Vec<Record>> {
    let file = File::open(path).map_err(|e| {
        RowdeskError::data(format!("Failed to open data file {}: {}", path.display(), e))
    })?;
    let records = read_records(file, delimiter, columns)?;
    tracing::info!(path = %path.display(), rows = records.len(), "records loaded");
    Ok(records)
}

pub fn read_records<R: Read>(reader: R, delimiter: u8, columns: &[ColumnSpec]) -> RowdeskResult<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let positions = columns
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h.trim() == column.name)
                .ok_or_else(|| RowdeskError::data(format!("Missing column '{}' in CSV header", column.name)))
        })
        .collect::<RowdeskResult<Vec<usize>>>()?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let record = columns
            .iter()
            .zip(&positions)
            .map(|(column, &position)| {
                let raw = row.get(position).unwrap_or("");
                parse_value(raw, column).map_err(|message| {
                    RowdeskError::data(format!("Line {}, column '{}': {}", line, column.name, message))
                })
            })
            .collect::<RowdeskResult<Record>>()?;

        records.push(record);
    }

    Ok(records)
}

fn parse_value(raw: &str, column: &ColumnSpec) -> Result<Value, String> {
    match column.kind {
        ColumnKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| format!("'{}' is not an integer ({})", raw, e)),
        ColumnKind::Text => Ok(Value::Text(raw.to_string())),
    }
}
