use crate::cli::args::OutputFormat;
use crate::core::table::TableModel;
use crate::domain::config::{ColumnKind, RowdeskConfig};
use serde_json;
use std::io;
use tabled::{builder::Builder, Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_records(&self, table: &TableModel) -> Result<(), OutputError>;
    fn write_config(&self, config: &RowdeskConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Table formatting error: {0}")]
    TableError(String),
}

impl From<OutputError> for crate::domain::error::RowdeskError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render records in this writer's format
    pub fn render_records(&self, table: &TableModel) -> Result<String, OutputError> {
        let headers: Vec<String> = table.columns().iter().map(|c| c.name.clone()).collect();

        let rendered = match self.format {
            OutputFormat::Text => {
                let mut out = String::new();
                for record in table.visible_records() {
                    let line = headers
                        .iter()
                        .zip(record)
                        .map(|(name, value)| format!("{}: {}", name, value))
                        .collect::<Vec<_>>()
                        .join(", ");
                    out.push_str(&line);
                    out.push('\n');
                }
                out.push_str(&format!("{} of {} rows\n", table.visible_count(), table.row_count()));
                out
            }
            OutputFormat::Json => {
                let rows: Vec<serde_json::Map<String, serde_json::Value>> = table
                    .visible_records()
                    .map(|record| {
                        headers
                            .iter()
                            .cloned()
                            .zip(record.iter().map(serde_json::to_value))
                            .map(|(name, value)| value.map(|v| (name, v)))
                            .collect::<Result<_, _>>()
                    })
                    .collect::<Result<_, _>>()?;
                let mut out = serde_json::to_string_pretty(&rows)?;
                out.push('\n');
                out
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(headers.clone());
                for record in table.visible_records() {
                    builder.push_record(record.iter().map(|v| v.to_string()));
                }
                format!("{}\n", builder.build())
            }
            OutputFormat::Csv => csv_text(
                &headers,
                table.visible_records().map(|record| record.iter().map(|v| v.to_string()).collect()),
            )?,
        };

        Ok(rendered)
    }

    /// Column declarations as CSV, one row per column
    pub fn render_config_csv(config: &RowdeskConfig) -> Result<String, OutputError> {
        csv_text(
            ["name", "kind", "ratio", "min_width"],
            config.data.columns.iter().map(|column| {
                vec![
                    column.name.clone(),
                    kind_name(column.kind).to_string(),
                    column.ratio.to_string(),
                    column.min_width.to_string(),
                ]
            }),
        )
    }
}

fn csv_text<H, I>(headers: H, rows: I) -> Result<String, OutputError>
where
    H: IntoIterator,
    H::Item: AsRef<[u8]>,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::TableError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| OutputError::TableError(e.to_string()))
}

impl OutputWriter for ConsoleWriter {
    fn write_records(&self, table: &TableModel) -> Result<(), OutputError> {
        print!("{}", self.render_records(table)?);
        Ok(())
    }

    fn write_config(&self, config: &RowdeskConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                println!("Rowdesk Configuration:");
                println!("  Log level: {}", config.global.log_level);
                if let Some(dir) = &config.global.log_dir {
                    println!("  Log dir: {}", dir.display());
                }
                println!("  Log files kept: {}", config.global.log_max_files);
                println!("  Data: {} (delimiter '{}')", config.data.path.display(), config.data.delimiter);
                println!("  Columns:");
                for column in &config.data.columns {
                    println!("    {} ({}, ratio {}, min {})",
                        column.name,
                        kind_name(column.kind),
                        column.ratio,
                        column.min_width
                    );
                }
                println!("  Editor fields:");
                for field in &config.editor.fields {
                    let masked = if field.masked { ", masked" } else { "" };
                    println!("    {} (limit {}{})", field.label, field.char_limit, masked);
                }
                println!("  Keys:");
                for (action, key) in config.keys.entries() {
                    println!("    {}: {}", action, key);
                }
            }
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(config)?;
                println!("{}", output);
            }
            OutputFormat::Table => {
                let table_data: Vec<ColumnTableRow> = config.data.columns.iter().map(ColumnTableRow::from).collect();
                println!("{}", Table::new(table_data));
            }
            OutputFormat::Csv => {
                print!("{}", Self::render_config_csv(config)?);
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "message": message,
                    "level": "info"
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            _ => {
                println!("{}", message);
            }
        }
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "error": error,
                    "level": "error"
                });
                eprintln!("{}", serde_json::to_string_pretty(&output)?);
            }
            _ => {
                eprintln!("Error: {}", error);
            }
        }
        Ok(())
    }
}

fn kind_name(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Integer => "integer",
        ColumnKind::Text => "text",
    }
}

/// Table row for column declarations
#[derive(Tabled)]
struct ColumnTableRow {
    name: String,
    kind: String,
    ratio: u16,
    min_width: u16,
}

impl From<&crate::domain::config::ColumnSpec> for ColumnTableRow {
    fn from(column: &crate::domain::config::ColumnSpec) -> Self {
        Self {
            name: column.name.clone(),
            kind: kind_name(column.kind).to_string(),
            ratio: column.ratio,
            min_width: column.min_width,
        }
    }
}
