//! Record writer

use crate::error::{Error, Result};
use crate::types::{JsonValue, Record};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// How records are rendered
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Indented JSON array
    Pretty,
}

/// Writes records to any `Write` sink
pub struct RecordWriter<W: Write> {
    sink: W,
    format: OutputFormat,
    field: Option<String>,
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer for the given format
    pub fn new(sink: W, format: OutputFormat) -> Self {
        Self {
            sink,
            format,
            field: None,
        }
    }

    /// Emit only this dotted field, one value per line
    ///
    /// Takes precedence over the format.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Write all records and flush
    ///
    /// Returns the number of records written.
    pub fn write_all(&mut self, records: &[Record]) -> Result<usize> {
        match (&self.field, self.format) {
            (Some(field), _) => {
                for record in records {
                    let line = extract_field(record, field)
                        .map(render_scalar)
                        .unwrap_or_default();
                    writeln!(self.sink, "{line}").map_err(write_error)?;
                }
            }
            (None, OutputFormat::Json) => {
                for record in records {
                    serde_json::to_writer(&mut self.sink, record).map_err(write_error)?;
                    writeln!(self.sink).map_err(write_error)?;
                }
            }
            (None, OutputFormat::Pretty) => {
                serde_json::to_writer_pretty(&mut self.sink, records).map_err(write_error)?;
                writeln!(self.sink).map_err(write_error)?;
            }
        }

        self.sink.flush().map_err(write_error)?;
        Ok(records.len())
    }

    /// Give back the sink
    pub fn into_inner(self) -> W {
        self.sink
    }
}

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::output(format!("Failed to write records: {error}"))
}

/// Look up a dotted path such as `delivery-status.code`
pub fn extract_field<'a>(record: &'a Record, path: &str) -> Option<&'a JsonValue> {
    let mut parts = path.split('.');
    let mut current = record.get(parts.next()?)?;
    for part in parts {
        match current {
            JsonValue::Object(map) => current = map.get(part)?,
            _ => return None,
        }
    }
    Some(current)
}

/// Strings are written bare, null as empty, everything else as JSON
fn render_scalar(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
