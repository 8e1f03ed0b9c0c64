// CSV export of search and enrichment records

use ::csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arguments of the `export_to_csv` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCsvArgs {
    pub data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl ExportCsvArgs {
    pub fn render(&self) -> Result<String, ::csv::Error> {
        to_csv(&self.data, self.columns.as_deref())
    }
}

/// Flatten records into CSV text.
///
/// Columns come from `columns` when given, otherwise from the key order of
/// the first record. Nested objects and arrays are written as JSON text.
/// An empty input yields an empty string, not a lone header row. Lines are
/// joined with `\n` and there is no trailing newline.
pub fn to_csv(
    records: &[Map<String, Value>],
    columns: Option<&[String]>,
) -> Result<String, ::csv::Error> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };

    let columns: Vec<&str> = match columns {
        Some(columns) => columns.iter().map(String::as_str).collect(),
        None => first.keys().map(String::as_str).collect(),
    };

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(csv_line(&columns)?);

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| cell(record.get(*column)))
            .collect();
        lines.push(csv_line(&row)?);
    }

    Ok(lines.join("\n"))
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        // Objects and arrays render as compact JSON, scalars as themselves
        Some(other) => other.to_string(),
    }
}

/// Write one row. Fields are quoted only when they hold a comma, a quote,
/// `\n` or `\r`, with inner quotes doubled.
fn csv_line<T: AsRef<[u8]>>(fields: &[T]) -> Result<String, ::csv::Error> {
    // A row made of a single empty cell stays an empty line
    if let [only] = fields {
        if only.as_ref().is_empty() {
            return Ok(String::new());
        }
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(fields)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ::csv::Error::from(e.into_error()))?;
    let line = String::from_utf8_lossy(&bytes);
    Ok(line.strip_suffix("\r\n").unwrap_or(&line).to_string())
}
