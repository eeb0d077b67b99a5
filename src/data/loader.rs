use std::path::Path;

use anyhow::{bail, Context, Result};
use log::debug;
use serde_json::Value as JsonValue;

use super::model::Table;
use super::parser::TableParser;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma-separated text, first line is the header
/// * `.json`        – `[{ "name": "Alice", "age": 28, ... }, ...]`
///
/// A file that yields no columns or no rows is an error here, unlike
/// [`parse`](super::parser::parse) which returns the empty table.
pub fn load_file(path: &Path, parser: &TableParser) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    debug!("loading {} as .{ext}", path.display());
    let table = match ext.as_str() {
        "csv" | "txt" => load_csv(path, parser)?,
        "json" => load_json(path, parser)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    if !table.has_schema() || table.is_empty() {
        bail!("could not parse {}: check the format", path.display());
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, parser: &TableParser) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading CSV file")?;
    Ok(parser.parse(&text))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "name": "Alice", "group": "A", "score": 82 },
///   { "name": "Bob",   "group": "B", "score": null }
/// ]
/// ```
///
/// Keys are collected in first-seen order. Every cell is turned back into
/// its raw text and typed through the same inference as CSV input.
fn load_json(path: &Path, parser: &TableParser) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    json_records_to_table(&text, parser)
}

pub(crate) fn json_records_to_table(text: &str, parser: &TableParser) -> Result<Table> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let raw_rows: Vec<Vec<String>> = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_raw).unwrap_or_default())
                .collect()
        })
        .collect();

    if headers.is_empty() {
        return Ok(Table::empty());
    }
    Ok(parser.build(headers, raw_rows))
}

fn json_to_raw(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
