use std::collections::BTreeMap;

use log::debug;

use super::model::{parse_number, Column, ColumnKind, Row, Table, Value};
use super::schema::{infer_kind_with, DEFAULT_NUMERIC_THRESHOLD};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse comma-separated text with the default inference threshold.
///
/// Returns [`Table::empty`] when the text has fewer than two non-blank lines.
pub fn parse(text: &str) -> Table {
    TableParser::default().parse(text)
}

/// Delimited-text parser carrying the schema inference threshold.
#[derive(Debug, Clone, Copy)]
pub struct TableParser {
    pub numeric_threshold: f64,
}

impl Default for TableParser {
    fn default() -> Self {
        Self {
            numeric_threshold: DEFAULT_NUMERIC_THRESHOLD,
        }
    }
}

impl TableParser {
    pub fn with_threshold(numeric_threshold: f64) -> Self {
        Self { numeric_threshold }
    }

    pub fn parse(&self, text: &str) -> Table {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() < 2 {
            debug!("parse: {} non-blank line(s), nothing to load", lines.len());
            return Table::empty();
        }

        let headers: Vec<String> = lines[0].split(',').map(header_name).collect();
        let raw_rows: Vec<Vec<String>> = lines[1..].iter().map(|l| split_fields(l)).collect();

        self.build(headers, raw_rows)
    }

    /// Build a typed table from header names and raw cell strings.
    ///
    /// Shared by every text source so that inference always runs over the
    /// raw strings before any cell is converted.
    pub fn build(&self, headers: Vec<String>, raw_rows: Vec<Vec<String>>) -> Table {
        // Last occurrence of a header wins, but keeps the first slot.
        let mut slots: Vec<(String, usize)> = Vec::with_capacity(headers.len());
        for (idx, name) in headers.into_iter().enumerate() {
            match slots.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = idx,
                None => slots.push((name, idx)),
            }
        }

        let cell = |row: &[String], idx: usize| -> String {
            row.get(idx).cloned().unwrap_or_default()
        };

        let columns: Vec<Column> = slots
            .iter()
            .map(|(name, idx)| {
                let raw: Vec<String> = raw_rows.iter().map(|r| cell(r, *idx)).collect();
                Column::new(name.clone(), infer_kind_with(&raw, self.numeric_threshold))
            })
            .collect();

        let rows: Vec<Row> = raw_rows
            .iter()
            .map(|raw| {
                let mut values = BTreeMap::new();
                for (col, (_, idx)) in columns.iter().zip(&slots) {
                    let text = cell(raw, *idx);
                    let value = match col.kind {
                        ColumnKind::Numeric => match parse_number(&text) {
                            Some(v) => Value::Number(v),
                            None => Value::Text(text),
                        },
                        ColumnKind::Categorical => Value::Text(text),
                    };
                    values.insert(col.name.clone(), value);
                }
                Row { values }
            })
            .collect();

        debug!(
            "parse: {} columns ({} numeric), {} rows",
            columns.len(),
            columns.iter().filter(|c| c.kind == ColumnKind::Numeric).count(),
            rows.len()
        );
        Table::from_parts(columns, rows)
    }
}

// ---------------------------------------------------------------------------
// Field splitting
// ---------------------------------------------------------------------------

/// Header cells are trimmed and lose one surrounding `"` or `'`.
fn header_name(raw: &str) -> String {
    let s = raw.trim();
    let is_quote = |c: char| c == '"' || c == '\'';
    let s = s.strip_prefix(is_quote).unwrap_or(s);
    let s = s.strip_suffix(is_quote).unwrap_or(s);
    s.to_string()
}

/// Split a data line on commas outside double quotes.
///
/// Every `"` toggles quoting and is dropped; there is no escape sequence.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
