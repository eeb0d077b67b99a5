use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkbenchError};

// ---------------------------------------------------------------------------
// ColumnKind / Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// A named column. The kind is fixed when the table is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Numeric)
    }

    pub fn categorical(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Categorical)
    }
}

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A cell value. Numeric columns may still hold `Text` for cells that did not
/// parse, so consumers filter by the value itself, not by the column kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(_) => None,
        }
    }
}

/// Parse a trimmed cell as a finite real number.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Row – one record
// ---------------------------------------------------------------------------

/// One record: column_name → value. Holds an entry for every column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub values: BTreeMap<String, Value>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded dataset
// ---------------------------------------------------------------------------

/// Ordered columns plus ordered rows. The schema never changes once built;
/// re-importing replaces the whole table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// The "could not parse" sentinel: no columns, no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Manual mode: define the schema up front, with zero rows.
    ///
    /// Names are trimmed and blank names dropped; repeated names are rejected.
    pub fn with_schema(columns: Vec<Column>) -> Result<Self> {
        let mut kept: Vec<Column> = Vec::with_capacity(columns.len());
        for col in columns {
            let name = col.name.trim();
            if name.is_empty() {
                continue;
            }
            if kept.iter().any(|c| c.name == name) {
                return Err(WorkbenchError::DuplicateColumn(name.to_string()));
            }
            kept.push(Column::new(name, col.kind));
        }
        if kept.is_empty() {
            return Err(WorkbenchError::EmptySchema);
        }
        Ok(Self {
            columns: kept,
            rows: Vec::new(),
        })
    }

    /// Manual mode: append one row from raw text entries.
    ///
    /// Every numeric column needs a valid number; on failure nothing is added.
    /// Categorical columns missing from `entries` get an empty string.
    pub fn append_row(&mut self, entries: &BTreeMap<String, String>) -> Result<()> {
        let mut row = Row::default();
        for col in &self.columns {
            let raw = entries.get(&col.name).map(|s| s.trim()).unwrap_or("");
            let value = match col.kind {
                ColumnKind::Numeric => match parse_number(raw) {
                    Some(v) => Value::Number(v),
                    None => {
                        return Err(WorkbenchError::InvalidNumeric {
                            column: col.name.clone(),
                            value: raw.to_string(),
                        })
                    }
                },
                ColumnKind::Categorical => Value::Text(raw.to_string()),
            };
            row.values.insert(col.name.clone(), value);
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True for the parse-failure sentinel.
    pub fn has_schema(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns_of_kind(&self, kind: ColumnKind) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(move |c| c.kind == kind)
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns_of_kind(ColumnKind::Numeric)
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns_of_kind(ColumnKind::Categorical)
    }

    /// The NumericVector of a column: every numeric cell in row order.
    /// Blank or malformed cells are skipped, never read as zero.
    pub fn numeric_values(&self, column: &str) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.get(column).and_then(Value::as_f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn schema_drops_blank_names_and_trims() {
        let table = Table::with_schema(vec![
            Column::numeric("  score "),
            Column::categorical("   "),
            Column::categorical("group"),
        ])
        .unwrap();
        let names: Vec<&str> = table.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["score", "group"]);
        assert!(table.is_empty());
    }

    #[test]
    fn schema_rejects_empty_and_duplicates() {
        assert_eq!(
            Table::with_schema(vec![Column::numeric(" ")]),
            Err(WorkbenchError::EmptySchema)
        );
        assert_eq!(
            Table::with_schema(vec![Column::numeric("a"), Column::categorical("a")]),
            Err(WorkbenchError::DuplicateColumn("a".into()))
        );
    }

    #[test]
    fn append_row_validates_numeric_fields() {
        let mut table =
            Table::with_schema(vec![Column::numeric("score"), Column::categorical("group")])
                .unwrap();

        table
            .append_row(&entries(&[("score", " 12.5 "), ("group", "A")]))
            .unwrap();
        let err = table
            .append_row(&entries(&[("score", "abc"), ("group", "B")]))
            .unwrap_err();
        assert_eq!(
            err,
            WorkbenchError::InvalidNumeric {
                column: "score".into(),
                value: "abc".into()
            }
        );
        assert!(table.append_row(&entries(&[("group", "B")])).is_err());

        table.append_row(&entries(&[("score", "3")])).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].get("group"), Some(&Value::Text(String::new())));
        assert_eq!(table.numeric_values("score"), vec![12.5, 3.0]);
    }

    #[test]
    fn numeric_values_skip_text_cells() {
        let mut row_a = Row::default();
        row_a.values.insert("x".into(), Value::Number(1.0));
        let mut row_b = Row::default();
        row_b.values.insert("x".into(), Value::Text("n/a".into()));
        let mut row_c = Row::default();
        row_c.values.insert("x".into(), Value::Number(3.0));
        let table = Table::from_parts(vec![Column::numeric("x")], vec![row_a, row_b, row_c]);
        assert_eq!(table.numeric_values("x"), vec![1.0, 3.0]);
        assert!(table.numeric_values("missing").is_empty());
    }

    #[test]
    fn value_display_uses_shortest_form() {
        assert_eq!(Value::Number(82.0).to_string(), "82");
        assert_eq!(Value::Number(4.2).to_string(), "4.2");
        assert_eq!(Value::Text("North".into()).to_string(), "North");
    }

    #[test]
    fn parse_number_rejects_non_finite() {
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(""), None);
    }
}
