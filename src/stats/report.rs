use std::fmt;

use serde::Serialize;

/// Round to 2 decimals, halves toward +∞.
pub fn round2(v: f64) -> f64 {
    (v * 100.0 + 0.5).floor() / 100.0
}

/// `"< .0001"` below 0.0001, else 4 fixed decimals.
pub fn format_p(p: f64) -> String {
    if p < 0.0001 {
        "< .0001".to_string()
    } else {
        format!("{p:.4}")
    }
}

// ---------------------------------------------------------------------------
// ReportValue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Number(f64),
    Count(usize),
    Text(String),
}

impl ReportValue {
    /// A statistic for display: rounded to 2 decimals. Infinite values
    /// become the text `∞` / `-∞` so they survive JSON output.
    pub fn rounded(v: f64) -> Self {
        if v.is_infinite() {
            ReportValue::Text(if v > 0.0 { "∞" } else { "-∞" }.to_string())
        } else {
            ReportValue::Number(round2(v))
        }
    }

    pub fn p_value(p: f64) -> Self {
        ReportValue::Text(format_p(p))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ReportValue::Number(v) => Some(*v),
            ReportValue::Count(n) => Some(*n as f64),
            ReportValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ReportValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportValue::Number(v) if v.is_infinite() => {
                write!(f, "{}", if *v > 0.0 { "∞" } else { "-∞" })
            }
            ReportValue::Number(v) => write!(f, "{v}"),
            ReportValue::Count(n) => write!(f, "{n}"),
            ReportValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<usize> for ReportValue {
    fn from(n: usize) -> Self {
        ReportValue::Count(n)
    }
}

impl From<String> for ReportValue {
    fn from(s: String) -> Self {
        ReportValue::Text(s)
    }
}

// ---------------------------------------------------------------------------
// TestReport – ordered label → value mapping plus a description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub label: String,
    pub value: ReportValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub label: String,
    pub entries: Vec<ReportEntry>,
}

impl TestReport {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry, replacing the value of an existing label in place.
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<ReportValue>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => entry.value = value,
            None => self.entries.push(ReportEntry { label, value }),
        }
    }

    pub fn with(mut self, label: impl Into<String>, value: impl Into<ReportValue>) -> Self {
        self.push(label, value);
        self
    }

    pub fn get(&self, label: &str) -> Option<&ReportValue> {
        self.entries.iter().find(|e| e.label == label).map(|e| &e.value)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;
        let width = self.entries.iter().map(|e| e.label.chars().count()).max().unwrap_or(0);
        for e in &self.entries {
            writeln!(f, "  {:<width$}  {}", e.label, e.value)?;
        }
        Ok(())
    }
}
