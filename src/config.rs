use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::schema::DEFAULT_NUMERIC_THRESHOLD;

// ---------------------------------------------------------------------------
// Workbench configuration
// ---------------------------------------------------------------------------

/// Tunable thresholds. Every field has a default, so a config file only needs
/// to name the values it overrides:
///
/// ```json
/// { "numeric_threshold": 0.9 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Fraction of non-empty cells that must parse as numbers for a column
    /// to be classified numeric (strictly greater than).
    pub numeric_threshold: f64,
    /// Rows required before any hypothesis test is attempted.
    pub min_rows: usize,
    /// Sample size at which the interpretation stops warning about power.
    pub adequate_power_n: usize,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            numeric_threshold: DEFAULT_NUMERIC_THRESHOLD,
            min_rows: 3,
            adequate_power_n: 30,
        }
    }
}

impl WorkbenchConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing config JSON")
    }
}
