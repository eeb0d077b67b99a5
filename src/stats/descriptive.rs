use serde::Serialize;

use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Moments and order statistics
// ---------------------------------------------------------------------------
//
// Degenerate inputs (empty, too short, zero spread) give 0 rather than NaN.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (N − 1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let s = sorted(values);
    let mid = s.len() / 2;
    if s.len() % 2 == 1 {
        s[mid]
    } else {
        (s[mid - 1] + s[mid]) / 2.0
    }
}

/// Quantile by linear interpolation at position `(n − 1)·p` of the sorted data.
///
/// `p` is clamped to `[0, 1]`.
pub fn quartile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let s = sorted(values);
    let p = p.clamp(0.0, 1.0);
    let pos = (s.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        s[lo]
    } else {
        s[lo] + (s[hi] - s[lo]) * (pos - lo as f64)
    }
}

/// Bias-corrected sample skewness.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let (m, s) = (mean(values), std_dev(values));
    if s == 0.0 {
        return 0.0;
    }
    let n = n as f64;
    let sum3: f64 = values.iter().map(|v| ((v - m) / s).powi(3)).sum();
    n / ((n - 1.0) * (n - 2.0)) * sum3
}

/// Bias-corrected sample excess kurtosis.
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return 0.0;
    }
    let (m, s) = (mean(values), std_dev(values));
    if s == 0.0 {
        return 0.0;
    }
    let n = n as f64;
    let sum4: f64 = values.iter().map(|v| ((v - m) / s).powi(4)).sum();
    (n * (n + 1.0)) / ((n - 1.0) * (n - 2.0) * (n - 3.0)) * sum4
        - (3.0 * (n - 1.0) * (n - 1.0)) / ((n - 2.0) * (n - 3.0))
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Summary – one numeric column at a glance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub n: usize,
    pub mean: f64,
    pub sd: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

impl Summary {
    pub fn of(values: &[f64]) -> Self {
        Self {
            n: values.len(),
            mean: mean(values),
            sd: std_dev(values),
            median: median(values),
            min: min(values),
            max: max(values),
            q1: quartile(values, 0.25),
            q3: quartile(values, 0.75),
            skewness: skewness(values),
            kurtosis: kurtosis(values),
        }
    }
}

/// Summaries of every numeric column, in column order.
pub fn describe(table: &Table) -> Vec<(String, Summary)> {
    table
        .numeric_columns()
        .map(|c| (c.name.clone(), Summary::of(&table.numeric_values(&c.name))))
        .collect()
}
