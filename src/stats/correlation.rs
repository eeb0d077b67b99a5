use serde::Serialize;

use super::descriptive::mean;
use crate::data::model::{ColumnKind, Table};

/// Truncate two vectors to their common length.
pub(crate) fn paired<'a>(x: &'a [f64], y: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let n = x.len().min(y.len());
    (&x[..n], &y[..n])
}

/// Pearson product-moment correlation.
///
/// Vectors of unequal length are truncated to the shorter one. Returns 0
/// when either side has no variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (x, y) = paired(x, y);
    if x.is_empty() {
        return 0.0;
    }
    let (mx, my) = (mean(x), mean(y));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let (dx, dy) = (xi - mx, yi - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let den = (sxx * syy).sqrt();
    if den == 0.0 {
        return 0.0;
    }
    (sxy / den).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// CorrelationStrength – coarse label for a coefficient
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrelationStrength {
    StrongPositive,
    ModeratePositive,
    Negative,
    Weak,
}

impl CorrelationStrength {
    pub fn classify(r: f64) -> Self {
        if r > 0.5 {
            Self::StrongPositive
        } else if r > 0.2 {
            Self::ModeratePositive
        } else if r < -0.2 {
            Self::Negative
        } else {
            Self::Weak
        }
    }
}

// ---------------------------------------------------------------------------
// CorrelationMatrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson coefficients over an explicit column selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Build the matrix for `selection`, in selection order.
    ///
    /// Names that are not numeric columns of `table` are skipped. The
    /// diagonal is each column against itself: 1, or 0 for a constant column.
    pub fn from_table<S: AsRef<str>>(table: &Table, selection: &[S]) -> Self {
        let columns: Vec<String> = selection
            .iter()
            .map(|s| s.as_ref())
            .filter(|name| {
                table
                    .column(name)
                    .is_some_and(|c| c.kind == ColumnKind::Numeric)
            })
            .map(str::to_string)
            .collect();
        let data: Vec<Vec<f64>> = columns.iter().map(|c| table.numeric_values(c)).collect();
        Self::from_vectors(columns, &data)
    }

    pub fn from_vectors(columns: Vec<String>, data: &[Vec<f64>]) -> Self {
        let k = data.len();
        let mut values = vec![vec![0.0; k]; k];
        for i in 0..k {
            values[i][i] = pearson(&data[i], &data[i]);
            for j in (i + 1)..k {
                let r = pearson(&data[i], &data[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { columns, values }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Off-diagonal pair with the largest |r|, as `(a, b, |r|)`.
    pub fn strongest_pair(&self) -> Option<(&str, &str, f64)> {
        let mut best: Option<(&str, &str, f64)> = None;
        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                let r = self.values[i][j].abs();
                if r > best.map_or(0.0, |b| b.2) {
                    best = Some((self.columns[i].as_str(), self.columns[j].as_str(), r));
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parser::parse;
    use approx::assert_abs_diff_eq;

    #[test]
    fn perfect_and_inverse() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let z = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert_abs_diff_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pearson(&x, &z), -1.0, epsilon = 1e-12);
        assert_eq!(pearson(&x, &x), 1.0);
    }

    #[test]
    fn symmetric() {
        let x = [1.0, 3.0, 2.0, 5.0, 4.0];
        let y = [2.0, 1.0, 4.0, 3.0, 6.0];
        assert_eq!(pearson(&x, &y), pearson(&y, &x));
    }

    #[test]
    fn zero_variance_is_zero() {
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]), 0.0);
        assert_eq!(pearson(&[], &[]), 0.0);
    }

    #[test]
    fn unequal_lengths_truncate() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0, -50.0, 80.0];
        assert_abs_diff_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn reference_value() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        // sxy = 8, sxx = syy = 10
        assert_abs_diff_eq!(pearson(&x, &y), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn strength_labels() {
        assert_eq!(CorrelationStrength::classify(0.9), CorrelationStrength::StrongPositive);
        assert_eq!(CorrelationStrength::classify(0.3), CorrelationStrength::ModeratePositive);
        assert_eq!(CorrelationStrength::classify(-0.6), CorrelationStrength::Negative);
        assert_eq!(CorrelationStrength::classify(0.1), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::classify(-0.2), CorrelationStrength::Weak);
    }

    #[test]
    fn matrix_over_selection() {
        let table = parse("a,b,label,c\n1,2,x,9\n2,4,y,7\n3,6,z,8\n4,8,w,1");
        let m = CorrelationMatrix::from_table(&table, &["c", "label", "a", "b", "nope"]);
        assert_eq!(m.columns, vec!["c", "a", "b"]);
        assert_eq!(m.values[0][0], 1.0);
        assert_abs_diff_eq!(m.get("a", "b").unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(m.get("a", "c"), m.get("c", "a"));
        assert!(m.get("a", "label").is_none());

        let (a, b, r) = m.strongest_pair().unwrap();
        assert_eq!((a, b), ("a", "b"));
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn strongest_pair_needs_two_columns() {
        let m = CorrelationMatrix::from_vectors(vec!["a".into()], &[vec![1.0, 2.0]]);
        assert!(m.strongest_pair().is_none());
        let flat = CorrelationMatrix::from_vectors(
            vec!["a".into(), "b".into()],
            &[vec![1.0, 1.0], vec![2.0, 3.0]],
        );
        assert!(flat.strongest_pair().is_none());
    }

    #[test]
    fn constant_column_has_zero_diagonal() {
        let m = CorrelationMatrix::from_vectors(
            vec!["flat".into(), "x".into()],
            &[vec![3.0, 3.0, 3.0], vec![1.0, 2.0, 4.0]],
        );
        assert_eq!(m.get("flat", "flat"), Some(0.0));
        assert_eq!(m.get("x", "x"), Some(1.0));
        assert_eq!(m.get("flat", "x"), Some(0.0));
    }
}
