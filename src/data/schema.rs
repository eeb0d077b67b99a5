use super::model::{parse_number, ColumnKind};

/// Default share of numeric cells above which a column is numeric.
pub const DEFAULT_NUMERIC_THRESHOLD: f64 = 0.8;

/// Classify a column from its raw cells using the default threshold.
pub fn infer_kind<S: AsRef<str>>(values: &[S]) -> ColumnKind {
    infer_kind_with(values, DEFAULT_NUMERIC_THRESHOLD)
}

/// Classify a column from its raw cells.
///
/// Blank cells are ignored. A column with no non-blank cells is categorical;
/// otherwise it is numeric when the share of cells parsing as finite numbers
/// is strictly greater than `threshold`.
pub fn infer_kind_with<S: AsRef<str>>(values: &[S], threshold: f64) -> ColumnKind {
    let mut non_empty = 0usize;
    let mut numeric = 0usize;
    for v in values {
        let v = v.as_ref().trim();
        if v.is_empty() {
            continue;
        }
        non_empty += 1;
        if parse_number(v).is_some() {
            numeric += 1;
        }
    }
    if non_empty == 0 {
        return ColumnKind::Categorical;
    }
    if numeric as f64 / non_empty as f64 > threshold {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}
