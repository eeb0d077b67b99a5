use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Group selection: split an outcome column by a grouping column
// ---------------------------------------------------------------------------

/// Display form of a row's cell, `""` when absent.
fn group_key(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_default()
}

/// Distinct values of `column` in first-seen row order.
pub fn unique_values(table: &Table, column: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for row in table.rows() {
        let key = group_key(row.get(column));
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}

/// NumericVector of `outcome` restricted to rows where `group_column`
/// displays as `group`.
pub fn group_values(table: &Table, group_column: &str, outcome: &str, group: &str) -> Vec<f64> {
    table
        .rows()
        .iter()
        .filter(|row| group_key(row.get(group_column)) == group)
        .filter_map(|row| row.get(outcome).and_then(Value::as_f64))
        .collect()
}

/// One `(group, values)` pair per distinct group value, first-seen order.
/// Groups whose outcome has no numeric cells are kept, with an empty vector.
pub fn split_by_group(table: &Table, group_column: &str, outcome: &str) -> Vec<(String, Vec<f64>)> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for row in table.rows() {
        let key = group_key(row.get(group_column));
        let idx = match groups.iter().position(|(name, _)| *name == key) {
            Some(idx) => idx,
            None => {
                groups.push((key, Vec::new()));
                groups.len() - 1
            }
        };
        if let Some(v) = row.get(outcome).and_then(Value::as_f64) {
            groups[idx].1.push(v);
        }
    }
    groups
}
