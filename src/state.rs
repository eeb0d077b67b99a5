use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::WorkbenchConfig;
use crate::data::filter::{group_values, split_by_group};
use crate::data::model::{Column, ColumnKind, Table};
use crate::data::parser::TableParser;
use crate::error::{Result, WorkbenchError};
use crate::stats::correlation::CorrelationMatrix;
use crate::stats::descriptive::{mean, std_dev};
use crate::stats::hypothesis::{correlation_test, linear_regression, one_way_anova, welch_t_test};
use crate::stats::report::{round2, TestReport};

// ---------------------------------------------------------------------------
// Test requests
// ---------------------------------------------------------------------------

/// A hypothesis test to run against the loaded table, by column name.
#[derive(Debug, Clone, PartialEq)]
pub enum TestRequest {
    /// Compare `outcome` between two values of `group`.
    TTest {
        group: String,
        outcome: String,
        first: String,
        second: String,
    },
    Correlation {
        x: String,
        y: String,
    },
    /// Regress `dependent` on `independent`.
    Regression {
        dependent: String,
        independent: String,
    },
    Anova {
        group: String,
        outcome: String,
    },
}

impl TestRequest {
    pub fn name(&self) -> &'static str {
        match self {
            TestRequest::TTest { .. } => "t-test",
            TestRequest::Correlation { .. } => "correlation",
            TestRequest::Regression { .. } => "regression",
            TestRequest::Anova { .. } => "ANOVA",
        }
    }

    /// Every column the request reads.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            TestRequest::TTest { group, outcome, .. } | TestRequest::Anova { group, outcome } => {
                vec![group.as_str(), outcome.as_str()]
            }
            TestRequest::Correlation { x, y } => vec![x.as_str(), y.as_str()],
            TestRequest::Regression {
                dependent,
                independent,
            } => vec![dependent.as_str(), independent.as_str()],
        }
    }
}

// ---------------------------------------------------------------------------
// Interpretation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Info,
    Significant,
    Warning,
}

/// A short tagged observation about the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub label: String,
}

impl Finding {
    fn new(kind: FindingKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// Plain-language summary of the session: free text plus tagged findings.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Interpretation {
    pub text: String,
    pub findings: Vec<Finding>,
}

impl Interpretation {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.findings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Workbench session
// ---------------------------------------------------------------------------

/// Session state for a host: the dataset, the correlation selection and the
/// most recent test, independent of any presentation.
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    /// Loaded table (None until the host loads data or defines a schema).
    pub table: Option<Table>,

    /// Numeric columns included in the correlation matrix, in selection order.
    pub correlation_columns: Vec<String>,

    /// Report of the last test that ran successfully.
    pub last_report: Option<TestReport>,

    pub config: WorkbenchConfig,
}

impl Workbench {
    pub fn new(config: WorkbenchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    fn parser(&self) -> TableParser {
        TableParser::with_threshold(self.config.numeric_threshold)
    }

    /// Replace the dataset. Every numeric column starts selected for
    /// correlation and the previous report is dropped.
    pub fn load_table(&mut self, table: Table) {
        info!(
            "dataset loaded: {} rows, {} columns",
            table.len(),
            table.columns().len()
        );
        self.correlation_columns = table.numeric_columns().map(|c| c.name.clone()).collect();
        debug!("correlation selection: {:?}", self.correlation_columns);
        self.table = Some(table);
        self.last_report = None;
    }

    /// Parse delimited text with the configured threshold and load it.
    /// Returns `false` (and leaves the session untouched) when nothing parsed.
    pub fn load_text(&mut self, text: &str) -> bool {
        let table = self.parser().parse(text);
        if !table.has_schema() {
            debug!("pasted text produced no columns");
            return false;
        }
        self.load_table(table);
        true
    }

    /// Manual mode: start an empty table with an explicit schema.
    pub fn define_schema(&mut self, columns: Vec<Column>) -> Result<()> {
        let table = Table::with_schema(columns)?;
        info!("schema defined: {} columns", table.columns().len());
        self.load_table(table);
        Ok(())
    }

    /// Manual mode: append one row of raw entries to the current table.
    pub fn add_row(&mut self, entries: &BTreeMap<String, String>) -> Result<()> {
        let table = self.table.as_mut().ok_or(WorkbenchError::NoData)?;
        table.append_row(entries)?;
        debug!("row appended, table now has {} rows", table.len());
        Ok(())
    }

    /// Flip a numeric column in or out of the correlation selection. A column
    /// switched back on goes to the end. Returns whether the column is
    /// selected afterwards.
    pub fn toggle_correlation_column(&mut self, name: &str) -> Result<bool> {
        let table = self.table.as_ref().ok_or(WorkbenchError::NoData)?;
        if !table
            .column(name)
            .is_some_and(|c| c.kind == ColumnKind::Numeric)
        {
            return Err(WorkbenchError::MissingColumn(name.to_string()));
        }

        match self.correlation_columns.iter().position(|c| c == name) {
            Some(idx) => {
                self.correlation_columns.remove(idx);
                Ok(false)
            }
            None => {
                self.correlation_columns.push(name.to_string());
                Ok(true)
            }
        }
    }

    pub fn select_all_correlation(&mut self) {
        if let Some(table) = &self.table {
            self.correlation_columns = table.numeric_columns().map(|c| c.name.clone()).collect();
        }
    }

    /// Correlation matrix over the current selection.
    pub fn correlation_matrix(&self) -> Option<CorrelationMatrix> {
        let table = self.table.as_ref()?;
        Some(CorrelationMatrix::from_table(table, &self.correlation_columns))
    }

    /// Validate `request` against the table, run it and keep the report.
    pub fn run_test(&mut self, request: &TestRequest) -> Result<&TestReport> {
        let outcome = self.evaluate(request);
        match outcome {
            Ok(report) => {
                info!("{} finished: {}", request.name(), report.label);
                Ok(&*self.last_report.insert(report))
            }
            Err(err) => {
                if matches!(err, WorkbenchError::NotComputable { .. }) {
                    warn!("{} not computable: {err}", request.name());
                }
                Err(err)
            }
        }
    }

    fn evaluate(&self, request: &TestRequest) -> Result<TestReport> {
        let table = self.table.as_ref().ok_or(WorkbenchError::NoData)?;
        if table.len() < self.config.min_rows {
            return Err(WorkbenchError::TooFewRows {
                required: self.config.min_rows,
                actual: table.len(),
            });
        }
        if let Some(missing) = request.columns().into_iter().find(|c| table.column(c).is_none()) {
            return Err(WorkbenchError::MissingColumn(missing.to_string()));
        }
        debug!("running {} on {:?}", request.name(), request.columns());

        let not_computable = |reason| WorkbenchError::NotComputable { reason };
        match request {
            TestRequest::TTest {
                group,
                outcome,
                first,
                second,
            } => {
                let a = group_values(table, group, outcome, first);
                let b = group_values(table, group, outcome, second);
                welch_t_test(&a, &b)
                    .map(|t| t.into_report(outcome, group, first, second))
                    .ok_or_else(|| not_computable("not enough data in each group"))
            }
            TestRequest::Correlation { x, y } => {
                let (xs, ys) = (table.numeric_values(x), table.numeric_values(y));
                if xs.len() < 3 || ys.len() < 3 {
                    return Err(not_computable("not enough numeric data"));
                }
                correlation_test(&xs, &ys)
                    .map(|r| r.into_report(x, y))
                    .ok_or_else(|| not_computable("not enough numeric data"))
            }
            TestRequest::Regression {
                dependent,
                independent,
            } => {
                let ys = table.numeric_values(dependent);
                let xs = table.numeric_values(independent);
                if xs.len() < 3 || ys.len() < 3 {
                    return Err(not_computable("not enough numeric data"));
                }
                linear_regression(&ys, &xs)
                    .map(|r| r.into_report(dependent, independent))
                    .ok_or_else(|| not_computable("not enough numeric data"))
            }
            TestRequest::Anova { group, outcome } => {
                let groups = split_by_group(table, group, outcome);
                if groups.iter().filter(|(_, v)| !v.is_empty()).count() < 2 {
                    return Err(not_computable("need at least 2 groups with data"));
                }
                let (names, values): (Vec<String>, Vec<Vec<f64>>) = groups.into_iter().unzip();
                one_way_anova(&values)
                    .map(|a| a.into_report(outcome, group, &names))
                    .ok_or_else(|| not_computable("cannot compute ANOVA"))
            }
        }
    }

    /// Describe the dataset in a few sentences, with tagged findings.
    ///
    /// Empty until the table has at least `min_rows` rows.
    pub fn interpret(&self) -> Interpretation {
        let Some(table) = self.table.as_ref().filter(|t| t.len() >= self.config.min_rows) else {
            return Interpretation::default();
        };
        let n = table.len();
        let numeric: Vec<&Column> = table.numeric_columns().collect();
        let categorical = table.categorical_columns().count();

        let mut text = format!(
            "Dataset: N={n} observations across {} variables ({} numeric, {categorical} categorical). ",
            table.columns().len(),
            numeric.len()
        );

        let leading: Vec<String> = numeric
            .iter()
            .take(3)
            .map(|c| {
                let values = table.numeric_values(&c.name);
                format!(
                    "{}: M={}, SD={}",
                    c.name,
                    round2(mean(&values)),
                    round2(std_dev(&values))
                )
            })
            .collect();
        if !leading.is_empty() {
            text.push_str(&leading.join("; "));
            text.push_str(". ");
        }

        if let Some(matrix) = self.correlation_matrix() {
            if let Some((a, b, r)) = matrix.strongest_pair() {
                text.push_str(&format!("Strongest correlation: r({a}↔{b})={}. ", round2(r)));
            }
        }

        if let Some(report) = &self.last_report {
            text.push_str(&format!("Last test: {}. ", report.label));
        }

        let threshold = self.config.adequate_power_n;
        if n < threshold {
            text.push_str(&format!(
                "Note: N<{threshold} limits statistical power; interpret with caution."
            ));
        }

        let mut findings = vec![
            Finding::new(FindingKind::Info, format!("N = {n}")),
            Finding::new(FindingKind::Info, format!("{} NUMERIC", numeric.len())),
            Finding::new(FindingKind::Info, format!("{categorical} CATEGORICAL")),
        ];
        findings.push(if n >= threshold {
            Finding::new(FindingKind::Significant, "POWER: ADEQUATE")
        } else {
            Finding::new(FindingKind::Warning, format!("POWER: LOW (N<{threshold})"))
        });

        Interpretation { text, findings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DEMO_CSV;
    use crate::stats::report::ReportValue;

    fn demo_bench() -> Workbench {
        let mut bench = Workbench::default();
        assert!(bench.load_text(DEMO_CSV));
        bench
    }

    fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn load_selects_all_numeric_columns() {
        let bench = demo_bench();
        assert_eq!(
            bench.correlation_columns,
            ["age", "score", "hours", "satisfaction"]
        );
        assert!(bench.last_report.is_none());
    }

    #[test]
    fn blank_text_leaves_session_unchanged() {
        let mut bench = demo_bench();
        assert!(!bench.load_text("only-a-header\n\n"));
        assert_eq!(bench.table.as_ref().map(Table::len), Some(15));
    }

    #[test]
    fn run_test_without_data() {
        let mut bench = Workbench::default();
        let err = bench
            .run_test(&TestRequest::Correlation {
                x: "a".into(),
                y: "b".into(),
            })
            .unwrap_err();
        assert_eq!(err, WorkbenchError::NoData);
    }

    #[test]
    fn run_test_needs_min_rows() {
        let mut bench = Workbench::default();
        bench.load_text("x,y\n1,2\n2,3");
        let err = bench
            .run_test(&TestRequest::Correlation {
                x: "x".into(),
                y: "y".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            WorkbenchError::TooFewRows {
                required: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn run_test_unknown_column() {
        let mut bench = demo_bench();
        let err = bench
            .run_test(&TestRequest::Anova {
                group: "region".into(),
                outcome: "height".into(),
            })
            .unwrap_err();
        assert_eq!(err, WorkbenchError::MissingColumn("height".into()));
    }

    #[test]
    fn t_test_by_group() {
        let mut bench = demo_bench();
        let report = bench
            .run_test(&TestRequest::TTest {
                group: "group".into(),
                outcome: "score".into(),
                first: "A".into(),
                second: "B".into(),
            })
            .unwrap();
        assert_eq!(report.label, "Independent Samples t-Test: score by group");
        assert_eq!(report.get("n (A)"), Some(&ReportValue::Count(8)));
        assert_eq!(report.get("n (B)"), Some(&ReportValue::Count(7)));
        assert_eq!(report.get("M (A)"), Some(&ReportValue::Number(88.88)));
        assert!(bench.last_report.is_some());
    }

    #[test]
    fn t_test_with_unknown_group_level() {
        let mut bench = demo_bench();
        let err = bench
            .run_test(&TestRequest::TTest {
                group: "group".into(),
                outcome: "score".into(),
                first: "A".into(),
                second: "C".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            WorkbenchError::NotComputable {
                reason: "not enough data in each group"
            }
        );
        assert!(bench.last_report.is_none());
    }

    #[test]
    fn correlation_on_text_column() {
        let mut bench = demo_bench();
        let err = bench
            .run_test(&TestRequest::Correlation {
                x: "name".into(),
                y: "score".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            WorkbenchError::NotComputable {
                reason: "not enough numeric data"
            }
        );
    }

    #[test]
    fn anova_needs_two_groups() {
        let mut bench = Workbench::default();
        bench.load_text("g,v\na,1\na,2\na,3");
        let err = bench
            .run_test(&TestRequest::Anova {
                group: "g".into(),
                outcome: "v".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            WorkbenchError::NotComputable {
                reason: "need at least 2 groups with data"
            }
        );
    }

    #[test]
    fn anova_without_spread() {
        let mut bench = Workbench::default();
        bench.load_text("g,v\na,1\na,1\nb,1\nb,1");
        let err = bench
            .run_test(&TestRequest::Anova {
                group: "g".into(),
                outcome: "v".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            WorkbenchError::NotComputable {
                reason: "cannot compute ANOVA"
            }
        );
    }

    #[test]
    fn anova_report_lists_groups() {
        let mut bench = demo_bench();
        let report = bench
            .run_test(&TestRequest::Anova {
                group: "region".into(),
                outcome: "score".into(),
            })
            .unwrap();
        assert_eq!(
            report.get("Groups"),
            Some(&ReportValue::Text("North, South, East, West".into()))
        );
        assert_eq!(report.get("df (between)"), Some(&ReportValue::Count(3)));
        assert_eq!(report.get("df (within)"), Some(&ReportValue::Count(11)));
    }

    #[test]
    fn toggle_appends_reselected_column() {
        let mut bench = demo_bench();
        assert!(!bench.toggle_correlation_column("age").unwrap());
        assert!(!bench.toggle_correlation_column("hours").unwrap());
        assert_eq!(bench.correlation_columns, ["score", "satisfaction"]);
        assert!(bench.toggle_correlation_column("age").unwrap());
        assert_eq!(bench.correlation_columns, ["score", "satisfaction", "age"]);
        let matrix = bench.correlation_matrix().unwrap();
        assert_eq!(matrix.columns, ["score", "satisfaction", "age"]);

        let err = bench.toggle_correlation_column("region").unwrap_err();
        assert_eq!(err, WorkbenchError::MissingColumn("region".into()));

        bench.select_all_correlation();
        assert_eq!(bench.correlation_matrix().map(|m| m.len()), Some(4));
    }

    #[test]
    fn manual_schema_flow() {
        let mut bench = Workbench::default();
        assert_eq!(
            bench.add_row(&entries(&[("x", "1")])),
            Err(WorkbenchError::NoData)
        );
        bench
            .define_schema(vec![Column::categorical("team"), Column::numeric("points")])
            .unwrap();
        assert_eq!(bench.correlation_columns, ["points"]);

        bench.add_row(&entries(&[("team", "red"), ("points", "3")])).unwrap();
        let err = bench
            .add_row(&entries(&[("team", "blue"), ("points", "lots")]))
            .unwrap_err();
        assert!(matches!(err, WorkbenchError::InvalidNumeric { .. }));
        assert_eq!(bench.table.as_ref().map(Table::len), Some(1));
    }

    #[test]
    fn interpret_demo() {
        let mut bench = demo_bench();
        bench
            .run_test(&TestRequest::Correlation {
                x: "score".into(),
                y: "hours".into(),
            })
            .unwrap();
        let out = bench.interpret();
        assert!(out.text.starts_with(
            "Dataset: N=15 observations across 7 variables (4 numeric, 3 categorical). \
             age: M=32.47, SD=6.89; score: M=76, SD=15.18; hours: M=10.73, SD=4.27. "
        ));
        assert!(out.text.contains("Strongest correlation: r(score↔hours)=1. "));
        assert!(out.text.contains("Last test: Pearson Correlation: score × hours. "));
        assert!(out
            .text
            .ends_with("Note: N<30 limits statistical power; interpret with caution."));
        assert_eq!(out.findings.len(), 4);
        assert_eq!(out.findings[1].label, "4 NUMERIC");
        assert_eq!(
            out.findings[3],
            Finding::new(FindingKind::Warning, "POWER: LOW (N<30)")
        );
    }

    #[test]
    fn interpret_adequate_power() {
        let mut bench = Workbench::new(WorkbenchConfig {
            adequate_power_n: 10,
            ..WorkbenchConfig::default()
        });
        bench.load_text(DEMO_CSV);
        let out = bench.interpret();
        assert!(!out.text.contains("Note:"));
        assert_eq!(
            out.findings.last(),
            Some(&Finding::new(FindingKind::Significant, "POWER: ADEQUATE"))
        );
    }

    #[test]
    fn interpret_small_table_is_empty() {
        let mut bench = Workbench::default();
        assert!(bench.interpret().is_empty());
        bench.load_text("a,b\n1,2\n3,4");
        assert!(bench.interpret().is_empty());
    }
}
