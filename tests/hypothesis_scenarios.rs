use rusty_workbench::stats::report::ReportValue;
use rusty_workbench::stats::{one_way_anova, welch_t_test, EffectSize};
use rusty_workbench::{demo, TestRequest, Workbench, WorkbenchError};

fn demo_bench() -> Workbench {
    let mut bench = Workbench::default();
    assert!(bench.load_text(demo::DEMO_CSV));
    bench
}

fn p_value(report: &rusty_workbench::TestReport, label: &str) -> String {
    report
        .get(label)
        .and_then(ReportValue::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

#[test]
fn separated_groups_give_a_large_significant_effect() {
    let a = [82.0, 91.0, 88.0, 95.0, 85.0, 90.0, 93.0];
    let b = [67.0, 58.0, 72.0, 54.0, 63.0, 60.0, 55.0];
    let out = welch_t_test(&a, &b).unwrap();
    assert!(out.p < 0.05);
    assert_eq!(out.effect_size(), EffectSize::Large);
}

#[test]
fn demo_t_test_scores_by_group() {
    let mut bench = demo_bench();
    let report = bench
        .run_test(&TestRequest::TTest {
            group: "group".into(),
            outcome: "score".into(),
            first: "A".into(),
            second: "B".into(),
        })
        .unwrap()
        .clone();
    assert_eq!(p_value(&report, "p-value"), "< .0001");
    let d = p_value(&report, "Cohen's d");
    assert!(d.ends_with("(large)"), "{d}");
}

#[test]
fn demo_anova_score_by_region() {
    let mut bench = demo_bench();
    let report = bench
        .run_test(&TestRequest::Anova {
            group: "region".into(),
            outcome: "score".into(),
        })
        .unwrap();
    assert_eq!(report.label, "One-Way ANOVA: score by region");
    let f = report.get("F-statistic").and_then(ReportValue::as_f64).unwrap();
    assert!(f > 30.0);
}

#[test]
fn anova_scenarios() {
    let separated = [vec![1.0, 2.0, 3.0, 2.0], vec![10.0, 11.0, 12.0, 11.0]];
    assert!(one_way_anova(&separated).is_some_and(|a| a.p < 0.05));
    let identical = [vec![4.0, 4.0, 4.0], vec![4.0, 4.0, 4.0]];
    assert!(one_way_anova(&identical).is_none());
}

#[test]
fn self_correlation_is_perfect() {
    let mut bench = demo_bench();
    let report = bench
        .run_test(&TestRequest::Correlation {
            x: "score".into(),
            y: "score".into(),
        })
        .unwrap();
    assert_eq!(report.get("r²"), Some(&ReportValue::Number(1.0)));
    assert_eq!(p_value(report, "p-value"), "< .0001");
    assert_eq!(report.get("N (pairs)"), Some(&ReportValue::Count(15)));
}

#[test]
fn regression_of_score_on_hours() {
    let mut bench = demo_bench();
    let report = bench
        .run_test(&TestRequest::Regression {
            dependent: "score".into(),
            independent: "hours".into(),
        })
        .unwrap();
    assert_eq!(report.label, "OLS Regression: score ~ hours");
    let slope = report.get("Slope (β₁)").and_then(ReportValue::as_f64).unwrap();
    assert!(slope > 3.0 && slope < 4.0, "{slope}");
    assert_eq!(p_value(report, "Slope p-value"), "< .0001");
}

#[test]
fn repeated_runs_are_identical() {
    let request = TestRequest::Anova {
        group: "region".into(),
        outcome: "satisfaction".into(),
    };
    let mut bench = demo_bench();
    let first = bench.run_test(&request).unwrap().clone();
    let second = bench.run_test(&request).unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn failures_keep_previous_report() {
    let mut bench = demo_bench();
    bench
        .run_test(&TestRequest::Correlation {
            x: "age".into(),
            y: "hours".into(),
        })
        .unwrap();
    let err = bench
        .run_test(&TestRequest::Regression {
            dependent: "region".into(),
            independent: "hours".into(),
        })
        .unwrap_err();
    assert_eq!(
        err,
        WorkbenchError::NotComputable {
            reason: "not enough numeric data"
        }
    );
    assert_eq!(
        bench.last_report.as_ref().map(|r| r.label.as_str()),
        Some("Pearson Correlation: age × hours")
    );
}
