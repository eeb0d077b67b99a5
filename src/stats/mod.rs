/// Statistics engine: pure functions over `&[f64]`.
///
/// ```text
///   ┌──────────────┐   ┌──────────────┐
///   │ descriptive   │   │   special     │  lnΓ, I_x(a,b), t / F CDFs
///   └──────────────┘   └──────────────┘
///          │                  │
///          ▼                  │
///   ┌──────────────┐          │
///   │ correlation   │          │
///   └──────────────┘          │
///          │                  │
///          ▼                  ▼
///   ┌─────────────────────────────┐
///   │ hypothesis                   │  t-test, r test, OLS, ANOVA
///   └─────────────────────────────┘
///          │
///          ▼
///   ┌──────────────┐
///   │ report        │  rounded, labelled TestReport
///   └──────────────┘
/// ```

pub mod correlation;
pub mod descriptive;
pub mod hypothesis;
pub mod report;
pub mod special;

pub use correlation::{pearson, CorrelationMatrix, CorrelationStrength};
pub use descriptive::{describe, Summary};
pub use hypothesis::{
    correlation_test, linear_regression, one_way_anova, welch_t_test, AnovaOutcome,
    CorrelationOutcome, EffectSize, RegressionOutcome, TTestOutcome,
};
pub use report::{format_p, round2, ReportValue, TestReport};
