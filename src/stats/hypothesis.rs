//! Classical two-group, bivariate and k-group tests.
//!
//! Every test is a pure function returning `None` when the data cannot
//! support it; the caller decides how to surface that.

use serde::Serialize;

use super::correlation::{paired, pearson};
use super::descriptive::{mean, std_dev};
use super::report::{round2, ReportValue, TestReport};
use super::special::{p_from_f, p_from_t};

// ---------------------------------------------------------------------------
// Effect size
// ---------------------------------------------------------------------------

/// Magnitude bands for Cohen's d. Anything below 0.5 counts as small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectSize {
    Small,
    Medium,
    Large,
}

impl EffectSize {
    pub fn classify(d: f64) -> Self {
        let d = d.abs();
        if d >= 0.8 {
            Self::Large
        } else if d >= 0.5 {
            Self::Medium
        } else {
            Self::Small
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

// ---------------------------------------------------------------------------
// Welch two-sample t-test
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TTestOutcome {
    pub mean_a: f64,
    pub mean_b: f64,
    pub n_a: usize,
    pub n_b: usize,
    pub t: f64,
    pub df: f64,
    pub p: f64,
    pub cohens_d: f64,
}

impl TTestOutcome {
    /// Magnitude of the effect, judged on d as reported (2 decimals).
    pub fn effect_size(&self) -> EffectSize {
        EffectSize::classify(round2(self.cohens_d))
    }

    pub fn into_report(self, outcome: &str, group: &str, first: &str, second: &str) -> TestReport {
        let d = round2(self.cohens_d);
        TestReport::new(format!("Independent Samples t-Test: {outcome} by {group}"))
            .with(format!("M ({first})"), ReportValue::rounded(self.mean_a))
            .with(format!("M ({second})"), ReportValue::rounded(self.mean_b))
            .with(format!("n ({first})"), self.n_a)
            .with(format!("n ({second})"), self.n_b)
            .with("t-statistic", ReportValue::rounded(self.t))
            .with("df", ReportValue::rounded(self.df))
            .with("p-value", ReportValue::p_value(self.p))
            .with("Cohen's d", format!("{d} ({})", self.effect_size().as_str()))
    }
}

/// Welch's unequal-variance t-test of `mean(a) = mean(b)`.
///
/// Needs at least 2 values per group and a non-zero standard error.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Option<TTestOutcome> {
    let (na, nb) = (a.len(), b.len());
    if na < 2 || nb < 2 {
        return None;
    }
    let (ma, mb) = (mean(a), mean(b));
    let (sa, sb) = (std_dev(a), std_dev(b));
    let (na_f, nb_f) = (na as f64, nb as f64);

    let va = sa * sa / na_f;
    let vb = sb * sb / nb_f;
    let se = (va + vb).sqrt();
    if se == 0.0 {
        return None;
    }

    let t = (ma - mb) / se;
    let df = (va + vb).powi(2) / (va.powi(2) / (na_f - 1.0) + vb.powi(2) / (nb_f - 1.0));

    let pooled_sd =
        (((na_f - 1.0) * sa * sa + (nb_f - 1.0) * sb * sb) / (na_f + nb_f - 2.0)).sqrt();
    let cohens_d = if pooled_sd > 0.0 {
        (ma - mb) / pooled_sd
    } else {
        0.0
    };

    Some(TTestOutcome {
        mean_a: ma,
        mean_b: mb,
        n_a: na,
        n_b: nb,
        t,
        df,
        p: p_from_t(t, df),
        cohens_d,
    })
}

// ---------------------------------------------------------------------------
// Pearson correlation test
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationOutcome {
    pub r: f64,
    pub n: usize,
    pub t: f64,
    pub p: f64,
}

impl CorrelationOutcome {
    pub fn r_squared(&self) -> f64 {
        self.r * self.r
    }

    pub fn into_report(self, x: &str, y: &str) -> TestReport {
        TestReport::new(format!("Pearson Correlation: {x} × {y}"))
            .with("Pearson r", ReportValue::rounded(self.r))
            .with("r²", ReportValue::rounded(self.r_squared()))
            .with("N (pairs)", self.n)
            .with("t-statistic", ReportValue::rounded(self.t))
            .with("p-value", ReportValue::p_value(self.p))
    }
}

/// `t = r·√((n − 2)/(1 − r²))`; ±∞ for a perfect correlation.
fn correlation_t(r: f64, n: usize) -> f64 {
    let rest = 1.0 - r * r;
    if rest <= 0.0 {
        return if r >= 0.0 { f64::INFINITY } else { f64::NEG_INFINITY };
    }
    r * ((n as f64 - 2.0) / rest).sqrt()
}

/// Significance of Pearson's r with `n − 2` degrees of freedom.
///
/// Unequal lengths are truncated; needs at least 3 pairs.
pub fn correlation_test(x: &[f64], y: &[f64]) -> Option<CorrelationOutcome> {
    let (x, y) = paired(x, y);
    let n = x.len();
    if n < 3 {
        return None;
    }
    let r = pearson(x, y);
    let t = correlation_t(r, n);
    Some(CorrelationOutcome {
        r,
        n,
        t,
        p: p_from_t(t, (n - 2) as f64),
    })
}

// ---------------------------------------------------------------------------
// Simple OLS regression
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionOutcome {
    pub intercept: f64,
    pub slope: f64,
    pub slope_t: f64,
    pub slope_p: f64,
    pub r: f64,
    pub n: usize,
}

impl RegressionOutcome {
    pub fn r_squared(&self) -> f64 {
        self.r * self.r
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    pub fn equation(&self) -> String {
        format!("Ŷ = {}x + {}", round2(self.slope), round2(self.intercept))
    }

    pub fn into_report(self, dependent: &str, independent: &str) -> TestReport {
        let equation = self.equation();
        TestReport::new(format!("OLS Regression: {dependent} ~ {independent}"))
            .with("Intercept (β₀)", ReportValue::rounded(self.intercept))
            .with("Slope (β₁)", ReportValue::rounded(self.slope))
            .with("Slope t-stat", ReportValue::rounded(self.slope_t))
            .with("Slope p-value", ReportValue::p_value(self.slope_p))
            .with("Pearson r", ReportValue::rounded(self.r))
            .with("R²", format!("{}%", round2(self.r_squared() * 100.0)))
            .with("Equation", equation)
    }
}

/// Least-squares line of `y` on `x`.
///
/// The slope comes from the standardized relationship `r·sd(y)/sd(x)`, so it
/// shares its t statistic and p-value with the correlation test. Unequal
/// lengths are truncated; needs at least 3 pairs.
pub fn linear_regression(y: &[f64], x: &[f64]) -> Option<RegressionOutcome> {
    let (x, y) = paired(x, y);
    let n = x.len();
    if n < 3 {
        return None;
    }
    let r = pearson(x, y);
    let (sx, sy) = (std_dev(x), std_dev(y));
    let slope = if sx == 0.0 || sy == 0.0 { 0.0 } else { r * (sy / sx) };
    let intercept = mean(y) - slope * mean(x);
    let slope_t = correlation_t(r, n);
    Some(RegressionOutcome {
        intercept,
        slope,
        slope_t,
        slope_p: p_from_t(slope_t, (n - 2) as f64),
        r,
        n,
    })
}

// ---------------------------------------------------------------------------
// One-way ANOVA
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaOutcome {
    pub f: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub ss_between: f64,
    pub ss_within: f64,
    pub ms_between: f64,
    pub ms_within: f64,
    pub p: f64,
}

impl AnovaOutcome {
    /// `groups` names every group level, including any without data.
    pub fn into_report<S: AsRef<str>>(self, outcome: &str, group: &str, groups: &[S]) -> TestReport {
        let names: Vec<&str> = groups.iter().map(|g| g.as_ref()).collect();
        TestReport::new(format!("One-Way ANOVA: {outcome} by {group}"))
            .with("F-statistic", ReportValue::rounded(self.f))
            .with("df (between)", self.df_between)
            .with("df (within)", self.df_within)
            .with("MS (between)", ReportValue::rounded(self.ms_between))
            .with("MS (within)", ReportValue::rounded(self.ms_within))
            .with("p-value", ReportValue::p_value(self.p))
            .with("Groups", names.join(", "))
    }
}

/// One-way ANOVA across `groups`. Empty groups are ignored.
///
/// Needs at least 2 non-empty groups, more values than groups, and some
/// within-group spread.
pub fn one_way_anova<G: AsRef<[f64]>>(groups: &[G]) -> Option<AnovaOutcome> {
    let groups: Vec<&[f64]> = groups
        .iter()
        .map(|g| g.as_ref())
        .filter(|g| !g.is_empty())
        .collect();
    let k = groups.len();
    let total: usize = groups.iter().map(|g| g.len()).sum();
    if k < 2 || total <= k {
        return None;
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total as f64;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for g in &groups {
        let m = mean(g);
        ss_between += g.len() as f64 * (m - grand_mean).powi(2);
        ss_within += g.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    }

    let df_between = k - 1;
    let df_within = total - k;
    if df_within == 0 || ss_within == 0.0 {
        return None;
    }
    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;
    let f = ms_between / ms_within;

    Some(AnovaOutcome {
        f,
        df_between,
        df_within,
        ss_between,
        ss_within,
        ms_between,
        ms_within,
        p: p_from_f(f, df_between as f64, df_within as f64),
    })
}
