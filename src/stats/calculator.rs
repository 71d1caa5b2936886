//! Statistics Calculator Module
//! Handles statistical computations including descriptive stats, Welch's
//! t-test and Pearson correlation.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold used when annotating test results.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Descriptive statistics for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// One row of a describe table.
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeRow {
    pub column: String,
    pub summary: Summary,
}

/// Per-column descriptive statistics, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescribeTable {
    pub rows: Vec<DescribeRow>,
}

/// Outcome of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    pub statistic: f64,
    pub p_value: f64,
}

impl TTestResult {
    pub fn is_significant(&self) -> bool {
        self.p_value <= SIGNIFICANCE_THRESHOLD
    }
}

/// Pearson coefficient with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PearsonResult {
    pub r: f64,
    pub p_value: f64,
    pub n: usize,
}

impl PearsonResult {
    pub fn is_significant(&self) -> bool {
        self.p_value <= SIGNIFICANCE_THRESHOLD
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean; NaN for an empty slice.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Sample variance (ddof = 1); NaN below two values.
    pub fn sample_variance(values: &[f64]) -> f64 {
        let n = values.len();
        if n < 2 {
            return f64::NAN;
        }
        let mean = Self::mean(values);
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    }

    /// Compute count, mean, std, min, quartiles and max.
    pub fn describe(values: &[f64]) -> Summary {
        let n = values.len();
        if n == 0 {
            return Summary::default();
        }

        let sorted = Self::sorted(values);

        Summary {
            count: n,
            mean: Self::mean(values),
            std: Self::sample_variance(values).sqrt(),
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    pub fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Perform Welch's t-test (independent samples, unequal variance).
    ///
    /// The statistic is `mean(a) - mean(b)` over its standard error. Groups
    /// with fewer than two values produce NaN rather than an error.
    pub fn welch_ttest(a: &[f64], b: &[f64]) -> TTestResult {
        let n1 = a.len() as f64;
        let n2 = b.len() as f64;

        let mean1 = Self::mean(a);
        let mean2 = Self::mean(b);
        let var1 = Self::sample_variance(a);
        let var2 = Self::sample_variance(b);

        let se = (var1 / n1 + var2 / n2).sqrt();
        let t = (mean1 - mean2) / se;

        // Welch-Satterthwaite degrees of freedom
        let df_num = (var1 / n1 + var2 / n2).powi(2);
        let df_denom = (var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0);
        let df = df_num / df_denom;

        TTestResult {
            statistic: t,
            p_value: Self::two_sided_p(t, df),
        }
    }

    /// Pearson correlation over paired values and its two-sided p-value.
    pub fn pearson(x: &[f64], y: &[f64]) -> PearsonResult {
        let n = x.len().min(y.len());
        let r = Self::pearson_r(&x[..n], &y[..n]);

        let p_value = if n < 2 || r.is_nan() {
            f64::NAN
        } else if n == 2 {
            1.0
        } else if r.abs() == 1.0 {
            0.0
        } else {
            let df = (n - 2) as f64;
            let t = r * (df / (1.0 - r * r)).sqrt();
            Self::two_sided_p(t, df)
        };

        PearsonResult { r, p_value, n }
    }

    /// Pearson coefficient clamped to [-1, 1]; NaN for fewer than two pairs
    /// or a constant input.
    pub fn pearson_r(x: &[f64], y: &[f64]) -> f64 {
        let n = x.len().min(y.len());
        if n < 2 {
            return f64::NAN;
        }

        let mean_x = Self::mean(&x[..n]);
        let mean_y = Self::mean(&y[..n]);

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        let mut syy = 0.0;
        for (xi, yi) in x.iter().zip(y.iter()) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            sxy += dx * dy;
            sxx += dx * dx;
            syy += dy * dy;
        }

        let denom = (sxx * syy).sqrt();
        if denom == 0.0 {
            return f64::NAN;
        }
        (sxy / denom).clamp(-1.0, 1.0)
    }

    /// Two-tailed p-value using t-distribution
    fn two_sided_p(t: f64, df: f64) -> f64 {
        if t.is_nan() || df.is_nan() {
            return f64::NAN;
        }
        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => (2.0 * dist.sf(t.abs())).min(1.0),
            Err(_) => f64::NAN,
        }
    }
}
