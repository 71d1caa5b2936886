//! Hypothesis tests relating trade, government expenditure and inflation to
//! GDP per capita.
//!
//! Each test reads the dataset independently. Quartile groups are rebuilt
//! per test and never shared.

use crate::config::Metric;
use crate::data::Dataset;
use crate::stats::{PearsonResult, StatsCalculator, TTestResult};

/// Which group is passed first to the t-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrder {
    HighVsLow,
    LowVsHigh,
}

/// GDP values of the rows in the lower and upper quartile of a split metric.
#[derive(Debug, Clone, PartialEq)]
pub struct QuartileSplit {
    pub q25: f64,
    pub q75: f64,
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl QuartileSplit {
    /// `low` holds `values[i]` where `split_by[i] <= q25`, `high` where
    /// `split_by[i] >= q75`. The middle half lands in neither group.
    pub fn new(split_by: &[f64], values: &[f64]) -> Self {
        let sorted = StatsCalculator::sorted(split_by);
        let q25 = StatsCalculator::percentile(&sorted, 25.0);
        let q75 = StatsCalculator::percentile(&sorted, 75.0);

        let pairs = split_by.iter().zip(values.iter());
        let low = pairs.clone().filter(|(s, _)| **s <= q25).map(|(_, v)| *v).collect();
        let high = pairs.filter(|(s, _)| **s >= q75).map(|(_, v)| *v).collect();

        Self { q25, q75, low, high }
    }
}

/// Result of a quartile-group mean comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupComparison {
    pub title: String,
    pub split_metric: Metric,
    pub q25: f64,
    pub q75: f64,
    pub low_n: usize,
    pub high_n: usize,
    pub low_mean: f64,
    pub high_mean: f64,
    pub order: GroupOrder,
    pub ttest: TTestResult,
}

/// Result of the correlation test.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationTest {
    pub title: String,
    pub pearson: PearsonResult,
}

/// All three tests.
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisReport {
    pub trade: GroupComparison,
    pub gov_expenditure: CorrelationTest,
    pub inflation: GroupComparison,
}

/// Compare GDP per capita between the quartile groups of `split_metric`.
pub fn compare_quartiles(
    dataset: &Dataset,
    split_metric: Metric,
    order: GroupOrder,
    title: &str,
) -> GroupComparison {
    let split = QuartileSplit::new(
        &dataset.values(split_metric),
        &dataset.values(Metric::GdpPerCapita),
    );

    let ttest = match order {
        GroupOrder::HighVsLow => StatsCalculator::welch_ttest(&split.high, &split.low),
        GroupOrder::LowVsHigh => StatsCalculator::welch_ttest(&split.low, &split.high),
    };

    GroupComparison {
        title: title.to_string(),
        split_metric,
        q25: split.q25,
        q75: split.q75,
        low_n: split.low.len(),
        high_n: split.high.len(),
        low_mean: StatsCalculator::mean(&split.low),
        high_mean: StatsCalculator::mean(&split.high),
        order,
        ttest,
    }
}

/// H1: high trade vs low trade, tested as (high, low).
pub fn trade_vs_gdp(dataset: &Dataset) -> GroupComparison {
    compare_quartiles(
        dataset,
        Metric::TradeShare,
        GroupOrder::HighVsLow,
        "H1: High trade vs low trade (GDP per capita)",
    )
}

/// H2: Pearson correlation of government expenditure with GDP per capita,
/// over rows where both values are present.
pub fn gov_exp_vs_gdp(dataset: &Dataset) -> CorrelationTest {
    let (gov, gdp): (Vec<f64>, Vec<f64>) = dataset
        .rows()
        .iter()
        .filter(|r| !r.gov_expenditure.is_nan() && !r.gdp_per_capita.is_nan())
        .map(|r| (r.gov_expenditure, r.gdp_per_capita))
        .unzip();

    CorrelationTest {
        title: "H2: Government expenditure vs GDP per capita (Pearson corr)".to_string(),
        pearson: StatsCalculator::pearson(&gov, &gdp),
    }
}

/// H3: high inflation vs low inflation, tested as (low, high).
pub fn inflation_vs_gdp(dataset: &Dataset) -> GroupComparison {
    compare_quartiles(
        dataset,
        Metric::Inflation,
        GroupOrder::LowVsHigh,
        "H3: High inflation vs low inflation (GDP per capita)",
    )
}

pub fn run_all(dataset: &Dataset) -> HypothesisReport {
    HypothesisReport {
        trade: trade_vs_gdp(dataset),
        gov_expenditure: gov_exp_vs_gdp(dataset),
        inflation: inflation_vs_gdp(dataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;

    fn obs(gdp: f64, gov: f64, trade: f64, infl: f64) -> Observation {
        Observation {
            entity: "A".to_string(),
            year: 2000,
            gdp_per_capita: gdp,
            gov_expenditure: gov,
            trade_share: trade,
            inflation: infl,
        }
    }

    #[test]
    fn quartile_split_on_skewed_trade() {
        let split = QuartileSplit::new(
            &[1.0, 2.0, 3.0, 4.0, 100.0],
            &[10.0, 20.0, 30.0, 40.0, 1000.0],
        );
        assert_eq!(split.q25, 2.0);
        assert_eq!(split.q75, 4.0);
        assert_eq!(split.low, vec![10.0, 20.0]);
        assert_eq!(split.high, vec![40.0, 1000.0]);
    }

    #[test]
    fn quartile_groups_respect_bounds() {
        let trade = [5.0, 17.0, 3.0, 42.0, 8.0, 8.0, 29.0, 11.0, 60.0];
        let idx: Vec<f64> = (0..trade.len()).map(|i| i as f64).collect();
        let split = QuartileSplit::new(&trade, &idx);

        for &i in &split.low {
            assert!(trade[i as usize] <= split.q25);
        }
        for &i in &split.high {
            assert!(trade[i as usize] >= split.q75);
        }
        assert!(split.low.iter().all(|i| !split.high.contains(i)));
    }

    #[test]
    fn groups_overlap_when_quartiles_coincide() {
        let split = QuartileSplit::new(&[7.0, 7.0, 7.0], &[1.0, 2.0, 3.0]);
        assert_eq!(split.low, split.high);
        assert_eq!(split.low.len(), 3);
    }

    #[test]
    fn h1_and_h3_use_opposite_argument_order() {
        let rows = vec![
            obs(10.0, 1.0, 1.0, 1.0),
            obs(12.0, 2.0, 2.0, 2.0),
            obs(30.0, 3.0, 3.0, 3.0),
            obs(50.0, 4.0, 4.0, 4.0),
            obs(55.0, 5.0, 5.0, 5.0),
            obs(60.0, 6.0, 6.0, 6.0),
            obs(14.0, 7.0, 0.5, 0.5),
            obs(58.0, 8.0, 9.0, 9.0),
        ];
        let ds = Dataset::new(rows);

        let h1 = trade_vs_gdp(&ds);
        let h3 = inflation_vs_gdp(&ds);

        assert_eq!(h1.order, GroupOrder::HighVsLow);
        assert_eq!(h3.order, GroupOrder::LowVsHigh);
        assert_eq!(h1.low_mean, h3.low_mean);
        assert_eq!(h1.high_mean, h3.high_mean);
        assert!(h1.ttest.statistic > 0.0);
        assert_eq!(h1.ttest.statistic, -h3.ttest.statistic);
        assert_eq!(h1.ttest.p_value, h3.ttest.p_value);
    }

    #[test]
    fn h2_detects_linear_relationship() {
        let rows = (1..=10)
            .map(|i| {
                let gdp = i as f64 * 1000.0;
                obs(gdp, 2.0 * gdp + 5.0, 1.0, 1.0)
            })
            .collect();
        let h2 = gov_exp_vs_gdp(&Dataset::new(rows));
        assert!((h2.pearson.r - 1.0).abs() < 1e-12);
        assert!(h2.pearson.p_value < 1e-9);
        assert_eq!(h2.pearson.n, 10);
    }

    #[test]
    fn tiny_groups_yield_nan_without_panicking() {
        let ds = Dataset::new(vec![obs(1.0, 1.0, 1.0, 1.0), obs(2.0, 2.0, 2.0, 2.0)]);
        let report = run_all(&ds);
        assert_eq!(report.trade.low_n, 1);
        assert_eq!(report.trade.high_n, 1);
        assert!(report.trade.ttest.statistic.is_nan());
        assert!(report.inflation.ttest.p_value.is_nan());

        let empty = run_all(&Dataset::default());
        assert!(empty.trade.low_mean.is_nan());
        assert!(empty.gov_expenditure.pearson.r.is_nan());
    }
}
