//! Pairwise Pearson correlation matrix over the required metrics.

use crate::config::{ColumnRoles, Metric};
use crate::data::Dataset;
use crate::stats::StatsCalculator;

/// Square, symmetric correlation matrix with labelled rows and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate the given columns. Each off-diagonal cell is computed once
    /// and mirrored; the diagonal is exactly 1.0 unless the column is
    /// constant or has fewer than two values, in which case it is NaN.
    pub fn from_columns(labels: Vec<String>, columns: &[Vec<f64>]) -> Self {
        let k = columns.len();
        let mut values = vec![vec![f64::NAN; k]; k];

        for i in 0..k {
            let variance = StatsCalculator::sample_variance(&columns[i]);
            values[i][i] = if variance > 0.0 { 1.0 } else { f64::NAN };

            for j in (i + 1)..k {
                let r = StatsCalculator::pearson_r(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self { labels, values }
    }

    /// Correlation of the four required metrics, labelled by source column.
    pub fn of_dataset(dataset: &Dataset, roles: &ColumnRoles) -> Self {
        let labels = Metric::ALL
            .iter()
            .map(|&m| roles.name(m).to_string())
            .collect();
        let columns: Vec<Vec<f64>> = Metric::ALL.iter().map(|&m| dataset.values(m)).collect();
        Self::from_columns(labels, &columns)
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;

    fn dataset() -> Dataset {
        let rows = [
            (1.0, 30.0, 80.0, 2.5),
            (4.0, 25.0, 40.0, 9.0),
            (2.5, 41.0, 95.0, 1.0),
            (8.0, 18.0, 55.0, 4.0),
            (6.0, 33.0, 60.0, 3.0),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(gdp, gov, trade, infl))| Observation {
            entity: format!("E{i}"),
            year: 2000,
            gdp_per_capita: gdp,
            gov_expenditure: gov,
            trade_share: trade,
            inflation: infl,
        })
        .collect();
        Dataset::new(rows)
    }

    #[test]
    fn symmetric_with_unit_diagonal() {
        let m = CorrelationMatrix::of_dataset(&dataset(), &ColumnRoles::default());
        assert_eq!(m.size(), 4);
        for i in 0..4 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..4 {
                assert_eq!(m.get(i, j).to_bits(), m.get(j, i).to_bits());
                assert!(m.get(i, j).abs() <= 1.0);
            }
        }
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let a = CorrelationMatrix::of_dataset(&dataset(), &ColumnRoles::default());
        let b = CorrelationMatrix::of_dataset(&dataset(), &ColumnRoles::default());
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(a.get(i, j).to_bits(), b.get(i, j).to_bits());
            }
        }
    }

    #[test]
    fn constant_column_is_nan() {
        let m = CorrelationMatrix::from_columns(
            vec!["x".into(), "c".into()],
            &[vec![1.0, 2.0, 3.0], vec![5.0, 5.0, 5.0]],
        );
        assert_eq!(m.get(0, 0), 1.0);
        assert!(m.get(1, 1).is_nan());
        assert!(m.get(0, 1).is_nan());
    }
}
