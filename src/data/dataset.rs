//! Typed view of the filtered table.

use crate::config::{ColumnRoles, Metric};
use crate::data::DataError;
use polars::prelude::*;

/// One (entity, year) observation with the four required metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub entity: String,
    pub year: i64,
    pub gdp_per_capita: f64,
    pub gov_expenditure: f64,
    pub trade_share: f64,
    pub inflation: f64,
}

impl Observation {
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::GdpPerCapita => self.gdp_per_capita,
            Metric::GovExpenditure => self.gov_expenditure,
            Metric::TradeShare => self.trade_share,
            Metric::Inflation => self.inflation,
        }
    }
}

/// Ordered, read-only collection of observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Observation>,
}

impl Dataset {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Extract typed rows from a cleaned frame. Every required value must be
    /// present; a null entity becomes an empty string.
    pub fn from_frame(df: &DataFrame, roles: &ColumnRoles) -> Result<Self, DataError> {
        let entity_col = Self::cast_column(df, &roles.entity, DataType::String)?;
        let entities = entity_col.str()?;
        let year_col = Self::cast_column(df, &roles.year, DataType::Int64)?;
        let years = year_col.i64()?;

        let mut metric_cols = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            let name = roles.name(metric);
            let column = Self::cast_column(df, name, DataType::Float64)?;
            metric_cols.push((name, column.f64()?.clone()));
        }

        let value = |idx: usize, row: usize| -> Result<f64, DataError> {
            let (name, ca) = &metric_cols[idx];
            ca.get(row).ok_or_else(|| DataError::MissingValue {
                column: name.to_string(),
                row,
            })
        };

        let mut rows = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let year = years.get(row).ok_or_else(|| DataError::MissingValue {
                column: roles.year.clone(),
                row,
            })?;

            rows.push(Observation {
                entity: entities.get(row).unwrap_or_default().to_string(),
                year,
                gdp_per_capita: value(0, row)?,
                gov_expenditure: value(1, row)?,
                trade_share: value(2, row)?,
                inflation: value(3, row)?,
            });
        }

        Ok(Self { rows })
    }

    fn cast_column(df: &DataFrame, name: &str, dtype: DataType) -> Result<Column, DataError> {
        let column = df
            .column(name)
            .map_err(|_| DataError::MissingColumn(name.to_string()))?;
        Ok(column.cast(&dtype)?)
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one metric, in row order.
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.rows.iter().map(|r| r.metric(metric)).collect()
    }

    /// Rows belonging to one entity, in row order.
    pub fn for_entity<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a Observation> {
        self.rows.iter().filter(move |r| r.entity == entity)
    }
}
