//! Data Processor Module
//! Handles row filtering: year threshold first, then completeness.

use crate::config::{AnalysisConfig, ColumnRoles};
use crate::data::DataError;
use polars::prelude::*;

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Fail with `MissingColumn` unless every configured column exists.
    pub fn require_columns(df: &DataFrame, roles: &ColumnRoles) -> Result<(), DataError> {
        let mut names = vec![roles.entity.as_str(), roles.year.as_str()];
        names.extend(roles.required());

        for name in names {
            if df.column(name).is_err() {
                return Err(DataError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }

    /// Keep rows with `year >= min_year`, then drop rows with a missing
    /// value in any required column. Row order is preserved.
    pub fn filter(df: &DataFrame, config: &AnalysisConfig) -> Result<DataFrame, DataError> {
        let roles = &config.columns;
        Self::require_columns(df, roles)?;

        let filtered = df
            .clone()
            .lazy()
            .filter(col(roles.year.as_str()).gt_eq(lit(config.min_year)))
            .filter(Self::complete_rows(roles))
            .collect()?;

        Ok(filtered)
    }

    /// Predicate matching rows with a non-null, non-NaN value in every
    /// required column.
    fn complete_rows(roles: &ColumnRoles) -> Expr {
        roles
            .required()
            .into_iter()
            .map(|name| {
                col(name).is_not_null().and(
                    col(name)
                        .cast(DataType::Float64)
                        .is_not_nan()
                        .fill_null(lit(false)),
                )
            })
            .reduce(|acc, e| acc.and(e))
            .unwrap_or_else(|| lit(true))
    }
}
