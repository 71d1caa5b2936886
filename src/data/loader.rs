//! CSV Data Loader Module
//! Handles CSV file loading, structural summaries and the load/clean stage.

use crate::config::AnalysisConfig;
use crate::data::{DataProcessor, Dataset};
use crate::stats::{DescribeRow, DescribeTable, StatsCalculator};
use polars::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum DataError {
    #[error("CSV file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Malformed CSV data: {0}")]
    MalformedData(#[from] PolarsError),
    #[error("Required column missing: {0}")]
    MissingColumn(String),
    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },
}

impl DataError {
    /// True for structural problems with the input rather than its absence.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, DataError::MissingFile(_))
    }
}

/// Name, dtype and non-null count of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

/// Shape and per-column types of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

impl FrameSummary {
    pub fn of(df: &DataFrame) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnInfo {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                non_null: col.len() - col.null_count(),
            })
            .collect();

        Self {
            rows: df.height(),
            columns,
        }
    }
}

/// Result of the load/clean stage.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub source: PathBuf,
    pub raw: FrameSummary,
    pub filtered: FrameSummary,
    pub describe: DescribeTable,
    pub dataset: Dataset,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, DataError> {
        if !file_path.exists() {
            return Err(DataError::MissingFile(file_path.to_path_buf()));
        }

        // Infer over every row; a late decimal must not break an integer guess.
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .finish()?
            .collect()?;

        debug!(rows = df.height(), cols = df.width(), "CSV parsed");
        Ok(df)
    }

    /// Load, filter by year, drop incomplete rows and describe the result.
    pub fn load_and_clean(
        file_path: &Path,
        config: &AnalysisConfig,
    ) -> Result<CleanOutcome, DataError> {
        info!("Reading CSV from: {}", file_path.display());
        let raw_df = Self::load_csv(file_path)?;
        let filtered_df = DataProcessor::filter(&raw_df, config)?;
        info!(
            raw = raw_df.height(),
            kept = filtered_df.height(),
            "Filtered to Year >= {} with complete values",
            config.min_year
        );

        let dataset = Dataset::from_frame(&filtered_df, &config.columns)?;

        Ok(CleanOutcome {
            source: file_path.to_path_buf(),
            raw: FrameSummary::of(&raw_df),
            filtered: FrameSummary::of(&filtered_df),
            describe: Self::describe(&filtered_df)?,
            dataset,
        })
    }

    /// Get list of numeric column names.
    pub fn get_numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Descriptive statistics for every numeric column, in column order.
    pub fn describe(df: &DataFrame) -> Result<DescribeTable, DataError> {
        let mut columns: Vec<(String, Vec<f64>)> = Vec::new();
        for name in Self::get_numeric_columns(df) {
            let as_f64 = df.column(&name)?.cast(&DataType::Float64)?;
            let values: Vec<f64> = as_f64
                .f64()?
                .into_iter()
                .flatten()
                .filter(|v| !v.is_nan())
                .collect();
            columns.push((name, values));
        }

        // par_iter + collect keeps the input order
        let rows = columns
            .par_iter()
            .map(|(name, values)| DescribeRow {
                column: name.clone(),
                summary: StatsCalculator::describe(values),
            })
            .collect();

        Ok(DescribeTable { rows })
    }
}
