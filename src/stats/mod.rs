//! Statistics module - descriptive stats, correlation and hypothesis tests

mod calculator;
mod correlation;
pub mod hypothesis;

pub use calculator::{
    DescribeRow, DescribeTable, PearsonResult, StatsCalculator, Summary, TTestResult,
    SIGNIFICANCE_THRESHOLD,
};
pub use correlation::CorrelationMatrix;
pub use hypothesis::HypothesisReport;
