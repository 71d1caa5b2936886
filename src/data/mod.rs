//! Data module - CSV loading, cleaning and typed extraction

mod dataset;
mod loader;
mod processor;

pub use dataset::{Dataset, Observation};
pub use loader::{CleanOutcome, ColumnInfo, DataError, DataLoader, FrameSummary};
pub use processor::DataProcessor;
