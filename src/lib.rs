//! GDP Analysis - dataset download, cleaning, charts & hypothesis tests
//!
//! Pipeline: fetch → load/clean → plot → test. Each stage returns a report
//! value; `report` renders them for the console.

pub mod charts;
pub mod config;
pub mod data;
pub mod fetch;
pub mod report;
pub mod stats;
