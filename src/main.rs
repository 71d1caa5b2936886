//! GDP Analysis - load the local CSV, clean it, render charts and run the
//! hypothesis tests.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use gdp_analysis::charts;
use gdp_analysis::config::{AnalysisConfig, CONFIG_FILE};
use gdp_analysis::data::DataLoader;
use gdp_analysis::stats::hypothesis;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let cfg = AnalysisConfig::load_or_default(Path::new(CONFIG_FILE))?;

    let outcome = DataLoader::load_and_clean(&cfg.data_file, &cfg)
        .with_context(|| format!("loading {}", cfg.data_file.display()))?;
    println!("{}", outcome);
    if outcome.dataset.is_empty() {
        warn!("No rows left after cleaning; statistics will be NaN");
    }

    let eda = charts::render_all(&outcome.dataset, &cfg).context("rendering charts")?;
    println!("{}", eda);

    let tests = hypothesis::run_all(&outcome.dataset);
    println!("{}", tests);

    Ok(())
}
