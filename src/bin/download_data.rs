use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use gdp_analysis::config::{AnalysisConfig, CONFIG_FILE};
use gdp_analysis::fetch;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let cfg = AnalysisConfig::load_or_default(Path::new(CONFIG_FILE))?;

    let report = fetch::fetch_dataset(
        &cfg.source_url,
        &cfg.data_file,
        Duration::from_secs(cfg.timeout_secs),
    )
    .with_context(|| format!("fetching {}", cfg.source_url))?;

    println!("{}", report);
    Ok(())
}
