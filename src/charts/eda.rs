//! Exploratory data analysis: histograms, time series and correlation heatmap.

use crate::charts::{ChartPlotter, RenderError, StaticChartRenderer};
use crate::config::{AnalysisConfig, Metric};
use crate::data::Dataset;
use crate::stats::CorrelationMatrix;
use std::path::PathBuf;
use tracing::{info, warn};

/// Files written and numbers computed by the exploratory pass.
#[derive(Debug, Clone)]
pub struct EdaReport {
    pub saved: Vec<PathBuf>,
    pub skipped_entities: Vec<String>,
    pub correlation: CorrelationMatrix,
}

/// Render every exploratory chart into `config.output_dir`.
pub fn render_all(dataset: &Dataset, config: &AnalysisConfig) -> Result<EdaReport, RenderError> {
    std::fs::create_dir_all(&config.output_dir)?;
    let mut saved = Vec::new();

    for spec in &config.histograms {
        let path = config.output_path(&spec.file_name);
        let bins = ChartPlotter::histogram(&dataset.values(spec.metric), config.histogram_bins);
        StaticChartRenderer::draw_histogram(
            &path,
            &spec.title,
            config.columns.name(spec.metric),
            &bins,
        )?;
        info!("Saved: {}", path.display());
        saved.push(path);
    }

    let plan = ChartPlotter::time_series(dataset, &config.entities);
    for entity in &plan.skipped {
        warn!("No data for: {}", entity);
    }
    let ts_path = config.output_path(&config.timeseries_file);
    StaticChartRenderer::draw_time_series(
        &ts_path,
        &format!("GDP per capita over time ({}+)", config.min_year),
        config.columns.name(Metric::GdpPerCapita),
        &plan,
    )?;
    info!("Saved: {}", ts_path.display());
    saved.push(ts_path);

    let correlation = CorrelationMatrix::of_dataset(dataset, &config.columns);
    let labels: Vec<&str> = Metric::ALL.iter().map(|m| m.short_label()).collect();
    let corr_path = config.output_path(&config.correlation_file);
    StaticChartRenderer::draw_heatmap(&corr_path, "Correlation matrix", &labels, &correlation)?;
    info!("Saved: {}", corr_path.display());
    saved.push(corr_path);

    Ok(EdaReport {
        saved,
        skipped_entities: plan.skipped,
        correlation,
    })
}
