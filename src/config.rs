//! Analysis configuration.
//! Column roles, entities of interest and output locations, loaded from JSON
//! or defaulted to the published dataset's layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file looked up by the binaries.
pub const CONFIG_FILE: &str = "gdp_analysis.json";

pub const DEFAULT_SOURCE_URL: &str = "https://huggingface.co/datasets/tripathyShaswata/GDP-Per-Capita_Gov-Expenditure_Trade/resolve/main/gdp_per_capita.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Semantic role of a numeric column in the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    GdpPerCapita,
    GovExpenditure,
    TradeShare,
    Inflation,
}

impl Metric {
    /// Required metrics in the order the reports list them.
    pub const ALL: [Metric; 4] = [
        Metric::GdpPerCapita,
        Metric::GovExpenditure,
        Metric::TradeShare,
        Metric::Inflation,
    ];

    /// Short label used on chart axes.
    pub fn short_label(self) -> &'static str {
        match self {
            Metric::GdpPerCapita => "GDP per capita",
            Metric::GovExpenditure => "Gov. expenditure",
            Metric::TradeShare => "Trade share",
            Metric::Inflation => "Inflation",
        }
    }
}

/// Mapping of semantic column role to source column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRoles {
    pub entity: String,
    pub year: String,
    pub gdp_per_capita: String,
    pub gov_expenditure: String,
    pub trade_share: String,
    pub inflation: String,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            entity: "Entity".to_string(),
            year: "Year".to_string(),
            gdp_per_capita: "GDP per capita".to_string(),
            gov_expenditure: "Government expenditure (% of GDP)".to_string(),
            trade_share: "Trade as a Share of GDP".to_string(),
            inflation: "Inflation, consumer prices (annual %)".to_string(),
        }
    }
}

impl ColumnRoles {
    /// Source column name for a metric.
    pub fn name(&self, metric: Metric) -> &str {
        match metric {
            Metric::GdpPerCapita => &self.gdp_per_capita,
            Metric::GovExpenditure => &self.gov_expenditure,
            Metric::TradeShare => &self.trade_share,
            Metric::Inflation => &self.inflation,
        }
    }

    /// The four columns that must be present for a row to survive cleaning.
    pub fn required(&self) -> Vec<&str> {
        Metric::ALL.iter().map(|&m| self.name(m)).collect()
    }
}

/// Histogram output for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSpec {
    pub metric: Metric,
    pub title: String,
    pub file_name: String,
}

impl HistogramSpec {
    fn new(metric: Metric, title: &str, file_name: &str) -> Self {
        Self {
            metric,
            title: title.to_string(),
            file_name: file_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub source_url: String,
    pub data_file: PathBuf,
    pub output_dir: PathBuf,
    pub timeout_secs: u64,
    pub min_year: i64,
    pub histogram_bins: usize,
    pub histograms: Vec<HistogramSpec>,
    pub entities: Vec<String>,
    pub timeseries_file: String,
    pub correlation_file: String,
    pub columns: ColumnRoles,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            data_file: PathBuf::from("gdp_per_capita.csv"),
            output_dir: PathBuf::from("."),
            timeout_secs: 60,
            min_year: 1990,
            histogram_bins: 50,
            histograms: vec![
                HistogramSpec::new(
                    Metric::GdpPerCapita,
                    "GDP per capita (1990+)",
                    "hist_gdp_per_capita.png",
                ),
                HistogramSpec::new(
                    Metric::TradeShare,
                    "Trade as a Share of GDP (1990+)",
                    "hist_trade_share.png",
                ),
                HistogramSpec::new(
                    Metric::GovExpenditure,
                    "Government expenditure (% of GDP) (1990+)",
                    "hist_gov_exp.png",
                ),
                HistogramSpec::new(
                    Metric::Inflation,
                    "Inflation (annual %) (1990+)",
                    "hist_inflation.png",
                ),
            ],
            entities: vec![
                "Turkey".to_string(),
                "Germany".to_string(),
                "United States".to_string(),
            ],
            timeseries_file: "timeseries_gdp_selected_countries.png".to_string(),
            correlation_file: "corr_matrix.png".to_string(),
            columns: ColumnRoles::default(),
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config. Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`AnalysisConfig::load`], but an absent file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_published_dataset() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.min_year, 1990);
        assert_eq!(cfg.histogram_bins, 50);
        assert_eq!(cfg.histograms.len(), 4);
        assert_eq!(
            cfg.columns.required(),
            vec![
                "GDP per capita",
                "Government expenditure (% of GDP)",
                "Trade as a Share of GDP",
                "Inflation, consumer prices (annual %)",
            ]
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"{{"entities": ["A", "B"], "min_year": 2000, "columns": {{"entity": "Country"}}}}"#
        )
        .unwrap();

        let cfg = AnalysisConfig::load(&path).unwrap();
        assert_eq!(cfg.entities, vec!["A", "B"]);
        assert_eq!(cfg.min_year, 2000);
        assert_eq!(cfg.columns.entity, "Country");
        assert_eq!(cfg.columns.year, "Year");
        assert_eq!(cfg.histogram_bins, 50);
    }

    #[test]
    fn absent_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = AnalysisConfig::load_or_default(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg, AnalysisConfig::default());
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AnalysisConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
