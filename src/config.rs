use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub outlier_threshold: f64,
    pub max_missing_pct: f64,
    pub min_records: usize,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            outlier_threshold: 1.5,
            max_missing_pct: 0.3,
            min_records: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub ma_windows: Vec<usize>,
    pub min_periods: usize,
    pub growth_threshold: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            ma_windows: vec![7, 30],
            min_periods: 3,
            growth_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub forecast_days: usize,
    pub min_points: usize,
    pub growth_windows: Vec<usize>,
    pub significant_change: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            forecast_days: 30,
            min_points: 10,
            growth_windows: vec![7, 30],
            significant_change: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartColors {
    pub actual: String,
    pub forecast: String,
    pub bounds: String,
    pub trend: String,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            actual: "#4E79A7".to_string(),
            forecast: "#F28E2B".to_string(),
            bounds: "#E5E7EB".to_string(),
            trend: "#59A14F".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub max_points: usize,
    pub colors: ChartColors,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_points: 100,
            colors: ChartColors::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub cleaner: CleanerConfig,
    pub transform: TransformConfig,
    pub analytics: AnalyticsConfig,
    pub chart: ChartConfig,
}

impl PipelineConfig {
    /// Reads a JSON overlay. Fields absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&content, &path.display().to_string())
    }

    pub fn from_json(content: &str, source: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(content)
            .with_context(|| format!("{}: malformed config JSON", source))?;
        config.validate(source)?;
        Ok(config)
    }

    pub fn validate(&self, source: &str) -> Result<()> {
        if self.cleaner.min_records == 0 {
            bail!("{}: cleaner.min_records must be positive", source);
        }
        if !(0.0..=1.0).contains(&self.cleaner.max_missing_pct) {
            bail!("{}: cleaner.max_missing_pct must be within [0, 1]", source);
        }
        if self.transform.min_periods == 0 {
            bail!("{}: transform.min_periods must be positive", source);
        }
        if self.transform.ma_windows.iter().any(|&w| w == 0) {
            bail!("{}: transform.ma_windows entries must be positive", source);
        }
        if self.analytics.growth_windows.iter().any(|&w| w == 0) {
            bail!("{}: analytics.growth_windows entries must be positive", source);
        }
        if self.chart.max_points == 0 {
            bail!("{}: chart.max_points must be positive", source);
        }
        Ok(())
    }
}
