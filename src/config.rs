use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Location of the dataset when no configuration overrides it.
pub const DEFAULT_DATASET: &str = "dashboard/all_data.csv";

/// Startup settings. Every field has a default, so `dashboard.json` only
/// needs the keys it changes:
///
/// ```json
/// { "dataset_path": "data/day.csv", "chart_height": 320.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    /// Initial window size in points.
    pub window_size: [f32; 2],
    /// Height of each chart in points.
    pub chart_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            window_size: [1200.0, 900.0],
            chart_height: 280.0,
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    /// A file that exists but cannot be parsed is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
