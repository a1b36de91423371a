//! Pipeline configuration.
//!
//! Defaults reproduce the reference run: read the first CSV under `archive/`,
//! sample 50,000 complete rows with seed 42 and write raw per-state counts.
//! A JSON file can override any subset of fields:
//!
//! ```json
//! {
//!   "input_dir": "archive",
//!   "sample_size": 10000,
//!   "metric": "rate_per100k"
//! }
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const DEFAULT_SAMPLE_SIZE: usize = 50_000;
pub const DEFAULT_SEED: u64 = 42;

pub const STATE_TOTALS_FILE: &str = "state_totals.csv";
pub const STATE_HEATMAPS_FILE: &str = "state_heatmaps.json";

/// What the `total_accidents` column of the totals file holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TotalsMetric {
    /// Number of sampled incidents in the state.
    #[default]
    Count,
    /// Sampled incidents per 100k residents, from the static population table.
    RatePer100k,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub sample_size: usize,
    pub seed: u64,
    pub metric: TotalsMetric,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("archive"),
            output_dir: PathBuf::from("."),
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            metric: TotalsMetric::Count,
        }
    }
}

impl PipelineConfig {
    /// Loads the config from a JSON file at `path`. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn state_totals_path(&self) -> PathBuf {
        self.output_dir.join(STATE_TOTALS_FILE)
    }

    pub fn state_heatmaps_path(&self) -> PathBuf {
        self.output_dir.join(STATE_HEATMAPS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("archive"));
        assert_eq!(config.sample_size, 50_000);
        assert_eq!(config.seed, 42);
        assert_eq!(config.metric, TotalsMetric::Count);
        assert_eq!(config.state_totals_path(), PathBuf::from("./state_totals.csv"));
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"sample_size": 10, "metric": "rate_per100k"}"#).unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.sample_size, 10);
        assert_eq!(config.metric, TotalsMetric::RatePer100k);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(PipelineConfig::load(&path).is_err());
    }
}
