//! YAML configuration for the photorank driver.
//!
//! A single YAML file describes a ranking run: which strategy to use, how
//! many workers, how many results, and where the dataset lives. The bench
//! driver loads it at startup; individual command-line flags override
//! whatever the file says.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//! name: "nightly speedup sweep"
//!
//! ranking:
//!   mode: "bsp"
//!   workers: 8
//!   top_k: 10
//!
//! dataset:
//!   path: "data/metadata_big.jsonl"
//!   size: 1000000
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Strategy;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for one ranking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RankerConfig {
    /// Configuration format version.
    pub version: String,

    /// Optional name shown in logs.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub ranking: RankingSection,

    #[serde(default)]
    pub dataset: DatasetSection,
}

impl RankerConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: RankerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }
        self.ranking.validate()?;
        Ok(())
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            ranking: RankingSection::default(),
            dataset: DatasetSection::default(),
        }
    }
}

/// Strategy and sizing of the ranking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingSection {
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Worker/scorer count; 0 means the strategy's own default.
    #[serde(default)]
    pub workers: usize,

    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default)]
    pub query: String,
}

impl RankingSection {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.mode.parse::<Strategy>().is_err() {
            return Err(ConfigLoadError::Validation(format!(
                "ranking.mode must be one of seq, bsp, pipeline, ws; got {:?}",
                self.mode
            )));
        }
        if self.top_k == 0 {
            return Err(ConfigLoadError::Validation(
                "ranking.top_k must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RankingSection {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            workers: 0,
            top_k: default_top_k(),
            query: String::new(),
        }
    }
}

/// Where the candidate photos come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSection {
    /// Path to a JSONL metadata export.
    #[serde(default)]
    pub path: Option<String>,

    /// Cap on the number of records used; 0 means all of them.
    #[serde(default)]
    pub size: usize,
}

fn default_mode() -> String {
    "seq".to_string()
}

fn default_top_k() -> usize {
    10
}
