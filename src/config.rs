//! Application configuration, loaded once at startup and passed by reference.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input and output file locations
    pub paths: PathsConfig,
    /// Training parameters
    pub training: TrainingConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory of keylogger session files used for training
    pub sessions_dir: PathBuf,
    /// Labeled feature table written by directory extraction
    pub train_table: PathBuf,
    /// Single unlabeled row written by live extraction
    pub live_features: PathBuf,
    /// Username → label mapping built during training
    pub label_map: PathBuf,
    /// Trained classifier (`.json` centroid model or `.onnx`)
    pub model: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub target_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            training: TrainingConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sessions_dir: PathBuf::from("sessions"),
            train_table: PathBuf::from("train.csv"),
            live_features: PathBuf::from("live_features.csv"),
            label_map: PathBuf::from("labels.json"),
            model: PathBuf::from("model.json"),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            target_column: crate::dataset::LABEL_COLUMN.to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present and valid; otherwise return default
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<AppConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
