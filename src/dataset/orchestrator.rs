//! Directory fan-out for training tables and single-file live extraction.

use super::{write_live_row, FeatureTable, Label, LabelMap, LabeledRow};
use crate::config::PathsConfig;
use crate::error::DatasetError;
use crate::features::{FeatureExtractor, FeatureVector};
use crate::session::{read_session, username_from_file_name};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

const SESSION_SUFFIX: &str = ".csv";

/// Features of one live session plus the label its file name claims.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSample {
    pub path: PathBuf,
    pub username: String,
    pub features: FeatureVector,
    pub expected: Label,
}

/// Owns the training label map; extends it append-only while walking sessions.
pub struct Orchestrator {
    paths: PathsConfig,
    extractor: FeatureExtractor,
    labels: LabelMap,
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Orchestrator {
    pub fn new(paths: PathsConfig) -> Self {
        Self::with_labels(paths, LabelMap::new())
    }

    /// Continue numbering from an existing mapping.
    pub fn with_labels(paths: PathsConfig, labels: LabelMap) -> Self {
        Self {
            paths,
            extractor: FeatureExtractor::new(),
            labels,
        }
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    /// Session files directly inside `dir`, ordered by file name.
    pub fn session_files(dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if file_name_of(entry.path()).ends_with(SESSION_SUFFIX) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Read and extract one session file.
    pub fn extract_file(&self, path: &Path) -> Result<FeatureVector, DatasetError> {
        let events = read_session(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let features = self
            .extractor
            .extract(&events)
            .map_err(|source| DatasetError::Extract {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(file = %path.display(), events = events.len(), "extracted session");
        Ok(features)
    }

    /// Build the labeled table for every session in `dir`, then persist the
    /// table and the label map to the configured paths.
    pub fn extract_directory(&mut self, dir: &Path) -> Result<FeatureTable, DatasetError> {
        let files = Self::session_files(dir)?;
        info!(dir = %dir.display(), files = files.len(), "extracting sessions");

        let mut rows = Vec::with_capacity(files.len());
        for path in &files {
            let name = file_name_of(path);
            let username = username_from_file_name(&name)
                .ok_or_else(|| DatasetError::InvalidSessionName(name.clone()))?;
            let features = self.extract_file(path)?;
            let label = self.labels.get_or_assign(username);
            debug!(file = %name, username, label = label.0, "labeled session");
            rows.push(LabeledRow { features, label });
        }

        let table = FeatureTable::from_rows(rows);
        table.write_csv(&self.paths.train_table)?;
        self.labels.save(&self.paths.label_map)?;
        info!(
            rows = table.len(),
            users = self.labels.len(),
            table = %self.paths.train_table.display(),
            "training table written"
        );
        Ok(table)
    }

    /// Extract one live session, persist its unlabeled row, and look up the
    /// claimed label in `expected_labels`.
    pub fn extract_live(
        &self,
        csv_path: &Path,
        expected_labels: &LabelMap,
    ) -> Result<LiveSample, DatasetError> {
        let name = file_name_of(csv_path);
        let features = self.extract_file(csv_path)?;
        let username = username_from_file_name(&name)
            .ok_or_else(|| DatasetError::InvalidSessionName(name.clone()))?;
        let expected = expected_labels
            .get(username)
            .ok_or_else(|| DatasetError::UnknownUsername(username.to_string()))?;

        write_live_row(&self.paths.live_features, &features)?;
        info!(file = %name, username, expected = expected.0, "live features written");

        Ok(LiveSample {
            path: csv_path.to_path_buf(),
            username: username.to_string(),
            features,
            expected,
        })
    }
}
