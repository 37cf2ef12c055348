//! Compares the classifier's prediction for a live session with the label its
//! file name claims; produces a verdict.

use crate::dataset::{read_live_rows, Label, LabelMap, Orchestrator};
use crate::error::{ModelError, VerifyError};
use crate::model::Classifier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Outcome of one verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub id: String,
    pub file: PathBuf,
    pub username: String,
    pub expected: Label,
    pub predicted: Label,
    pub matched: bool,
    pub ts: DateTime<Utc>,
}

/// Holds the loaded classifier and the fixed inference label map for the
/// lifetime of the process.
pub struct VerificationEngine {
    classifier: Box<dyn Classifier>,
    expected_labels: LabelMap,
}

impl VerificationEngine {
    pub fn new(classifier: Box<dyn Classifier>, expected_labels: LabelMap) -> Self {
        Self {
            classifier,
            expected_labels,
        }
    }

    /// Engine using the fixed `A`..`U` letter map.
    pub fn with_letter_labels(classifier: Box<dyn Classifier>) -> Self {
        Self::new(classifier, LabelMap::inference_letters())
    }

    /// Extract the live session, reload the persisted row, predict, compare.
    pub fn verify(&self, orchestrator: &Orchestrator, csv_path: &Path) -> Result<Verdict, VerifyError> {
        let sample = orchestrator.extract_live(csv_path, &self.expected_labels)?;
        let rows = read_live_rows(&orchestrator.paths().live_features)?;
        let row = rows
            .first()
            .ok_or_else(|| ModelError::Inference("live feature file has no rows".to_string()))?;
        let predicted = self.classifier.predict(row)?;
        let matched = predicted == sample.expected;

        info!(
            file = %csv_path.display(),
            classifier = self.classifier.kind(),
            predicted = predicted.0,
            expected = sample.expected.0,
            matched,
            "verification"
        );

        Ok(Verdict {
            id: Uuid::new_v4().to_string(),
            file: sample.path,
            username: sample.username,
            expected: sample.expected,
            predicted,
            matched,
            ts: Utc::now(),
        })
    }

    /// Boolean form of [`VerificationEngine::verify`].
    pub fn is_match(&self, orchestrator: &Orchestrator, csv_path: &Path) -> Result<bool, VerifyError> {
        self.verify(orchestrator, csv_path).map(|v| v.matched)
    }

    pub fn expected_labels(&self) -> &LabelMap {
        &self.expected_labels
    }
}
