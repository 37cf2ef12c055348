//! Classifier collaborator: training context, trainable centroid model, ONNX inference.

mod centroid;
mod onnx;

pub use centroid::CentroidModel;
pub use onnx::OnnxClassifier;

use crate::dataset::{FeatureTable, Label, LABEL_COLUMN};
use crate::error::ModelError;
use crate::features::{FeatureVector, FEATURE_COUNT};
use std::path::Path;

/// Anything that maps one feature row to a user label.
pub trait Classifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError>;

    /// Short identifier for logs.
    fn kind(&self) -> &'static str;
}

/// Features and targets split out of a feature table, ready for fitting.
#[derive(Debug, Clone)]
pub struct TrainingContext {
    pub target_column: String,
    pub samples: Vec<[f64; FEATURE_COUNT]>,
    pub targets: Vec<Label>,
}

impl TrainingContext {
    /// Validate the target column and split the table into inputs and labels.
    pub fn setup(table: &FeatureTable, target_column: &str) -> Result<Self, ModelError> {
        if target_column != LABEL_COLUMN {
            return Err(ModelError::MissingTarget(target_column.to_string()));
        }
        if table.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        let (samples, targets): (Vec<_>, Vec<_>) = table
            .rows()
            .iter()
            .map(|r| (r.features.to_array(), r.label))
            .unzip();
        Ok(Self {
            target_column: target_column.to_string(),
            samples,
            targets,
        })
    }

    /// Distinct labels, ascending.
    pub fn classes(&self) -> Vec<Label> {
        let mut classes = self.targets.clone();
        classes.sort();
        classes.dedup();
        classes
    }
}

/// Load a trained model; `.onnx` files go through ONNX Runtime, anything else
/// is read as a centroid model.
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
    if !path.exists() {
        return Err(ModelError::ClassifierUnavailable {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }
    let is_onnx = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("onnx"))
        .unwrap_or(false);
    if is_onnx {
        Ok(Box::new(OnnxClassifier::load(path)?))
    } else {
        let model = CentroidModel::load(path).map_err(|e| ModelError::ClassifierUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Box::new(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LabeledRow;

    #[test]
    fn setup_rejects_unknown_target() {
        let table = FeatureTable::from_rows(vec![LabeledRow {
            features: FeatureVector::default(),
            label: Label(0),
        }]);
        assert!(matches!(
            TrainingContext::setup(&table, "Username"),
            Err(ModelError::MissingTarget(_))
        ));
        assert!(matches!(
            TrainingContext::setup(&FeatureTable::default(), LABEL_COLUMN),
            Err(ModelError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn setup_splits_rows() {
        let table = FeatureTable::from_rows(vec![
            LabeledRow { features: FeatureVector::from_array([1.0; FEATURE_COUNT]), label: Label(1) },
            LabeledRow { features: FeatureVector::from_array([2.0; FEATURE_COUNT]), label: Label(0) },
            LabeledRow { features: FeatureVector::from_array([3.0; FEATURE_COUNT]), label: Label(1) },
        ]);
        let ctx = TrainingContext::setup(&table, LABEL_COLUMN).unwrap();
        assert_eq!(ctx.samples.len(), 3);
        assert_eq!(ctx.targets, vec![Label(1), Label(0), Label(1)]);
        assert_eq!(ctx.classes(), vec![Label(0), Label(1)]);
    }

    #[test]
    fn missing_model_is_unavailable() {
        let err = load_classifier(Path::new("nonexistent-model.json")).err().unwrap();
        assert!(matches!(err, ModelError::ClassifierUnavailable { .. }));
    }

    #[test]
    fn corrupt_model_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json").unwrap();
        let err = load_classifier(&path).err().unwrap();
        assert!(matches!(err, ModelError::ClassifierUnavailable { .. }));
    }
}
