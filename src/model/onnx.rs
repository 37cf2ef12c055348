//! ONNX Runtime inference for classifiers exported by external training toolkits.
//! Input: `[1, 7]` f32 in table column order. Output 0: predicted label tensor (i64).

use super::Classifier;
use crate::dataset::Label;
use crate::error::ModelError;
use crate::features::{FeatureVector, FEATURE_COUNT};
use ndarray::{Array2, CowArray};
use ort::{Environment, GraphOptimizationLevel, Session, SessionBuilder, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

static ORT_ENV: OnceLock<Arc<Environment>> = OnceLock::new();

fn environment() -> Result<Arc<Environment>, String> {
    if let Some(env) = ORT_ENV.get() {
        return Ok(env.clone());
    }
    let env = Environment::builder()
        .with_name("keyprint")
        .build()
        .map_err(|e| e.to_string())?
        .into_arc();
    Ok(ORT_ENV.get_or_init(|| env).clone())
}

pub struct OnnxClassifier {
    session: Session,
    path: PathBuf,
}

impl OnnxClassifier {
    /// Load model from path. The runtime library is only touched once the file is known to exist.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let unavailable = |reason: String| ModelError::ClassifierUnavailable {
            path: path.to_path_buf(),
            reason,
        };
        if !path.exists() {
            return Err(unavailable("file not found".to_string()));
        }

        let env = environment().map_err(unavailable)?;
        let session = SessionBuilder::new(&env)
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level1))
            .and_then(|b| b.with_model_from_file(path))
            .map_err(|e| unavailable(e.to_string()))?;

        tracing::info!(path = %path.display(), inputs = session.inputs.len(), "ONNX classifier loaded");
        Ok(Self {
            session,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError> {
        let fail = |e: String| ModelError::Inference(e);

        let row: Vec<f32> = features.to_array().iter().map(|v| *v as f32).collect();
        let arr = Array2::from_shape_vec((1, FEATURE_COUNT), row).map_err(|e| fail(e.to_string()))?;
        let input = CowArray::from(arr.into_dyn());
        let value = Value::from_array(self.session.allocator(), &input).map_err(|e| fail(e.to_string()))?;

        let outputs = self.session.run(vec![value]).map_err(|e| fail(e.to_string()))?;
        let out = outputs
            .first()
            .ok_or_else(|| fail("model produced no outputs".to_string()))?;
        let tensor = out.try_extract::<i64>().map_err(|e| fail(e.to_string()))?;
        let view = tensor.view();
        let raw = view
            .iter()
            .next()
            .copied()
            .ok_or_else(|| fail("empty label tensor".to_string()))?;
        u32::try_from(raw)
            .map(Label)
            .map_err(|_| fail(format!("label {} out of range", raw)))
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
