//! Nearest-centroid classifier over z-scored features, persisted as JSON.

use super::{Classifier, TrainingContext};
use crate::dataset::{FeatureTable, Label};
use crate::error::ModelError;
use crate::features::{FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub label: Label,
    pub center: [f64; FEATURE_COUNT],
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidModel {
    pub means: [f64; FEATURE_COUNT],
    /// Population standard deviation per feature; constant features use 1.0
    pub scales: [f64; FEATURE_COUNT],
    /// Sorted by label
    pub centroids: Vec<Centroid>,
}

impl CentroidModel {
    /// Setup and fit in one step.
    pub fn train(table: &FeatureTable, target_column: &str) -> Result<Self, ModelError> {
        let ctx = TrainingContext::setup(table, target_column)?;
        Ok(Self::fit(&ctx))
    }

    pub fn fit(ctx: &TrainingContext) -> Self {
        let n = ctx.samples.len().max(1) as f64;
        let mut means = [0.0; FEATURE_COUNT];
        for s in &ctx.samples {
            for (m, v) in means.iter_mut().zip(s) {
                *m += v;
            }
        }
        means.iter_mut().for_each(|m| *m /= n);

        let mut scales = [0.0; FEATURE_COUNT];
        for s in &ctx.samples {
            for i in 0..FEATURE_COUNT {
                scales[i] += (s[i] - means[i]).powi(2);
            }
        }
        for sd in scales.iter_mut() {
            *sd = (*sd / n).sqrt();
            if !sd.is_normal() {
                *sd = 1.0;
            }
        }

        let mut model = Self {
            means,
            scales,
            centroids: Vec::new(),
        };
        for label in ctx.classes() {
            let mut center = [0.0; FEATURE_COUNT];
            let mut samples = 0;
            for (s, t) in ctx.samples.iter().zip(&ctx.targets) {
                if *t != label {
                    continue;
                }
                let z = model.standardize(s);
                for (c, v) in center.iter_mut().zip(z) {
                    *c += v;
                }
                samples += 1;
            }
            center.iter_mut().for_each(|c| *c /= samples as f64);
            model.centroids.push(Centroid {
                label,
                center,
                samples,
            });
        }
        model
    }

    fn standardize(&self, values: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (values[i] - self.means[i]) / self.scales[i];
        }
        out
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl Classifier for CentroidModel {
    /// Closest centroid by squared Euclidean distance; ties go to the lower label.
    fn predict(&self, features: &FeatureVector) -> Result<Label, ModelError> {
        let z = self.standardize(&features.to_array());
        let mut best: Option<(f64, Label)> = None;
        for c in &self.centroids {
            let d: f64 = c.center.iter().zip(&z).map(|(a, b)| (a - b).powi(2)).sum();
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, c.label));
            }
        }
        best.map(|(_, label)| label)
            .ok_or_else(|| ModelError::Inference("model has no centroids".to_string()))
    }

    fn kind(&self) -> &'static str {
        "centroid"
    }
}
