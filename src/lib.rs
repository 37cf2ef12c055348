//! keyprint — keystroke-dynamics user classification.
//!
//! Modular structure:
//! - [`session`] — Keylogger event files and file-name convention
//! - [`features`] — Press/release pairing and timing statistics
//! - [`dataset`] — Label bookkeeping, feature tables, directory extraction
//! - [`model`] — Training context and classifiers (centroid, ONNX)
//! - [`verify`] — Live-sample identity verification
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod session;
pub mod features;
pub mod dataset;
pub mod model;
pub mod verify;
pub mod logging;

pub use config::AppConfig;
pub use session::KeyEvent;
pub use features::{FeatureExtractor, FeatureVector};
pub use dataset::{FeatureTable, Label, LabelMap, Orchestrator};
pub use model::{Classifier, CentroidModel, OnnxClassifier};
pub use verify::{VerificationEngine, Verdict};
pub use logging::StructuredLogger;
