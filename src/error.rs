//! Error types, one enum per layer.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading a keylogger session file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error reading session: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: u64, reason: String },
}

/// Failures of the statistics engine.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Need at least two events to form a pair, got {events}")]
    EmptyInput { events: usize },
}

/// Failures of the session/dataset orchestrator.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("{}: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("Session file name has no username field: {0}")]
    InvalidSessionName(String),

    #[error("Username {0:?} is not in the inference label map")]
    UnknownUsername(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Failures of the classifier collaborator.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Classifier unavailable at {}: {reason}", path.display())]
    ClassifierUnavailable { path: PathBuf, reason: String },

    #[error("Target column {0:?} is not part of the table")]
    MissingTarget(String),

    #[error("Training table has no rows")]
    EmptyTrainingSet,

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of end-to-end verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
