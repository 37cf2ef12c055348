//! Session/dataset orchestration: label bookkeeping, feature tables, directory fan-out.

mod labels;
mod orchestrator;
mod table;

pub use labels::{Label, LabelMap};
pub use orchestrator::{LiveSample, Orchestrator};
pub use table::{read_live_rows, write_live_row, FeatureTable, LabeledRow};

/// Target column of the training table.
pub const LABEL_COLUMN: &str = "User_Label";
