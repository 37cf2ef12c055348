//! Flat CSV feature tables.
//!
//! Floats are written in shortest round-trip form, so reading a table back
//! yields bit-identical values.

use super::{Label, LABEL_COLUMN};
use crate::error::DatasetError;
use crate::features::{FeatureVector, FEATURE_COLUMNS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One training row: session features plus the user's label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledRow {
    pub features: FeatureVector,
    pub label: Label,
}

// Flat record for the CSV codec.
#[derive(Serialize, Deserialize)]
struct TrainingRecord {
    #[serde(rename = "Average_PP")]
    avg_pp: f64,
    #[serde(rename = "Average_RR")]
    avg_rr: f64,
    #[serde(rename = "Average_PR")]
    avg_pr: f64,
    #[serde(rename = "Average_RP")]
    avg_rp: f64,
    #[serde(rename = "Average_dwell")]
    avg_dwell: f64,
    #[serde(rename = "25P_DownDown")]
    down_down_p25: f64,
    #[serde(rename = "50P_DownDown")]
    down_down_p50: f64,
    #[serde(rename = "User_Label")]
    label: Label,
}

impl From<&LabeledRow> for TrainingRecord {
    fn from(row: &LabeledRow) -> Self {
        let f = &row.features;
        Self {
            avg_pp: f.avg_pp,
            avg_rr: f.avg_rr,
            avg_pr: f.avg_pr,
            avg_rp: f.avg_rp,
            avg_dwell: f.avg_dwell,
            down_down_p25: f.down_down_p25,
            down_down_p50: f.down_down_p50,
            label: row.label,
        }
    }
}

impl From<TrainingRecord> for LabeledRow {
    fn from(r: TrainingRecord) -> Self {
        Self {
            features: FeatureVector {
                avg_pp: r.avg_pp,
                avg_rr: r.avg_rr,
                avg_pr: r.avg_pr,
                avg_rp: r.avg_rp,
                avg_dwell: r.avg_dwell,
                down_down_p25: r.down_down_p25,
                down_down_p50: r.down_down_p50,
            },
            label: r.label,
        }
    }
}

/// Labeled feature table, built once from collected rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    rows: Vec<LabeledRow>,
}

impl FeatureTable {
    pub fn from_rows(rows: Vec<LabeledRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LabeledRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header of the persisted table.
    pub fn columns() -> Vec<&'static str> {
        let mut cols = FEATURE_COLUMNS.to_vec();
        cols.push(LABEL_COLUMN);
        cols
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), DatasetError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        wtr.write_record(Self::columns())?;
        for row in &self.rows {
            wtr.serialize(TrainingRecord::from(row))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn read_csv(path: &Path) -> Result<Self, DatasetError> {
        let mut rdr = csv::Reader::from_path(path)?;
        let rows = rdr
            .deserialize::<TrainingRecord>()
            .map(|r| r.map(LabeledRow::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }
}

/// Persist a single unlabeled feature row with its header.
pub fn write_live_row(path: &Path, features: &FeatureVector) -> Result<(), DatasetError> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.serialize(features)?;
    wtr.flush()?;
    Ok(())
}

/// Read every unlabeled row of a live-feature file.
pub fn read_live_rows(path: &Path) -> Result<Vec<FeatureVector>, DatasetError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let rows = rdr
        .deserialize::<FeatureVector>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
