//! Keystroke timing feature extraction.

mod accumulator;
mod gaps;
mod pairing;
mod pipeline;

pub use accumulator::{percentile, Accumulator, Summary};
pub use gaps::{GapBuckets, Transition};
pub use pairing::PairedIntervals;
pub use pipeline::{extract, FeatureExtractor, SessionProfile};

use serde::{Deserialize, Serialize};

/// Number of scalar features per session.
pub const FEATURE_COUNT: usize = 7;

/// Column names in table order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "Average_PP",
    "Average_RR",
    "Average_PR",
    "Average_RP",
    "Average_dwell",
    "25P_DownDown",
    "50P_DownDown",
];

/// Seven timing statistics describing one typing session. All values in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "Average_PP")]
    pub avg_pp: f64,
    #[serde(rename = "Average_RR")]
    pub avg_rr: f64,
    #[serde(rename = "Average_PR")]
    pub avg_pr: f64,
    #[serde(rename = "Average_RP")]
    pub avg_rp: f64,
    #[serde(rename = "Average_dwell")]
    pub avg_dwell: f64,
    #[serde(rename = "25P_DownDown")]
    pub down_down_p25: f64,
    #[serde(rename = "50P_DownDown")]
    pub down_down_p50: f64,
}

impl FeatureVector {
    /// Values in [`FEATURE_COLUMNS`] order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.avg_pp,
            self.avg_rr,
            self.avg_pr,
            self.avg_rp,
            self.avg_dwell,
            self.down_down_p25,
            self.down_down_p50,
        ]
    }

    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [avg_pp, avg_rr, avg_pr, avg_rp, avg_dwell, down_down_p25, down_down_p50] = values;
        Self {
            avg_pp,
            avg_rr,
            avg_pr,
            avg_rp,
            avg_dwell,
            down_down_p25,
            down_down_p50,
        }
    }
}
