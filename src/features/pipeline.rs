//! Extraction pipeline: events → gap buckets + paired intervals → feature vector.

use super::{FeatureVector, GapBuckets, PairedIntervals, Summary};
use crate::error::ExtractError;
use crate::session::KeyEvent;
use serde::{Deserialize, Serialize};

const MIN_EVENTS: usize = 2;

/// Full statistics of one session, a superset of the feature vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionProfile {
    pub events: usize,
    pub features: FeatureVector,
    pub press_press: Summary,
    pub release_release: Summary,
    pub press_release: Summary,
    pub release_press: Summary,
    pub down_down: Summary,
    pub up_down: Summary,
    pub dwell: Summary,
}

/// Stateless engine; every call depends only on its input events.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Compute the seven session features.
    ///
    /// Fewer than two events is an error. Otherwise an empty bucket contributes
    /// 0.0, as do the down-down percentiles and average dwell when no interval
    /// of that kind occurred.
    pub fn extract(&self, events: &[KeyEvent]) -> Result<FeatureVector, ExtractError> {
        self.profile(events).map(|p| p.features)
    }

    pub fn profile(&self, events: &[KeyEvent]) -> Result<SessionProfile, ExtractError> {
        if events.len() < MIN_EVENTS {
            return Err(ExtractError::EmptyInput {
                events: events.len(),
            });
        }

        let gaps = GapBuckets::from_events(events);
        let paired = PairedIntervals::from_events(events);
        let down_down = paired.down_down.summary();
        let dwell = paired.dwell.summary();

        let features = FeatureVector {
            avg_pp: gaps.pp.avg(),
            avg_rr: gaps.rr.avg(),
            avg_pr: gaps.pr.avg(),
            avg_rp: gaps.rp.avg(),
            avg_dwell: dwell.avg,
            down_down_p25: down_down.p25,
            down_down_p50: down_down.p50,
        };

        Ok(SessionProfile {
            events: events.len(),
            features,
            press_press: gaps.pp.summary(),
            release_release: gaps.rr.summary(),
            press_release: gaps.pr.summary(),
            release_press: gaps.rp.summary(),
            down_down,
            up_down: paired.up_down.summary(),
            dwell,
        })
    }
}

/// Shorthand for [`FeatureExtractor::extract`].
pub fn extract(events: &[KeyEvent]) -> Result<FeatureVector, ExtractError> {
    FeatureExtractor::new().extract(events)
}
