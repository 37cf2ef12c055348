//! Down-down, up-down and dwell intervals via unmatched-event tracking.

use super::accumulator::Accumulator;
use crate::session::{seconds_between, KeyEvent};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Interval accumulators produced by one pass over a session.
#[derive(Debug, Clone, Default)]
pub struct PairedIntervals {
    pub down_down: Accumulator,
    pub up_down: Accumulator,
    pub dwell: Accumulator,
}

impl PairedIntervals {
    /// Single pass with one pending press slot, one pending release slot and
    /// the time of the latest event per key.
    ///
    /// Dwell is measured from a release back to the most recent event of any
    /// type on the same key, which is not always that key's own press.
    pub fn from_events(events: &[KeyEvent]) -> Self {
        let mut out = PairedIntervals::default();
        let mut last_key_event: HashMap<&str, DateTime<Utc>> = HashMap::new();
        let mut pending_down: Option<DateTime<Utc>> = None;
        let mut pending_up: Option<DateTime<Utc>> = None;

        for e in events {
            if e.pressed {
                if let Some(down) = pending_down.take() {
                    out.down_down.add(seconds_between(e.time, down));
                }
                if let Some(up) = pending_up.take() {
                    out.up_down.add(seconds_between(e.time, up));
                }
                pending_down = Some(e.time);
            } else {
                pending_up = Some(e.time);
                if let Some(prev) = last_key_event.get(e.key.as_str()) {
                    out.dwell.add(seconds_between(e.time, *prev));
                }
            }
            last_key_event.insert(e.key.as_str(), e.time);
        }
        out
    }
}
