//! Keylogger sessions: event type, file reader and file-name convention.

mod reader;

pub use reader::{read_events, read_session};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: f64 = 1e9;

/// A single key press or release as recorded by the keylogger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    pub time: DateTime<Utc>,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, time: DateTime<Utc>, pressed: bool) -> Self {
        Self {
            key: key.into(),
            time,
            pressed,
        }
    }

    /// Build an event from epoch seconds. Returns `None` for non-finite or out-of-range times.
    pub fn at_secs(key: impl Into<String>, secs: f64, pressed: bool) -> Option<Self> {
        timestamp_from_secs(secs).map(|time| Self::new(key, time, pressed))
    }
}

/// Convert fractional Unix-epoch seconds to a nanosecond timestamp.
///
/// Whole and fractional seconds are scaled separately so sub-microsecond digits
/// survive for present-day epochs.
pub fn timestamp_from_secs(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc();
    let frac = secs - whole;
    if whole.abs() >= (i64::MAX as f64 / NANOS_PER_SEC) {
        return None;
    }
    let nanos = (whole as i64)
        .checked_mul(NANOS_PER_SEC as i64)?
        .checked_add((frac * NANOS_PER_SEC).round() as i64)?;
    Some(Utc.timestamp_nanos(nanos))
}

/// Signed gap `later - earlier` in seconds.
pub fn seconds_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> f64 {
    let delta = later - earlier;
    match delta.num_nanoseconds() {
        Some(n) => n as f64 / NANOS_PER_SEC,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

/// Username token of a session file name: the second `_`-delimited field.
///
/// `logger_alice_003.csv` yields `alice`. Returns `None` when the field is
/// missing or empty.
pub fn username_from_file_name(file_name: &str) -> Option<&str> {
    file_name.split('_').nth(1).filter(|u| !u.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_second_field() {
        assert_eq!(username_from_file_name("live_C_001.csv"), Some("C"));
        assert_eq!(username_from_file_name("kl_alice_2023_01.csv"), Some("alice"));
        assert_eq!(username_from_file_name("nounderscore.csv"), None);
        assert_eq!(username_from_file_name("a__b.csv"), None);
    }

    #[test]
    fn fractional_seconds_keep_precision() {
        let a = timestamp_from_secs(1_700_000_000.125).unwrap();
        let b = timestamp_from_secs(1_700_000_000.5).unwrap();
        assert_eq!(seconds_between(b, a), 0.375);
        assert_eq!(seconds_between(a, b), -0.375);
    }

    #[test]
    fn rejects_non_finite_times() {
        assert!(timestamp_from_secs(f64::NAN).is_none());
        assert!(timestamp_from_secs(f64::INFINITY).is_none());
        assert!(timestamp_from_secs(1e300).is_none());
    }
}
