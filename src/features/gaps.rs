//! Adjacent-pair gap classification into press/release transition buckets.

use super::accumulator::Accumulator;
use crate::session::{seconds_between, KeyEvent};

/// Transition between two consecutive events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    PressPress,
    ReleaseRelease,
    PressRelease,
    ReleasePress,
}

impl Transition {
    pub fn between(prev_pressed: bool, pressed: bool) -> Self {
        match (prev_pressed, pressed) {
            (true, true) => Transition::PressPress,
            (false, false) => Transition::ReleaseRelease,
            (true, false) => Transition::PressRelease,
            (false, true) => Transition::ReleasePress,
        }
    }
}

/// One accumulator per transition kind.
#[derive(Debug, Clone, Default)]
pub struct GapBuckets {
    pub pp: Accumulator,
    pub rr: Accumulator,
    pub pr: Accumulator,
    pub rp: Accumulator,
}

impl GapBuckets {
    /// Walk consecutive event pairs and bucket each time delta.
    pub fn from_events(events: &[KeyEvent]) -> Self {
        let mut buckets = GapBuckets::default();
        for pair in events.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            let gap = seconds_between(cur.time, prev.time);
            buckets
                .bucket_mut(Transition::between(prev.pressed, cur.pressed))
                .add(gap);
        }
        buckets
    }

    pub fn bucket(&self, transition: Transition) -> &Accumulator {
        match transition {
            Transition::PressPress => &self.pp,
            Transition::ReleaseRelease => &self.rr,
            Transition::PressRelease => &self.pr,
            Transition::ReleasePress => &self.rp,
        }
    }

    fn bucket_mut(&mut self, transition: Transition) -> &mut Accumulator {
        match transition {
            Transition::PressPress => &mut self.pp,
            Transition::ReleaseRelease => &mut self.rr,
            Transition::PressRelease => &mut self.pr,
            Transition::ReleasePress => &mut self.rp,
        }
    }

    pub fn pair_count(&self) -> usize {
        self.pp.count() + self.rr.count() + self.pr.count() + self.rp.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(key: &str, t: f64, pressed: bool) -> KeyEvent {
        KeyEvent::at_secs(key, t, pressed).unwrap()
    }

    #[test]
    fn buckets_by_pressed_tuple() {
        let events = vec![
            ev("a", 0.0, true),
            ev("b", 0.5, true),
            ev("a", 0.75, false),
            ev("b", 1.0, false),
            ev("c", 2.0, true),
        ];
        let g = GapBuckets::from_events(&events);
        assert_eq!(g.pp.items(), &[0.5]);
        assert_eq!(g.pr.items(), &[0.25]);
        assert_eq!(g.rr.items(), &[0.25]);
        assert_eq!(g.rp.items(), &[1.0]);
        assert_eq!(g.pair_count(), events.len() - 1);
    }

    #[test]
    fn empty_bucket_averages_zero() {
        let events = vec![ev("a", 0.0, true), ev("a", 0.125, false)];
        let g = GapBuckets::from_events(&events);
        assert_eq!(g.bucket(Transition::PressRelease).avg(), 0.125);
        assert_eq!(g.bucket(Transition::PressPress).avg(), 0.0);
        assert_eq!(g.bucket(Transition::ReleaseRelease).avg(), 0.0);
        assert_eq!(g.bucket(Transition::ReleasePress).avg(), 0.0);
    }
}
