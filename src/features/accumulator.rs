//! Running statistic collector that keeps every observation for percentile queries.

use serde::{Deserialize, Serialize};

/// Collects interval values.
///
/// `count == items.len()` always holds and the average is `total / count`
/// from the running sum, not a recomputed mean of the stored list.
/// Adding to a total of exactly zero is plain addition; assigning `x` instead
/// would be the same value under the addition identity.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    total: f64,
    count: usize,
    items: Vec<f64>,
}

/// Snapshot of an accumulator. Empty accumulators summarize to zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub avg: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: f64) {
        self.total += x;
        self.count += 1;
        self.items.push(x);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn items(&self) -> &[f64] {
        &self.items
    }

    /// Average, or 0.0 when nothing was added.
    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }

    /// Linear-interpolation percentile, `q` in `[0, 100]`. `None` when empty.
    pub fn percentile(&self, q: f64) -> Option<f64> {
        percentile(&self.items, q)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            count: self.count,
            avg: self.avg(),
            p25: self.percentile(25.0).unwrap_or(0.0),
            p50: self.percentile(50.0).unwrap_or(0.0),
            p75: self.percentile(75.0).unwrap_or(0.0),
        }
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// Virtual index is `q/100 * (n - 1)`. Interpolation switches to the
/// upper-anchored form for fractions >= 0.5, which keeps results bit-identical
/// with numpy's default method.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q = q.clamp(0.0, 100.0);
    let index = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = index.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let t = index - lo as f64;

    let a = sorted[lo];
    let b = sorted[hi];
    if a == b {
        return Some(a);
    }
    let diff = b - a;
    Some(if t >= 0.5 { b - diff * (1.0 - t) } else { a + diff * t })
}
