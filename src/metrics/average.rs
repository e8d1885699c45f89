// Running average over a stream of weighted scalar observations.
//
// Every metric in this crate is a fold over the corpus that ends in a mean,
// so they all share this accumulator. One instance per measurement — there
// is no locking, and `reset` exists only to start a fresh independent run.

/// Incremental mean tracker.
///
/// Invariant: `mean == sum / count` whenever `count > 0`. With zero
/// observations `mean()` returns 0.0 rather than failing; callers that
/// might read the mean of an empty stream must check `count()` first.
#[derive(Debug, Clone, Default)]
pub struct RunningAverage {
    count: u64,
    sum: f64,
    mean: f64,
}

impl RunningAverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incorporate one observation with weight 1.
    pub fn update(&mut self, value: f64) {
        self.update_weighted(value, 1);
    }

    /// Incorporate `value` with multiplicity `weight`.
    ///
    /// A weight of zero leaves the accumulator untouched.
    pub fn update_weighted(&mut self, value: f64, weight: u64) {
        if weight == 0 {
            return;
        }
        self.sum += value * weight as f64;
        self.count += weight;
        self.mean = self.sum / self.count as f64;
    }

    /// Return to the zero state. Never called mid-measurement.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current mean; 0.0 in the zero state.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }
}
