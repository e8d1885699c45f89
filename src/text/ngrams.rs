// N-gram multiset extraction.
//
// An n-gram is an ordered window of n consecutive tokens. The multiset maps
// each distinct window to its occurrence count; a key that was never inserted
// reads as zero. This "absent means zero" behavior is what the novelty ratio
// relies on, so it's exposed as an explicit accessor rather than left to
// callers poking at the map.

use std::collections::HashMap;

/// Occurrence counts for every n-gram in one token sequence.
///
/// Built once per (text, n) pair and discarded after the ratio that needed
/// it has been computed.
#[derive(Debug, Clone, Default)]
pub struct NgramCounts {
    counts: HashMap<Vec<String>, u32>,
}

impl NgramCounts {
    /// Count every contiguous n-token window in `tokens`.
    ///
    /// A sequence shorter than `n` produces an empty multiset — that is a
    /// well-defined result, not an error. `n == 0` also yields an empty
    /// multiset; callers validate orders before getting here.
    pub fn from_tokens(tokens: &[String], n: usize) -> Self {
        let mut counts = HashMap::new();
        if n >= 1 && tokens.len() >= n {
            for window in tokens.windows(n) {
                *counts.entry(window.to_vec()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Occurrence count for a key; absent keys read as zero.
    pub fn count(&self, key: &[String]) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct n-grams.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all occurrence counts.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over the distinct keys.
    pub fn keys(&self) -> impl Iterator<Item = &[String]> {
        self.counts.keys().map(|k| k.as_slice())
    }
}
