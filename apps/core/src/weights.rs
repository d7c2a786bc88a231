use std::cell::Cell;
use std::collections::HashMap;

/// Per-entry usage counters with a normalized view in `[0, 1]`.
///
/// The maximum count is cached and recomputed lazily, so a read right
/// after `increment` always reflects the new true maximum. Single-threaded
/// by design; ranking and commits happen on the same thread.
#[derive(Debug, Default)]
pub struct UsageWeights {
    counts: HashMap<String, u64>,
    cached_max: Cell<Option<u64>>,
}

impl UsageWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: HashMap<String, u64>) -> Self {
        Self {
            counts,
            cached_max: Cell::new(None),
        }
    }

    /// Raw usage count; zero for entries never committed.
    pub fn count(&self, path: &str) -> u64 {
        self.counts.get(path).copied().unwrap_or(0)
    }

    /// Normalized score `count / max(1, max_count)`, always in `[0, 1]`.
    pub fn get(&self, path: &str) -> f64 {
        self.count(path) as f64 / self.max_count() as f64
    }

    pub fn increment(&mut self, path: &str) {
        *self.counts.entry(path.to_string()).or_insert(0) += 1;
        self.cached_max.set(None);
    }

    pub fn counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn max_count(&self) -> u64 {
        if let Some(cached) = self.cached_max.get() {
            return cached;
        }

        // Floor of 1 keeps the empty map from dividing by zero.
        let max = self.counts.values().copied().max().unwrap_or(0).max(1);
        self.cached_max.set(Some(max));
        max
    }
}
