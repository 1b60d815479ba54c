use std::collections::BTreeMap;

use crate::container::Value;
use crate::error::HarnessError;

/// Default dataset sizes, smallest first.
pub const DEFAULT_SIZES: &[usize] = &[100, 1_000, 10_000, 100_000, 1_000_000];

/// Size-indexed ordered input sequences (`lists[size]`).
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    lists: BTreeMap<usize, Vec<Value>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// `0..size` for every requested size.
    pub fn identity(sizes: &[usize]) -> Self {
        let mut dataset = Self::new();
        for &size in sizes {
            dataset.insert(size, (0..size as Value).collect());
        }
        dataset
    }

    /// Supply the sequence used for `size`. Replaces any previous one.
    pub fn insert(&mut self, size: usize, values: Vec<Value>) {
        self.lists.insert(size, values);
    }

    pub fn values(&self, size: usize) -> Result<&[Value], HarnessError> {
        self.lists
            .get(&size)
            .map(Vec::as_slice)
            .ok_or_else(|| HarnessError::not_found("dataset size", size))
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.lists.keys().copied()
    }

    pub fn smallest(&self) -> Option<usize> {
        self.lists.keys().next().copied()
    }
}

/// Every `step`-th element starting at the first, like a `[::step]` slice.
pub fn sample_every(values: &[Value], step: usize) -> impl Iterator<Item = Value> + '_ {
    values.iter().step_by(step.max(1)).copied()
}

/// Owned form of [`sample_every`] for bulk calls.
pub fn sampled(values: &[Value], step: usize) -> Vec<Value> {
    sample_every(values, step).collect()
}
