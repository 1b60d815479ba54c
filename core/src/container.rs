//! The operation contract every benchmarked sorted container is driven through.
//!
//! Candidates implement [`SortedContainer`] directly or through a thin adapter that
//! synthesizes whatever their native API lacks. The trait is object safe so the
//! registries can hold heterogeneous candidates behind `Box<dyn SortedContainer>`.

use std::fmt;

/// Element type of every dataset and container.
pub type Value = u64;

pub trait SortedContainer {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert one value, keeping duplicates.
    fn add(&mut self, value: Value);

    /// Bulk insert.
    fn update(&mut self, values: &[Value]);

    fn contains(&self, value: Value) -> bool;

    /// Remove one occurrence of `value`. Returns `false` when it was absent.
    fn remove(&mut self, value: Value) -> bool;

    /// Remove one occurrence of `value` if present.
    fn discard(&mut self, value: Value) {
        let _ = self.remove(value);
    }

    fn get(&self, pos: usize) -> Option<Value>;

    fn delete_at(&mut self, pos: usize) -> Option<Value>;

    /// Remove and return the largest value.
    fn pop(&mut self) -> Option<Value>;

    /// Position of the leftmost occurrence of `value`.
    fn index_of(&self, value: Value) -> Option<usize>;

    fn count(&self, value: Value) -> usize {
        let start = self.bisect_left(value);
        let mut n = 0;
        while self.get(start + n) == Some(value) {
            n += 1;
        }
        n
    }

    /// Leftmost insertion point for `value`.
    fn bisect_left(&self, value: Value) -> usize;

    /// Values in positions `[start, stop)`, clamped to the current length.
    fn slice(&self, start: usize, stop: usize) -> Vec<Value>;

    /// Ascending traversal.
    fn iter(&self) -> Box<dyn Iterator<Item = Value> + '_>;
}

impl fmt::Debug for dyn SortedContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedContainer").field("len", &self.len()).finish()
    }
}
