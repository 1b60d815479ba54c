use std::collections::BTreeMap;

use crate::container::{SortedContainer, Value};

/// Multiset over a `BTreeMap` of value counts.
///
/// Membership and mutation are logarithmic. Anything addressed by position
/// walks the map from the front, so the candidate declares no positional
/// capabilities and the registry never binds it to positional scenarios.
#[derive(Debug, Clone, Default)]
pub struct BTreeMultiset {
    counts: BTreeMap<Value, usize>,
    len: usize,
}

impl BTreeMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }
}

impl SortedContainer for BTreeMultiset {
    fn len(&self) -> usize {
        self.len
    }

    fn add(&mut self, value: Value) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.len += 1;
    }

    fn update(&mut self, values: &[Value]) {
        for &value in values {
            self.add(value);
        }
    }

    fn contains(&self, value: Value) -> bool {
        self.counts.contains_key(&value)
    }

    fn remove(&mut self, value: Value) -> bool {
        let Some(count) = self.counts.get_mut(&value) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&value);
        }
        self.len -= 1;
        true
    }

    fn get(&self, pos: usize) -> Option<Value> {
        self.iter().nth(pos)
    }

    fn delete_at(&mut self, pos: usize) -> Option<Value> {
        let value = self.get(pos)?;
        self.remove(value);
        Some(value)
    }

    fn pop(&mut self) -> Option<Value> {
        let mut last = self.counts.last_entry()?;
        let value = *last.key();
        if *last.get() > 1 {
            *last.get_mut() -= 1;
        } else {
            last.remove();
        }
        self.len -= 1;
        Some(value)
    }

    fn index_of(&self, value: Value) -> Option<usize> {
        self.contains(value).then(|| self.bisect_left(value))
    }

    fn count(&self, value: Value) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    fn bisect_left(&self, value: Value) -> usize {
        self.counts.range(..value).map(|(_, &count)| count).sum()
    }

    fn slice(&self, start: usize, stop: usize) -> Vec<Value> {
        if start >= stop {
            return Vec::new();
        }
        self.iter().skip(start).take(stop - start).collect()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        Box::new(
            self.counts
                .iter()
                .flat_map(|(&value, &count)| std::iter::repeat_n(value, count)),
        )
    }
}
