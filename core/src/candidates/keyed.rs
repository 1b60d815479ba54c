use std::fmt;

use crate::container::{SortedContainer, Value};

/// Key function applied to every item before ordering.
pub type KeyFn = fn(Value) -> Value;

pub fn identity(value: Value) -> Value {
    value
}

/// Value was not present in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotPresent(pub Value);

impl fmt::Display for NotPresent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not in collection", self.0)
    }
}

impl std::error::Error for NotPresent {}

/// Index-backed sorted collection: two parallel flat vectors of keys and items.
///
/// Inserts and deletes shift the tail of both vectors, so mutations are linear
/// in the collection size. The native API only offers `insert`, `remove`,
/// lookups and positional reads; [`KeyedCollectionAdapter`] fills in the rest.
#[derive(Clone)]
pub struct KeyedCollection {
    key: KeyFn,
    keys: Vec<Value>,
    items: Vec<Value>,
}

impl KeyedCollection {
    pub fn new(key: KeyFn) -> Self {
        Self {
            key,
            keys: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn key_of(&self, item: Value) -> Value {
        (self.key)(item)
    }

    /// Insert after any items with an equal key.
    pub fn insert(&mut self, item: Value) {
        let k = self.key_of(item);
        let pos = self.keys.partition_point(|&key| key <= k);
        self.keys.insert(pos, k);
        self.items.insert(pos, item);
    }

    pub fn index(&self, item: Value) -> Result<usize, NotPresent> {
        let k = self.key_of(item);
        let start = self.keys.partition_point(|&key| key < k);
        let end = self.keys.partition_point(|&key| key <= k);
        self.items[start..end]
            .iter()
            .position(|&candidate| candidate == item)
            .map(|offset| start + offset)
            .ok_or(NotPresent(item))
    }

    pub fn remove(&mut self, item: Value) -> Result<(), NotPresent> {
        let pos = self.index(item)?;
        self.keys.remove(pos);
        self.items.remove(pos);
        Ok(())
    }

    pub fn count(&self, item: Value) -> usize {
        let k = self.key_of(item);
        let start = self.keys.partition_point(|&key| key < k);
        let end = self.keys.partition_point(|&key| key <= k);
        self.items[start..end].iter().filter(|&&candidate| candidate == item).count()
    }

    pub fn contains(&self, item: Value) -> bool {
        self.index(item).is_ok()
    }

    pub fn get(&self, pos: usize) -> Option<Value> {
        self.items.get(pos).copied()
    }
}

impl fmt::Debug for KeyedCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCollection").field("len", &self.items.len()).finish()
    }
}

/// Gives [`KeyedCollection`] the full container contract.
///
/// `add`, `update`, `bisect_left`, `pop`, `discard`, `delete_at`, `slice` and
/// iteration are synthesized here from the collection's keys and items.
#[derive(Debug, Clone)]
pub struct KeyedCollectionAdapter {
    inner: KeyedCollection,
}

impl KeyedCollectionAdapter {
    pub fn new(inner: KeyedCollection) -> Self {
        Self { inner }
    }

    pub fn identity() -> Self {
        Self::new(KeyedCollection::new(identity))
    }
}

impl SortedContainer for KeyedCollectionAdapter {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn add(&mut self, value: Value) {
        self.inner.insert(value);
    }

    fn update(&mut self, values: &[Value]) {
        for &value in values {
            self.inner.insert(value);
        }
    }

    fn contains(&self, value: Value) -> bool {
        self.inner.contains(value)
    }

    fn remove(&mut self, value: Value) -> bool {
        self.inner.remove(value).is_ok()
    }

    fn get(&self, pos: usize) -> Option<Value> {
        self.inner.get(pos)
    }

    fn delete_at(&mut self, pos: usize) -> Option<Value> {
        if pos >= self.inner.len() {
            return None;
        }
        self.inner.keys.remove(pos);
        Some(self.inner.items.remove(pos))
    }

    fn pop(&mut self) -> Option<Value> {
        self.inner.keys.pop()?;
        self.inner.items.pop()
    }

    fn index_of(&self, value: Value) -> Option<usize> {
        self.inner.index(value).ok()
    }

    fn count(&self, value: Value) -> usize {
        self.inner.count(value)
    }

    fn bisect_left(&self, value: Value) -> usize {
        let k = self.inner.key_of(value);
        self.inner.keys.partition_point(|&key| key < k)
    }

    fn slice(&self, start: usize, stop: usize) -> Vec<Value> {
        let stop = stop.min(self.inner.len());
        if start >= stop {
            return Vec::new();
        }
        self.inner.items[start..stop].to_vec()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        Box::new(self.inner.items.iter().copied())
    }
}
