//! Test-only candidates: one that breaks the sorted-container contract on
//! purpose, one that records how much of the container each read touches.

use std::cell::RefCell;
use std::rc::Rc;

use crate::candidates::SegmentedList;
use crate::container::{SortedContainer, Value};

/// Pops the smallest value and iterates in descending order.
#[derive(Debug, Default)]
pub(crate) struct Backwards {
    inner: SegmentedList,
}

impl SortedContainer for Backwards {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn add(&mut self, value: Value) {
        self.inner.add(value)
    }

    fn update(&mut self, values: &[Value]) {
        self.inner.update(values)
    }

    fn contains(&self, value: Value) -> bool {
        self.inner.contains(value)
    }

    fn remove(&mut self, value: Value) -> bool {
        self.inner.remove(value)
    }

    fn get(&self, pos: usize) -> Option<Value> {
        self.inner.get(pos)
    }

    fn delete_at(&mut self, pos: usize) -> Option<Value> {
        self.inner.delete_at(pos)
    }

    fn pop(&mut self) -> Option<Value> {
        self.inner.delete_at(0)
    }

    fn index_of(&self, value: Value) -> Option<usize> {
        self.inner.index_of(value)
    }

    fn bisect_left(&self, value: Value) -> usize {
        self.inner.bisect_left(value)
    }

    fn slice(&self, start: usize, stop: usize) -> Vec<Value> {
        self.inner.slice(start, stop)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        let mut all: Vec<Value> = self.inner.iter().collect();
        all.reverse();
        Box::new(all.into_iter())
    }
}

/// Reads observed by a [`Recording`] container.
#[derive(Debug, Default)]
pub(crate) struct Reads {
    /// `(start, stop, len)` of every `slice` call.
    pub slices: Vec<(usize, usize, usize)>,
    /// Items yielded through `iter`.
    pub pulled: usize,
}

/// A [`SegmentedList`] that logs its slice bounds and iteration reads into a
/// shared [`Reads`].
#[derive(Debug, Default)]
pub(crate) struct Recording {
    inner: SegmentedList,
    reads: Rc<RefCell<Reads>>,
}

impl Recording {
    pub(crate) fn new() -> (Self, Rc<RefCell<Reads>>) {
        let recording = Self::default();
        let reads = Rc::clone(&recording.reads);
        (recording, reads)
    }
}

impl SortedContainer for Recording {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn add(&mut self, value: Value) {
        self.inner.add(value)
    }

    fn update(&mut self, values: &[Value]) {
        self.inner.update(values)
    }

    fn contains(&self, value: Value) -> bool {
        self.inner.contains(value)
    }

    fn remove(&mut self, value: Value) -> bool {
        self.inner.remove(value)
    }

    fn get(&self, pos: usize) -> Option<Value> {
        self.inner.get(pos)
    }

    fn delete_at(&mut self, pos: usize) -> Option<Value> {
        self.inner.delete_at(pos)
    }

    fn pop(&mut self) -> Option<Value> {
        self.inner.pop()
    }

    fn index_of(&self, value: Value) -> Option<usize> {
        self.inner.index_of(value)
    }

    fn bisect_left(&self, value: Value) -> usize {
        self.inner.bisect_left(value)
    }

    fn slice(&self, start: usize, stop: usize) -> Vec<Value> {
        self.reads.borrow_mut().slices.push((start, stop, self.inner.len()));
        self.inner.slice(start, stop)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        let reads = &self.reads;
        Box::new(self.inner.iter().inspect(move |_| reads.borrow_mut().pulled += 1))
    }
}
