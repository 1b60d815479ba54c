use super::keyed::{KeyFn, identity};
use crate::container::{SortedContainer, Value};

pub const DEFAULT_LOAD: usize = 1000;
const MIN_LOAD: usize = 4;

/// Sorted list stored as a list of sorted sublists.
///
/// Items are ordered by `key(item)`; items with equal keys keep insertion
/// order. Each sublist holds between `load / 2` and `2 * load` values (the
/// last one may hold fewer), and `maxes[i]` caches the largest key in
/// `lists[i]`.
#[derive(Debug, Clone)]
pub struct SegmentedList {
    lists: Vec<Vec<Value>>,
    maxes: Vec<Value>,
    key: KeyFn,
    load: usize,
    len: usize,
}

impl SegmentedList {
    pub fn new() -> Self {
        Self::with_load(DEFAULT_LOAD)
    }

    pub fn with_load(load: usize) -> Self {
        Self::with_load_and_key(load, identity)
    }

    pub fn with_key(key: KeyFn) -> Self {
        Self::with_load_and_key(DEFAULT_LOAD, key)
    }

    pub fn with_load_and_key(load: usize, key: KeyFn) -> Self {
        Self {
            lists: Vec::new(),
            maxes: Vec::new(),
            key,
            load: load.max(MIN_LOAD),
            len: 0,
        }
    }

    pub fn sublist_count(&self) -> usize {
        self.lists.len()
    }

    #[inline]
    fn key_of(&self, value: Value) -> Value {
        (self.key)(value)
    }

    /// Index of the first sublist whose max key is `>= k`.
    #[inline]
    fn sublist_left(&self, k: Value) -> usize {
        self.maxes.partition_point(|&max| max < k)
    }

    /// Items whose key equals `k`, with their `(sublist, offset)` position.
    fn key_run(&self, k: Value) -> impl Iterator<Item = ((usize, usize), Value)> + '_ {
        let first = self.sublist_left(k);
        let skip = self
            .lists
            .get(first)
            .map_or(0, |list| list.partition_point(|&v| self.key_of(v) < k));
        self.lists
            .iter()
            .enumerate()
            .skip(first)
            .flat_map(move |(i, list)| {
                let from = if i == first { skip } else { 0 };
                list[from..].iter().enumerate().map(move |(o, &v)| ((i, from + o), v))
            })
            .take_while(move |&(_, v)| self.key_of(v) == k)
    }

    fn find(&self, value: Value) -> Option<(usize, usize)> {
        self.key_run(self.key_of(value))
            .find(|&(_, v)| v == value)
            .map(|(at, _)| at)
    }

    fn locate(&self, pos: usize) -> (usize, usize) {
        let mut offset = pos;
        for (i, list) in self.lists.iter().enumerate() {
            if offset < list.len() {
                return (i, offset);
            }
            offset -= list.len();
        }
        (self.lists.len(), 0)
    }

    fn prefix_len(&self, sublist: usize) -> usize {
        self.lists[..sublist].iter().map(Vec::len).sum()
    }

    fn split_if_oversized(&mut self, i: usize) {
        if self.lists[i].len() <= 2 * self.load {
            return;
        }
        let tail = self.lists[i].split_off(self.load);
        self.maxes[i] = self.key_of(self.lists[i][self.load - 1]);
        let tail_max = self.key_of(tail[tail.len() - 1]);
        self.lists.insert(i + 1, tail);
        self.maxes.insert(i + 1, tail_max);
    }

    fn delete_in(&mut self, i: usize, offset: usize) -> Value {
        let value = self.lists[i].remove(offset);
        self.len -= 1;

        if self.lists[i].is_empty() {
            self.lists.remove(i);
            self.maxes.remove(i);
            return value;
        }
        if let Some(&last) = self.lists[i].last() {
            self.maxes[i] = self.key_of(last);
        }
        if self.lists.len() > 1 && self.lists[i].len() < self.load / 2 {
            let left = if i > 0 { i - 1 } else { i };
            let right = self.lists.remove(left + 1);
            self.maxes.remove(left + 1);
            self.lists[left].extend(right);
            if let Some(&last) = self.lists[left].last() {
                self.maxes[left] = self.key_of(last);
            }
            self.split_if_oversized(left);
        }
        value
    }

    fn rebuild(&mut self, mut values: Vec<Value>) {
        let key = self.key;
        values.sort_by_key(|&v| key(v));
        self.len = values.len();
        self.lists = values.chunks(self.load).map(<[Value]>::to_vec).collect();
        self.maxes = self.lists.iter().map(|list| key(list[list.len() - 1])).collect();
    }
}

impl Default for SegmentedList {
    fn default() -> Self {
        Self::new()
    }
}

impl SortedContainer for SegmentedList {
    fn len(&self) -> usize {
        self.len
    }

    fn add(&mut self, value: Value) {
        let k = self.key_of(value);
        if self.maxes.is_empty() {
            self.lists.push(vec![value]);
            self.maxes.push(k);
            self.len = 1;
            return;
        }

        let mut i = self.maxes.partition_point(|&max| max <= k);
        if i == self.maxes.len() {
            i -= 1;
            self.lists[i].push(value);
            self.maxes[i] = k;
        } else {
            let key = self.key;
            let list = &mut self.lists[i];
            let pos = list.partition_point(|&v| key(v) <= k);
            list.insert(pos, value);
        }
        self.len += 1;
        self.split_if_oversized(i);
    }

    fn update(&mut self, values: &[Value]) {
        // Large batches are cheaper to merge by re-sorting everything once.
        if values.len() * 2 >= self.len {
            let mut all: Vec<Value> = Vec::with_capacity(self.len + values.len());
            all.extend(self.lists.iter().flatten().copied());
            all.extend_from_slice(values);
            self.rebuild(all);
        } else {
            for &value in values {
                self.add(value);
            }
        }
    }

    fn contains(&self, value: Value) -> bool {
        self.find(value).is_some()
    }

    fn remove(&mut self, value: Value) -> bool {
        let Some((i, offset)) = self.find(value) else {
            return false;
        };
        self.delete_in(i, offset);
        true
    }

    fn get(&self, pos: usize) -> Option<Value> {
        if pos >= self.len {
            return None;
        }
        let (i, offset) = self.locate(pos);
        Some(self.lists[i][offset])
    }

    fn delete_at(&mut self, pos: usize) -> Option<Value> {
        if pos >= self.len {
            return None;
        }
        let (i, offset) = self.locate(pos);
        Some(self.delete_in(i, offset))
    }

    fn pop(&mut self) -> Option<Value> {
        let i = self.lists.len().checked_sub(1)?;
        let offset = self.lists[i].len() - 1;
        Some(self.delete_in(i, offset))
    }

    fn index_of(&self, value: Value) -> Option<usize> {
        self.find(value).map(|(i, offset)| self.prefix_len(i) + offset)
    }

    fn count(&self, value: Value) -> usize {
        self.key_run(self.key_of(value)).filter(|&(_, v)| v == value).count()
    }

    fn bisect_left(&self, value: Value) -> usize {
        let k = self.key_of(value);
        let i = self.sublist_left(k);
        if i == self.lists.len() {
            return self.len;
        }
        self.prefix_len(i) + self.lists[i].partition_point(|&v| self.key_of(v) < k)
    }

    fn slice(&self, start: usize, stop: usize) -> Vec<Value> {
        let stop = stop.min(self.len);
        if start >= stop {
            return Vec::new();
        }
        let (i, offset) = self.locate(start);
        self.lists[i][offset..]
            .iter()
            .chain(self.lists[i + 1..].iter().flatten())
            .copied()
            .take(stop - start)
            .collect()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        Box::new(self.lists.iter().flatten().copied())
    }
}
