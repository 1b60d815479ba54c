//! Candidate descriptors and the reference candidates shipped with the harness.

pub mod btree;
pub mod keyed;
pub mod segmented;

#[cfg(test)]
mod candidates_test;

use std::fmt;
use std::sync::Arc;

use crate::capability::{Capabilities, Capability};
use crate::container::SortedContainer;
use crate::error::HarnessError;
use crate::util::OrderedTable;

pub use btree::BTreeMultiset;
pub use keyed::{KeyedCollection, KeyedCollectionAdapter};
pub use segmented::SegmentedList;

/// Builds a fresh, empty candidate instance.
pub type CandidateCtor = Arc<dyn Fn() -> Box<dyn SortedContainer> + Send + Sync>;

pub const SEGMENTED_LIST: &str = "SegmentedList";
pub const SEGMENTED_LIST_WITH_KEY: &str = "SegmentedList(key=identity)";
pub const KEYED_COLLECTION: &str = "KeyedCollection";
pub const BTREE_MULTISET: &str = "BTreeMultiset";

/// One named implementation under comparison.
#[derive(Clone)]
pub struct Candidate {
    name: String,
    capabilities: Capabilities,
    ctor: CandidateCtor,
}

impl Candidate {
    pub fn new<F>(name: &str, capabilities: Capabilities, ctor: F) -> Self
    where
        F: Fn() -> Box<dyn SortedContainer> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            capabilities,
            ctor: Arc::new(ctor),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn supports(&self, cap: Capability) -> bool {
        self.capabilities.has(cap)
    }

    /// A new instance; never shared between trials.
    pub fn construct(&self) -> Box<dyn SortedContainer> {
        (self.ctor)()
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// All candidates known to a run, in registration order.
#[derive(Debug, Clone, Default)]
pub struct CandidateTable {
    candidates: OrderedTable<Arc<Candidate>>,
}

impl CandidateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference candidates: the segmented list plain and key-configured,
    /// the index-backed keyed collection and the b-tree multiset.
    pub fn standard() -> Self {
        let mut table = Self::new();
        let defaults = [
            Candidate::new(SEGMENTED_LIST, Capabilities::ALL, || Box::new(SegmentedList::new())),
            Candidate::new(SEGMENTED_LIST_WITH_KEY, Capabilities::ALL, || {
                Box::new(SegmentedList::with_key(keyed::identity))
            }),
            Candidate::new(KEYED_COLLECTION, Capabilities::ALL, || {
                Box::new(KeyedCollectionAdapter::identity())
            }),
            Candidate::new(
                BTREE_MULTISET,
                Capabilities::NON_POSITIONAL.without(Capabilities::of(&[Capability::Bisect])),
                || Box::new(BTreeMultiset::new()),
            ),
        ];
        for candidate in defaults {
            // Names above are distinct.
            let _ = table.register(candidate);
        }
        table
    }

    pub fn register(&mut self, candidate: Candidate) -> Result<(), HarnessError> {
        let name = candidate.name.clone();
        self.candidates
            .insert(&name, Arc::new(candidate))
            .map_err(|_| HarnessError::configuration(format!("candidate '{}' is already registered", name)))
    }

    pub fn lookup(&self, name: &str) -> Result<&Arc<Candidate>, HarnessError> {
        self.candidates
            .get(name)
            .ok_or_else(|| HarnessError::not_found("candidate", name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.candidates.names()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Candidate>> {
        self.candidates.iter().map(|(_, candidate)| candidate)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
