//! Mixed-operation workloads that replay a fixed weighted distribution of
//! operations against one candidate instance.
//!
//! Each call to [`MixedMachine::run`] draws exactly one integer in `[0, 100)`
//! from the machine's own dispatch generator and picks the first table entry
//! whose cumulative threshold exceeds the draw. The Intervals slice branch
//! takes its width from a second generator so the dispatch stream stays one
//! draw per call.

use std::fmt;
use std::hint::black_box;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::capability::{Capabilities, Capability};
use crate::check;
use crate::container::{SortedContainer, Value};
use crate::error::CheckFailure;

pub const SEED: u64 = 0;
pub const DRAW_RANGE: u32 = 100;
/// Elements visited by a bounded scan.
pub const SCAN_LIMIT: usize = 100;
/// Widest range materialized by the Intervals slice branch.
pub const SLICE_WIDTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixedOp {
    Add,
    Pop,
    Discard,
    Contains,
    /// Membership that must hold.
    AssertContains,
    /// Removal of a value that must be present.
    Remove,
    Bisect,
    /// `index_of` that must find the value.
    AssertIndex,
    GetGuarded,
    DeleteGuarded,
    SliceGuarded,
    /// Iterate at most [`SCAN_LIMIT`] elements.
    Scan,
}

impl MixedOp {
    pub fn capability(self) -> Capability {
        match self {
            MixedOp::Add => Capability::Add,
            MixedOp::Pop => Capability::Pop,
            MixedOp::Discard => Capability::Discard,
            MixedOp::Contains | MixedOp::AssertContains => Capability::Contains,
            MixedOp::Remove => Capability::Remove,
            MixedOp::Bisect => Capability::Bisect,
            MixedOp::AssertIndex => Capability::Index,
            MixedOp::GetGuarded => Capability::GetItem,
            MixedOp::DeleteGuarded => Capability::DelItem,
            MixedOp::SliceGuarded => Capability::Slice,
            MixedOp::Scan => Capability::Iter,
        }
    }

    pub fn is_positional(self) -> bool {
        matches!(self, MixedOp::GetGuarded | MixedOp::DeleteGuarded | MixedOp::SliceGuarded)
    }
}

/// Ordered `(cumulative_threshold, op)` pairs; the last threshold is [`DRAW_RANGE`].
pub type MixTable = &'static [(u32, MixedOp)];

const PRIORITY_QUEUE: MixTable = &[
    (40, MixedOp::Add),
    (80, MixedOp::Pop),
    (90, MixedOp::Discard),
    (99, MixedOp::Contains),
    (100, MixedOp::Scan),
];

const MULTISET: MixTable = &[
    (75, MixedOp::AssertContains),
    (85, MixedOp::Add),
    (95, MixedOp::Remove),
    (100, MixedOp::GetGuarded),
];

const RANKING: MixTable = &[
    (40, MixedOp::GetGuarded),
    (80, MixedOp::AssertIndex),
    (90, MixedOp::Add),
    (100, MixedOp::Remove),
];

const NEIGHBOR: MixTable = &[
    (75, MixedOp::Bisect),
    (85, MixedOp::Add),
    (95, MixedOp::Remove),
    (100, MixedOp::Scan),
];

const INTERVALS: MixTable = &[
    (30, MixedOp::Bisect),
    (50, MixedOp::GetGuarded),
    (70, MixedOp::DeleteGuarded),
    (80, MixedOp::SliceGuarded),
    (90, MixedOp::Add),
    (100, MixedOp::Discard),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixedKind {
    PriorityQueue,
    Multiset,
    Ranking,
    Neighbor,
    Intervals,
}

impl MixedKind {
    pub const ALL: [MixedKind; 5] = [
        MixedKind::PriorityQueue,
        MixedKind::Multiset,
        MixedKind::Ranking,
        MixedKind::Neighbor,
        MixedKind::Intervals,
    ];

    pub fn table(self) -> MixTable {
        match self {
            MixedKind::PriorityQueue => PRIORITY_QUEUE,
            MixedKind::Multiset => MULTISET,
            MixedKind::Ranking => RANKING,
            MixedKind::Neighbor => NEIGHBOR,
            MixedKind::Intervals => INTERVALS,
        }
    }

    /// Capabilities the machine's branches invoke.
    pub fn required(self) -> Capabilities {
        let mut caps = Capabilities::NONE;
        for &(_, op) in self.table() {
            caps.insert(op.capability());
        }
        caps
    }

    pub fn name(self) -> &'static str {
        match self {
            MixedKind::PriorityQueue => "priorityqueue",
            MixedKind::Multiset => "multiset",
            MixedKind::Ranking => "ranking",
            MixedKind::Neighbor => "neighbor",
            MixedKind::Intervals => "intervals",
        }
    }
}

impl fmt::Display for MixedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First entry whose threshold is greater than `draw`.
#[inline]
pub fn select(table: MixTable, draw: u32) -> MixedOp {
    let idx = table.partition_point(|&(threshold, _)| threshold <= draw);
    table[idx.min(table.len() - 1)].1
}

/// `value` as a position, if it addresses an element of a container of length `len`.
#[inline]
fn position_within(value: Value, len: usize) -> Option<usize> {
    usize::try_from(value).ok().filter(|&pos| pos < len)
}

/// What one call did. `applied` is false when a positional guard skipped the branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedStep {
    pub op: MixedOp,
    pub applied: bool,
}

/// A candidate instance wrapped with its own seeded dispatch state.
pub struct MixedMachine {
    kind: MixedKind,
    obj: Box<dyn SortedContainer>,
    rng: StdRng,
    width_rng: StdRng,
    trace: Option<Vec<MixedStep>>,
}

impl MixedMachine {
    pub fn new(kind: MixedKind, obj: Box<dyn SortedContainer>) -> Self {
        Self::with_seed(kind, obj, SEED)
    }

    pub fn with_seed(kind: MixedKind, obj: Box<dyn SortedContainer>, seed: u64) -> Self {
        Self {
            kind,
            obj,
            rng: StdRng::seed_from_u64(seed),
            width_rng: StdRng::seed_from_u64(seed),
            trace: None,
        }
    }

    /// Record every step taken from now on.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    pub fn kind(&self) -> MixedKind {
        self.kind
    }

    pub fn trace(&self) -> &[MixedStep] {
        self.trace.as_deref().unwrap_or(&[])
    }

    pub fn container(&self) -> &dyn SortedContainer {
        self.obj.as_ref()
    }

    pub fn container_mut(&mut self) -> &mut dyn SortedContainer {
        self.obj.as_mut()
    }

    pub fn update(&mut self, values: &[Value]) {
        self.obj.update(values);
    }

    pub fn run(&mut self, value: Value) -> Result<MixedStep, CheckFailure> {
        let draw = self.rng.random_range(0..DRAW_RANGE);
        let op = select(self.kind.table(), draw);
        let applied = self.apply(op, value)?;
        let step = MixedStep { op, applied };
        if let Some(trace) = self.trace.as_mut() {
            trace.push(step);
        }
        Ok(step)
    }

    fn apply(&mut self, op: MixedOp, value: Value) -> Result<bool, CheckFailure> {
        let obj = self.obj.as_mut();
        match op {
            MixedOp::Add => obj.add(value),
            MixedOp::Pop => {
                black_box(obj.pop());
            }
            MixedOp::Discard => obj.discard(value),
            MixedOp::Contains => {
                black_box(obj.contains(value));
            }
            MixedOp::AssertContains => {
                check!(obj.contains(value), "{} expected to be present in {}", value, self.kind);
            }
            MixedOp::Remove => {
                check!(obj.remove(value), "remove({}) found no such value in {}", value, self.kind);
            }
            MixedOp::Bisect => {
                black_box(obj.bisect_left(value));
            }
            MixedOp::AssertIndex => {
                check!(obj.index_of(value).is_some(), "index({}) found no such value in {}", value, self.kind);
            }
            MixedOp::GetGuarded => {
                let Some(pos) = position_within(value, obj.len()) else {
                    return Ok(false);
                };
                black_box(obj.get(pos));
            }
            MixedOp::DeleteGuarded => {
                let Some(pos) = position_within(value, obj.len()) else {
                    return Ok(false);
                };
                black_box(obj.delete_at(pos));
            }
            MixedOp::SliceGuarded => {
                let len = obj.len();
                let Some(start) = position_within(value, len) else {
                    return Ok(false);
                };
                let limit = (start + SLICE_WIDTH).min(len);
                let stop = self.width_rng.random_range(start..limit);
                black_box(obj.slice(start, stop));
            }
            MixedOp::Scan => {
                for item in obj.iter().take(SCAN_LIMIT) {
                    black_box(item);
                }
            }
        }
        Ok(true)
    }
}

impl fmt::Debug for MixedMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MixedMachine")
            .field("kind", &self.kind)
            .field("len", &self.obj.len())
            .finish()
    }
}
