//! Workload and registry engine for benchmarking sorted-list implementations.
//!
//! Scenarios name a workload, candidates name an implementation, and the
//! implementation registry binds the two with a setup step, the method to call
//! and a size limit. The five mixed workloads replay seeded, weighted random
//! traffic so every candidate sees the same operation sequence.

pub mod capability;
pub mod container;
pub mod error;
pub mod util;

// Implementations under comparison
pub mod candidates;

pub mod dataset;
pub mod invoke;
pub mod mixed;
pub mod registry;
pub mod scenario;

// Explicit run context and the trial driver
pub mod context;
pub mod perf;

#[cfg(test)]
mod mixed_test;
#[cfg(test)]
mod testing;

pub use capability::{Capabilities, Capability};
pub use container::{SortedContainer, Value};
pub use context::{BenchContext, LimitOverride};
pub use error::{CheckFailure, HarnessError};
pub use registry::{DEFAULT_LIMIT, ImplementationRegistry, InvocationSpec};
pub use scenario::{Scenario, ScenarioRegistry};
