use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::candidates::CandidateTable;
use crate::dataset::Dataset;
use crate::registry::ImplementationRegistry;
use crate::scenario::ScenarioRegistry;

/// A limit override declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOverride {
    pub scenario: String,
    pub candidate: String,
    pub value: usize,
}

/// Everything a run needs, built once and passed by reference to the driver.
#[derive(Debug, Clone)]
pub struct BenchContext {
    pub scenarios: ScenarioRegistry,
    pub candidates: CandidateTable,
    pub registry: ImplementationRegistry,
    pub dataset: Dataset,
}

impl BenchContext {
    /// Standard scenarios, reference candidates and identity datasets.
    pub fn standard(sizes: &[usize]) -> Self {
        Self::new(
            ScenarioRegistry::standard(),
            CandidateTable::standard(),
            Dataset::identity(sizes),
            &[],
        )
    }

    pub fn new(
        scenarios: ScenarioRegistry,
        candidates: CandidateTable,
        dataset: Dataset,
        overrides: &[LimitOverride],
    ) -> Self {
        let mut registry = ImplementationRegistry::standard(&scenarios, &candidates);
        for o in overrides {
            registry.limit(&o.scenario, &o.candidate, o.value);
        }

        let ctx = Self {
            scenarios,
            candidates,
            registry,
            dataset,
        };
        ctx.warn_unreachable_limits();
        ctx
    }

    fn warn_unreachable_limits(&self) {
        let Some(smallest) = self.dataset.smallest() else {
            return;
        };
        for (scenario, candidate, spec) in self.registry.iter() {
            if spec.limit < smallest {
                warn!(
                    target: "sortbench::context",
                    scenario,
                    candidate,
                    limit = spec.limit,
                    smallest,
                    "limit is below every dataset size; pair will never run"
                );
            }
        }
    }
}
