//! Scenario × candidate bindings: which constructor, setup and method a run
//! uses for each pair, and the largest dataset size the pair may run at.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::candidates::{Candidate, CandidateTable, KEYED_COLLECTION};
use crate::capability::Capabilities;
use crate::container::Value;
use crate::error::HarnessError;
use crate::invoke::{Instance, Method};
use crate::mixed::MixedKind;
use crate::scenario::{Scenario, ScenarioRegistry, Setup, required_capabilities};
use crate::util::OrderedTable;

/// Limit of every binding without an override.
pub const DEFAULT_LIMIT: usize = 1_000_000;
/// Override applied to the index-backed candidate where it scales poorly.
pub const SLOW_CANDIDATE_LIMIT: usize = 100_000;
/// Scenarios in which the index-backed candidate is capped at [`SLOW_CANDIDATE_LIMIT`].
pub const SLOW_LIMITED_SCENARIOS: &[&str] = &[
    "update_small",
    "update_large",
    "priorityqueue",
    "multiset",
    "ranking",
    "neighbor",
    "intervals",
];

/// Candidate constructor, possibly wrapped by a mixed workload.
#[derive(Clone)]
pub struct Ctor {
    candidate: Arc<Candidate>,
    mixed: Option<MixedKind>,
}

impl Ctor {
    pub fn plain(candidate: Arc<Candidate>) -> Self {
        Self { candidate, mixed: None }
    }

    pub fn mixed(kind: MixedKind, candidate: Arc<Candidate>) -> Self {
        Self {
            candidate,
            mixed: Some(kind),
        }
    }

    pub fn candidate(&self) -> &Arc<Candidate> {
        &self.candidate
    }

    pub fn mixed_kind(&self) -> Option<MixedKind> {
        self.mixed
    }

    /// A fresh instance with fresh machine state.
    pub fn instantiate(&self) -> Instance {
        Instance::new(self.candidate.construct(), self.mixed)
    }
}

impl fmt::Debug for Ctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ctor")
            .field("candidate", &self.candidate.name())
            .field("mixed", &self.mixed)
            .finish()
    }
}

/// The `(setup, ctor, func, limit)` bound to one scenario × candidate pair.
#[derive(Debug, Clone)]
pub struct InvocationSpec {
    pub setup: Setup,
    pub ctor: Ctor,
    pub func: Method,
    pub limit: usize,
}

impl InvocationSpec {
    pub fn candidate(&self) -> &str {
        self.ctor.candidate.name()
    }

    /// Capabilities the setup, method and any mixed workload invoke.
    pub fn required(&self) -> Capabilities {
        required_capabilities(self.setup, self.func, self.ctor.mixed)
    }

    pub fn runs_at(&self, size: usize) -> bool {
        size <= self.limit
    }

    /// Construct and pre-populate a new instance for one trial.
    pub fn prepare(&self, values: &[Value]) -> Instance {
        let mut instance = self.ctor.instantiate();
        self.setup.apply(&mut instance, values);
        instance
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImplementationRegistry {
    impls: OrderedTable<OrderedTable<InvocationSpec>>,
}

impl ImplementationRegistry {
    /// Empty binding tables for every scenario, in registry order.
    pub fn new(scenarios: &ScenarioRegistry) -> Self {
        let mut impls = OrderedTable::new();
        for name in scenarios.names() {
            let _ = impls.insert(name, OrderedTable::new());
        }
        Self { impls }
    }

    /// Bind every candidate into every scenario it can serve.
    ///
    /// Pairs that fail the binding checks are logged and left unbound.
    pub fn build(scenarios: &ScenarioRegistry, candidates: &CandidateTable) -> Self {
        let mut registry = Self::new(scenarios);
        for scenario in scenarios.iter() {
            for candidate in candidates.iter() {
                let ctor = match scenario.mixed_kind() {
                    Some(kind) => Ctor::mixed(kind, Arc::clone(candidate)),
                    None => Ctor::plain(Arc::clone(candidate)),
                };
                if let Err(err) = registry.bind(scenario, scenario.setup(), ctor, scenario.method(), DEFAULT_LIMIT) {
                    debug!(
                        target: "sortbench::registry",
                        scenario = scenario.name(),
                        candidate = candidate.name(),
                        "binding skipped: {}",
                        err
                    );
                }
            }
        }
        registry
    }

    /// [`build`](Self::build) plus the standard limit overrides.
    pub fn standard(scenarios: &ScenarioRegistry, candidates: &CandidateTable) -> Self {
        let mut registry = Self::build(scenarios, candidates);
        for scenario in SLOW_LIMITED_SCENARIOS {
            registry.limit(scenario, KEYED_COLLECTION, SLOW_CANDIDATE_LIMIT);
        }
        registry
    }

    pub fn bind(
        &mut self,
        scenario: &Scenario,
        setup: Setup,
        ctor: Ctor,
        func: Method,
        limit: usize,
    ) -> Result<(), HarnessError> {
        let candidate = ctor.candidate.name().to_string();
        let spec = InvocationSpec {
            setup,
            ctor,
            func,
            limit,
        };

        let missing = spec.ctor.candidate.capabilities().missing(spec.required());
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|cap| cap.name()).collect();
            return Err(HarnessError::configuration(format!(
                "candidate '{}' cannot run scenario '{}': missing {}",
                candidate,
                scenario.name(),
                names.join(", ")
            )));
        }
        if func.arg_kind() != scenario.method().arg_kind() {
            return Err(HarnessError::configuration(format!(
                "scenario '{}' calls {} but '{}' was bound to {}",
                scenario.name(),
                scenario.method(),
                candidate,
                func
            )));
        }
        if (func == Method::Run) != spec.ctor.mixed.is_some() {
            return Err(HarnessError::configuration(format!(
                "scenario '{}' for '{}': run must be paired with a mixed workload constructor",
                scenario.name(),
                candidate
            )));
        }

        if !self.impls.contains(scenario.name()) {
            let _ = self.impls.insert(scenario.name(), OrderedTable::new());
        }
        let Some(table) = self.impls.get_mut(scenario.name()) else {
            return Err(HarnessError::not_found("scenario", scenario.name()));
        };
        table.insert(&candidate, spec).map_err(|_| {
            HarnessError::configuration(format!(
                "candidate '{}' is already bound to scenario '{}'",
                candidate,
                scenario.name()
            ))
        })
    }

    /// Override the limit of one bound pair. Unbound pairs are ignored.
    pub fn limit(&mut self, scenario: &str, candidate: &str, value: usize) -> bool {
        match self.impls.get_mut(scenario).and_then(|table| table.get_mut(candidate)) {
            Some(spec) => {
                spec.limit = value;
                true
            }
            None => {
                debug!(
                    target: "sortbench::registry",
                    scenario, candidate, value, "limit override ignored for unbound pair"
                );
                false
            }
        }
    }

    pub fn get(&self, scenario: &str, candidate: &str) -> Result<&InvocationSpec, HarnessError> {
        let table = self
            .impls
            .get(scenario)
            .ok_or_else(|| HarnessError::not_found("scenario", scenario))?;
        table
            .get(candidate)
            .ok_or_else(|| HarnessError::not_found("binding", format!("{}/{}", scenario, candidate)))
    }

    pub fn is_bound(&self, scenario: &str, candidate: &str) -> bool {
        self.get(scenario, candidate).is_ok()
    }

    /// Bound pairs of one scenario, in candidate registration order.
    pub fn bindings(&self, scenario: &str) -> Result<impl Iterator<Item = (&str, &InvocationSpec)>, HarnessError> {
        self.impls
            .get(scenario)
            .map(OrderedTable::iter)
            .ok_or_else(|| HarnessError::not_found("scenario", scenario))
    }

    /// Bound pairs whose limit admits `size`.
    pub fn runnable(&self, scenario: &str, size: usize) -> Result<Vec<(&str, &InvocationSpec)>, HarnessError> {
        Ok(self.bindings(scenario)?.filter(|(_, spec)| spec.runs_at(size)).collect())
    }

    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.impls.names()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &InvocationSpec)> {
        self.impls.iter().flat_map(|(scenario, table)| {
            table
                .iter()
                .map(move |(candidate, spec)| (scenario, candidate, spec))
        })
    }
}
