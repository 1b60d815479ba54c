//! Named benchmark workloads and the registry that holds them.

mod workloads;


use std::fmt;
use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};

use crate::capability::{Capabilities, Capability};
use crate::container::Value;
use crate::error::{CheckFailure, HarnessError};
use crate::invoke::{Func, Instance, Method};
use crate::mixed::MixedKind;
use crate::util::OrderedTable;

pub use workloads::{ITERATION_STEP, MIXED_STEP, UPDATE_SMALL_STEP};

/// Seed of the per-trial generator used by randomized scenarios.
pub const TRIAL_SEED: u64 = 0;

/// Replays one scenario's sampling policy against a bound method.
pub type WorkloadFn = fn(&mut Trial<'_>) -> Result<(), CheckFailure>;

/// Pre-population applied to a fresh instance before the timed workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Setup {
    /// Bulk-load the sorted dataset.
    #[default]
    FillValues,
    Nothing,
}

impl Setup {
    pub fn apply(self, instance: &mut Instance, values: &[Value]) {
        match self {
            Setup::FillValues if values.is_sorted() => instance.update(values),
            Setup::FillValues => {
                let mut sorted = values.to_vec();
                sorted.sort_unstable();
                instance.update(&sorted);
            }
            Setup::Nothing => {}
        }
    }

    pub fn required(self) -> Capabilities {
        match self {
            Setup::FillValues => Capabilities::of(&[Capability::Update]),
            Setup::Nothing => Capabilities::NONE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Setup::FillValues => "fill_values",
            Setup::Nothing => "do_nothing",
        }
    }
}

/// Capabilities invoked by `setup`, `method` and, when present, the mixed
/// workload behind it.
pub fn required_capabilities(setup: Setup, method: Method, mixed: Option<MixedKind>) -> Capabilities {
    let mut caps = setup.required();
    if let Some(cap) = method.capability() {
        caps.insert(cap);
    }
    if let Some(kind) = mixed {
        caps = caps.union(kind.required());
    }
    caps
}

/// Everything one workload run can see: the bound method, the dataset for
/// this size, and a private seeded generator.
pub struct Trial<'a> {
    pub func: Func<'a>,
    pub size: usize,
    pub values: &'a [Value],
    pub rng: StdRng,
}

impl<'a> Trial<'a> {
    pub fn new(instance: &'a mut Instance, method: Method, size: usize, values: &'a [Value]) -> Self {
        Self {
            func: Func::new(instance, method),
            size,
            values,
            rng: StdRng::seed_from_u64(TRIAL_SEED),
        }
    }
}

#[derive(Clone)]
pub struct Scenario {
    name: String,
    method: Method,
    mixed: Option<MixedKind>,
    setup: Setup,
    workload: WorkloadFn,
}

impl Scenario {
    pub fn new(name: &str, method: Method, workload: WorkloadFn) -> Self {
        Self {
            name: name.to_string(),
            method,
            mixed: None,
            setup: Setup::FillValues,
            workload,
        }
    }

    /// A scenario that drives `kind` through [`Method::Run`].
    pub fn mixed(kind: MixedKind) -> Self {
        Self {
            mixed: Some(kind),
            ..Self::new(kind.name(), Method::Run, workloads::mixed)
        }
    }

    pub fn with_setup(mut self, setup: Setup) -> Self {
        self.setup = setup;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn mixed_kind(&self) -> Option<MixedKind> {
        self.mixed
    }

    pub fn setup(&self) -> Setup {
        self.setup
    }

    /// Capabilities a candidate needs for the default binding of this scenario.
    pub fn required(&self) -> Capabilities {
        required_capabilities(self.setup, self.method, self.mixed)
    }

    pub fn run(&self, trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
        (self.workload)(trial)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("mixed", &self.mixed)
            .field("setup", &self.setup)
            .finish()
    }
}

/// Scenario name → workload, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    scenarios: OrderedTable<Arc<Scenario>>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed scenario set.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let simple: [(&str, Method, WorkloadFn); 12] = [
            ("add", Method::Add, workloads::add),
            ("update_small", Method::Update, workloads::update_small),
            ("update_large", Method::Update, workloads::update_large),
            ("contains", Method::Contains, workloads::contains),
            ("remove", Method::Remove, workloads::remove),
            ("delitem", Method::DelItem, workloads::delitem),
            ("bisect", Method::Bisect, workloads::bisect),
            ("getitem", Method::GetItem, workloads::getitem),
            ("pop", Method::Pop, workloads::pop),
            ("index", Method::Index, workloads::index),
            ("iter", Method::Iter, workloads::iter),
            ("count", Method::Count, workloads::count),
        ];
        let scenarios = simple
            .into_iter()
            .map(|(name, method, workload)| Scenario::new(name, method, workload))
            .chain(MixedKind::ALL.into_iter().map(Scenario::mixed));
        for scenario in scenarios {
            // Names above are distinct.
            let _ = registry.register(scenario);
        }
        registry
    }

    pub fn register(&mut self, scenario: Scenario) -> Result<(), HarnessError> {
        let name = scenario.name.clone();
        self.scenarios
            .insert(&name, Arc::new(scenario))
            .map_err(|_| HarnessError::configuration(format!("scenario '{}' is already registered", name)))
    }

    pub fn lookup(&self, name: &str) -> Result<&Arc<Scenario>, HarnessError> {
        self.scenarios
            .get(name)
            .ok_or_else(|| HarnessError::not_found("scenario", name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.names()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Scenario>> {
        self.scenarios.iter().map(|(_, scenario)| scenario)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
