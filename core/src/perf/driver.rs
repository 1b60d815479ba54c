use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info};

use super::measurement::{Measurement, Outcome, TimeStats};
use crate::container::Value;
use crate::context::BenchContext;
use crate::error::HarnessError;
use crate::registry::InvocationSpec;
use crate::scenario::{Scenario, Trial};

pub const DEFAULT_REPEAT: usize = 5;

/// What to run. Empty filters select everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub scenarios: Vec<String>,
    pub candidates: Vec<String>,
    pub sizes: Vec<usize>,
    pub repeat: usize,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            scenarios: Vec::new(),
            candidates: Vec::new(),
            sizes: Vec::new(),
            repeat: DEFAULT_REPEAT,
        }
    }
}

/// One trial: fresh instance, setup, then the timed workload.
pub fn run_trial(scenario: &Scenario, spec: &InvocationSpec, size: usize, values: &[Value]) -> Result<Duration, HarnessError> {
    let mut instance = spec.prepare(values);
    let mut trial = Trial::new(&mut instance, spec.func, size, values);

    let start = Instant::now();
    let result = scenario.run(&mut trial);
    let elapsed = start.elapsed();

    result.map_err(|failure| failure.into_assertion(scenario.name(), spec.candidate(), size))?;
    Ok(elapsed)
}

fn measure_pair(scenario: &Scenario, spec: &InvocationSpec, size: usize, values: &[Value], repeat: usize) -> Measurement {
    let mut samples = Vec::with_capacity(repeat);
    let mut outcome = Outcome::Passed;
    for _ in 0..repeat.max(1) {
        match run_trial(scenario, spec, size, values) {
            Ok(elapsed) => samples.push(elapsed),
            Err(err) => {
                error!(target: "sortbench::driver", "{}", err);
                outcome = Outcome::Failed {
                    message: err.to_string(),
                };
                break;
            }
        }
    }

    Measurement {
        scenario: scenario.name().to_string(),
        candidate: spec.candidate().to_string(),
        size,
        trials: samples.len(),
        stats: TimeStats::from_samples(&samples),
        outcome,
    }
}

/// Run every selected scenario × size × candidate whose limit admits the size.
///
/// Unknown names in the plan are reported before anything runs. A failed
/// correctness check ends that pair's trials and is recorded in its
/// [`Measurement`]; other pairs still run.
pub fn run_plan(ctx: &BenchContext, plan: &RunPlan) -> Result<Vec<Measurement>, HarnessError> {
    let scenarios: Vec<Arc<Scenario>> = if plan.scenarios.is_empty() {
        ctx.scenarios.iter().cloned().collect()
    } else {
        plan.scenarios
            .iter()
            .map(|name| ctx.scenarios.lookup(name).cloned())
            .collect::<Result<Vec<_>, _>>()?
    };
    for name in &plan.candidates {
        ctx.candidates.lookup(name)?;
    }
    let sizes: Vec<usize> = if plan.sizes.is_empty() {
        ctx.dataset.sizes().collect()
    } else {
        plan.sizes.clone()
    };
    for &size in &sizes {
        ctx.dataset.values(size)?;
    }

    let mut measurements = Vec::new();
    for scenario in &scenarios {
        for &size in &sizes {
            let values = ctx.dataset.values(size)?;
            let runnable = ctx.registry.runnable(scenario.name(), size)?;
            info!(
                target: "sortbench::driver",
                scenario = scenario.name(),
                size,
                candidates = runnable.len(),
                "running scenario"
            );
            for (candidate, spec) in runnable {
                if !plan.candidates.is_empty() && !plan.candidates.iter().any(|c| c == candidate) {
                    continue;
                }
                measurements.push(measure_pair(scenario, spec, size, values, plan.repeat));
            }
        }
    }
    Ok(measurements)
}
