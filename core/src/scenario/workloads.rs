use rand::Rng;

use super::Trial;
use crate::check;
use crate::container::Value;
use crate::dataset::{sample_every, sampled};
use crate::error::CheckFailure;
use crate::invoke::Arg;

/// Stride of the per-element scenarios (about `size / 100` calls).
pub const ITERATION_STEP: usize = 100;
/// Stride of the `update_small` bulk call.
pub const UPDATE_SMALL_STEP: usize = 10;
/// Stride of the mixed workloads (about `size / 10` calls).
pub const MIXED_STEP: usize = 10;

fn position(value: Value) -> Result<usize, CheckFailure> {
    usize::try_from(value).map_err(|_| CheckFailure::new(format!("{} does not fit a position", value)))
}

pub(super) fn add(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    for val in sample_every(trial.values, ITERATION_STEP) {
        trial.func.call(Arg::Value(val))?;
    }
    Ok(())
}

pub(super) fn update_small(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    let values = sampled(trial.values, UPDATE_SMALL_STEP);
    trial.func.call(Arg::Values(&values))?;
    Ok(())
}

pub(super) fn update_large(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    trial.func.call(Arg::Values(trial.values))?;
    Ok(())
}

pub(super) fn contains(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    for val in sample_every(trial.values, ITERATION_STEP) {
        let found = trial.func.call(Arg::Value(val))?.as_bool();
        check!(found == Some(true), "contains({}) returned {:?}", val, found);
    }
    Ok(())
}

pub(super) fn remove(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    for val in sample_every(trial.values, ITERATION_STEP) {
        trial.func.call(Arg::Value(val))?;
    }
    Ok(())
}

/// Deletes at uniformly random positions of the shrinking instance.
pub(super) fn delitem(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    let size = trial.size;
    for val in 0..size / ITERATION_STEP {
        let pos = trial.rng.random_range(0..size - val);
        trial.func.call(Arg::Position(pos))?;
    }
    Ok(())
}

pub(super) fn bisect(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    for val in sample_every(trial.values, ITERATION_STEP) {
        trial.func.call(Arg::Value(val))?;
    }
    Ok(())
}

/// The dataset is `0..size`, so position `val` must hold `val`.
pub(super) fn getitem(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    for val in sample_every(trial.values, ITERATION_STEP) {
        let got = trial.func.call(Arg::Position(position(val)?))?.as_value();
        check!(got == Some(val), "get({}) returned {:?}", val, got);
    }
    Ok(())
}

/// Pops from the tail; values must come back in descending order.
pub(super) fn pop(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    let size = trial.size;
    for val in 0..size / ITERATION_STEP {
        let expected = (size - val - 1) as Value;
        let got = trial.func.call(Arg::None)?.as_value();
        check!(got == Some(expected), "pop #{} returned {:?}, expected {}", val, got, expected);
    }
    Ok(())
}

pub(super) fn index(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    for val in sample_every(trial.values, ITERATION_STEP) {
        let expected = position(val)?;
        let got = trial.func.call(Arg::Value(val))?.as_position();
        check!(got == Some(expected), "index_of({}) returned {:?}", val, got);
    }
    Ok(())
}

/// One full traversal that must yield exactly `0, 1, 2, ..., size - 1`.
pub(super) fn iter(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    let size = trial.size;
    let mut seen = 0usize;
    for (idx, val) in trial.func.iterate()?.enumerate() {
        check!(val == idx as Value, "iteration yielded {} at position {}", val, idx);
        seen += 1;
    }
    check!(seen == size, "iteration yielded {} values, expected {}", seen, size);
    Ok(())
}

pub(super) fn count(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    for val in sample_every(trial.values, ITERATION_STEP) {
        let got = trial.func.call(Arg::Value(val))?.as_count();
        check!(got == Some(1), "count({}) returned {:?}", val, got);
    }
    Ok(())
}

/// Shared by the five mixed scenarios; the bound instance carries the machine.
pub(super) fn mixed(trial: &mut Trial<'_>) -> Result<(), CheckFailure> {
    for val in sample_every(trial.values, MIXED_STEP) {
        trial.func.call(Arg::Value(val))?;
    }
    Ok(())
}
