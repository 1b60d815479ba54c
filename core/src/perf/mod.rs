//! Trial driver and measurement records shared by the CLI and the benches.
//!
//! Both entry points run pairs through [`driver::run_trial`] so a report and a
//! Criterion bench never disagree about what one trial does.

pub mod driver;
pub mod measurement;


pub use driver::{RunPlan, run_plan, run_trial};
pub use measurement::{Measurement, Outcome, TimeStats};
