use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    /// A correctness check failed; the candidate is wrong, not slow.
    Failed { message: String },
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimeStats {
    pub best_ns: u64,
    pub median_ns: u64,
    pub mean_ns: u64,
    pub worst_ns: u64,
}

impl TimeStats {
    pub fn from_samples(samples: &[Duration]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let mut sorted = samples.to_vec();
        sorted.sort();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2
        } else {
            sorted[mid]
        };
        let total: Duration = sorted.iter().sum();
        let mean = total / sorted.len() as u32;
        Self {
            best_ns: nanos(sorted[0]),
            median_ns: nanos(median),
            mean_ns: nanos(mean),
            worst_ns: nanos(sorted[sorted.len() - 1]),
        }
    }
}

fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Result of all trials of one scenario × candidate × size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Measurement {
    pub scenario: String,
    pub candidate: String,
    pub size: usize,
    pub trials: usize,
    pub stats: TimeStats,
    pub outcome: Outcome,
}
