use std::fmt;

/// Errors raised while building the registries or running a trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// Duplicate registration, or a binding the candidate cannot serve.
    Configuration(String),
    /// Lookup of an unregistered scenario, candidate or dataset size.
    NotFound { kind: &'static str, name: String },
    /// A scenario's built-in correctness check failed for one trial.
    Assertion {
        scenario: String,
        candidate: String,
        size: usize,
        message: String,
    },
}

impl HarnessError {
    pub fn configuration(message: impl Into<String>) -> Self {
        HarnessError::Configuration(message.into())
    }

    pub fn not_found(kind: &'static str, name: impl fmt::Display) -> Self {
        HarnessError::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, HarnessError::Configuration(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HarnessError::NotFound { .. })
    }

    pub fn is_assertion(&self) -> bool {
        matches!(self, HarnessError::Assertion { .. })
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Configuration(message) => write!(f, "configuration error: {}", message),
            HarnessError::NotFound { kind, name } => write!(f, "{} '{}' not found", kind, name),
            HarnessError::Assertion {
                scenario,
                candidate,
                size,
                message,
            } => write!(
                f,
                "assertion failed in scenario '{}' for candidate '{}' at size {}: {}",
                scenario, candidate, size, message
            ),
        }
    }
}

impl std::error::Error for HarnessError {}

/// A failed workload check, before the driver attaches scenario/candidate/size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure(pub String);

impl CheckFailure {
    pub fn new(message: impl Into<String>) -> Self {
        CheckFailure(message.into())
    }

    pub fn into_assertion(self, scenario: &str, candidate: &str, size: usize) -> HarnessError {
        HarnessError::Assertion {
            scenario: scenario.to_string(),
            candidate: candidate.to_string(),
            size,
            message: self.0,
        }
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CheckFailure {}

/// Return a [`CheckFailure`] from the enclosing workload unless `cond` holds.
#[macro_export]
macro_rules! check {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::CheckFailure::new(format!($($arg)+)));
        }
    };
}
