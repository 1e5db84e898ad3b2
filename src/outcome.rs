use std::{any::Any, borrow::Cow, io};

use crate::{assert::AssertionFailure, capture::OutputCapture, test::TestResult};

/// What happened to a single case, together with everything it printed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TestOutcome {
    pub status: TestStatus,
    pub output: OutputCapture,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.status.passed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestStatus {
    Passed,
    Failed(CaseFailure),
}

impl TestStatus {
    pub fn passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }
}

impl From<TestResult> for TestStatus {
    fn from(value: TestResult) -> Self {
        match value.0 {
            Ok(_) => TestStatus::Passed,
            Err(err) => TestStatus::Failed(err),
        }
    }
}

/// Anything that escaped a case's action.
///
/// The runner catches these at the level that invoked the action and turns them
/// into an entry of the failure list. They never travel past the case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CaseFailure {
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    #[error("Error: {0}")]
    Error(String),

    #[error("panicked: {0}")]
    Panicked(String),
}

impl CaseFailure {
    /// Convert a panic payload into a failure.
    ///
    /// This matches the common payload types produced by `panic!` (`&'static str` and `String`).
    /// Other payload types are formatted as a generic placeholder.
    pub fn from_panic(err: Box<dyn Any + Send + 'static>) -> Self {
        let msg = err
            .downcast::<&'static str>()
            .map(|s| s.to_string())
            .or_else(|err| err.downcast::<String>().map(|s| *s))
            .unwrap_or_else(|_| String::from("Box<dyn Any>"));
        CaseFailure::Panicked(msg)
    }
}

impl From<String> for CaseFailure {
    fn from(value: String) -> Self {
        CaseFailure::Error(value)
    }
}

impl From<&str> for CaseFailure {
    fn from(value: &str) -> Self {
        CaseFailure::Error(value.to_string())
    }
}

impl From<Cow<'_, str>> for CaseFailure {
    fn from(value: Cow<'_, str>) -> Self {
        CaseFailure::Error(value.into_owned())
    }
}

impl From<io::Error> for CaseFailure {
    fn from(value: io::Error) -> Self {
        CaseFailure::Error(value.to_string())
    }
}

impl From<serde_json::Error> for CaseFailure {
    fn from(value: serde_json::Error) -> Self {
        CaseFailure::Error(value.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CaseFailure {
    fn from(value: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CaseFailure::Error(value.to_string())
    }
}
