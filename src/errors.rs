//! Error types raised by the harness and by code under test.
//!
//! A [`Failure`] is a deliberate assertion failure. Anything else user code
//! returns (or panics with) is a host error. Nesting `describe` blocks is a
//! structural violation and is never recovered from.

use miette::Diagnostic;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

use crate::calls::record_call;

/// The result type of every block body, hook, and assertion.
pub type Outcome = Result<(), TestError>;

/// A framework-generated test failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(kata::failure))]
pub struct Failure {
    pub message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        record_call("failure");
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TestError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Failure(#[from] Failure),

    #[error("{0}")]
    #[diagnostic(code(kata::host))]
    Host(String),

    #[error("cannot call describe within another describe")]
    #[diagnostic(
        code(kata::nested_describe),
        help("close the current describe block before opening another")
    )]
    NestedDescribe,
}

impl TestError {
    /// Wraps an arbitrary error raised by code under test.
    pub fn host(error: impl std::fmt::Display) -> Self {
        TestError::Host(error.to_string())
    }

    /// True for framework-generated assertion failures.
    pub fn is_failure(&self) -> bool {
        matches!(self, TestError::Failure(_))
    }

    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            TestError::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<String> for TestError {
    fn from(message: String) -> Self {
        TestError::Host(message)
    }
}

impl From<&str> for TestError {
    fn from(message: &str) -> Self {
        TestError::Host(message.to_string())
    }
}

impl From<std::io::Error> for TestError {
    fn from(error: std::io::Error) -> Self {
        TestError::host(error)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for TestError {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        TestError::host(error)
    }
}

/// Runs code under test, turning a panic into a host error.
pub(crate) fn guard<F>(f: F) -> Outcome
where
    F: FnOnce() -> Outcome,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(outcome) => outcome,
        Err(payload) => Err(TestError::Host(panic_text(payload.as_ref()))),
    }
}

pub(crate) fn panic_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", text)
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("panicked: {}", text)
    } else {
        "panicked".to_string()
    }
}
