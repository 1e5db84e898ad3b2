//! Assertion helpers for test actions.
//!
//! Both helpers return a [`Result`] so they compose with `?` inside an action:
//!
//! ```
//! use nestest::assert::{assert, assert_equals};
//!
//! fn action() -> Result<(), nestest::assert::AssertionFailure> {
//!     assert(1 + 1 == 2, "math still works")?;
//!     assert_equals(&vec![1, 2], &vec![1, 2], None)?;
//!     Ok(())
//! }
//! # action().unwrap();
//! ```

use serde::Serialize;

mod fingerprint;

/// The failure produced by [`assert`] and [`assert_equals`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AssertionFailure {
    #[error("Assertion failed")]
    Bare,

    #[error("Assertion failed: {0}")]
    Message(String),

    /// Serialized form of both sides of a failed [`assert_equals`].
    #[error("Assertion failed: \n  > expected: {expected}\n  < received: {received}")]
    Mismatch { expected: String, received: String },
}

impl AssertionFailure {
    /// A failure carrying `message`, or the bare failure if it is empty.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        match message.is_empty() {
            true => AssertionFailure::Bare,
            false => AssertionFailure::Message(message),
        }
    }
}

/// Fail with `message` unless `condition` holds.
///
/// An empty message produces the bare `Assertion failed`.
pub fn assert(condition: bool, message: &str) -> Result<(), AssertionFailure> {
    match condition {
        true => Ok(()),
        false => Err(AssertionFailure::new(message)),
    }
}

/// Fail unless `actual` and `expected` are structurally equal.
///
/// Floats are compared by identity: `0.0` and `-0.0` are different, the two
/// infinities are different, and NaN equals NaN and nothing else. Everything
/// else is compared structurally, map entries regardless of their order.
///
/// Without a `message` the failure shows both sides as JSON.
pub fn assert_equals<T>(
    actual: &T,
    expected: &T,
    message: Option<&str>,
) -> Result<(), AssertionFailure>
where
    T: Serialize + ?Sized,
{
    if identity(actual) == identity(expected) {
        return Ok(());
    }

    Err(match message {
        Some(message) => AssertionFailure::new(message),
        None => AssertionFailure::Mismatch {
            expected: render(expected),
            received: render(actual),
        },
    })
}

fn identity<T: Serialize + ?Sized>(value: &T) -> String {
    // A value whose `Serialize` impl fails still compares by its error text.
    fingerprint::fingerprint(value).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}

fn render<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| identity(value))
}
