//! Common helpers for formatter implementations.
//!
//! This module contains small helper types that are convenient when implementing nestest formatters.
//! They are intentionally formatter focused and are not meant to be general purpose building blocks
//! for unrelated code.

pub mod color;

use crate::outcome::TestOutcome;

/// A case name together with how the case ended.
///
/// This is what [`TestFormatter::fmt_case_outcome`](super::TestFormatter::fmt_case_outcome)
/// receives, so formatter implementations do not have to juggle two arguments.
#[derive(Debug, Clone, Copy)]
pub struct CaseOutcome<'t> {
    pub name: &'t str,
    pub outcome: &'t TestOutcome,
}
