//! A nested, sequential test harness.
//!
//! Register cases and groups of cases in a [`Registry`], then hand it to a
//! [`TestRunner`]. Cases run one after another in registration order.
//! Whatever a case prints through [`println!`](crate::println),
//! [`eprintln!`](crate::eprintln) or [`warnln!`](crate::warnln) is held back
//! until the case's pass or fail marker is printed, and failures are reported
//! with their full group path, like `outer -> inner -> case`.
//!
//! ```
//! use futures::executor::block_on;
//! use nestest::{Registry, TestRunner, assert::{assert, assert_equals}};
//!
//! let mut math = Registry::new();
//! math.add("adds", || assert_equals(&(1 + 1), &2, None));
//! math.add("compares", || assert(2 > 1, "two is bigger"));
//!
//! let mut registry = Registry::new();
//! registry.add("math", math);
//!
//! let report = block_on(TestRunner::new().run(&registry)).unwrap();
//! assert_eq!(report.leaf_count, 2);
//! ```

pub mod assert;
pub mod capture;
pub mod formatter;
pub mod outcome;
pub mod registry;
pub mod runner;
pub mod sink;

mod report;
pub use report::*;

pub use registry::{Entry, Registry};
pub use runner::TestRunner;

#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use crate::{
        RunFailed, RunReport,
        assert::{AssertionFailure, assert, assert_equals},
        capture::Channel,
        formatter::{TestFormatter, common::color::ColorSetting, pretty::PrettyFormatter},
        outcome::CaseFailure,
        registry::{Entry, Registry},
        runner::TestRunner,
        sink::{DirectSink, Sink},
        test::{TestFnHandle, TestResult},
    };
}

/// Register `entry` under `name` in the process wide default registry.
///
/// Use [`Registry::add`] to build an isolated tree instead.
pub fn test(name: impl Into<std::borrow::Cow<'static, str>>, entry: impl Into<Entry>) {
    registry::default_registry().add(name, entry);
}

/// Run the process wide default registry with the default runner.
///
/// The registry is kept, so it can be run again. Nodes registered while the run
/// is in progress are appended after it finished.
pub async fn run_tests() -> Result<RunReport, RunFailed> {
    let registry = registry::take_default_registry();
    let result = TestRunner::new().run(&registry).await;
    registry::restore_default_registry(registry);
    result
}
