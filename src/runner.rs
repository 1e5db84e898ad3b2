//! Sequential execution of a registry.
//!
//! [`TestRunner`] walks a [`Registry`] depth first, in registration order. For
//! every case it intercepts the action's output, awaits the action, prints the
//! status marker and only then replays what the action printed. Groups are
//! entered recursively with one more level of indentation, and the failures of
//! a group come back as data which the parent re-qualifies with the group's
//! name.
//!
//! Nothing runs concurrently. The returned futures are `!Send` and are meant to
//! be driven by [`futures::executor::block_on`] or a current thread runtime.

use std::{io, panic::AssertUnwindSafe};

use futures::{FutureExt, future::LocalBoxFuture};
use tracing::{debug, info, warn};

use crate::{
    RunFailed, RunReport,
    capture::{Intercept, install_panic_hook},
    formatter::{TestFormatter, common::CaseOutcome, pretty::PrettyFormatter},
    outcome::{CaseFailure, TestOutcome, TestStatus},
    registry::{Registry, TestGroup, TestNode},
    sink::{DirectSink, Indented, Sink},
    test::TestCase,
};

#[derive(Debug)]
pub struct TestRunner<Formatter = PrettyFormatter, S = DirectSink<io::Stdout, io::Stderr>> {
    formatter: Formatter,
    sink: S,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self {
            formatter: PrettyFormatter::default(),
            sink: DirectSink::default(),
        }
    }
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Formatter, S> TestRunner<Formatter, S> {
    pub fn with_formatter<WithFormatter: TestFormatter>(
        self,
        formatter: WithFormatter,
    ) -> TestRunner<WithFormatter, S> {
        TestRunner {
            formatter,
            sink: self.sink,
        }
    }

    pub fn with_sink<WithSink: Sink>(self, sink: WithSink) -> TestRunner<Formatter, WithSink> {
        TestRunner {
            formatter: self.formatter,
            sink,
        }
    }

    pub fn into_parts(self) -> (Formatter, S) {
        (self.formatter, self.sink)
    }
}

impl<Formatter: TestFormatter, S: Sink> TestRunner<Formatter, S> {
    /// Run `registry` as a top level run.
    ///
    /// Prints the banner, every node and a final summary. Resolves to
    /// [`RunFailed`] if any case anywhere in the tree failed.
    pub async fn run(&mut self, registry: &Registry) -> Result<RunReport, RunFailed> {
        self.run_nested(registry, 0).await
    }

    /// Run `registry` as if it were nested `depth` groups deep.
    ///
    /// Only `depth == 0` prints the banner and the summary and can resolve to
    /// [`RunFailed`]. At any other depth the failures are only returned, with
    /// names qualified relative to `registry`.
    pub fn run_nested<'a>(
        &'a mut self,
        registry: &'a Registry,
        depth: usize,
    ) -> LocalBoxFuture<'a, Result<RunReport, RunFailed>> {
        async move {
            if depth == 0 {
                install_panic_hook();
                debug!(event = "run.started", nodes = registry.len());
                let result = self.formatter.fmt_run_start(&mut self.sink);
                log_fmt_error("run_start", result);
            }

            let mut report = RunReport::new();
            for node in registry {
                match node {
                    TestNode::Group(group) => self.run_group(group, depth, &mut report).await,
                    TestNode::Case(case) => self.run_case(case, depth, &mut report).await,
                }
            }

            if depth > 0 {
                return Ok(report);
            }

            info!(
                event = "run.finished",
                passed = report.passed(),
                failed = report.failed.len(),
                total = report.leaf_count,
            );
            let result = self.formatter.fmt_run_outcome(&mut self.sink, &report);
            log_fmt_error("run_outcome", result);
            match report.is_success() {
                true => Ok(report),
                false => Err(RunFailed { report }),
            }
        }
        .boxed_local()
    }

    async fn run_group(&mut self, group: &TestGroup, depth: usize, report: &mut RunReport) {
        debug!(event = "group.entered", group = %group.name, depth);
        let result = self
            .formatter
            .fmt_group_enter(&mut Indented::new(&mut self.sink, depth), &group.name);
        log_fmt_error("group_enter", result);

        let child = match self.run_nested(&group.children, depth + 1).await {
            Ok(child) => child,
            Err(err) => {
                warn!(event = "group.run_error", group = %group.name, error = %err);
                RunReport::new()
            }
        };

        let result = self
            .formatter
            .fmt_group_exit(&mut Indented::new(&mut self.sink, depth), &group.name);
        log_fmt_error("group_exit", result);
        debug!(
            event = "group.exited",
            group = %group.name,
            failed = child.failed.len(),
            leafs = child.leaf_count,
        );

        report.absorb(&group.name, child);
    }

    async fn run_case(&mut self, case: &TestCase, depth: usize, report: &mut RunReport) {
        let action = AssertUnwindSafe(async { case.call().await }.boxed_local()).catch_unwind();
        let (result, output) = Intercept::new(action).await;
        let status = match result {
            Ok(result) => TestStatus::from(result),
            Err(payload) => TestStatus::Failed(CaseFailure::from_panic(payload)),
        };
        let outcome = TestOutcome { status, output };

        debug!(
            event = "case.finished",
            case = %case.name,
            passed = outcome.passed(),
            lines = outcome.output.lines().len(),
        );
        report.record_case(&case.name, outcome.passed());

        let mut sink = Indented::new(&mut self.sink, depth);
        let result = self.formatter.fmt_case_outcome(
            &mut sink,
            CaseOutcome {
                name: &case.name,
                outcome: &outcome,
            },
        );
        log_fmt_error("case_outcome", result);
        log_fmt_error("replay", outcome.output.replay(&mut sink));
    }
}

fn log_fmt_error(stage: &'static str, result: io::Result<()>) {
    if let Err(err) = result {
        warn!(event = "output.write_failed", stage, error = %err);
    }
}
