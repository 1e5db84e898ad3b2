//! Rendering of run events.
//!
//! The runner decides *when* something is printed, a formatter decides *what*
//! it looks like. Every hook receives the sink the line should go to, already
//! indented for the current nesting level.
//!
//! Every hook has a default implementation that prints nothing, so a formatter
//! only implements the events it cares about. Replaying a case's captured
//! output is not a formatter concern, the runner does that regardless.

use std::io;

use crate::{RunReport, sink::Sink};

pub mod common;
use common::CaseOutcome;

pub mod no;
pub mod pretty;

pub trait TestFormatter {
    /// Called once before the first node of a top level run.
    fn fmt_run_start(&mut self, sink: &mut dyn Sink) -> io::Result<()> {
        let _ = sink;
        Ok(())
    }

    /// Called before descending into a group.
    fn fmt_group_enter(&mut self, sink: &mut dyn Sink, name: &str) -> io::Result<()> {
        let _ = (sink, name);
        Ok(())
    }

    /// Called after a group's children ran, at the group's own level.
    fn fmt_group_exit(&mut self, sink: &mut dyn Sink, name: &str) -> io::Result<()> {
        let _ = (sink, name);
        Ok(())
    }

    /// Called after a case settled, before its captured output is replayed.
    fn fmt_case_outcome(&mut self, sink: &mut dyn Sink, data: CaseOutcome<'_>) -> io::Result<()> {
        let _ = (sink, data);
        Ok(())
    }

    /// Called once after a top level run with the aggregated report.
    fn fmt_run_outcome(&mut self, sink: &mut dyn Sink, report: &RunReport) -> io::Result<()> {
        let _ = (sink, report);
        Ok(())
    }
}

impl<F: TestFormatter + ?Sized> TestFormatter for &mut F {
    fn fmt_run_start(&mut self, sink: &mut dyn Sink) -> io::Result<()> {
        (**self).fmt_run_start(sink)
    }

    fn fmt_group_enter(&mut self, sink: &mut dyn Sink, name: &str) -> io::Result<()> {
        (**self).fmt_group_enter(sink, name)
    }

    fn fmt_group_exit(&mut self, sink: &mut dyn Sink, name: &str) -> io::Result<()> {
        (**self).fmt_group_exit(sink, name)
    }

    fn fmt_case_outcome(&mut self, sink: &mut dyn Sink, data: CaseOutcome<'_>) -> io::Result<()> {
        (**self).fmt_case_outcome(sink, data)
    }

    fn fmt_run_outcome(&mut self, sink: &mut dyn Sink, report: &RunReport) -> io::Result<()> {
        (**self).fmt_run_outcome(sink, report)
    }
}
