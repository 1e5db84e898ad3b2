use std::io;

use crate::{
    RunReport,
    assert::AssertionFailure,
    capture::Channel,
    formatter::{
        TestFormatter,
        common::{
            CaseOutcome,
            color::{ColorSetting, colors::*},
        },
    },
    outcome::{CaseFailure, TestStatus},
    sink::Sink,
};

/// The default formatter.
///
/// Produces a tree shaped report:
///
/// ```text
/// [ Test Runner ]
///
/// - v outer
///   |  - ✓ passes
///   |  - ✗ fails
///   |  Assertion failed: nope
/// - ^ outer
///
/// 1/2 test(s) failed
///
/// - outer -> fails failed
/// ```
#[derive(Debug, Default, Clone)]
pub struct PrettyFormatter {
    color_setting: ColorSetting,
}

impl PrettyFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color_setting(self, color_setting: impl Into<ColorSetting>) -> Self {
        PrettyFormatter {
            color_setting: color_setting.into(),
        }
    }

    /// Return whether this formatter will emit colored output to `sink`.
    pub fn use_color(&self, sink: &dyn Sink) -> bool {
        self.color_setting.use_color(sink.supports_color())
    }
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    match use_color {
        true => format!("{color}{text}{RESET}"),
        false => text.to_string(),
    }
}

fn failure_detail(failure: &CaseFailure, use_color: bool) -> String {
    match failure {
        CaseFailure::Assertion(AssertionFailure::Mismatch { expected, received })
            if use_color =>
        {
            format!(
                "Assertion failed: \n  > expected: {}\n  < received: {}",
                paint(expected, GREEN, true),
                paint(received, RED, true)
            )
        }
        failure => failure.to_string(),
    }
}

impl TestFormatter for PrettyFormatter {
    fn fmt_run_start(&mut self, sink: &mut dyn Sink) -> io::Result<()> {
        let banner = paint("[ Test Runner ]", BLUE, self.use_color(sink));
        sink.write_line(Channel::Normal, &format!("\n{banner}\n"))
    }

    fn fmt_group_enter(&mut self, sink: &mut dyn Sink, name: &str) -> io::Result<()> {
        let marker = paint(&format!("v {name}"), MAGENTA, self.use_color(sink));
        sink.write_line(Channel::Normal, &format!("- {marker}"))
    }

    fn fmt_group_exit(&mut self, sink: &mut dyn Sink, name: &str) -> io::Result<()> {
        let marker = paint(&format!("^ {name}"), MAGENTA, self.use_color(sink));
        sink.write_line(Channel::Normal, &format!("- {marker}"))
    }

    fn fmt_case_outcome(&mut self, sink: &mut dyn Sink, data: CaseOutcome<'_>) -> io::Result<()> {
        let use_color = self.use_color(sink);
        match &data.outcome.status {
            TestStatus::Passed => sink.write_line(
                Channel::Normal,
                &format!("- {} {}", paint("✓", GREEN, use_color), data.name),
            ),
            TestStatus::Failed(failure) => {
                sink.write_line(
                    Channel::Error,
                    &format!("- {} {}", paint("✗", RED, use_color), data.name),
                )?;
                sink.write_line(Channel::Error, &failure_detail(failure, use_color))
            }
        }
    }

    fn fmt_run_outcome(&mut self, sink: &mut dyn Sink, report: &RunReport) -> io::Result<()> {
        if report.is_success() {
            return sink.write_line(
                Channel::Normal,
                &format!("\nAll {} tests passed", report.leaf_count),
            );
        }

        let use_color = self.use_color(sink);
        sink.write_line(
            Channel::Error,
            &format!(
                "\n{}/{} test(s) failed\n",
                report.failed.len(),
                report.leaf_count
            ),
        )?;
        for name in &report.failed {
            sink.write_line(
                Channel::Error,
                &format!("- {} failed", paint(name, RED, use_color)),
            )?;
        }
        sink.write_line(Channel::Normal, "")
    }
}
