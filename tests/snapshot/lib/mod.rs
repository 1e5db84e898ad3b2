use std::{
    io::{self, Write},
    string::FromUtf8Error,
    sync::{Arc, Mutex},
};

use futures::executor::block_on;
use nestest::{
    RunFailed, RunReport,
    formatter::{common::color::SupportsColor, pretty::PrettyFormatter},
    prelude::*,
};

pub use sanitize::*;

#[derive(Debug)]
#[allow(dead_code)]
pub enum Error {
    Poison,
    FromUtf8(FromUtf8Error),
}

#[derive(Debug, Default, Clone)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SupportsColor for Buffer {
    fn supports_color(&self) -> bool {
        false
    }
}

impl Buffer {
    pub fn try_to_string(&self) -> Result<String, Error> {
        let guard = self.0.lock().map_err(|_| Error::Poison)?;
        String::from_utf8(guard.to_vec()).map_err(Error::FromUtf8)
    }
}

pub struct Snapshot {
    pub stdout: String,
    pub stderr: String,
    pub result: Result<RunReport, RunFailed>,
}

/// Run `registry` with stdout and stderr written into separate buffers.
pub fn run_split(registry: &Registry) -> Snapshot {
    let stdout = Buffer::default();
    let stderr = Buffer::default();
    let result = block_on(
        TestRunner::new()
            .with_formatter(PrettyFormatter::default().with_color_setting(ColorSetting::Never))
            .with_sink(DirectSink::default().with_targets(stdout.clone(), stderr.clone()))
            .run(registry),
    );

    Snapshot {
        stdout: sanitize_panic_output(&stdout.try_to_string().unwrap()),
        stderr: sanitize_panic_output(&stderr.try_to_string().unwrap()),
        result,
    }
}

/// Run `registry` with both channels written into one buffer, in emission order.
pub fn run_combined(registry: &Registry) -> (String, Result<RunReport, RunFailed>) {
    let combined = Buffer::default();
    let result = block_on(
        TestRunner::new()
            .with_formatter(PrettyFormatter::default().with_color_setting(ColorSetting::Never))
            .with_sink(DirectSink::new(combined.clone(), combined.clone()))
            .run(registry),
    );
    (
        sanitize_panic_output(&combined.try_to_string().unwrap()),
        result,
    )
}

macro_rules! snapshot {
    ($name:ident: $registry:expr => {
        stdout: $stdout:expr,
        stderr: $stderr:expr,
        failed: [$($failed:expr),* $(,)?],
        leaf_count: $leaf_count:expr $(,)?
    }) => {
        #[test]
        fn $name() {
            let registry: nestest::Registry = $registry;
            let snapshot = $crate::lib::run_split(&registry);
            pretty_assertions::assert_eq!(snapshot.stdout, $stdout);
            pretty_assertions::assert_eq!(snapshot.stderr, $stderr);

            let expected_failed: Vec<&str> = vec![$($failed),*];
            let report = match snapshot.result {
                Ok(report) => {
                    assert!(expected_failed.is_empty(), "run passed but failures were expected");
                    report
                }
                Err(nestest::RunFailed { report }) => report,
            };
            assert_eq!(report.failed, expected_failed);
            assert_eq!(report.leaf_count, $leaf_count);
        }
    };
}

pub(crate) use snapshot;
