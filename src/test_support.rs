use std::{
    io::{self, Write},
    string::FromUtf8Error,
    sync::{Arc, Mutex},
};

use crate::{
    capture::{Channel, OutputCapture},
    formatter::{common::color::ColorSetting, pretty::PrettyFormatter},
    outcome::{TestOutcome, TestStatus},
    runner::TestRunner,
};

#[derive(Debug)]
#[allow(dead_code)]
pub enum Error {
    Poison,
    FromUtf8(FromUtf8Error),
}

/// A clonable in memory writer, so a test can keep a handle on what a sink wrote.
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

impl crate::formatter::common::color::SupportsColor for Buffer {
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

macro_rules! registry {
    [$($name:literal => $entry:expr),* $(,)?] => {{
        #[allow(unused_mut)]
        let mut registry = $crate::Registry::new();
        $(registry.add($name, $entry);)*
        registry
    }};
}

pub(crate) use registry;

/// A runner that records everything into an [`OutputCapture`], without colors.
pub fn capture_runner() -> TestRunner<PrettyFormatter, OutputCapture> {
    TestRunner::new()
        .with_formatter(PrettyFormatter::default().with_color_setting(ColorSetting::Never))
        .with_sink(OutputCapture::new())
}

pub fn outcome(status: TestStatus) -> TestOutcome {
    TestOutcome {
        status,
        output: OutputCapture::new(),
    }
}

pub fn texts(capture: &OutputCapture) -> Vec<String> {
    capture.lines().iter().map(|line| line.text.clone()).collect()
}

/// Split captured lines into the normal channel and everything else.
pub fn normal_and_error(capture: &OutputCapture) -> (Vec<String>, Vec<String>) {
    let (normal, error): (Vec<_>, Vec<_>) = capture
        .lines()
        .iter()
        .partition(|line| line.channel == Channel::Normal);
    (
        normal.into_iter().map(|line| line.text.clone()).collect(),
        error.into_iter().map(|line| line.text.clone()).collect(),
    )
}
