//! Destinations for the runner's output.
//!
//! The runner never writes to stdout directly. It writes lines tagged with a
//! [`Channel`] to a [`Sink`], which decides where they end up. Two sinks come
//! with the crate:
//! - [`DirectSink`] passes lines through to a pair of writers (stdout and
//!   stderr by default)
//! - [`OutputCapture`](crate::capture::OutputCapture) buffers them for a later
//!   replay
//!
//! [`Indented`] wraps any sink and prefixes every line according to a nesting
//! level.

use std::io::{self, Write};

use crate::{capture::Channel, formatter::common::color::SupportsColor};

/// A line oriented output target with three channels.
pub trait Sink {
    /// Write `text` followed by a newline to `channel`.
    fn write_line(&mut self, channel: Channel, text: &str) -> io::Result<()>;

    /// Whether ANSI colors would render on this sink.
    fn supports_color(&self) -> bool {
        false
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_line(&mut self, channel: Channel, text: &str) -> io::Result<()> {
        (**self).write_line(channel, text)
    }

    fn supports_color(&self) -> bool {
        (**self).supports_color()
    }
}

/// Writes the normal channel to `out` and the error and warning channels to `err`.
#[derive(Debug, Clone)]
pub struct DirectSink<O, E> {
    out: O,
    err: E,
}

impl Default for DirectSink<io::Stdout, io::Stderr> {
    fn default() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl<O: Write, E: Write> DirectSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn with_targets<WithO: Write, WithE: Write>(
        self,
        out: WithO,
        err: WithE,
    ) -> DirectSink<WithO, WithE> {
        DirectSink { out, err }
    }

    pub fn into_targets(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write + SupportsColor, E: Write + SupportsColor> Sink for DirectSink<O, E> {
    fn write_line(&mut self, channel: Channel, text: &str) -> io::Result<()> {
        match channel {
            Channel::Normal => writeln!(self.out, "{text}"),
            Channel::Error | Channel::Warning => writeln!(self.err, "{text}"),
        }
    }

    fn supports_color(&self) -> bool {
        self.out.supports_color() && self.err.supports_color()
    }
}

pub const INDENT_UNIT: &str = "  |  ";

/// Prefixes every line written through it with [`INDENT_UNIT`] per level.
///
/// Text containing newlines is split and each piece gets its own prefix.
#[derive(Debug)]
pub struct Indented<S> {
    inner: S,
    level: usize,
}

impl<S: Sink> Indented<S> {
    pub fn new(inner: S, level: usize) -> Self {
        Self { inner, level }
    }
}

impl<S: Sink> Sink for Indented<S> {
    fn write_line(&mut self, channel: Channel, text: &str) -> io::Result<()> {
        if self.level == 0 {
            return self.inner.write_line(channel, text);
        }

        let pad = INDENT_UNIT.repeat(self.level);
        for line in text.split('\n') {
            self.inner.write_line(channel, &format!("{pad}{line}"))?;
        }
        Ok(())
    }

    fn supports_color(&self) -> bool {
        self.inner.supports_color()
    }
}
