//! Output interception for running test cases.
//!
//! While a case's action runs, everything it emits through [`println!`](crate::println),
//! [`eprintln!`](crate::eprintln) or [`warnln!`](crate::warnln) is recorded into an
//! [`OutputCapture`] instead of being printed. The runner replays the capture
//! after it printed the case's status marker.
//!
//! The capture lives in a thread local slot. [`Intercept`] installs it around
//! every poll of the action's future and takes it back afterwards, so the
//! buffer follows the action even if an executor resumes it on another thread.
//!
//! Only code running inside such a poll is intercepted. A line emitted
//! anywhere else, for example from a thread or task an action spawned, is
//! written straight to the process's stdout or stderr. It bypasses the
//! runner's [`Sink`](crate::sink::Sink), gets no indentation and can show up
//! before the marker of the case that caused it.

use std::{
    cell::RefCell,
    fmt,
    future::Future,
    io::{self, Write},
    mem,
    panic::{self, PanicHookInfo},
    pin::Pin,
    sync::Once,
    task::{Context, Poll},
};

use crate::sink::Sink;

/// The three text channels a case can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Normal,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub channel: Channel,
    pub text: String,
}

/// Lines recorded while a case ran, in emission order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputCapture {
    lines: Vec<CapturedLine>,
}

impl OutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, channel: Channel, text: impl Into<String>) {
        self.lines.push(CapturedLine {
            channel,
            text: text.into(),
        });
    }

    pub fn lines(&self) -> &[CapturedLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn take(&mut self) -> Self {
        Self {
            lines: mem::take(&mut self.lines),
        }
    }

    /// Write every recorded line, in order, to its original channel of `sink`.
    pub fn replay(&self, sink: &mut dyn Sink) -> io::Result<()> {
        for line in &self.lines {
            sink.write_line(line.channel, &line.text)?;
        }
        Ok(())
    }
}

impl Sink for OutputCapture {
    fn write_line(&mut self, channel: Channel, text: &str) -> io::Result<()> {
        self.push(channel, text);
        Ok(())
    }
}

thread_local! {
    static TEST_OUTPUT_CAPTURE: RefCell<Option<OutputCapture>> = const { RefCell::new(None) };
}

/// Whether the current thread is inside an intercepted action.
pub fn is_capturing() -> bool {
    TEST_OUTPUT_CAPTURE.with_borrow(Option::is_some)
}

/// Emit a line on `channel`.
///
/// Inside an intercepted action the line is recorded, otherwise it goes
/// straight to stdout (normal) or stderr (error, warning). The capture slot is
/// per thread, so other threads an action starts always write directly.
pub fn emit(channel: Channel, args: fmt::Arguments<'_>) {
    let text = args.to_string();
    let text = TEST_OUTPUT_CAPTURE.with_borrow_mut(|slot| match slot {
        Some(capture) => {
            capture.push(channel, text);
            None
        }
        None => Some(text),
    });

    if let Some(text) = text {
        // A closed stdout is not the action's failure.
        let _ = match channel {
            Channel::Normal => writeln!(io::stdout(), "{text}"),
            Channel::Error | Channel::Warning => writeln!(io::stderr(), "{text}"),
        };
    }
}

/// Puts a capture into the thread local slot and takes it back on drop.
///
/// Dropping also happens while unwinding, so a panicking action never leaves
/// the slot occupied.
struct CaptureGuard<'c> {
    home: &'c mut Option<OutputCapture>,
    previous: Option<OutputCapture>,
}

impl<'c> CaptureGuard<'c> {
    fn install(home: &'c mut Option<OutputCapture>) -> Self {
        let capture = home.take().unwrap_or_default();
        let previous = TEST_OUTPUT_CAPTURE.with_borrow_mut(|slot| slot.replace(capture));
        Self { home, previous }
    }
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        let previous = self.previous.take();
        *self.home = TEST_OUTPUT_CAPTURE.with_borrow_mut(|slot| mem::replace(slot, previous));
    }
}

/// A future that runs `inner` with output interception active.
///
/// Resolves to the inner output and everything captured while polling it.
pub struct Intercept<F> {
    inner: F,
    capture: Option<OutputCapture>,
}

impl<F> Intercept<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            capture: Some(OutputCapture::new()),
        }
    }
}

impl<F: Future + Unpin> Future for Intercept<F> {
    type Output = (F::Output, OutputCapture);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let poll = {
            let _guard = CaptureGuard::install(&mut this.capture);
            Pin::new(&mut this.inner).poll(cx)
        };

        poll.map(|output| (output, this.capture.take().unwrap_or_default()))
    }
}

/// Route panic reports of intercepted actions into their capture.
///
/// The hook is installed once per process and stays. Panics outside of an
/// intercepted action are forwarded to the hook that was installed before.
pub fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let fallback = panic::take_hook();
        panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
            let location = info
                .location()
                .map(|location| format!(" at {location}"))
                .unwrap_or_default();
            let captured = TEST_OUTPUT_CAPTURE.with_borrow_mut(|slot| match slot {
                Some(capture) => {
                    capture.push(Channel::Error, format!("action panicked{location}"));
                    true
                }
                None => false,
            });

            if !captured {
                fallback(info);
            }
        }));
    });
}

#[macro_export]
macro_rules! println {
    () => {
        $crate::capture::emit($crate::capture::Channel::Normal, ::std::format_args!(""))
    };
    ($($arg:tt)*) => {
        $crate::capture::emit($crate::capture::Channel::Normal, ::std::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! eprintln {
    () => {
        $crate::capture::emit($crate::capture::Channel::Error, ::std::format_args!(""))
    };
    ($($arg:tt)*) => {
        $crate::capture::emit($crate::capture::Channel::Error, ::std::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warnln {
    () => {
        $crate::capture::emit($crate::capture::Channel::Warning, ::std::format_args!(""))
    };
    ($($arg:tt)*) => {
        $crate::capture::emit($crate::capture::Channel::Warning, ::std::format_args!($($arg)*))
    };
}
