// SPDX-License-Identifier: MIT OR Apache-2.0

//! The leveled logger and its write protocol.
//!
//! Every log call runs the same pipeline:
//!
//! 1. format the message and extract its level token
//! 2. drop `DEBUG`/`TRACE` records unless enabled
//! 3. resolve the call site, only if the layout shows caller fields
//! 4. render the line
//! 5. under one lock: write it out and apply the level's side effects
//!
//! | Level          | Primary | Secondary             | Then              |
//! |----------------|---------|-----------------------|-------------------|
//! | TRACE, DEBUG   | if enabled | -                  |                   |
//! | INFO, WARN     | line    | -                     |                   |
//! | ERROR          | line    | same line             |                   |
//! | PANIC, FATAL   | line    | same line, stack dump | termination hook  |
//!
//! With [`Options::stack_trace_on_error`] an `ERROR` line is followed by a stack
//! dump on both streams.
//!
//! The lock spans both streams and the termination hook, so concurrent records
//! never interleave and two hooks never run at once.

use crate::Level;
use crate::call_site::{self, CallSite};
use crate::layout::Layout;
use crate::level::extract_level;
use crate::log_record::LogRecord;
use crate::logger::Logger;
use crate::options::{Options, Stream};
use crate::sys::{Clock, OnFatal, diagnostic};
use std::fmt::{Arguments, Debug};
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Stack dumps are cut off at this many bytes.
///
/// A dump covers the logging thread only; other threads' stacks are not captured.
pub const MAX_STACK_DUMP: usize = 5 * 1024 * 1024;

struct Streams {
    out: Stream,
    err: Stream,
}

impl Streams {
    fn write_out(&mut self, data: &[u8]) {
        if let Err(e) = self.out.write_all(data) {
            diagnostic(format_args!("failed to write to output stream: {}", e));
        }
    }

    fn write_err(&mut self, data: &[u8]) {
        if let Err(e) = self.err.write_all(data) {
            diagnostic(format_args!("failed to write to error stream: {}", e));
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            diagnostic(format_args!("failed to flush output stream: {}", e));
        }
        if let Err(e) = self.err.flush() {
            diagnostic(format_args!("failed to flush error stream: {}", e));
        }
    }
}

/**
A leveled logger writing rendered lines to a primary and a secondary stream.

Safe to share between threads; wrap it in an `Arc` or keep it in a `static`.

```
use levelog::{LevelLogger, MemoryStream, Options};

let (out, err) = (MemoryStream::new(), MemoryStream::new());
let logger = LevelLogger::new(Options::new().out(out.clone()).err(err.clone()));

logger.logf(format_args!("DEBUG not shown, debug is off"));
logger.logf(format_args!("[ERROR] failed to open {}", "db.sqlite"));

assert_eq!(out.lines().len(), 1);
assert!(out.contents().ends_with("ERROR failed to open db.sqlite\n"));
assert_eq!(out.contents(), err.contents());
```
*/
pub struct LevelLogger {
    streams: Mutex<Streams>,
    layout: Layout,
    debug: bool,
    trace: bool,
    caller_depth: usize,
    ignore: Vec<String>,
    stack_trace_on_error: bool,
    clock: Clock,
    on_fatal: OnFatal,
}

impl LevelLogger {
    pub fn new(mut options: Options) -> Self {
        let layout = options.layout();
        LevelLogger {
            streams: Mutex::new(Streams {
                out: options.out,
                err: options.err,
            }),
            layout,
            debug: options.debug,
            trace: options.trace,
            caller_depth: options.caller_depth,
            ignore: options.ignore,
            stack_trace_on_error: options.stack_trace_on_error,
            clock: options.clock,
            on_fatal: options.on_fatal,
        }
    }

    /// Logs a message whose level is taken from its leading token, `INFO` if none.
    #[inline(never)]
    pub fn logf(&self, args: Arguments<'_>) {
        self.log_line(None, args)
    }

    /// Logs at `TRACE`. Nothing is formatted unless trace is enabled.
    #[inline(never)]
    pub fn trace(&self, args: Arguments<'_>) {
        self.log_line(Some(Level::Trace), args)
    }

    /// Logs at `DEBUG`. Nothing is formatted unless debug is enabled.
    #[inline(never)]
    pub fn debug(&self, args: Arguments<'_>) {
        self.log_line(Some(Level::Debug), args)
    }

    #[inline(never)]
    pub fn info(&self, args: Arguments<'_>) {
        self.log_line(Some(Level::Info), args)
    }

    #[inline(never)]
    pub fn warn(&self, args: Arguments<'_>) {
        self.log_line(Some(Level::Warn), args)
    }

    #[inline(never)]
    pub fn error(&self, args: Arguments<'_>) {
        self.log_line(Some(Level::Error), args)
    }

    /// Whether records of `level` are written at all.
    pub fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Trace => self.trace,
            Level::Debug => self.debug,
            _ => true,
        }
    }

    /// Flushes both streams.
    pub fn flush(&self) {
        self.lock().flush();
    }

    /**
    The single path from every public entry point to the streams.

    `forced` is the level of a shortcut method; the message then carries no
    token of its own and is used as is. Public entry points call this directly
    and are named in the resolver's entry-point list, so that their frames are
    never reported as the caller.
    */
    #[inline(never)]
    pub(crate) fn log_line(&self, forced: Option<Level>, args: Arguments<'_>) {
        let formatted: String;
        let (level, message) = match forced {
            Some(level) => {
                if !self.enabled(level) {
                    return;
                }
                formatted = std::fmt::format(args);
                (level, formatted.as_str())
            }
            None => {
                formatted = std::fmt::format(args);
                extract_level(&formatted)
            }
        };
        if !self.enabled(level) {
            return;
        }
        let call_site = if self.layout.caller_on() {
            call_site::resolve(self.caller_depth, &self.ignore)
        } else {
            None
        };
        self.dispatch(&LogRecord::new((self.clock)(), level, message).with_call_site(call_site));
    }

    /**
    Logs `message` at `level` with a call site supplied by the caller instead of
    resolved from the stack. Used by bridges whose events carry their own source
    location.
    */
    pub(crate) fn log_with_site(&self, level: Level, message: &str, call_site: Option<CallSite>) {
        if !self.enabled(level) {
            return;
        }
        self.dispatch(&LogRecord::new((self.clock)(), level, message).with_call_site(call_site));
    }

    fn dispatch(&self, record: &LogRecord) {
        let level = record.level;
        let mut data = self.layout.render(record).into_bytes();
        data.push(b'\n');
        if level == Level::Error && self.stack_trace_on_error {
            data.extend_from_slice(&stack_dump());
        }
        let dump = level.is_terminal().then(stack_dump);

        let mut streams = self.lock();
        streams.write_out(&data);
        if level.is_error() {
            streams.write_err(&data);
        }
        if let Some(dump) = dump {
            streams.write_err(&dump);
            streams.flush();
            (self.on_fatal)();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Streams> {
        // a panicking termination hook must not disable logging for everyone else
        self.streams.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger for LevelLogger {
    #[inline(never)]
    fn logf(&self, args: Arguments<'_>) {
        self.log_line(None, args)
    }
}

impl Debug for LevelLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelLogger")
            .field("layout", &self.layout)
            .field("debug", &self.debug)
            .field("trace", &self.trace)
            .field("caller_depth", &self.caller_depth)
            .field("ignore", &self.ignore)
            .field("stack_trace_on_error", &self.stack_trace_on_error)
            .finish_non_exhaustive()
    }
}

/// The current thread's stack, headed by `>>> stack trace:`, at most [`MAX_STACK_DUMP`] bytes.
fn stack_dump() -> Vec<u8> {
    let mut dump = format!(">>> stack trace:\n{:?}", backtrace::Backtrace::new()).into_bytes();
    if !dump.ends_with(b"\n") {
        dump.push(b'\n');
    }
    dump.truncate(MAX_STACK_DUMP);
    dump
}
