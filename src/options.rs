// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for [`LevelLogger`](crate::LevelLogger).
//!
//! [`Options`] is a consuming builder. Everything it holds is fixed once the
//! logger is constructed.
//!
//! ```
//! use levelog::{LevelLogger, MemoryStream, Options};
//!
//! let out = MemoryStream::new();
//! let logger = LevelLogger::new(
//!     Options::new()
//!         .out(out.clone())
//!         .debug()
//!         .msec()
//!         .level_braces()
//!         .secret("hunter2"),
//! );
//! logger.logf(format_args!("DEBUG password is {}", "hunter2"));
//! assert!(out.contents().ends_with("[DEBUG] password is ******\n"));
//! ```

use crate::layout::{Flags, Layout};
use crate::mapper::Mapper;
use crate::sys::{Clock, OnFatal, exit_process, system_clock};
use chrono::{DateTime, Local};
use std::io::Write;
use std::sync::Arc;

pub(crate) type Stream = Box<dyn Write + Send>;

/// Replacement used by [`Options::secret`].
pub const REDACTED: &str = "******";

/// Builder for a [`LevelLogger`](crate::LevelLogger).
pub struct Options {
    pub(crate) out: Stream,
    pub(crate) err: Stream,
    pub(crate) debug: bool,
    pub(crate) trace: bool,
    pub(crate) caller_depth: usize,
    pub(crate) ignore: Vec<String>,
    pub(crate) stack_trace_on_error: bool,
    pub(crate) clock: Clock,
    pub(crate) on_fatal: OnFatal,
    flags: Flags,
    format: Option<String>,
    mapper: Mapper,
    secrets: Vec<(String, String)>,
}

impl Options {
    /// Defaults: stdout and stderr, no debug or trace, no caller, second precision.
    pub fn new() -> Self {
        Options {
            out: Box::new(std::io::stdout()),
            err: Box::new(std::io::stderr()),
            debug: false,
            trace: false,
            caller_depth: 0,
            ignore: Vec::new(),
            stack_trace_on_error: false,
            clock: system_clock(),
            on_fatal: exit_process(),
            flags: Flags::default(),
            format: None,
            mapper: Mapper::new(),
            secrets: Vec::new(),
        }
    }

    /// The primary stream, stdout by default.
    pub fn out<W: Write + Send + 'static>(mut self, w: W) -> Self {
        self.out = Box::new(w);
        self
    }

    /// The secondary stream for `ERROR` and above, stderr by default.
    pub fn err<W: Write + Send + 'static>(mut self, w: W) -> Self {
        self.err = Box::new(w);
        self
    }

    /// Print `DEBUG` records.
    pub fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Print `TRACE` and `DEBUG` records.
    pub fn trace(mut self) -> Self {
        self.debug = true;
        self.trace = true;
        self
    }

    /// Report `file:line` of the caller. Ignored when a template is set.
    pub fn caller_file(mut self) -> Self {
        self.flags.caller_file = true;
        self
    }

    /// Report the caller's function. Ignored when a template is set.
    pub fn caller_func(mut self) -> Self {
        self.flags.caller_func = true;
        self
    }

    /// Report the caller's package directory. Ignored when a template is set.
    pub fn caller_pkg(mut self) -> Self {
        self.flags.caller_pkg = true;
        self
    }

    /// Enclose the level in brackets, `[INFO]`. Ignored when a template is set.
    pub fn level_braces(mut self) -> Self {
        self.flags.level_braces = true;
        self
    }

    /// Millisecond timestamps. Ignored when a template is set.
    pub fn msec(mut self) -> Self {
        self.flags.msec = true;
        self
    }

    /**
    Extra frames to skip when reporting the caller.

    `0` reports the function that called the logger; `1` reports its caller,
    which is what a logging helper function wants.
    */
    pub fn caller_depth(mut self, depth: usize) -> Self {
        self.caller_depth = depth;
        self
    }

    /**
    Never report `func` as the caller; the frame above it is reported instead.

    `func` is the fully-qualified path of the function, e.g. `"my_app::log::helper"`.
    */
    pub fn ignore_caller(mut self, func: impl Into<String>) -> Self {
        self.ignore.push(func.into());
        self
    }

    /// Layout template, see [`template`](crate::template). Overrides the flag options.
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = Some(template.into());
        self
    }

    /// Per-part transforms for the flag layout.
    pub fn map(mut self, mapper: Mapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Replace every occurrence of `secret` in output with [`REDACTED`].
    pub fn secret(self, secret: impl Into<String>) -> Self {
        self.secret_with(secret, REDACTED)
    }

    /// Replace every occurrence of `secret` in output with `replacement`.
    pub fn secret_with(mut self, secret: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.secrets.push((secret.into(), replacement.into()));
        self
    }

    /// Append a stack trace to `ERROR` records as well.
    pub fn stack_trace_on_error(mut self) -> Self {
        self.stack_trace_on_error = true;
        self
    }

    /// Source of timestamps, the local wall clock by default.
    pub fn clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Local> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Called after a `PANIC` or `FATAL` record, exits with status 1 by default.
    pub fn on_fatal<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_fatal = Arc::new(f);
        self
    }

    pub(crate) fn layout(&mut self) -> Layout {
        Layout::new(
            self.format.as_deref(),
            self.flags,
            std::mem::take(&mut self.mapper),
            std::mem::take(&mut self.secrets),
        )
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("debug", &self.debug)
            .field("trace", &self.trace)
            .field("caller_depth", &self.caller_depth)
            .field("ignore", &self.ignore)
            .field("stack_trace_on_error", &self.stack_trace_on_error)
            .field("flags", &self.flags)
            .field("format", &self.format)
            .field("mapper", &self.mapper)
            .field("secrets", &self.secrets.len())
            .finish_non_exhaustive()
    }
}
