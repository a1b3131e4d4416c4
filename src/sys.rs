// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-facing dependencies of a logger: the clock, the termination hook and
//! the diagnostic channel.
//!
//! The clock and the termination hook are fixed when a logger is built. Tests
//! substitute them through [`Options::clock`](crate::Options::clock) and
//! [`Options::on_fatal`](crate::Options::on_fatal).

use chrono::{DateTime, Local};
use std::sync::Arc;

/// Source of record timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// Called after a `PANIC` or `FATAL` record has been written and flushed.
pub type OnFatal = Arc<dyn Fn() + Send + Sync>;

pub(crate) fn system_clock() -> Clock {
    Arc::new(Local::now)
}

pub(crate) fn exit_process() -> OnFatal {
    Arc::new(|| std::process::exit(1))
}

/**
Reports a problem with the logger itself.

Goes to the process stderr rather than the logger's configured error stream,
which may be the thing that is failing.
*/
pub(crate) fn diagnostic(args: std::fmt::Arguments<'_>) {
    eprintln!("levelog: {}", args);
}
