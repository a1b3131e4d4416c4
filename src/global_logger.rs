// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide default logger.
//!
//! Libraries and small programs that do not want to pass a logger around log
//! through [`printf`] (or the [`printf!`](crate::printf) macro). The default
//! logger goes through three states:
//!
//! 1. uninitialized, until first use
//! 2. configured, either lazily with [`Options::default`] or by [`setup`]
//! 3. in use
//!
//! [`setup`] may be called again at any time; records already in flight finish
//! on the logger they started with.
//!
//! # Examples
//!
//! ```
//! use levelog::{MemoryStream, Options};
//! use levelog::global_logger::{printf, setup};
//!
//! let out = MemoryStream::new();
//! setup(Options::new().out(out.clone()).level_braces());
//!
//! printf(format_args!("WARN disk at {}%", 93));
//! assert!(out.contents().ends_with("[WARN]  disk at 93%\n"));
//! ```
//!
//! # Implementation notes
//!
//! The logger lives behind an `RwLock<Arc<_>>`. Readers clone the `Arc` and
//! release the lock before logging, so a slow stream never blocks [`setup`].

use crate::level_logger::LevelLogger;
use crate::options::Options;
use std::fmt::Arguments;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

static DEFAULT_LOGGER: OnceLock<RwLock<Arc<LevelLogger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<LevelLogger>> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(Arc::new(LevelLogger::new(Options::default()))))
}

/// The current default logger, built with default options on first use.
pub fn default_logger() -> Arc<LevelLogger> {
    slot().read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Replaces the default logger with one built from `options`.
pub fn setup(options: Options) {
    let logger = Arc::new(LevelLogger::new(options));
    let previous = std::mem::replace(
        &mut *slot().write().unwrap_or_else(PoisonError::into_inner),
        logger,
    );
    previous.flush();
}

/// Logs through the default logger, see [`LevelLogger::logf`].
#[inline(never)]
pub fn printf(args: Arguments<'_>) {
    default_logger().log_line(None, args)
}
