// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-part transforms applied by the flag-assembled layout.
//!
//! A [`Mapper`] decorates parts of a line without changing their order or the
//! spaces between them, for example to add terminal colors. Each part has its own
//! [`FieldMap`], which is [`FieldMap::Identity`] unless set.
//!
//! ```
//! use levelog::{Level, Mapper};
//!
//! let mapper = Mapper::new()
//!     .time(|s| format!("<{s}>"))
//!     .warn(|s| s.to_lowercase());
//! assert_eq!(mapper.level(Level::Warn).apply("WARN "), "warn ");
//! assert_eq!(mapper.level(Level::Info).apply("INFO "), "INFO ");
//! ```

use crate::Level;
use colored::Colorize;
use std::fmt::Debug;
use std::sync::Arc;

type Transform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How one part of the line is transformed.
#[derive(Clone, Default)]
pub enum FieldMap {
    #[default]
    Identity,
    Transform(Transform),
}

impl FieldMap {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        FieldMap::Transform(Arc::new(f))
    }

    pub fn apply(&self, s: &str) -> String {
        match self {
            FieldMap::Identity => s.to_string(),
            FieldMap::Transform(f) => f(s),
        }
    }
}

impl Debug for FieldMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldMap::Identity => f.write_str("Identity"),
            FieldMap::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/**
Transforms for the parts of a flag-assembled line.

Level transforms apply to the level token and, after the `message` transform,
to the message. `TRACE` uses the debug transform; `PANIC` and `FATAL` use the
error transform.
*/
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    time: FieldMap,
    caller: FieldMap,
    message: FieldMap,
    error: FieldMap,
    warn: FieldMap,
    info: FieldMap,
    debug: FieldMap,
}

macro_rules! setter {
    ($(#[$doc:meta] $name:ident),* $(,)?) => {
        $(
            #[$doc]
            pub fn $name<F>(mut self, f: F) -> Self
            where
                F: Fn(&str) -> String + Send + Sync + 'static,
            {
                self.$name = FieldMap::new(f);
                self
            }
        )*
    };
}

impl Mapper {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(
        /// Transform for the timestamp.
        time,
        /// Transform for the whole caller block, braces included.
        caller,
        /// Transform for the message, applied before the level transform.
        message,
        /// Level transform for `ERROR`, `PANIC` and `FATAL`.
        error,
        /// Level transform for `WARN`.
        warn,
        /// Level transform for `INFO`.
        info,
        /// Level transform for `DEBUG` and `TRACE`.
        debug,
    );

    /// A mapper coloring each line by level, dimming the timestamp and caller.
    pub fn colored() -> Self {
        Mapper::new()
            .time(|s| s.dimmed().to_string())
            .caller(|s| s.cyan().to_string())
            .error(|s| s.red().to_string())
            .warn(|s| s.yellow().to_string())
            .info(|s| s.white().to_string())
            .debug(|s| s.blue().to_string())
    }

    pub fn time_map(&self) -> &FieldMap {
        &self.time
    }

    pub fn caller_map(&self) -> &FieldMap {
        &self.caller
    }

    pub fn message_map(&self) -> &FieldMap {
        &self.message
    }

    /// The level transform used for `level`.
    pub fn level(&self, level: Level) -> &FieldMap {
        match level {
            Level::Error | Level::Panic | Level::Fatal => &self.error,
            Level::Warn => &self.warn,
            Level::Info => &self.info,
            Level::Debug | Level::Trace => &self.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        let m = Mapper::new();
        assert_eq!(m.time_map().apply("t"), "t");
        assert_eq!(m.caller_map().apply("{c}"), "{c}");
        for level in Level::ALL {
            assert_eq!(m.level(level).apply("x"), "x");
        }
    }

    #[test]
    fn levels_share_transforms() {
        let m = Mapper::new().error(|s| format!("E{s}")).debug(|s| format!("D{s}"));
        assert_eq!(m.level(Level::Panic).apply("x"), "Ex");
        assert_eq!(m.level(Level::Fatal).apply("x"), "Ex");
        assert_eq!(m.level(Level::Trace).apply("x"), "Dx");
        assert_eq!(m.level(Level::Warn).apply("x"), "x");
    }

    #[test]
    fn colored_keeps_text() {
        colored::control::set_override(true);
        let m = Mapper::colored();
        let out = m.level(Level::Error).apply("ERROR");
        assert!(out.contains("ERROR"));
        assert_ne!(out, "ERROR");
    }
}
