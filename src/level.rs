// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels and extraction of a level token from a message.
//!
//! Messages select their own severity by starting with a level token, either
//! bare (`"WARN disk is almost full"`) or bracketed (`"[WARN] disk is almost full"`).
//! [`extract_level`] splits such a line into the [`Level`] and the remaining text.
//!
//! ```
//! use levelog::{Level, extract_level};
//!
//! assert_eq!(extract_level("[ERROR] boom"), (Level::Error, "boom"));
//! assert_eq!(extract_level("no token here"), (Level::Info, "no token here"));
//! ```

use std::fmt::Display;
use std::str::FromStr;

/// The severity of a log record.
///
/// Ordering follows severity, from [`Level::Trace`] up to [`Level::Fatal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Very verbose diagnostics, printed only when trace is enabled
    Trace,
    /// Diagnostics, printed only when debug is enabled
    Debug,
    /// The default level for messages without a token
    Info,
    /// Suspicious condition
    Warn,
    /// Also echoed to the error stream
    Error,
    /// Echoed to the error stream with a stack dump, then terminates
    Panic,
    /// Echoed to the error stream with a stack dump, then terminates
    Fatal,
}

impl Level {
    /// All levels, in the order tokens are matched by [`extract_level`].
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Panic,
        Level::Fatal,
    ];

    /// The canonical token, e.g. `"WARN"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /**
    The token padded to five characters, so that columns line up.

    Four-letter levels gain one trailing space.
    */
    pub const fn padded(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO ",
            Level::Warn => "WARN ",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /// The token in brackets, five characters plus the brackets, padding outside: `[WARN] `.
    pub const fn bracketed(self) -> &'static str {
        match self {
            Level::Trace => "[TRACE]",
            Level::Debug => "[DEBUG]",
            Level::Info => "[INFO] ",
            Level::Warn => "[WARN] ",
            Level::Error => "[ERROR]",
            Level::Panic => "[PANIC]",
            Level::Fatal => "[FATAL]",
        }
    }

    /// Whether records of this level are echoed to the error stream.
    pub const fn is_error(self) -> bool {
        matches!(self, Level::Error | Level::Panic | Level::Fatal)
    }

    /// Whether records of this level terminate the process.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Level::Panic | Level::Fatal)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the level tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/**
Splits a formatted line into its level and the message body.

Each level is tried in [`Level::ALL`] order, first as a bare prefix (`"INFO"`)
and then bracketed (`"[INFO]"`). On a match the token and at most one following
space are removed. Lines without a token are [`Level::Info`] and are returned
unchanged.

Bare tokens match without a word boundary, so `"INFOsomething"` is
`(Level::Info, "something")`.
*/
pub fn extract_level(line: &str) -> (Level, &str) {
    for level in Level::ALL {
        let token = level.as_str();
        if let Some(rest) = line.strip_prefix(token) {
            return (level, strip_delimiter(rest));
        }
        if let Some(rest) = line
            .strip_prefix('[')
            .and_then(|l| l.strip_prefix(token))
            .and_then(|l| l.strip_prefix(']'))
        {
            return (level, strip_delimiter(rest));
        }
    }
    (Level::Info, line)
}

fn strip_delimiter(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}

/*
Boilerplate notes for Level:

- Copy/Clone/Eq/Ord/Hash: derived, a level is a plain tag
- Display: the canonical token, which is also what FromStr accepts
- Default: not implemented; "no token" maps to Info inside extract_level, but
  there is no reason for a caller to conjure a level out of nothing
*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_bracketed_tokens() {
        for level in Level::ALL {
            let bare = format!("{} some message", level);
            assert_eq!(extract_level(&bare), (level, "some message"));
            let bracketed = format!("[{}] some message", level);
            assert_eq!(extract_level(&bracketed), (level, "some message"));
        }
    }

    #[test]
    fn no_token_defaults_to_info() {
        assert_eq!(extract_level("blah something 123"), (Level::Info, "blah something 123"));
        assert_eq!(extract_level(""), (Level::Info, ""));
        assert_eq!(extract_level("info lowercase is not a token"), (Level::Info, "info lowercase is not a token"));
    }

    #[test]
    fn token_without_delimiter() {
        assert_eq!(extract_level("INFOsomething 123"), (Level::Info, "something 123"));
        assert_eq!(extract_level("[WARN]something"), (Level::Warn, "something"));
        assert_eq!(extract_level("ERROR"), (Level::Error, ""));
        assert_eq!(extract_level("[DEBUG]"), (Level::Debug, ""));
    }

    #[test]
    fn only_one_delimiter_is_consumed() {
        assert_eq!(extract_level("WARN  two spaces"), (Level::Warn, " two spaces"));
        assert_eq!(extract_level("[INFO]  x"), (Level::Info, " x"));
    }

    #[test]
    fn token_must_be_at_start() {
        assert_eq!(extract_level(" WARN x"), (Level::Info, " WARN x"));
        assert_eq!(extract_level("[WARN x"), (Level::Info, "[WARN x"));
    }

    #[test]
    fn padded_is_five_wide() {
        for level in Level::ALL {
            assert_eq!(level.padded().len(), 5);
            assert!(level.padded().starts_with(level.as_str()));
            assert_eq!(level.bracketed().len(), 7);
            assert!(level.bracketed().starts_with(&format!("[{}]", level.as_str())));
        }
    }

    #[test]
    fn parse_and_convert() {
        assert_eq!("warn".parse::<Level>(), Ok(Level::Warn));
        assert_eq!(" FATAL ".parse::<Level>(), Ok(Level::Fatal));
        assert!("verbose".parse::<Level>().is_err());
        assert_eq!(Level::from(tracing::Level::ERROR), Level::Error);
        assert!(Level::Trace < Level::Debug && Level::Panic < Level::Fatal);
    }
}
