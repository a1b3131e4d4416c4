// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type for the levelog logging system.
//!
//! A [`LogRecord`] holds everything a layout needs to render one line: the
//! timestamp, the level, the message body with its level token already removed,
//! and the call site when one was resolved.
//!
//! Records are created per log call and handed by reference to the layout. They
//! are never stored by the logger.
//!
//! # Example
//!
//! ```rust
//! use levelog::{Level, LogRecord};
//!
//! let record = LogRecord::new(chrono::Local::now(), Level::Warn, "disk almost full\n");
//! assert_eq!(record.message, "disk almost full");
//! assert!(record.call_site.is_none());
//! ```

use crate::Level;
use crate::call_site::CallSite;
use chrono::{DateTime, Local, TimeZone};

/**
A log record.

The message never ends with the newline the caller may have written; one
trailing `\n` is removed on construction and the dispatcher appends its own.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
    pub call_site: Option<CallSite>,
}

impl LogRecord {
    pub fn new(timestamp: DateTime<Local>, level: Level, message: &str) -> Self {
        Self {
            timestamp,
            level,
            message: message.strip_suffix('\n').unwrap_or(message).to_string(),
            call_site: None,
        }
    }

    pub fn with_call_site(mut self, call_site: Option<CallSite>) -> Self {
        self.call_site = call_site;
        self
    }

    /**
    A record with no content, used to smoke-test layouts at construction.
    */
    pub(crate) fn empty() -> Self {
        Self {
            timestamp: Local.timestamp_opt(0, 0).single().unwrap_or_else(Local::now),
            level: Level::Info,
            message: String::new(),
            call_site: None,
        }
    }

    pub(crate) fn caller_file(&self) -> &str {
        self.call_site.as_ref().map_or("", |c| c.file.as_str())
    }

    pub(crate) fn caller_line(&self) -> u32 {
        self.call_site.as_ref().map_or(0, |c| c.line)
    }

    pub(crate) fn caller_func(&self) -> &str {
        self.call_site.as_ref().map_or("", |c| c.func.as_str())
    }

    pub(crate) fn caller_pkg(&self) -> &str {
        self.call_site.as_ref().map_or("", |c| c.pkg.as_str())
    }
}

/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug, Clone, PartialEq/Eq: derived, useful in tests and for forwarding

NOT IMPLEMENTED:
- Default: a record without a real timestamp is only meaningful internally, see `empty`
- Display: rendering depends on the logger's layout, there is no single text form
- Hash/Ord: no use for records as keys or in sorted collections
*/
