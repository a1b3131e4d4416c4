// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns a [`LogRecord`] into the text of one line.
//!
//! There are two layouts. Without a template the line is assembled from option
//! flags in a fixed order:
//!
//! ```text
//! 2018/01/07 13:02:34.123 [DEBUG] {app/main.rs:12 main::run app} message
//! ^timestamp              ^level  ^caller block                  ^message
//! ```
//!
//! and a [`Mapper`] may transform each part. With a template the line is whatever
//! the template says, and the mapper is not used.
//!
//! Rendering is a pure function of the record and the layout. The line carries no
//! terminator; the dispatcher appends it.

use crate::log_record::LogRecord;
use crate::mapper::Mapper;
use crate::sys::diagnostic;
use crate::template::{MSEC_FORMAT, SECONDS_FORMAT, Template};

/// Option flags of the flag-assembled layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Flags {
    pub(crate) msec: bool,
    pub(crate) level_braces: bool,
    pub(crate) caller_file: bool,
    pub(crate) caller_func: bool,
    pub(crate) caller_pkg: bool,
}

impl Flags {
    fn any_caller(&self) -> bool {
        self.caller_file || self.caller_func || self.caller_pkg
    }
}

#[derive(Debug, Clone)]
enum Strategy {
    Flags { flags: Flags, mapper: Mapper },
    Template(Template),
}

/// A configured layout, ready to render records.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    strategy: Strategy,
    caller_on: bool,
    secrets: Vec<(String, String)>,
}

impl Layout {
    /**
    Builds the layout. A template, when given, wins over the flags.

    A template that does not parse, or that fails to render an empty record, is
    replaced by [`SHORT`](crate::template::SHORT) after printing a diagnostic.
    */
    pub(crate) fn new(
        format: Option<&str>,
        flags: Flags,
        mapper: Mapper,
        secrets: Vec<(String, String)>,
    ) -> Self {
        let secrets = secrets.into_iter().filter(|(s, _)| !s.is_empty()).collect();
        let strategy = match format {
            Some(source) => Strategy::Template(checked_template(source)),
            None => Strategy::Flags { flags, mapper },
        };
        let caller_on = match &strategy {
            Strategy::Flags { flags, .. } => flags.any_caller(),
            Strategy::Template(t) => t.uses_caller(),
        };
        Layout {
            strategy,
            caller_on,
            secrets,
        }
    }

    /// Whether records need a resolved call site to render.
    pub(crate) fn caller_on(&self) -> bool {
        self.caller_on
    }

    pub(crate) fn render(&self, record: &LogRecord) -> String {
        let mut line = match &self.strategy {
            Strategy::Flags { flags, mapper } => render_flags(flags, mapper, record),
            Strategy::Template(t) => t.render(record).unwrap_or_else(|e| {
                diagnostic(format_args!("failed to render template {:?}: {}", t.source(), e));
                minimal(record)
            }),
        };
        for (secret, replacement) in &self.secrets {
            if line.contains(secret.as_str()) {
                line = line.replace(secret.as_str(), replacement);
            }
        }
        line
    }
}

fn checked_template(source: &str) -> Template {
    let template = match Template::parse(source) {
        Ok(t) => t,
        Err(e) => {
            diagnostic(format_args!(
                "invalid template {:?}: {}, switched to {:?}",
                source,
                e,
                crate::template::SHORT
            ));
            return Template::fallback();
        }
    };
    if let Err(e) = template.render(&LogRecord::empty()) {
        diagnostic(format_args!(
            "template {:?} failed to render: {}, switched to {:?}",
            source,
            e,
            crate::template::SHORT
        ));
        return Template::fallback();
    }
    template
}

fn render_flags(flags: &Flags, mapper: &Mapper, record: &LogRecord) -> String {
    let time_format = if flags.msec { MSEC_FORMAT } else { SECONDS_FORMAT };
    let level_map = mapper.level(record.level);

    let mut parts = Vec::with_capacity(4);
    parts.push(
        mapper
            .time_map()
            .apply(&record.timestamp.format(time_format).to_string()),
    );
    if flags.level_braces {
        parts.push(level_map.apply(record.level.bracketed()));
    } else {
        parts.push(level_map.apply(record.level.padded()));
    }
    if flags.any_caller() {
        let mut caller = Vec::with_capacity(3);
        if flags.caller_file {
            caller.push(format!("{}:{}", record.caller_file(), record.caller_line()));
        }
        if flags.caller_func {
            caller.push(record.caller_func().to_string());
        }
        if flags.caller_pkg {
            caller.push(record.caller_pkg().to_string());
        }
        parts.push(mapper.caller_map().apply(&format!("{{{}}}", caller.join(" "))));
    }
    parts.push(level_map.apply(&mapper.message_map().apply(&record.message)));
    parts.join(" ")
}

fn minimal(record: &LogRecord) -> String {
    format!(
        "{} {} {}",
        record.timestamp.format(SECONDS_FORMAT),
        record.level.padded(),
        record.message
    )
}
