// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bridges between levelog and the `tracing` ecosystem, in both directions.
//!
//! - [`LevelLayer`] is a `tracing_subscriber` layer that renders tracing events
//!   through a [`LevelLogger`]. Event fields are appended to the message as
//!   `key=value`, string values quoted.
//! - [`TracingLogger`] is a [`Logger`] that re-emits each message as a tracing
//!   event, so code written against [`Logger`] can feed a tracing subscriber.
//!
//! # Usage
//!
//! ```
//! use levelog::bridge::LevelLayer;
//! use levelog::{LevelLogger, MemoryStream, Options};
//! use std::sync::Arc;
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let out = MemoryStream::new();
//! let logger = Arc::new(LevelLogger::new(Options::new().out(out.clone())));
//! let subscriber = tracing_subscriber::registry()
//!     .with(LevelLayer::new(logger).with_attr("service", "billing"));
//!
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::warn!(attempt = 3, "retrying");
//! });
//! assert!(out.contents().ends_with("WARN  retrying service=\"billing\" attempt=3\n"));
//! ```

use crate::Level;
use crate::call_site::CallSite;
use crate::level::extract_level;
use crate::level_logger::LevelLogger;
use crate::logger::Logger;
use std::fmt::{Arguments, Debug, Write};
use std::sync::Arc;
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer};

/**
A tracing layer writing events through a [`LevelLogger`].

The event's level maps onto the matching levelog level, and the event's own
source location is reported as the caller. The logger's debug and trace
switches still apply.
*/
#[derive(Debug, Clone)]
pub struct LevelLayer {
    logger: Arc<LevelLogger>,
    attrs: String,
    group: String,
}

impl LevelLayer {
    pub fn new(logger: Arc<LevelLogger>) -> Self {
        LevelLayer {
            logger,
            attrs: String::new(),
            group: String::new(),
        }
    }

    /**
    Adds an attribute rendered on every event, after the message.

    The key is prefixed by the groups opened so far.
    */
    pub fn with_attr(mut self, key: &str, value: impl Debug) -> Self {
        // writing to a String cannot fail
        let _ = write!(self.attrs, " {}{}={:?}", self.group, key, value);
        self
    }

    /// Prefixes the keys of attributes added from now on, and of event fields, with `name.`.
    pub fn with_group(mut self, name: &str) -> Self {
        if !name.is_empty() {
            self.group.push_str(name);
            self.group.push('.');
        }
        self
    }
}

impl<S> Layer<S> for LevelLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from(*metadata.level());
        if !self.logger.enabled(level) {
            return;
        }
        let mut visitor = FieldVisitor {
            group: &self.group,
            message: String::new(),
            fields: String::new(),
        };
        event.record(&mut visitor);

        let call_site = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => Some(CallSite::from_location(
                file,
                line,
                metadata.module_path().unwrap_or_else(|| metadata.target()),
            )),
            _ => None,
        };
        let text = format!("{}{}{}", visitor.message, self.attrs, visitor.fields);
        self.logger.log_with_site(level, &text, call_site);
    }
}

struct FieldVisitor<'a> {
    group: &'a str,
    message: String,
    fields: String,
}

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}{}={:?}", self.group, field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            let _ = write!(self.fields, " {}{}={:?}", self.group, field.name(), value);
        }
    }
}

/**
Installs a [`LevelLayer`] for `logger` as the global tracing subscriber.

Events are pre-filtered by `RUST_LOG` when it is set; otherwise every event
reaches the logger, which applies its own debug and trace switches.
*/
pub fn init(logger: Arc<LevelLogger>) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
    tracing_subscriber::registry()
        .with(filter)
        .with(LevelLayer::new(logger))
        .try_init()
}

/**
A [`Logger`] emitting every message as a `tracing` event.

The level token is extracted from the message as usual. `PANIC` and `FATAL`
become `ERROR` events; nothing is terminated.

```
use levelog::bridge::TracingLogger;
use levelog::Logger;

let logger = TracingLogger;
logger.logf(format_args!("WARN queue length {}", 1200));
```
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn logf(&self, args: Arguments<'_>) {
        let text = std::fmt::format(args);
        let (level, message) = extract_level(&text);
        match level {
            Level::Trace => tracing::trace!("{}", message),
            Level::Debug => tracing::debug!("{}", message),
            Level::Info => tracing::info!("{}", message),
            Level::Warn => tracing::warn!("{}", message),
            Level::Error | Level::Panic | Level::Fatal => tracing::error!("{}", message),
        }
    }
}
