// SPDX-License-Identifier: MIT OR Apache-2.0

//! printf-style entry-point macros.
//!
//! Each macro expands to a direct method call at the invocation site, so the
//! reported caller is the line holding the macro.

/**
Logs through any [`Logger`](crate::Logger), taking the level from the message.

```
use levelog::{LevelLogger, MemoryStream, Options, logf};

let out = MemoryStream::new();
let logger = LevelLogger::new(Options::new().out(out.clone()));
logf!(logger, "WARN {} retries left", 2);
assert!(out.contents().ends_with("WARN  2 retries left\n"));
```
*/
#[macro_export]
macro_rules! logf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf(::std::format_args!($($arg)+))
    };
}

/// Logs at `TRACE` through a [`LevelLogger`](crate::LevelLogger).
#[macro_export]
macro_rules! tracef {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(::std::format_args!($($arg)+))
    };
}

/// Logs at `DEBUG` through a [`LevelLogger`](crate::LevelLogger).
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}

/// Logs at `INFO` through a [`LevelLogger`](crate::LevelLogger).
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

/// Logs at `WARN` through a [`LevelLogger`](crate::LevelLogger).
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(::std::format_args!($($arg)+))
    };
}

/**
Logs at `ERROR` through a [`LevelLogger`](crate::LevelLogger).

The line goes to both streams.
*/
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
}

/**
Logs through the [default logger](crate::global_logger).

```
levelog::printf!("INFO started in {} ms", 12);
```
*/
#[macro_export]
macro_rules! printf {
    ($($arg:tt)+) => {
        $crate::global_logger::printf(::std::format_args!($($arg)+))
    };
}
