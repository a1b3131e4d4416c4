// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redirecting byte streams into a logger.
//!
//! [`LogWriter`] is an `io::Write` sink: every `write` becomes one log call.
//! It lets output from code that only knows how to write to a stream (a child
//! process, a third-party library) end up as leveled log lines.

use crate::Level;
use crate::logger::Logger;
use std::io::Write;
use std::sync::Arc;

/**
A writer that logs each write as one message.

A trailing newline is trimmed. If a default level was given, its token is
prefixed to the text, so the level is extracted from it like from any other
message. A write always reports the whole buffer as consumed.

```
use levelog::{Level, LevelLogger, MemoryStream, Options};
use levelog::adaptor::to_writer;
use std::io::Write;
use std::sync::Arc;

let out = MemoryStream::new();
let logger = Arc::new(LevelLogger::new(Options::new().out(out.clone())));
let mut w = to_writer(logger, Some(Level::Warn));

w.write_all(b"disk almost full\n").unwrap();
assert!(out.contents().ends_with("WARN  disk almost full\n"));
```
*/
#[derive(Debug, Clone)]
pub struct LogWriter {
    logger: Arc<dyn Logger>,
    prefix: String,
}

/// Wraps `logger` in a [`LogWriter`], optionally tagging every write with `level`.
pub fn to_writer(logger: Arc<dyn Logger>, level: Option<Level>) -> LogWriter {
    LogWriter::new(logger, level.map(Level::as_str).unwrap_or_default())
}

impl LogWriter {
    /**
    A writer prefixing each message with `prefix`.

    A non-empty prefix without a trailing space gets one, so `"WARN"` and
    `"WARN "` behave the same.
    */
    pub fn new(logger: Arc<dyn Logger>, prefix: &str) -> Self {
        let mut prefix = prefix.to_string();
        if !prefix.is_empty() && !prefix.ends_with(' ') {
            prefix.push(' ');
        }
        LogWriter { logger, prefix }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let text = text.strip_suffix('\n').unwrap_or(&text);
        self.logger.logf(format_args!("{}{}", self.prefix, text));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Func, LevelLogger, MemoryStream, Options};
    use chrono::TimeZone;
    use std::fmt::Arguments;
    use std::sync::Mutex;

    fn logger(out: &MemoryStream, options: Options) -> Arc<LevelLogger> {
        let ts = chrono::Local
            .with_ymd_and_hms(2018, 1, 7, 13, 2, 34)
            .single()
            .expect("valid local time");
        Arc::new(LevelLogger::new(
            options.out(out.clone()).err(MemoryStream::new()).clock(move || ts),
        ))
    }

    #[test]
    fn writes_with_level() {
        let out = MemoryStream::new();
        let mut w = to_writer(logger(&out, Options::new().msec()), Some(Level::Warn));
        let n = w.write(b"something blah 123").unwrap();
        assert_eq!(n, 18);
        assert_eq!(out.contents(), "2018/01/07 13:02:34.000 WARN  something blah 123\n");
    }

    #[test]
    fn writes_without_level() {
        let out = MemoryStream::new();
        let mut w = to_writer(logger(&out, Options::new().msec().level_braces()), None);
        assert_eq!(w.write(b"something blah 123").unwrap(), 18);
        assert_eq!(out.drain(), "2018/01/07 13:02:34.000 [INFO]  something blah 123\n");

        w.write_all(b"INFO something blah 123\n").unwrap();
        assert_eq!(out.drain(), "2018/01/07 13:02:34.000 [INFO]  something blah 123\n");

        w.write_all(b"[DEBUG] dropped\n").unwrap();
        assert_eq!(out.drain(), "");
    }

    #[test]
    fn prefix_gets_a_space() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let f = Func(move |args: Arguments<'_>| sink.lock().unwrap().push(args.to_string()));
        let mut w = LogWriter::new(Arc::new(f), "ERROR");
        w.write_all(b"boom\n").unwrap();
        let mut w = LogWriter::new(w.logger.clone(), "ERROR ");
        w.write_all(b"boom").unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["ERROR boom", "ERROR boom"]);
    }
}
