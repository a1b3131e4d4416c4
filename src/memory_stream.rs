// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Stream
//!
//! [`MemoryStream`] is an output stream that keeps everything written to it in
//! memory. Clones share the same buffer, so one clone can be handed to a logger
//! as its output while another is kept to read back what was logged. It is
//! meant for:
//!
//! - Unit testing code that logs through levelog
//! - Capturing output where stdout and stderr are redirected or unavailable
//! - Examining output programmatically

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A shared, growable in-memory stream.
///
/// # Example
///
/// ```rust
/// use levelog::{LevelLogger, MemoryStream, Options};
///
/// let out = MemoryStream::new();
/// let logger = LevelLogger::new(Options::new().out(out.clone()));
///
/// logger.logf(format_args!("WARN low disk: {}%", 93));
/// logger.logf(format_args!("some info"));
///
/// let lines = out.lines();
/// assert_eq!(lines.len(), 2);
/// assert!(lines[0].ends_with("WARN  low disk: 93%"));
/// assert!(lines[1].ends_with("INFO  some info"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    buf: Arc<Mutex<Vec<u8>>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Clone: derived, and deliberately shallow; clones are handles to one buffer
// - Default: an empty buffer
// - PartialEq/Eq: NOT implemented, unclear whether handle or content equality is meant
// - Display: NOT implemented, use `contents`

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Everything written so far as raw bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// The contents split into lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Returns the contents and empties the buffer.
    pub fn drain(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Writes the contents to the process stderr and empties the buffer.
    pub fn drain_to_console(&self) {
        eprint!("{}", self.drain());
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let stream = MemoryStream::new();
        let mut writer = stream.clone();
        writer.write_all(b"one\ntwo\n").unwrap();
        assert_eq!(stream.contents(), "one\ntwo\n");
        assert_eq!(stream.lines(), vec!["one", "two"]);
        assert_eq!(stream.len(), 8);
    }

    #[test]
    fn drain_empties() {
        let mut stream = MemoryStream::new();
        write!(stream, "abc").unwrap();
        assert_eq!(stream.drain(), "abc");
        assert!(stream.is_empty());
        assert_eq!(stream.drain(), "");
    }

    #[test]
    fn concurrent_writers() {
        let stream = MemoryStream::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mut w = stream.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        w.write_all(b"x").unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("writer thread");
        }
        assert_eq!(stream.len(), 400);
    }
}
