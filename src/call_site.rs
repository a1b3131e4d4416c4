// SPDX-License-Identifier: MIT OR Apache-2.0

//! Call-site resolution by walking the stack.
//!
//! The walk is anchored on the resolver's own frame instead of a raw frame index,
//! because the number of unwinder frames below it differs between platforms and
//! builds. From the anchor it moves outward past levelog's own entry points
//! ([`ENTRY_POINTS`]), matched by name since an optimizer may turn the call into
//! the dispatch function into a jump and drop the entry point's frame. It then
//! skips the caller-requested depth and returns the first frame that is not in
//! the ignore set and carries full debug information.
//!
//! Without debuginfo no frame qualifies and every record gets an empty call site.
//!
//! Walking the stack and symbolizing frames is expensive. Callers check whether
//! the layout consumes caller fields at all before calling [`resolve`].

use std::fmt::Display;
use std::path::{Component, Path};

/// Demangled names of the frames between the resolver and the application code that logged.
pub(crate) const ENTRY_POINTS: &[&str] = &[
    "levelog::level_logger::LevelLogger::log_line",
    "levelog::level_logger::LevelLogger::logf",
    "levelog::level_logger::LevelLogger::trace",
    "levelog::level_logger::LevelLogger::debug",
    "levelog::level_logger::LevelLogger::info",
    "levelog::level_logger::LevelLogger::warn",
    "levelog::level_logger::LevelLogger::error",
    "<levelog::level_logger::LevelLogger as levelog::logger::Logger>::logf",
    "levelog::global_logger::printf",
];

const RESOLVER: &str = concat!(module_path!(), "::resolve");

/// Where a log call was made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// The last two segments of the source path, e.g. `tests/caller.rs`.
    pub file: String,
    pub line: u32,
    /// The function name without its crate prefix, e.g. `caller::log_from_helper`.
    pub func: String,
    /// The name of the directory holding the source file.
    pub pkg: String,
}

impl CallSite {
    /// A call site from a source location known ahead of time, e.g. by a tracing event.
    pub(crate) fn from_location(file: &str, line: u32, func: &str) -> Self {
        let path = Path::new(file);
        CallSite {
            file: short_file(path),
            line,
            func: short_func(func),
            pkg: package(path),
        }
    }

    fn from_symbol(file: Option<&Path>, line: Option<u32>, name: &str) -> Option<Self> {
        let file = file?;
        let line = line.filter(|l| *l > 0)?;
        if name.is_empty() || file.as_os_str().is_empty() {
            return None;
        }
        Some(CallSite {
            file: short_file(file),
            line,
            func: short_func(name),
            pkg: package(file),
        })
    }
}

impl Display for CallSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}", self.file, self.line, self.func)
    }
}

/**
Resolves the frame `depth` logical frames above the code that called into levelog.

Frames named in [`ENTRY_POINTS`] right above the resolver are passed over
first; `depth == 0` is then the first frame outside levelog, or the direct
caller of this function when it is not called through an entry point. Frames
whose demangled, fully-qualified function name appears in `ignore` are passed
over, as are frames missing a file, a line or a name. Inlined functions count
as frames of their own.

Returns `None` when no frame qualifies, including when the binary carries no
symbols.
*/
#[inline(never)]
pub(crate) fn resolve(depth: usize, ignore: &[String]) -> Option<CallSite> {
    let mut walk = Walk::new(depth, ignore);
    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            let name = symbol
                .name()
                .map(|n| format!("{:#}", n))
                .unwrap_or_default();
            walk.visit(&name, symbol.filename(), symbol.lineno());
        });
        walk.found.is_none()
    });
    walk.found
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Below the resolver's own frame.
    Unwinder,
    /// Passing over levelog's entry points.
    Entry,
    /// Passing over the requested depth; the count is what remains.
    Depth(usize),
}

struct Walk<'a> {
    phase: Phase,
    depth: usize,
    ignore: &'a [String],
    found: Option<CallSite>,
}

impl<'a> Walk<'a> {
    fn new(depth: usize, ignore: &'a [String]) -> Self {
        Walk {
            phase: Phase::Unwinder,
            depth,
            ignore,
            found: None,
        }
    }

    fn visit(&mut self, name: &str, file: Option<&Path>, line: Option<u32>) {
        if self.found.is_some() {
            return;
        }
        match self.phase {
            Phase::Unwinder => {
                if name == RESOLVER {
                    self.phase = Phase::Entry;
                }
                return;
            }
            Phase::Entry if ENTRY_POINTS.contains(&name) => return,
            Phase::Entry => self.phase = Phase::Depth(self.depth),
            Phase::Depth(_) => {}
        }
        match self.phase {
            Phase::Depth(n) if n > 0 => self.phase = Phase::Depth(n - 1),
            _ => {
                if self.ignore.iter().any(|i| i == name) {
                    return;
                }
                self.found = CallSite::from_symbol(file, line, name);
            }
        }
    }
}

fn short_file(path: &Path) -> String {
    let parts: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    let start = parts.len().saturating_sub(2);
    parts[start..].join("/")
}

fn package(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Keeps the last two `::` segments, ignoring separators inside generic brackets.
fn short_func(name: &str) -> String {
    let mut cuts = Vec::new();
    let mut depth = 0usize;
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                cuts.push(i);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    match cuts.len() {
        0 | 1 => name.to_string(),
        n => name[cuts[n - 2] + 2..].to_string(),
    }
}
