// SPDX-License-Identifier: MIT OR Apache-2.0
//! Concurrent use of one logger, with file-backed streams.

use levelog::template::FUNC_DEBUG;
use levelog::{LevelLogger, MemoryStream, Options};
use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

#[test]
fn lines_stay_whole_in_a_file() {
    let mut file = tempfile::tempfile().expect("temp file");
    let writer = file.try_clone().expect("clone handle");
    let logger = Arc::new(LevelLogger::new(
        Options::new().out(writer).err(MemoryStream::new()).debug().caller_func(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    logger.logf(format_args!("[DEBUG] worker {} line {} {}", t, i, "x".repeat(i % 37)));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("worker");
    }
    logger.flush();

    let mut contents = String::new();
    file.seek(SeekFrom::Start(0)).expect("seek");
    file.read_to_string(&mut contents).expect("read back");
    let mut seen = std::collections::HashSet::new();
    for line in contents.lines() {
        let (_, rest) = line.split_once(" DEBUG {").expect("level and caller");
        let (caller, message) = rest.split_once("} worker ").expect("caller block");
        assert!(caller.contains("closure"), "{line}");
        let mut words = message.split(' ');
        let t: usize = words.next().and_then(|w| w.parse().ok()).expect("worker id");
        assert_eq!(words.next(), Some("line"), "{line}");
        let i: usize = words.next().and_then(|w| w.parse().ok()).expect("line number");
        assert_eq!(words.next().unwrap_or_default(), "x".repeat(i % 37), "{line}");
        assert!(seen.insert((t, i)), "duplicate {line}");
    }
    assert_eq!(seen.len(), 8 * 200);
}

#[test]
fn fatal_hooks_run_once_per_record() {
    let out = MemoryStream::new();
    let err = MemoryStream::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let hook_calls = calls.clone();
    let logger = Arc::new(LevelLogger::new(
        Options::new()
            .out(out.clone())
            .err(err.clone())
            .format(FUNC_DEBUG)
            .on_fatal(move || {
                hook_calls.fetch_add(1, Ordering::SeqCst);
            }),
    ));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..5 {
                    logger.logf(format_args!("FATAL worker {} gave up at {}", t, i));
                    logger.logf(format_args!("INFO worker {} still logging", t));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("worker");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 20);
    assert_eq!(out.lines().len(), 40);
    let err = err.contents();
    let lines: Vec<_> = err.lines().collect();
    let fatal: Vec<_> = (0..lines.len()).filter(|&n| lines[n].contains(" FATAL (")).collect();
    assert_eq!(fatal.len(), 20);
    for n in fatal {
        assert_eq!(lines.get(n + 1).copied(), Some(">>> stack trace:"), "{}", lines[n]);
    }
}
