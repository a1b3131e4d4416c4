// SPDX-License-Identifier: MIT OR Apache-2.0
//! The process-wide default logger.

use levelog::global_logger::{default_logger, setup};
use levelog::{MemoryStream, Options, printf};
use std::sync::{Arc, Mutex};

static GLOBAL_GUARD: Mutex<()> = Mutex::new(());

#[test]
fn lazily_initialized_with_defaults() {
    let _guard = GLOBAL_GUARD.lock().unwrap();
    let logger = default_logger();
    assert!(!logger.enabled(levelog::Level::Debug));
    assert!(logger.enabled(levelog::Level::Info));
    assert!(Arc::ptr_eq(&logger, &default_logger()));
}

#[test]
fn setup_then_printf() {
    let _guard = GLOBAL_GUARD.lock().unwrap();
    let out = MemoryStream::new();
    let err = MemoryStream::new();
    setup(Options::new().out(out.clone()).err(err.clone()));
    printf!("WARN test {}", 9876543);
    assert!(out.drain().ends_with(" WARN  test 9876543\n"));

    setup(Options::new().out(out.clone()).err(err.clone()).msec().level_braces());
    printf!("WARN test {}", 9876543);
    let got = out.drain();
    assert!(got.ends_with(" [WARN]  test 9876543\n"), "{got}");
    // 2019/04/01 02:43:20.591 [WARN]  test 9876543
    assert_eq!(got.find(" [WARN]"), Some(23), "{got}");

    printf!("DEBUG not shown");
    assert!(out.is_empty());

    printf!("ERROR shown {}", "twice");
    assert!(out.contents().ends_with(" [ERROR] shown twice\n"));
    assert_eq!(out.contents(), err.contents());
}

#[test]
fn setup_replaces_for_all_threads() {
    let _guard = GLOBAL_GUARD.lock().unwrap();
    let out = MemoryStream::new();
    setup(Options::new().out(out.clone()).debug());
    std::thread::spawn(|| printf!("DEBUG from a thread"))
        .join()
        .expect("logging thread");
    assert!(out.contents().ends_with("DEBUG from a thread\n"));
}
