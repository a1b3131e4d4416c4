// SPDX-License-Identifier: MIT OR Apache-2.0
//! Call-site reporting as seen from a downstream crate.

use levelog::template::{FULL_DEBUG, SHORT_DEBUG};
use levelog::{LevelLogger, Logger, MemoryStream, Options, debugf, infof, logf};

fn logger(options: Options) -> (LevelLogger, MemoryStream) {
    let out = MemoryStream::new();
    let logger = LevelLogger::new(options.out(out.clone()).err(MemoryStream::new()));
    (logger, out)
}

#[inline(never)]
fn consumer(l: &dyn Logger) {
    l.logf(format_args!("INFO test {}", 12345));
    // keeps this frame: a call in tail position may become a jump
    std::hint::black_box(());
}

#[inline(never)]
fn log_helper(l: &LevelLogger, what: &str) {
    l.info(format_args!("helper says {}", what));
    std::hint::black_box(());
}

#[test]
fn direct_call() {
    let (l, out) = logger(Options::new().format(FULL_DEBUG));
    let line = line!() + 1;
    l.logf(format_args!("WARN direct"));
    let got = out.contents();
    assert!(
        got.ends_with(&format!("WARN  (tests/caller.rs:{line} caller::direct_call) direct\n")),
        "{got}"
    );
}

#[test]
fn through_trait_object() {
    let (l, out) = logger(Options::new().format(FULL_DEBUG));
    consumer(&l);
    let got = out.contents();
    assert!(got.contains("(tests/caller.rs:"), "{got}");
    assert!(got.ends_with(" caller::consumer) test 12345\n"), "{got}");
}

#[test]
fn macros_report_their_own_line() {
    let (l, out) = logger(Options::new().debug().format(SHORT_DEBUG));
    let first = line!() + 1;
    logf!(l, "INFO one");
    let second = line!() + 1;
    debugf!(l, "two {}", 2);
    let third = line!() + 1;
    infof!(l, "three");
    let lines = out.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(&format!("INFO  (tests/caller.rs:{first}) one")), "{lines:?}");
    assert!(lines[1].ends_with(&format!("DEBUG (tests/caller.rs:{second}) two 2")), "{lines:?}");
    assert!(lines[2].ends_with(&format!("INFO  (tests/caller.rs:{third}) three")), "{lines:?}");
}

#[test]
fn caller_depth_skips_helpers() {
    let (l, out) = logger(Options::new().format(FULL_DEBUG).caller_depth(1));
    let line = line!() + 1;
    log_helper(&l, "hi");
    let got = out.contents();
    assert!(
        got.ends_with(&format!("INFO  (tests/caller.rs:{line} caller::caller_depth_skips_helpers) helper says hi\n")),
        "{got}"
    );
}

#[test]
fn ignored_helpers_are_skipped() {
    let (l, out) = logger(Options::new().caller_file().caller_func().ignore_caller("caller::log_helper"));
    let line = line!() + 1;
    log_helper(&l, "hi");
    let got = out.contents();
    assert!(
        got.ends_with(&format!(
            "INFO  {{tests/caller.rs:{line} caller::ignored_helpers_are_skipped}} helper says hi\n"
        )),
        "{got}"
    );

    let (l, out) = logger(Options::new().caller_func());
    log_helper(&l, "hi");
    assert!(out.contents().ends_with("INFO  {caller::log_helper} helper says hi\n"));
}

#[test]
fn package_is_the_source_directory() {
    let (l, out) = logger(Options::new().caller_pkg());
    l.info(format_args!("where"));
    assert!(out.contents().ends_with("INFO  {tests} where\n"), "{}", out.contents());
}

#[test]
fn no_caller_fields_means_no_walk() {
    let (l, out) = logger(Options::new().caller_depth(1_000_000));
    l.info(format_args!("fine"));
    assert!(out.contents().ends_with("INFO  fine\n"));
}

#[test]
fn unresolvable_depth_renders_empty_caller() {
    let (l, out) = logger(Options::new().format(FULL_DEBUG).caller_depth(1_000_000));
    l.info(format_args!("lost"));
    assert!(out.contents().ends_with("INFO  (:0 ) lost\n"), "{}", out.contents());
}

#[test]
fn global_printf_reports_caller() {
    let out = MemoryStream::new();
    levelog::global_logger::setup(Options::new().out(out.clone()).format(FULL_DEBUG));
    let line = line!() + 1;
    levelog::printf!("WARN from global {}", 1);
    let got = out.contents();
    assert!(
        got.ends_with(&format!("WARN  (tests/caller.rs:{line} caller::global_printf_reports_caller) from global 1\n")),
        "{got}"
    );
}
