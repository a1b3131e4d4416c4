//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# levelog

levelog is a small, leveled, printf-style text logger.

# The idea

Most programs log one line at a time, and most of those lines already say how important they are:

```text
INFO server started on :8080
[WARN] cache miss rate 37%
ERROR can't open db.sqlite
```

levelog takes that at face value. There is one entry point, [`LevelLogger::logf`], which takes a
formatted message, reads the severity from its leading token, and writes one rendered line.
Messages without a token are `INFO`.

# Levels

| Level | Written when      | Primary stream | Secondary stream       | Then                  |
|-------|-------------------|----------------|------------------------|-----------------------|
| TRACE | trace is enabled  | yes            |                        |                       |
| DEBUG | debug is enabled  | yes            |                        |                       |
| INFO  | always            | yes            |                        |                       |
| WARN  | always            | yes            |                        |                       |
| ERROR | always            | yes            | yes                    |                       |
| PANIC | always            | yes            | yes, with a stack dump | the process exits (1) |
| FATAL | always            | yes            | yes, with a stack dump | the process exits (1) |

Tokens are recognized bare (`"WARN "`) or bracketed (`"[WARN]"`), upper case only.

# The API

```rust
use levelog::{LevelLogger, MemoryStream, Options, infof, logf};

let out = MemoryStream::new();
let logger = LevelLogger::new(Options::new().out(out.clone()).caller_func().msec());

logf!(logger, "DEBUG dropped, debug is off");
logf!(logger, "[WARN] {} retries left", 2);
infof!(logger, "shortcuts add the token for you");

assert_eq!(out.lines().len(), 2);
```

Code that only needs to log should take a `&dyn` [`Logger`]; [`Func`], [`NoOp`] and [`Std`] are
ready-made implementations for tests and small tools.

# Layout

By default a line is assembled from option flags: timestamp, level, an optional `{caller}` block,
and the message. For anything else, give a [`template`]:

```rust
use levelog::{LevelLogger, Options};
use levelog::template::FULL_DEBUG;

let logger = LevelLogger::new(Options::new().format(FULL_DEBUG));
// 2018/01/07 13:02:34.123 INFO  (app/main.rs:12 main::run) message
```

Caller fields (file, line, function, package) are found by walking the stack, so they cost
something. The walk only happens when the layout shows a caller field.

They are read from debuginfo. A build without it, such as a default `--release` profile,
renders every caller field empty (`(:0 )`); set `debug = "line-tables-only"` or higher in the
profile to keep them.

# Other integrations

* [`global_logger`] keeps a process-wide default logger for [`printf!`].
* [`adaptor`] turns a logger into an `io::Write` sink.
* [`bridge`] connects levelog with `tracing`, in both directions.

# Multithreading

A [`LevelLogger`] is `Send + Sync`. Every record is written under one lock, so lines from
concurrent callers never interleave.
*/

mod call_site;
mod layout;
mod level;
mod level_logger;
mod log_record;
mod logger;
mod macros;
mod mapper;
mod memory_stream;
mod options;
mod sys;

pub mod adaptor;
pub mod bridge;
pub mod global_logger;
pub mod template;

pub use call_site::CallSite;
pub use level::{Level, ParseLevelError, extract_level};
pub use level_logger::{LevelLogger, MAX_STACK_DUMP};
pub use log_record::LogRecord;
pub use logger::{Func, Logger, NoOp, Std};
pub use mapper::{FieldMap, Mapper};
pub use memory_stream::MemoryStream;
pub use options::{Options, REDACTED};
pub use sys::{Clock, OnFatal};
pub use template::TemplateError;
