// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::template::SECONDS_FORMAT;
use std::fmt::{Arguments, Debug};

/**
The minimal logging interface.

Code that only needs to log should depend on this trait rather than on
[`LevelLogger`](crate::LevelLogger), so that any implementation can be passed in:

```
use levelog::{Func, Logger, NoOp};
use std::sync::Mutex;

fn consumer(l: &dyn Logger) {
    l.logf(format_args!("INFO test {}", 12345));
}

let seen = Mutex::new(String::new());
consumer(&Func(|args: std::fmt::Arguments<'_>| seen.lock().unwrap().push_str(&args.to_string())));
consumer(&NoOp);
assert_eq!(*seen.lock().unwrap(), "INFO test 12345");
```
*/
pub trait Logger: Debug + Send + Sync {
    /**
    Logs one printf-style message. A leading level token such as `"WARN "` or
    `"[WARN]"` selects the severity.
    */
    fn logf(&self, args: Arguments<'_>);
}

/// Adapts a closure into a [`Logger`].
#[derive(Clone, Copy)]
pub struct Func<F>(pub F);

impl<F> Logger for Func<F>
where
    F: Fn(Arguments<'_>) + Send + Sync,
{
    fn logf(&self, args: Arguments<'_>) {
        (self.0)(args)
    }
}

impl<F> Debug for Func<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Func(..)")
    }
}

/// A logger that discards everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoOp;

impl Logger for NoOp {
    fn logf(&self, _args: Arguments<'_>) {}
}

/**
A logger that prints each message to the process stderr, prefixed with the
local time and without any level handling.
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Std;

impl Logger for Std {
    fn logf(&self, args: Arguments<'_>) {
        let now = chrono::Local::now();
        eprintln!("{} {}", now.format(SECONDS_FORMAT), args);
    }
}

/*
Boilerplate notes.

# Logger

Implementors are shared across threads behind `&dyn Logger`, hence Send + Sync.
Debug is required so a struct holding a `Box<dyn Logger>` can still derive it.

# Func

Clone and Copy follow the closure. No Debug derive: closures have none, so it prints `Func(..)`.
No Default or Eq, there is no meaningful empty or comparable closure.

# NoOp, Std

Unit structs carrying no state; every derive is free and harmless.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn func_receives_formatted_message() {
        let buf = Mutex::new(String::new());
        let l = Func(|args: Arguments<'_>| buf.lock().unwrap().push_str(&args.to_string()));
        l.logf(format_args!("blah {} {} something", "str", 123));
        assert_eq!(*buf.lock().unwrap(), "blah str 123 something");
    }

    #[test]
    fn loggers_are_object_safe() {
        let loggers: Vec<Box<dyn Logger>> = vec![Box::new(NoOp), Box::new(Std)];
        for l in &loggers {
            l.logf(format_args!("DEBUG from {:?}", l));
        }
    }
}
