// SPDX-License-Identifier: MIT OR Apache-2.0

//! A minimal named-field formatter for log layouts.
//!
//! A template is literal text with fields in single braces:
//!
//! | Field           | Renders                                          |
//! |-----------------|--------------------------------------------------|
//! | `{dt}`          | timestamp as `2018/01/07 13:02:34`               |
//! | `{dt:<fmt>}`    | timestamp with a chrono strftime format          |
//! | `{level}`       | level, padded to five characters                 |
//! | `{message}`     | message body                                     |
//! | `{caller_file}` | last two segments of the caller's source path    |
//! | `{caller_line}` | caller's line number                             |
//! | `{caller_func}` | caller's function name                           |
//! | `{caller_pkg}`  | directory holding the caller's source file       |
//!
//! `{{` and `}}` print literal braces.
//!
//! ```
//! use levelog::template::Template;
//!
//! let t: Template = "{level} {{{caller_func}}} {message}".parse().unwrap();
//! assert!(t.uses_caller());
//! assert!("{level} {nope}".parse::<Template>().is_err());
//! ```

use crate::log_record::LogRecord;
use chrono::format::{Item, StrftimeItems};
use std::fmt::{Display, Write};
use std::str::FromStr;

/// `2018/01/07 13:02:34 INFO  message`
pub const SHORT: &str = "{dt:%Y/%m/%d %H:%M:%S} {level} {message}";
/// `2018/01/07 13:02:34.123 INFO  message`
pub const WITH_MSEC: &str = "{dt:%Y/%m/%d %H:%M:%S%.3f} {level} {message}";
/// `2018/01/07 13:02:34.123 INFO  (pkg) message`
pub const WITH_PKG: &str = "{dt:%Y/%m/%d %H:%M:%S%.3f} {level} ({caller_pkg}) {message}";
/// `2018/01/07 13:02:34.123 INFO  (pkg/file.rs:12) message`
pub const SHORT_DEBUG: &str =
    "{dt:%Y/%m/%d %H:%M:%S%.3f} {level} ({caller_file}:{caller_line}) {message}";
/// `2018/01/07 13:02:34.123 INFO  (mod::func) message`
pub const FUNC_DEBUG: &str = "{dt:%Y/%m/%d %H:%M:%S%.3f} {level} ({caller_func}) {message}";
/// `2018/01/07 13:02:34.123 INFO  (pkg/file.rs:12 mod::func) message`
pub const FULL_DEBUG: &str =
    "{dt:%Y/%m/%d %H:%M:%S%.3f} {level} ({caller_file}:{caller_line} {caller_func}) {message}";

pub(crate) const SECONDS_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
pub(crate) const MSEC_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

/// Why a template could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("field opened at byte {0} is never closed")]
    Unclosed(usize),
    #[error("unmatched '}}' at byte {0}")]
    Unmatched(usize),
    #[error("empty field at byte {0}")]
    EmptyField(usize),
    #[error("unknown field {0:?}")]
    UnknownField(String),
    #[error("field {0:?} does not take a format")]
    UnexpectedFormat(String),
    #[error("invalid time format {0:?}")]
    BadTimeFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Time(String),
    Level,
    /// `[{level}]`, rendered with the padding outside the brackets.
    BracedLevel,
    Message,
    CallerFile,
    CallerLine,
    CallerFunc,
    CallerPkg,
}

/// A parsed layout template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    tokens: Vec<Token>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let start = i + 1;
                    let end = source[start..]
                        .find('}')
                        .map(|p| start + p)
                        .ok_or(TemplateError::Unclosed(i))?;
                    let field = &source[start..end];
                    if field.contains('{') {
                        return Err(TemplateError::Unclosed(i));
                    }
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(field_token(field, i)?);
                    while chars.next_if(|(j, _)| *j <= end).is_some() {}
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::Unmatched(i)),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }
        Ok(Template {
            source: source.to_string(),
            tokens: braced_levels(tokens),
        })
    }

    /// [`SHORT`], built without parsing. Used when a supplied template is unusable.
    pub(crate) fn fallback() -> Self {
        Template {
            source: SHORT.to_string(),
            tokens: vec![
                Token::Time(SECONDS_FORMAT.to_string()),
                Token::Literal(" ".to_string()),
                Token::Level,
                Token::Literal(" ".to_string()),
                Token::Message,
            ],
        }
    }

    /// The text the template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether any caller field appears, i.e. whether rendering needs a resolved call site.
    pub fn uses_caller(&self) -> bool {
        self.tokens.iter().any(|t| {
            matches!(
                t,
                Token::CallerFile | Token::CallerLine | Token::CallerFunc | Token::CallerPkg
            )
        })
    }

    /**
    Renders the record.

    Fails only when formatting a field fails, which for a parsed template means
    chrono could not render the timestamp.
    */
    pub fn render(&self, record: &LogRecord) -> Result<String, std::fmt::Error> {
        let mut out = String::with_capacity(self.source.len() + record.message.len());
        for token in &self.tokens {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Time(spec) => write!(out, "{}", record.timestamp.format(spec))?,
                Token::Level => out.push_str(record.level.padded()),
                Token::BracedLevel => out.push_str(record.level.bracketed()),
                Token::Message => out.push_str(&record.message),
                Token::CallerFile => out.push_str(record.caller_file()),
                Token::CallerLine => write!(out, "{}", record.caller_line())?,
                Token::CallerFunc => out.push_str(record.caller_func()),
                Token::CallerPkg => out.push_str(record.caller_pkg()),
            }
        }
        Ok(out)
    }
}

/// Folds each `[`, level, `]` sequence into [`Token::BracedLevel`].
fn braced_levels(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut tokens = tokens.into_iter().peekable();
    while let Some(token) = tokens.next() {
        if matches!(&token, Token::Literal(s) if s.is_empty()) {
            continue;
        }
        let opens = matches!(out.last(), Some(Token::Literal(l)) if l.ends_with('['));
        let closes = matches!(tokens.peek(), Some(Token::Literal(r)) if r.starts_with(']'));
        if token == Token::Level && opens && closes {
            if let Some(Token::Literal(l)) = out.last_mut() {
                l.pop();
                if l.is_empty() {
                    out.pop();
                }
            }
            if let Some(Token::Literal(r)) = tokens.peek_mut() {
                r.remove(0);
            }
            out.push(Token::BracedLevel);
            continue;
        }
        out.push(token);
    }
    out
}

fn field_token(field: &str, at: usize) -> Result<Token, TemplateError> {
    let (name, spec) = match field.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (field, None),
    };
    if name.is_empty() {
        return Err(TemplateError::EmptyField(at));
    }
    let token = match name {
        "dt" => {
            let spec = spec.unwrap_or(SECONDS_FORMAT);
            if StrftimeItems::new(spec).any(|item| matches!(item, Item::Error)) {
                return Err(TemplateError::BadTimeFormat(spec.to_string()));
            }
            return Ok(Token::Time(spec.to_string()));
        }
        "level" => Token::Level,
        "message" => Token::Message,
        "caller_file" => Token::CallerFile,
        "caller_line" => Token::CallerLine,
        "caller_func" => Token::CallerFunc,
        "caller_pkg" => Token::CallerPkg,
        other => return Err(TemplateError::UnknownField(other.to_string())),
    };
    if spec.is_some() {
        return Err(TemplateError::UnexpectedFormat(name.to_string()));
    }
    Ok(token)
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
