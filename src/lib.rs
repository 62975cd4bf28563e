use std::collections::HashMap;

mod display;
mod limits;
mod parse;
mod tokenize;
mod unescape;

pub use limits::{Limits, DEFAULT_MAX_NESTING_DEPTH};
pub use parse::{parse, parse_with_limits, Cursor, ParseError};
pub use tokenize::{tokenize, LexError, Token, TokenKind};
pub use unescape::unescape;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// literal characters `null`
    Null,

    /// literal characters `true` or `false`
    Boolean(bool),

    /// a number, either integer or floating point
    Number(f64),

    /// the raw text between the double quotes, escape sequences not decoded
    String(String),

    /// an array of values
    Array(Vec<Value>),

    /// an object with key-value pairs, keys as raw string text
    Object(HashMap<String, Value>),
}

impl Value {
    /// Name of the variant, as used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The raw string content, escapes still encoded. See [`Value::decoded`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The string content with escape sequences decoded.
    pub fn decoded(&self) -> Option<String> {
        self.as_str().map(unescape)
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

/// Failure of either stage of [`from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
}

/// Tokenizes and parses `input` as exactly one JSON value.
pub fn from_str(input: &str) -> Result<Value, Error> {
    from_str_with_limits(input, Limits::default())
}

pub fn from_str_with_limits(input: &str, limits: Limits) -> Result<Value, Error> {
    let tokens = tokenize(input).map_err(|err| {
        tracing::debug!(error = %err, "tokenize failed");
        err
    })?;
    tracing::trace!(count = tokens.len(), "tokenized input");

    let value = parse_with_limits(&tokens, limits).map_err(|err| {
        tracing::debug!(error = %err, "parse failed");
        err
    })?;
    tracing::trace!(kind = value.kind_name(), "parsed value");

    Ok(value)
}

/// Returns `Ok(true)` when `input` is a single well-formed JSON value,
/// otherwise the first lexical or syntax error.
pub fn validate(input: &str) -> Result<bool, Error> {
    validate_with_limits(input, Limits::default())
}

pub fn validate_with_limits(input: &str, limits: Limits) -> Result<bool, Error> {
    from_str_with_limits(input, limits)?;
    Ok(true)
}

pub fn is_valid(input: &str) -> bool {
    validate(input).is_ok()
}
