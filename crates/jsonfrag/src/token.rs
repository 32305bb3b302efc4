//! Accumulator for unquoted tokens: numbers and `true` / `false` / `null`.
//!
//! JSON has no token terminators, so a token stays pending until a character
//! arrives that cannot extend it.
use crate::{event::UpdateKind, value::Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Number,
    Literal,
}

/// A number or literal token that has not been terminated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingToken {
    class: TokenClass,
    text: String,
}

/// What a finished token turned into.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Finished {
    Scalar {
        kind: UpdateKind,
        text: String,
        value: Value,
    },
    /// A literal that is none of `true`, `false`, `null`; reported as
    /// `complete-null` with its text kept.
    UnknownLiteral(String),
    /// A number token that is not a valid JSON number; dropped.
    InvalidNumber(String),
}

pub(crate) fn starts_number(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '.'
}

pub(crate) fn starts_literal(c: char) -> bool {
    c.is_alphabetic()
}

impl PendingToken {
    /// Opens a token for `first`, or `None` if `first` cannot begin one.
    pub(crate) fn start(first: char) -> Option<Self> {
        let class = if starts_number(first) {
            TokenClass::Number
        } else if starts_literal(first) {
            TokenClass::Literal
        } else {
            return None;
        };
        let mut text = String::with_capacity(8);
        text.push(first);
        Some(Self { class, text })
    }

    /// Whether `c` continues this token.
    pub(crate) fn accepts(&self, c: char) -> bool {
        match self.class {
            TokenClass::Number => matches!(c, '0'..='9' | '.' | '-' | '+' | 'e' | 'E'),
            TokenClass::Literal => c.is_alphabetic(),
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub(crate) fn finish(self) -> Finished {
        match self.class {
            TokenClass::Literal => match self.text.as_str() {
                "true" => Finished::Scalar {
                    kind: UpdateKind::CompleteBoolean,
                    text: self.text,
                    value: Value::Boolean(true),
                },
                "false" => Finished::Scalar {
                    kind: UpdateKind::CompleteBoolean,
                    text: self.text,
                    value: Value::Boolean(false),
                },
                "null" => Finished::Scalar {
                    kind: UpdateKind::CompleteNull,
                    text: self.text,
                    value: Value::Null,
                },
                _ => Finished::UnknownLiteral(self.text),
            },
            // serde_json enforces the JSON grammar: no leading `+`, no leading
            // zeros, digits on both sides of `.`.
            TokenClass::Number => match serde_json::from_str::<f64>(&self.text) {
                Ok(n) if n.is_finite() => Finished::Scalar {
                    kind: UpdateKind::CompleteNumber,
                    text: self.text,
                    value: Value::Number(n),
                },
                _ => Finished::InvalidNumber(self.text),
            },
        }
    }
}
