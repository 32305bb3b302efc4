//! JSON value types and utilities.
//!
//! [`Value`] carries the decoded payload of complete scalar updates and doubles
//! as a general-purpose deserialization target for the complete-document
//! helpers on [`FragmentParser`](crate::FragmentParser).
use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Object representation used by [`Value::Object`].
pub type Map = BTreeMap<String, Value>;
/// Array representation used by [`Value::Array`].
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// Serializes and deserializes as plain JSON (the enum is untagged), so it can
/// be used with [`FragmentParser::try_extract_property`] when the shape of a
/// property is not known up front.
///
/// # Examples
///
/// ```
/// use jsonfrag::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("city".to_string(), Value::String("Oslo".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"city":"Oslo"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
/// [`FragmentParser::try_extract_property`]: crate::FragmentParser::try_extract_property
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Any JSON number, widened to `f64`.
    Number(f64),
    /// A decoded (unescaped) string.
    String(String),
    /// An ordered list of values.
    Array(Array),
    /// A map of property names to values.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is an [`Array`](Value::Array).
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns `true` if the value is an [`Object`](Value::Object).
    ///
    /// ```
    /// use jsonfrag::{Map, Value};
    ///
    /// assert!(Value::Object(Map::new()).is_object());
    /// assert!(!Value::Array(vec![]).is_object());
    /// ```
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns the boolean if the value is [`Boolean`](Value::Boolean).
    ///
    /// ```
    /// use jsonfrag::Value;
    ///
    /// assert_eq!(Value::Boolean(true).as_bool(), Some(true));
    /// assert_eq!(Value::Null.as_bool(), None);
    /// ```
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// Returns the number if the value is [`Number`](Value::Number).
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if let Self::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    /// Returns the string slice if the value is [`String`](Value::String).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s)
        } else {
            None
        }
    }
}

/// Writes `src` escaped for inclusion between the quotes of a JSON string
/// literal.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            // Line separators trip up pre-2019 JavaScript parsers.
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() && (c as u32) <= 0xFFFF => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Decodes the raw characters between the quotes of a JSON string literal.
///
/// Returns `None` when the raw text is not a valid JSON string body, e.g. when
/// it carries an unfinished escape sequence or an unescaped control character.
pub(crate) fn decode_string_body(raw: &str) -> Option<String> {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    quoted.push_str(raw);
    quoted.push('"');
    serde_json::from_str(&quoted).ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
