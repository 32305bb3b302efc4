//! Updates emitted by the fragment parser.
//!
//! Each [`FragmentUpdate`] names *what* happened ([`UpdateKind`]), *where* it
//! happened (a string path such as `root.items[2].name`), the raw source text
//! involved, and, for complete scalars, the decoded [`Value`].
//!
//! # Examples
//!
//! ```
//! use jsonfrag::{FragmentParser, UpdateKind};
//!
//! let mut parser = FragmentParser::new("get_weather");
//! let updates: Vec<_> = parser.add_fragment(r#"{"city":"Oslo"}"#).collect();
//! let kinds: Vec<_> = updates.iter().map(|u| u.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         UpdateKind::StartObject,
//!         UpdateKind::Key,
//!         UpdateKind::StartString,
//!         UpdateKind::PartialString,
//!         UpdateKind::CompleteString,
//!         UpdateKind::EndObject,
//!         UpdateKind::DocumentComplete,
//!     ]
//! );
//! assert_eq!(updates[3].path, "root.city");
//! assert_eq!(updates[3].text.as_deref(), Some("Oslo"));
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{path::ROOT, value::Value};

/// The kind of progress a [`FragmentUpdate`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateKind {
    /// `{` was consumed.
    StartObject,
    /// A matching `}` was consumed.
    EndObject,
    /// `[` was consumed.
    StartArray,
    /// A matching `]` was consumed.
    EndArray,
    /// The opening quote of a value string was consumed.
    StartString,
    /// Raw characters of a value string that is still open.
    PartialString,
    /// The closing quote of a value string was consumed.
    CompleteString,
    /// A property name was closed.
    Key,
    /// A number token ended.
    CompleteNumber,
    /// A `true` or `false` literal ended.
    CompleteBoolean,
    /// A `null` literal ended, or a literal that was not recognized.
    CompleteNull,
    /// The document became balanced and idle.
    DocumentComplete,
}

impl UpdateKind {
    /// Returns `true` for the kinds that carry a decoded [`Value`].
    #[must_use]
    pub fn is_complete_scalar(self) -> bool {
        matches!(
            self,
            Self::CompleteString | Self::CompleteNumber | Self::CompleteBoolean | Self::CompleteNull
        )
    }

    /// Returns `true` for the container open and close kinds.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::StartObject | Self::EndObject | Self::StartArray | Self::EndArray
        )
    }

    fn label(self) -> &'static str {
        match self {
            Self::StartObject => "start-object",
            Self::EndObject => "end-object",
            Self::StartArray => "start-array",
            Self::EndArray => "end-array",
            Self::StartString => "start-string",
            Self::PartialString => "partial-string",
            Self::CompleteString => "complete-string",
            Self::Key => "key",
            Self::CompleteNumber => "complete-number",
            Self::CompleteBoolean => "complete-boolean",
            Self::CompleteNull => "complete-null",
            Self::DocumentComplete => "document-complete",
        }
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One unit of parsing progress.
///
/// Updates are produced transiently and handed to the caller in emission
/// order; the parser keeps no record of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentUpdate {
    /// Location of the update, relative to the document root.
    pub path: String,
    /// What happened.
    pub kind: UpdateKind,
    /// Raw source text. `None` for container start and end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Decoded value, present only for complete scalar kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FragmentUpdate {
    pub(crate) fn container(kind: UpdateKind, path: String) -> Self {
        Self {
            path,
            kind,
            text: None,
            value: None,
        }
    }

    pub(crate) fn with_text(kind: UpdateKind, path: String, text: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            text: Some(text.into()),
            value: None,
        }
    }

    pub(crate) fn scalar(kind: UpdateKind, path: String, text: String, value: Value) -> Self {
        Self {
            path,
            kind,
            text: Some(text),
            value: Some(value),
        }
    }

    pub(crate) fn document_complete(raw: &str) -> Self {
        Self::with_text(UpdateKind::DocumentComplete, ROOT.to_string(), raw)
    }

    /// Returns `true` if this is a [`PartialString`](UpdateKind::PartialString)
    /// update.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.kind == UpdateKind::PartialString
    }
}

impl fmt::Display for FragmentUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path)?;
        if let Some(text) = &self.text {
            write!(f, " {text:?}")?;
        }
        if let Some(value) = &self.value {
            write!(f, " => {value}")?;
        }
        Ok(())
    }
}
