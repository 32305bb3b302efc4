//! The incremental fragment parser.
//!
//! [`FragmentParser`] is a character-driven state machine. Every call to
//! [`FragmentParser::add_fragment`] resumes exactly where the previous one
//! stopped, whether that was mid-string, mid-escape, mid-number or mid-key,
//! and yields the structural progress made while consuming the new text.
//!
//! # Examples
//!
//! ```rust
//! use jsonfrag::{FragmentParser, UpdateKind};
//!
//! let mut parser = FragmentParser::new("lookup");
//! let mut seen = Vec::new();
//! for fragment in [r#"{"a":"#, r#""hel"#, r#"lo"}"#] {
//!     for update in parser.add_fragment(fragment) {
//!         seen.push((update.kind, update.path, update.text));
//!     }
//! }
//! assert!(parser.is_complete());
//! assert_eq!(seen[3], (UpdateKind::PartialString, "root.a".into(), Some("hel".into())));
//! assert_eq!(seen[4], (UpdateKind::PartialString, "root.a".into(), Some("lo".into())));
//! ```
#![allow(clippy::struct_excessive_bools)]

use std::{collections::VecDeque, iter::FusedIterator, mem, str::Chars};

use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::{
    coalesce::Coalescer,
    error::CompleteDocumentError,
    event::{FragmentUpdate, UpdateKind},
    frame::{Frame, FrameKind, FrameStack},
    options::ParserOptions,
    path::{container_path, value_path},
    token::{Finished, PendingToken},
    value::{Value, decode_string_body},
};

/// Resumable parser for one stream of JSON text, typically the arguments of a
/// single tool call.
///
/// The parser never fails: malformed input is tolerated because a fragment
/// boundary can make a well-formed stream look broken for a moment.
#[derive(Debug)]
pub struct FragmentParser {
    tool_name: String,
    options: ParserOptions,

    /// Every character consumed so far.
    raw: String,

    frames: FrameStack,
    expecting_property_name: bool,
    after_colon: bool,
    last_key: Option<String>,

    /// Raw body of the string being read, quotes excluded.
    string_buf: String,
    string_is_key: bool,
    /// Path of the value string being read, fixed when it opens.
    string_path: String,

    token: Option<PendingToken>,
    was_complete: bool,
}

impl FragmentParser {
    /// Creates a parser for the arguments of `tool_name`.
    ///
    /// The name is carried for the caller's bookkeeping only; it has no
    /// effect on parsing.
    #[must_use]
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self::with_options(tool_name, ParserOptions::default())
    }

    /// Creates a parser with explicit [`ParserOptions`].
    #[must_use]
    pub fn with_options(tool_name: impl Into<String>, options: ParserOptions) -> Self {
        Self {
            tool_name: tool_name.into(),
            options,
            raw: String::new(),
            frames: FrameStack::new(),
            expecting_property_name: false,
            after_colon: false,
            last_key: None,
            string_buf: String::new(),
            string_is_key: false,
            string_path: String::new(),
            token: None,
            was_complete: false,
        }
    }

    /// The identifier this parser was created with.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// The options this parser was created with.
    #[must_use]
    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Feeds one fragment and returns the updates it produces, in order.
    ///
    /// The returned iterator is lazy: characters are consumed as updates are
    /// pulled. Dropping it early still consumes the rest of `fragment`, so
    /// the parser always ends up having seen the whole fragment; only the
    /// remaining updates are lost.
    ///
    /// Partial-string updates are coalesced per call, so a string split over
    /// two fragments yields at least one partial update per fragment.
    ///
    /// ```rust
    /// use jsonfrag::{FragmentParser, UpdateKind};
    ///
    /// let mut parser = FragmentParser::new("calc");
    /// assert_eq!(parser.add_fragment(r#"{"n":1"#).count(), 2);
    /// let updates: Vec<_> = parser.add_fragment("2.5}").collect();
    /// assert_eq!(updates[0].kind, UpdateKind::CompleteNumber);
    /// assert_eq!(updates[0].text.as_deref(), Some("12.5"));
    /// ```
    pub fn add_fragment<'s>(&mut self, fragment: &'s str) -> FragmentUpdates<'_, 's> {
        if !fragment.is_empty() {
            trace!(tool = %self.tool_name, len = fragment.len(), "fragment");
        }
        let coalescer = Coalescer::new(self.options.split_partial_strings);
        FragmentUpdates {
            parser: self,
            chars: fragment.chars(),
            scratch: Vec::with_capacity(4),
            ready: VecDeque::new(),
            coalescer,
        }
    }

    /// All text consumed so far.
    #[must_use]
    pub fn current_json(&self) -> &str {
        &self.raw
    }

    /// Whether the document is balanced and idle: every container is closed,
    /// no string, token, key or colon is pending, and a value has been seen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let root = self.frames.root().flags();
        self.frames.len() == 1
            && !root.in_string
            && !root.at_boundary
            && self.token.is_none()
            && !self.expecting_property_name
            && !self.after_colon
    }

    /// Number of open objects and arrays.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Returns the parser to its just-constructed state, keeping the tool
    /// name and options.
    pub fn reset(&mut self) {
        self.raw.clear();
        self.frames.clear();
        self.expecting_property_name = false;
        self.after_colon = false;
        self.last_key = None;
        self.string_buf.clear();
        self.string_is_key = false;
        self.string_path.clear();
        self.token = None;
        self.was_complete = false;
    }

    /// Drops the retained raw text without touching the parse state.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Deserializes the accumulated text once the document is complete.
    ///
    /// # Errors
    ///
    /// [`CompleteDocumentError::Incomplete`] before [`is_complete`] holds, and
    /// [`CompleteDocumentError::Deserialize`] when the text does not fit `T`.
    ///
    /// [`is_complete`]: FragmentParser::is_complete
    pub fn parse_complete<T: DeserializeOwned>(&self) -> Result<T, CompleteDocumentError> {
        if !self.is_complete() {
            return Err(CompleteDocumentError::Incomplete);
        }
        Ok(serde_json::from_str(&self.raw)?)
    }

    /// Like [`parse_complete`](FragmentParser::parse_complete), reporting
    /// failure as `None`.
    #[must_use]
    pub fn try_parse_complete<T: DeserializeOwned>(&self) -> Option<T> {
        self.parse_complete()
            .map_err(|err| debug!(tool = %self.tool_name, %err, "complete parse failed"))
            .ok()
    }

    /// Best-effort read of one top-level property.
    ///
    /// The accumulated text is parsed strictly first. While it is not valid
    /// JSON yet, string-typed properties whose closing quote has already
    /// arrived are still found by scanning the raw text.
    ///
    /// ```rust
    /// use jsonfrag::FragmentParser;
    ///
    /// let mut parser = FragmentParser::new("open_file");
    /// parser.add_fragment(r#"{"path":"src/lib.rs","mode":"#).for_each(drop);
    /// assert_eq!(
    ///     parser.try_extract_property::<String>("path").as_deref(),
    ///     Some("src/lib.rs")
    /// );
    /// assert_eq!(parser.try_extract_property::<String>("mode"), None);
    /// ```
    #[must_use]
    pub fn try_extract_property<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        match serde_json::from_str::<serde_json::Value>(&self.raw) {
            Ok(serde_json::Value::Object(mut map)) => {
                let value = map.remove(name)?;
                serde_json::from_value(value)
                    .map_err(|err| debug!(tool = %self.tool_name, name, %err, "property mismatch"))
                    .ok()
            }
            Ok(_) => None,
            Err(_) => self.scan_string_property(name),
        }
    }

    fn scan_string_property<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let pattern = format!(r#""{}"\s*:\s*"((?:[^"\\]|\\.)*)""#, regex::escape(name));
        let re = Regex::new(&pattern).ok()?;
        let body = re.captures(&self.raw)?.get(1)?.as_str();
        let decoded = decode_string_body(body)?;
        serde_json::from_value(serde_json::Value::String(decoded)).ok()
    }

    // ---------------------------------------------------------------------------------------------
    // Character loop
    // ---------------------------------------------------------------------------------------------

    fn step(&mut self, c: char, out: &mut Vec<FragmentUpdate>) {
        self.raw.push(c);
        if self.frames.peek().flags().in_string {
            self.string_char(c, out);
        } else {
            self.dispatch(c, out);
        }

        let complete = self.is_complete();
        if complete && !self.was_complete {
            debug!(tool = %self.tool_name, len = self.raw.len(), "document complete");
            out.push(FragmentUpdate::document_complete(&self.raw));
        }
        self.was_complete = complete;
    }

    fn dispatch(&mut self, c: char, out: &mut Vec<FragmentUpdate>) {
        if let Some(token) = self.token.as_mut() {
            if token.accepts(c) {
                token.push(c);
                return;
            }
            self.flush_token(out);
        }

        match c {
            '{' => self.open_container(FrameKind::Object, out),
            '[' => self.open_container(FrameKind::Array, out),
            '}' => self.close_container(FrameKind::Object, out),
            ']' => self.close_container(FrameKind::Array, out),
            ',' => self.comma(),
            ':' => self.colon(),
            '"' => self.open_string(out),
            c => {
                if let Some(token) = PendingToken::start(c) {
                    self.begin_value();
                    self.token = Some(token);
                }
            }
        }
    }

    /// Marks the top frame as holding a value in progress.
    fn begin_value(&mut self) {
        self.frames.peek_mut().flags_mut().at_boundary = false;
        self.after_colon = false;
    }

    fn open_container(&mut self, kind: FrameKind, out: &mut Vec<FragmentUpdate>) {
        self.frames.peek_mut().flags_mut().at_boundary = false;
        self.frames.push(kind, self.last_key.as_deref(), self.after_colon);
        self.after_colon = false;
        self.expecting_property_name = kind == FrameKind::Object;

        let update = if kind == FrameKind::Object {
            UpdateKind::StartObject
        } else {
            UpdateKind::StartArray
        };
        out.push(FragmentUpdate::container(
            update,
            container_path(self.frames.frames()),
        ));
    }

    fn close_container(&mut self, kind: FrameKind, out: &mut Vec<FragmentUpdate>) {
        if self.frames.peek().kind() != kind {
            debug!(tool = %self.tool_name, ?kind, "ignoring mismatched closer");
            return;
        }
        self.frames.peek_mut().flags_mut().at_boundary = true;
        let path = container_path(self.frames.frames());
        self.frames.pop(kind);
        self.expecting_property_name = false;
        self.after_colon = false;

        let update = if kind == FrameKind::Object {
            UpdateKind::EndObject
        } else {
            UpdateKind::EndArray
        };
        out.push(FragmentUpdate::container(update, path));
    }

    fn comma(&mut self) {
        match self.frames.peek_mut() {
            Frame::Array { index, .. } => *index += 1,
            Frame::Object { .. } => self.expecting_property_name = true,
            Frame::Root { .. } => {}
        }
        self.after_colon = false;
    }

    fn colon(&mut self) {
        if self.frames.peek().kind() == FrameKind::Object {
            self.after_colon = true;
            self.expecting_property_name = false;
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Strings
    // ---------------------------------------------------------------------------------------------

    fn open_string(&mut self, out: &mut Vec<FragmentUpdate>) {
        let is_key =
            self.expecting_property_name && self.frames.peek().kind() == FrameKind::Object;
        let flags = self.frames.peek_mut().flags_mut();
        flags.in_string = true;
        flags.in_escape = false;
        self.string_buf.clear();
        self.string_is_key = is_key;

        if !is_key {
            self.begin_value();
            self.string_path = value_path(self.frames.frames(), self.last_key.as_deref());
            out.push(FragmentUpdate::with_text(
                UpdateKind::StartString,
                self.string_path.clone(),
                "\"",
            ));
        }
    }

    fn string_char(&mut self, c: char, out: &mut Vec<FragmentUpdate>) {
        let flags = self.frames.peek_mut().flags_mut();
        if flags.in_escape {
            flags.in_escape = false;
        } else if c == '\\' {
            flags.in_escape = true;
        } else if c == '"' {
            flags.in_string = false;
            self.close_string(out);
            return;
        }

        self.string_buf.push(c);
        if !self.string_is_key {
            out.push(FragmentUpdate::with_text(
                UpdateKind::PartialString,
                self.string_path.clone(),
                c,
            ));
        }
    }

    fn close_string(&mut self, out: &mut Vec<FragmentUpdate>) {
        let body = mem::take(&mut self.string_buf);
        let decoded = decode_string_body(&body).unwrap_or_else(|| {
            debug!(tool = %self.tool_name, body = %body, "string kept undecoded");
            body.clone()
        });
        let text = format!("\"{body}\"");

        if self.string_is_key {
            self.expecting_property_name = false;
            out.push(FragmentUpdate::with_text(
                UpdateKind::Key,
                container_path(self.frames.frames()),
                text,
            ));
            self.last_key = Some(decoded);
        } else {
            out.push(FragmentUpdate::scalar(
                UpdateKind::CompleteString,
                mem::take(&mut self.string_path),
                text,
                Value::String(decoded),
            ));
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Numbers and literals
    // ---------------------------------------------------------------------------------------------

    fn flush_token(&mut self, out: &mut Vec<FragmentUpdate>) {
        let Some(token) = self.token.take() else {
            return;
        };
        let path = value_path(self.frames.frames(), self.last_key.as_deref());
        match token.finish() {
            Finished::Scalar { kind, text, value } => {
                out.push(FragmentUpdate::scalar(kind, path, text, value));
            }
            Finished::UnknownLiteral(text) => {
                debug!(tool = %self.tool_name, %path, literal = %text, "unknown literal reported as null");
                out.push(FragmentUpdate::scalar(
                    UpdateKind::CompleteNull,
                    path,
                    text,
                    Value::Null,
                ));
            }
            Finished::InvalidNumber(text) => {
                debug!(tool = %self.tool_name, %path, number = %text, "dropping invalid number");
            }
        }
    }
}

/// Updates produced by one [`FragmentParser::add_fragment`] call.
///
/// Consecutive `partial-string` updates for the same path are merged unless
/// [`ParserOptions::split_partial_strings`] is set.
#[derive(Debug)]
pub struct FragmentUpdates<'p, 's> {
    parser: &'p mut FragmentParser,
    chars: Chars<'s>,
    scratch: Vec<FragmentUpdate>,
    ready: VecDeque<FragmentUpdate>,
    coalescer: Coalescer,
}

impl Iterator for FragmentUpdates<'_, '_> {
    type Item = FragmentUpdate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(update) = self.ready.pop_front() {
                return Some(update);
            }
            let Some(c) = self.chars.next() else {
                self.coalescer.flush(&mut self.ready);
                return self.ready.pop_front();
            };
            self.parser.step(c, &mut self.scratch);
            // A flushed token, the character's own update and a completion.
            #[cfg(any(test, feature = "fuzzing"))]
            assert!(
                self.scratch.len() <= 3,
                "Internal error: {} updates from one character",
                self.scratch.len()
            );
            for update in self.scratch.drain(..) {
                self.coalescer.push(update, &mut self.ready);
            }
        }
    }
}

impl FusedIterator for FragmentUpdates<'_, '_> {}

impl Drop for FragmentUpdates<'_, '_> {
    fn drop(&mut self) {
        for c in self.chars.by_ref() {
            self.parser.step(c, &mut self.scratch);
            self.scratch.clear();
        }
    }
}
