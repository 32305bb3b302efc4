//! Incremental parsing of JSON text that arrives in arbitrary fragments.
//!
//! LLM providers stream tool-call arguments as JSON split at arbitrary points:
//! mid-string, mid-escape, mid-number or mid-key. [`FragmentParser`] consumes
//! those fragments one at a time and reports structural progress as
//! [`FragmentUpdate`]s: which containers opened or closed, which key is being
//! filled, what partial string content arrived, and when the document became
//! complete.
//!
//! ```rust
//! use jsonfrag::{FragmentParser, UpdateKind};
//!
//! let mut parser = FragmentParser::new("get_weather");
//! let mut city = String::new();
//! for fragment in [r#"{"city":"Os"#, r#"lo","days":3}"#] {
//!     for update in parser.add_fragment(fragment) {
//!         if update.kind == UpdateKind::PartialString && update.path == "root.city" {
//!             city.push_str(update.text.as_deref().unwrap_or_default());
//!         }
//!     }
//! }
//! assert_eq!(city, "Oslo");
//! assert!(parser.is_complete());
//! assert_eq!(parser.try_extract_property::<u32>("days"), Some(3));
//! ```

mod chunk_utils;
mod coalesce;
mod error;
mod event;
mod frame;
mod options;
mod parser;
mod path;
mod token;
mod value;

#[cfg(test)]
mod tests;

pub use chunk_utils::{even_fragments, fragments_by_sizes};
pub use error::CompleteDocumentError;
pub use event::{FragmentUpdate, UpdateKind};
pub use options::ParserOptions;
pub use parser::{FragmentParser, FragmentUpdates};
pub use path::ROOT;
pub use value::{Array, Map, Value};
