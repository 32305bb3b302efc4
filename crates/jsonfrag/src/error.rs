use thiserror::Error;

/// Why the accumulated text could not be read as a complete document.
#[derive(Error, Debug)]
pub enum CompleteDocumentError {
    /// The parser has not seen a balanced, idle document yet.
    #[error("document is not complete")]
    Incomplete,
    /// The text is complete but does not deserialize into the requested type.
    #[error("deserialize error: {0}")]
    Deserialize(#[from] serde_json::Error),
}
