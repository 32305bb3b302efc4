/// Configuration options for the fragment parser.
///
/// # Examples
///
/// ```rust
/// use jsonfrag::{FragmentParser, ParserOptions};
///
/// let parser = FragmentParser::with_options(
///     "search",
///     ParserOptions {
///         split_partial_strings: true,
///     },
/// );
/// assert_eq!(parser.tool_name(), "search");
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether to emit one `partial-string` update per string character.
    ///
    /// By default, consecutive partial-string updates that share a path are
    /// merged into a single update before they are yielded, so a long string
    /// streamed in one fragment arrives as one update. Enabling this yields
    /// the per-character updates unmerged, which is mostly useful for
    /// debugging consumers that accumulate string content.
    ///
    /// # Default
    ///
    /// `false`
    pub split_partial_strings: bool,
}
