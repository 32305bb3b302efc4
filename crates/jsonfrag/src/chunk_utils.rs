//! Helpers for cutting a document into fragments the way a streaming
//! transport would.
//!
//! Both helpers only ever cut on `char` boundaries, so every fragment is valid
//! `&str` and the fragments concatenate back to the input.

/// Splits `payload` into at most `parts` fragments of roughly equal byte
/// length.
///
/// ```
/// use jsonfrag::even_fragments;
///
/// let fragments = even_fragments(r#"{"a":"hé"}"#, 3);
/// assert_eq!(fragments.concat(), r#"{"a":"hé"}"#);
/// assert!(fragments.len() <= 3);
/// ```
#[must_use]
pub fn even_fragments(payload: &str, parts: usize) -> Vec<&str> {
    let parts = parts.max(1);
    let step = payload.len().div_ceil(parts).max(1);
    let mut fragments = Vec::with_capacity(parts);
    let mut rest = payload;
    while !rest.is_empty() {
        let mut cut = step.min(rest.len());
        while !rest.is_char_boundary(cut) {
            cut += 1;
        }
        let (head, tail) = rest.split_at(cut);
        fragments.push(head);
        rest = tail;
    }
    fragments
}

/// Splits `payload` into fragments of `sizes[0]`, `sizes[1]`, … characters,
/// cycling through `sizes` until the input runs out.
///
/// Zero sizes are treated as one, and an empty `sizes` yields one-character
/// fragments.
///
/// ```
/// use jsonfrag::fragments_by_sizes;
///
/// assert_eq!(
///     fragments_by_sizes(r#"{"n":12.5}"#, &[3, 1]),
///     vec![r#"{"n"#, r#"""#, r#":12"#, ".", r#"5}"#]
/// );
/// ```
#[must_use]
pub fn fragments_by_sizes<'a>(payload: &'a str, sizes: &[usize]) -> Vec<&'a str> {
    let mut fragments = Vec::new();
    let mut rest = payload;
    let mut turn = 0usize;
    while !rest.is_empty() {
        let chars = sizes.get(turn % sizes.len().max(1)).copied().unwrap_or(1).max(1);
        let cut = rest
            .char_indices()
            .nth(chars)
            .map_or(rest.len(), |(offset, _)| offset);
        let (head, tail) = rest.split_at(cut);
        fragments.push(head);
        rest = tail;
        turn += 1;
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_fragments_respect_multibyte_boundaries() {
        let payload = r#"{"é":["😊o","b🚀"]}"#;
        for parts in 1..=payload.len() {
            let fragments = even_fragments(payload, parts);
            assert_eq!(fragments.concat(), payload);
            assert!(fragments.iter().all(|f| !f.is_empty()));
        }
    }

    #[test]
    fn sizes_cycle() {
        assert_eq!(fragments_by_sizes("abcdef", &[1, 2]), vec!["a", "bc", "d", "ef"]);
        assert_eq!(fragments_by_sizes("abc", &[]), vec!["a", "b", "c"]);
        assert_eq!(fragments_by_sizes("abc", &[0]), vec!["a", "b", "c"]);
        assert!(fragments_by_sizes("", &[4]).is_empty());
    }
}
