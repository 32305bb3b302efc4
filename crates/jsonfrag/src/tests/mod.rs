mod arbitrary;

use crate::{FragmentParser, FragmentUpdate, UpdateKind};

/// Feeds `fragments` in order and collects every update.
pub(crate) fn feed_all(parser: &mut FragmentParser, fragments: &[&str]) -> Vec<FragmentUpdate> {
    let mut updates = Vec::new();
    for fragment in fragments {
        updates.extend(parser.add_fragment(fragment));
    }
    updates
}

/// `(kind, path, text)` triples, which is what most assertions care about.
pub(crate) fn triples(updates: &[FragmentUpdate]) -> Vec<(UpdateKind, &str, Option<&str>)> {
    updates
        .iter()
        .map(|u| (u.kind, u.path.as_str(), u.text.as_deref()))
        .collect()
}

/// Number of tests to run per quickcheck property.
pub(crate) fn quickcheck_tests() -> u64 {
    if is_ci::cached() { 2_000 } else { 500 }
}
