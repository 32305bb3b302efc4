//! Merges runs of same-path `partial-string` updates.
use std::collections::VecDeque;

use crate::event::FragmentUpdate;

/// Holds at most one partial-string update back so that the next one can be
/// appended to it.
///
/// Anything other than a same-path partial flushes the held update first, so
/// output order always matches input order.
#[derive(Debug, Default)]
pub(crate) struct Coalescer {
    held: Option<FragmentUpdate>,
    disabled: bool,
}

impl Coalescer {
    pub(crate) fn new(disabled: bool) -> Self {
        Self {
            held: None,
            disabled,
        }
    }

    pub(crate) fn push(&mut self, update: FragmentUpdate, out: &mut VecDeque<FragmentUpdate>) {
        if self.disabled {
            out.push_back(update);
            return;
        }
        if !update.is_partial() {
            self.flush(out);
            out.push_back(update);
            return;
        }
        if let Some(held) = self.held.as_mut().filter(|h| h.path == update.path) {
            if let (Some(acc), Some(more)) = (held.text.as_mut(), update.text.as_deref()) {
                acc.push_str(more);
            }
            return;
        }
        self.flush(out);
        self.held = Some(update);
    }

    pub(crate) fn flush(&mut self, out: &mut VecDeque<FragmentUpdate>) {
        if let Some(held) = self.held.take() {
            out.push_back(held);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::UpdateKind;

    fn partial(path: &str, text: &str) -> FragmentUpdate {
        FragmentUpdate::with_text(UpdateKind::PartialString, path.into(), text)
    }

    fn texts(out: &VecDeque<FragmentUpdate>) -> Vec<(&str, &str)> {
        out.iter()
            .map(|u| (u.path.as_str(), u.text.as_deref().unwrap_or("")))
            .collect()
    }

    #[test]
    fn merges_same_path_and_splits_on_path_change() {
        let mut c = Coalescer::new(false);
        let mut out = VecDeque::new();
        c.push(partial("root.a", "h"), &mut out);
        c.push(partial("root.a", "i"), &mut out);
        c.push(partial("root.b", "x"), &mut out);
        assert_eq!(texts(&out), vec![("root.a", "hi")]);
        c.flush(&mut out);
        assert_eq!(texts(&out), vec![("root.a", "hi"), ("root.b", "x")]);
    }

    #[test]
    fn other_updates_flush_first() {
        let mut c = Coalescer::new(false);
        let mut out = VecDeque::new();
        c.push(partial("root.a", "h"), &mut out);
        c.push(
            FragmentUpdate::with_text(UpdateKind::CompleteString, "root.a".into(), "\"h\""),
            &mut out,
        );
        assert_eq!(out.len(), 2);
        assert!(out[0].is_partial());
        assert_eq!(out[1].kind, UpdateKind::CompleteString);
    }

    #[test]
    fn disabled_passes_through() {
        let mut c = Coalescer::new(true);
        let mut out = VecDeque::new();
        c.push(partial("root", "a"), &mut out);
        c.push(partial("root", "b"), &mut out);
        assert_eq!(out.len(), 2);
    }
}
