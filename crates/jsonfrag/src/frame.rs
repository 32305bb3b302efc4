//! Container context for resuming a parse across fragment boundaries.

/// Which kind of container a [`Frame`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Root,
    Object,
    Array,
}

/// Per-container flags that change character by character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameFlags {
    pub(crate) in_string: bool,
    pub(crate) in_escape: bool,
    /// Set right after the container opens or closes, cleared once a member
    /// value starts. Suppresses the array index in paths.
    pub(crate) at_boundary: bool,
}

impl FrameFlags {
    const fn fresh() -> Self {
        Self {
            in_string: false,
            in_escape: false,
            at_boundary: true,
        }
    }
}

/// Stack entry – one per open container, plus the root.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Frame {
    Root {
        flags: FrameFlags,
    },
    Object {
        /// Key this object was opened under, if it is an object member.
        property: Option<String>,
        flags: FrameFlags,
    },
    Array {
        property: Option<String>,
        /// Slot of the element currently being parsed.
        index: usize,
        flags: FrameFlags,
    },
}

impl Frame {
    fn root() -> Self {
        Frame::Root {
            flags: FrameFlags::fresh(),
        }
    }

    pub(crate) fn kind(&self) -> FrameKind {
        match self {
            Frame::Root { .. } => FrameKind::Root,
            Frame::Object { .. } => FrameKind::Object,
            Frame::Array { .. } => FrameKind::Array,
        }
    }

    pub(crate) fn flags(&self) -> &FrameFlags {
        match self {
            Frame::Root { flags } | Frame::Object { flags, .. } | Frame::Array { flags, .. } => {
                flags
            }
        }
    }

    pub(crate) fn flags_mut(&mut self) -> &mut FrameFlags {
        match self {
            Frame::Root { flags } | Frame::Object { flags, .. } | Frame::Array { flags, .. } => {
                flags
            }
        }
    }

    pub(crate) fn property(&self) -> Option<&str> {
        match self {
            Frame::Root { .. } => None,
            Frame::Object { property, .. } | Frame::Array { property, .. } => property.as_deref(),
        }
    }
}

/// The open containers, root first.
///
/// The root frame is seeded on construction and survives every `pop`, so the
/// stack is never empty.
#[derive(Debug, Clone)]
pub(crate) struct FrameStack {
    frames: Vec<Frame>,
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStack {
    pub(crate) fn new() -> Self {
        let mut frames = Vec::with_capacity(16);
        frames.push(Frame::root());
        Self { frames }
    }

    /// Opens a new object or array frame.
    ///
    /// Arrays never pass a name down to their elements; objects only do so
    /// when `after_colon` says the container is the value of `key`.
    pub(crate) fn push(&mut self, kind: FrameKind, key: Option<&str>, after_colon: bool) {
        let property = match self.peek().kind() {
            FrameKind::Object if after_colon => key.map(str::to_string),
            _ => None,
        };
        let flags = FrameFlags::fresh();
        let frame = match kind {
            FrameKind::Object => Frame::Object { property, flags },
            FrameKind::Array => Frame::Array {
                property,
                index: 0,
                flags,
            },
            // The root is only ever seeded by `new`.
            FrameKind::Root => return,
        };
        self.frames.push(frame);
    }

    /// Pops the top frame if it is a container of `kind`.
    ///
    /// Returns `false`, leaving the stack untouched, on a mismatched closer or
    /// when only the root remains.
    pub(crate) fn pop(&mut self, kind: FrameKind) -> bool {
        if self.frames.len() > 1 && self.peek().kind() == kind {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    pub(crate) fn peek(&self) -> &Frame {
        // `frames[0]` is the root and is never removed.
        &self.frames[self.frames.len() - 1]
    }

    pub(crate) fn peek_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub(crate) fn root(&self) -> &Frame {
        &self.frames[0]
    }

    pub(crate) fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames including the root.
    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn clear(&mut self) {
        self.frames.clear();
        self.frames.push(Frame::root());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_members_inherit_key_only_after_colon() {
        let mut stack = FrameStack::new();
        stack.push(FrameKind::Object, None, false);
        stack.push(FrameKind::Array, Some("items"), true);
        assert_eq!(stack.peek().property(), Some("items"));
        assert!(stack.pop(FrameKind::Array));

        stack.push(FrameKind::Object, Some("stale"), false);
        assert_eq!(stack.peek().property(), None);
    }

    #[test]
    fn array_elements_are_unnamed() {
        let mut stack = FrameStack::new();
        stack.push(FrameKind::Array, None, false);
        stack.push(FrameKind::Object, Some("ignored"), true);
        assert_eq!(stack.peek().property(), None);
    }

    #[test]
    fn mismatched_pop_is_a_no_op() {
        let mut stack = FrameStack::new();
        assert!(!stack.pop(FrameKind::Object));
        stack.push(FrameKind::Array, None, false);
        assert!(!stack.pop(FrameKind::Object));
        assert_eq!(stack.len(), 2);
        assert!(stack.pop(FrameKind::Array));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek().kind(), FrameKind::Root);
    }
}
