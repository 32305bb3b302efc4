//! String paths derived from the frame stack.
//!
//! Paths start at [`ROOT`]; object members add `.name` and array elements add
//! `[index]`, e.g. `root.items[2].name`.
use std::fmt::Write;

use crate::frame::{Frame, FrameKind};

/// Path of the document root.
pub const ROOT: &str = "root";

/// Path of the innermost open container.
///
/// This is also where `key` updates live: a key belongs to its container.
pub(crate) fn container_path(frames: &[Frame]) -> String {
    let mut path = String::from(ROOT);
    for frame in frames {
        if let Some(name) = frame.property() {
            path.push('.');
            path.push_str(name);
        }
        if let Frame::Array { index, flags, .. } = frame {
            if !flags.at_boundary {
                // Writing to a `String` cannot fail.
                let _ = write!(path, "[{index}]");
            }
        }
    }
    path
}

/// Path of a scalar value in the innermost open container.
///
/// Inside an object the value sits under the most recently completed key.
pub(crate) fn value_path(frames: &[Frame], last_key: Option<&str>) -> String {
    let mut path = container_path(frames);
    if let (Some(top), Some(key)) = (frames.last(), last_key) {
        if top.kind() == FrameKind::Object {
            path.push('.');
            path.push_str(key);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameKind, FrameStack};

    #[test]
    fn array_index_hidden_at_boundary() {
        let mut stack = FrameStack::new();
        stack.push(FrameKind::Object, None, false);
        stack.push(FrameKind::Array, Some("arr"), true);
        assert_eq!(container_path(stack.frames()), "root.arr");

        stack.peek_mut().flags_mut().at_boundary = false;
        assert_eq!(container_path(stack.frames()), "root.arr[0]");
    }

    #[test]
    fn object_values_take_last_key() {
        let mut stack = FrameStack::new();
        stack.push(FrameKind::Object, None, false);
        assert_eq!(value_path(stack.frames(), Some("a")), "root.a");
        assert_eq!(container_path(stack.frames()), "root");
    }

    #[test]
    fn nested_arrays() {
        let mut stack = FrameStack::new();
        stack.push(FrameKind::Array, None, false);
        stack.peek_mut().flags_mut().at_boundary = false;
        stack.push(FrameKind::Array, None, false);
        stack.peek_mut().flags_mut().at_boundary = false;
        if let Frame::Array { index, .. } = stack.peek_mut() {
            *index = 3;
        }
        assert_eq!(value_path(stack.frames(), Some("x")), "root[0][3]");
    }
}
