//! Status bar placement.

use std::rc::Rc;

use crate::core::window::{WindowKind, WindowNode};

/// Order a dialog's two children: `[status, content]` when the status bar goes
/// on top, `[content, status]` otherwise.
pub fn arrange<T>(status_on_top: bool, content: T, status: T) -> [T; 2] {
    if status_on_top {
        [status, content]
    } else {
        [content, status]
    }
}

/// Re-apply [`arrange`] to a built dialog's existing children.
///
/// The content child is the dialog's focus target and the status child is its
/// status-bar window. The same two nodes are put back in the new order and the
/// dialog is marked for reflow. Returns whether the order changed; dialogs without
/// that pair of children are left alone.
pub fn apply_status_on_top(dialog: &mut WindowNode, status_on_top: bool) -> bool {
    let (Some(content), Some(status)) = (
        dialog.focus_window(),
        dialog.find_child(WindowKind::StatusBar),
    ) else {
        tracing::debug!(dialog = %dialog.id(), "no content/status pair to arrange");
        return false;
    };

    let next = arrange(status_on_top, content, status);
    let unchanged = dialog
        .children()
        .iter()
        .zip(next.iter())
        .all(|(current, wanted)| Rc::ptr_eq(current, wanted));
    if unchanged {
        return false;
    }

    if let Err(err) = dialog.replace_children(next.into()) {
        tracing::warn!(dialog = %dialog.id(), %err, "dialog children not rearranged");
        return false;
    }
    dialog.mark_dirty();
    true
}
