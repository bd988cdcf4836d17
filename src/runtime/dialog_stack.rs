//! Ordered record of open dialogs.
//!
//! The stack does not own dialogs. It tracks presentation order by id plus weak
//! references to each dialog's root and focus target, so input can be routed to
//! the topmost dialog and focus restored when it closes. A dialog whose root has
//! been released is no longer listed, even if it was never popped.

use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::core::window::{WindowId, WindowRc, WindowWeak};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StackError {
    #[error("dialog stack is empty")]
    Empty,
    #[error("cannot pop {requested}: {top} is on top")]
    NotTop { requested: WindowId, top: WindowId },
}

struct StackEntry {
    id: WindowId,
    root: WindowWeak,
    focus: WindowWeak,
}

impl StackEntry {
    fn is_live(&self) -> bool {
        self.root.strong_count() > 0
    }
}

#[derive(Default)]
pub struct DialogStack {
    entries: Vec<StackEntry>,
}

impl DialogStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, root: &WindowRc, focus: Option<&WindowRc>) {
        self.prune();
        let id = root.borrow().id();
        let focus = focus.map(Rc::downgrade).unwrap_or_default();
        self.entries.push(StackEntry {
            id,
            root: Rc::downgrade(root),
            focus,
        });
    }

    /// Remove `id`, which must be the top live entry.
    pub fn pop(&mut self, id: WindowId) -> Result<(), StackError> {
        self.prune();
        let top = self.top().ok_or(StackError::Empty)?;
        if top != id {
            return Err(StackError::NotTop { requested: id, top });
        }
        self.entries.pop();
        Ok(())
    }

    /// Remove `id` wherever it sits. Returns whether it was present.
    pub(crate) fn remove(&mut self, id: WindowId) -> bool {
        self.prune();
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn top(&self) -> Option<WindowId> {
        self.top_entry().map(|entry| entry.id)
    }

    /// Focus target of the topmost dialog, if it is still alive.
    pub fn top_focus(&self) -> Option<WindowRc> {
        self.top_entry().and_then(|entry| Weak::upgrade(&entry.focus))
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.live().any(|entry| entry.id == id)
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.live().map(|entry| entry.id).collect()
    }

    pub fn len(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn top_entry(&self) -> Option<&StackEntry> {
        self.entries.iter().rev().find(|entry| entry.is_live())
    }

    fn live(&self) -> impl Iterator<Item = &StackEntry> {
        self.entries.iter().filter(|entry| entry.is_live())
    }

    fn prune(&mut self) {
        self.entries.retain(|entry| {
            let live = entry.is_live();
            if !live {
                tracing::warn!(dialog = %entry.id, "released dialog dropped from stack");
            }
            live
        });
    }
}
