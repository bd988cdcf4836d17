//! Window identifier allocation.

use crate::core::window::{
    Orientation, SizePolicy, WindowId, WindowKind, WindowNode,
};

/// Hands out [`WindowId`]s for one application context.
///
/// Semantics:
/// - IDs are unique within a context.
/// - IDs are not reused until the `u64` space wraps around.
#[derive(Debug, Default)]
pub struct WindowIds {
    next_id: u64,
}

impl WindowIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> WindowId {
        let id = WindowId::from_raw(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Allocate an id and build an empty node with it.
    pub fn new_window(
        &mut self,
        kind: WindowKind,
        orientation: Orientation,
        size: SizePolicy,
        cols: Option<usize>,
        rows: Option<usize>,
    ) -> WindowNode {
        WindowNode::new(self.allocate(), kind, orientation, size, cols, rows)
    }
}
