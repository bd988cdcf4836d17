//! Menu list widget: the content area of a simple index dialog.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::component::{Component, Focusable};
use crate::core::text::truncate_to_width;
use crate::core::window::MenuKind;

/// Menu state shared between the list widget and whoever drives the dialog.
///
/// The dialog root keeps a handle to this as its `wdata`; use
/// [`MenuState::from_wdata`] to get it back.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub kind: MenuKind,
    items: Vec<String>,
    current: usize,
}

impl MenuState {
    pub fn new(kind: MenuKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            current: 0,
        }
    }

    pub fn from_wdata(wdata: &Rc<dyn Any>) -> Option<Rc<RefCell<MenuState>>> {
        Rc::clone(wdata).downcast::<RefCell<MenuState>>().ok()
    }

    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.current = self.current.min(self.items.len().saturating_sub(1));
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_item(&self) -> Option<&str> {
        self.items.get(self.current).map(String::as_str)
    }

    pub fn set_current(&mut self, index: usize) {
        if self.items.is_empty() {
            self.current = 0;
        } else {
            self.current = index.min(self.items.len() - 1);
        }
    }

    /// Wraps from the last entry to the first.
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.items.len();
    }

    /// Wraps from the first entry to the last.
    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.current = self.current.checked_sub(1).unwrap_or(self.items.len() - 1);
    }
}

pub struct MenuList {
    state: Rc<RefCell<MenuState>>,
    rows: Option<usize>,
    focused: bool,
}

impl MenuList {
    pub fn new(kind: MenuKind) -> Self {
        Self {
            state: Rc::new(RefCell::new(MenuState::new(kind))),
            rows: None,
            focused: false,
        }
    }

    pub fn state(&self) -> Rc<RefCell<MenuState>> {
        Rc::clone(&self.state)
    }
}

impl Component for MenuList {
    fn render(&mut self, width: usize) -> Vec<String> {
        let state = self.state.borrow();
        if state.items.is_empty() {
            return vec![truncate_to_width("  No entries", width, false)];
        }

        let max_visible = self.rows.unwrap_or(state.items.len()).max(1).min(state.items.len());
        let half = max_visible / 2;
        let start = if state.items.len() <= max_visible {
            0
        } else {
            let candidate = state.current.saturating_sub(half);
            candidate.min(state.items.len() - max_visible)
        };
        let end = (start + max_visible).min(state.items.len());

        let marker = if self.focused { "→ " } else { "> " };
        state.items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| {
                let prefix = if start + offset == state.current {
                    marker
                } else {
                    "  "
                };
                truncate_to_width(&format!("{prefix}{item}"), width, false)
            })
            .collect()
    }

    fn set_viewport_size(&mut self, _cols: usize, rows: usize) {
        self.rows = Some(rows);
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for MenuList {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}
