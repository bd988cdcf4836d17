//! Input focus tracking for the window tree.

use std::rc::Rc;

use crate::core::window::{WindowId, WindowRc};

#[derive(Default)]
pub struct FocusState {
    focused: Option<WindowRc>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_focus(&mut self, target: Option<WindowRc>) {
        if let (Some(prev), Some(next)) = (self.focused.as_ref(), target.as_ref()) {
            if Rc::ptr_eq(prev, next) {
                return;
            }
        }

        if let Some(prev) = self.focused.take() {
            prev.borrow_mut().set_focused(false);
        }

        if let Some(next) = target {
            next.borrow_mut().set_focused(true);
            self.focused = Some(next);
        }
    }

    pub fn clear(&mut self) {
        self.set_focus(None);
    }

    pub fn focused(&self) -> Option<WindowRc> {
        self.focused.as_ref().map(Rc::clone)
    }

    pub fn focused_id(&self) -> Option<WindowId> {
        self.focused.as_ref().map(|window| window.borrow().id())
    }
}
