//! Simple index dialogs: a menu list plus a status bar.
//!
//! Lifecycle:
//! - [`create_simple_index`] builds the tree, arranges the children from the current
//!   `status_on_top` value, activates a [`ConfigChangeBridge`] and pushes the dialog
//!   onto the dialog stack.
//! - [`destroy_simple_index`] pops the stack, restores focus, deactivates the bridge
//!   and only then releases the tree, so no config notification can reach a dialog
//!   that is being torn down.

use std::any::Any;
use std::rc::Rc;

use crate::config::STATUS_ON_TOP;
use crate::core::component::Component;
use crate::core::window::{
    DialogKind, HelpBinding, HelpMapping, MenuKind, Orientation, SizePolicy, WindowId,
    WindowKind, WindowNode, WindowRc,
};
use crate::dialog::bridge::{BridgeState, ConfigChangeBridge};
use crate::dialog::layout::arrange;
use crate::runtime::context::AppContext;
use crate::runtime::dialog_stack::StackError;
use crate::runtime::window_registry::WindowIds;
use crate::widgets::{MenuList, StatusBar};

/// Supplies the content and status windows of a dialog.
pub trait WindowFactory {
    /// A menu window for `menu`. Its `wdata` is copied onto the dialog root.
    fn menu_window(&mut self, ids: &mut WindowIds, menu: MenuKind) -> WindowRc;

    /// A status bar for `dialog`, which already carries its kind and help metadata.
    fn status_window(&mut self, ids: &mut WindowIds, dialog: &WindowNode) -> WindowRc;
}

/// Builds [`MenuList`] content and a one-row [`StatusBar`] titled after the dialog.
#[derive(Debug, Default)]
pub struct DefaultWindowFactory;

impl WindowFactory for DefaultWindowFactory {
    fn menu_window(&mut self, ids: &mut WindowIds, menu: MenuKind) -> WindowRc {
        let list = MenuList::new(menu);
        let state: Rc<dyn Any> = list.state();
        let mut window = ids
            .new_window(
                WindowKind::Menu,
                Orientation::Vertical,
                SizePolicy::Maximise,
                None,
                None,
            )
            .with_payload(Box::new(list));
        window.set_wdata(Some(state));
        window.into_rc()
    }

    fn status_window(&mut self, ids: &mut WindowIds, dialog: &WindowNode) -> WindowRc {
        let title = match dialog.kind() {
            WindowKind::Dialog(kind) => kind.title(),
            _ => "",
        };
        ids.new_window(
            WindowKind::StatusBar,
            Orientation::Horizontal,
            SizePolicy::Fixed,
            None,
            Some(1),
        )
        .with_payload(Box::new(StatusBar::new(title)))
        .into_rc()
    }
}

/// An open dialog. Owns the window tree and the config bridge.
///
/// Close it with [`DialogHandle::destroy`] or [`destroy_simple_index`]. Merely
/// dropping it cancels the bridge and releases the tree; the stack stops listing
/// the dialog, but focus is not moved back to the dialog below.
pub struct DialogHandle {
    root: WindowRc,
    bridge: ConfigChangeBridge,
}

impl DialogHandle {
    pub fn id(&self) -> WindowId {
        self.root.borrow().id()
    }

    pub fn window(&self) -> &WindowRc {
        &self.root
    }

    /// Kinds of the root's children, top to bottom.
    pub fn child_kinds(&self) -> Vec<WindowKind> {
        self.root
            .borrow()
            .children()
            .iter()
            .map(|child| child.borrow().kind())
            .collect()
    }

    pub fn content(&self) -> Option<WindowRc> {
        self.root.borrow().focus_window()
    }

    pub fn status_bar(&self) -> Option<WindowRc> {
        self.root.borrow().find_child(WindowKind::StatusBar)
    }

    pub fn bridge_state(&self) -> BridgeState {
        self.bridge.state()
    }

    /// Reflow to `cols` x `rows` and render as plain text lines.
    ///
    /// Picks up a `status_on_top` change that arrived while the root was borrowed.
    pub fn render(&self, cols: usize, rows: usize) -> Vec<String> {
        self.bridge.sync();
        let mut root = self.root.borrow_mut();
        root.reflow(cols, rows);
        root.render(cols)
    }

    pub fn destroy(self, ctx: &mut AppContext) {
        let mut slot = Some(self);
        destroy_simple_index(ctx, &mut slot);
    }
}

#[must_use = "dialogs must be passed to `destroy_simple_index`"]
pub fn create_simple_index(
    ctx: &mut AppContext,
    menu: MenuKind,
    dialog: DialogKind,
    help: Option<&'static [HelpMapping]>,
) -> DialogHandle {
    create_simple_index_with(ctx, &mut DefaultWindowFactory, menu, dialog, help)
}

#[must_use = "dialogs must be passed to `destroy_simple_index`"]
pub fn create_simple_index_with(
    ctx: &mut AppContext,
    factory: &mut dyn WindowFactory,
    menu: MenuKind,
    dialog: DialogKind,
    help: Option<&'static [HelpMapping]>,
) -> DialogHandle {
    let mut root = ctx.ids.new_window(
        WindowKind::Dialog(dialog),
        Orientation::Vertical,
        SizePolicy::Maximise,
        None,
        None,
    );
    root.set_help(HelpBinding { menu, table: help });

    let content = factory.menu_window(&mut ctx.ids, menu);
    {
        let content = content.borrow();
        root.set_focus(content.id());
        root.set_wdata(content.wdata());
    }

    let status = factory.status_window(&mut ctx.ids, &root);

    let status_on_top = ctx.config.get_bool(STATUS_ON_TOP).unwrap_or_else(|err| {
        tracing::warn!(%err, "treating status_on_top as unset");
        false
    });
    for child in arrange(status_on_top, Rc::clone(&content), status) {
        root.add_child(child);
    }

    let root = root.into_rc();
    let mut bridge = ConfigChangeBridge::new(&root, ctx.config.clone());
    bridge.activate(&ctx.bus);

    let id = root.borrow().id();
    ctx.dialogs.push(&root, Some(&content));
    ctx.focus.set_focus(Some(content));
    tracing::debug!(dialog = %id, kind = ?dialog, ?menu, status_on_top, "dialog created");

    DialogHandle { root, bridge }
}

/// Tear down the dialog in `slot` and leave `None` behind. Empty slots are a no-op.
pub fn destroy_simple_index(ctx: &mut AppContext, slot: &mut Option<DialogHandle>) {
    let Some(handle) = slot.take() else {
        return;
    };
    let DialogHandle { root, mut bridge } = handle;
    let id = root.borrow().id();

    match ctx.dialogs.pop(id) {
        Ok(()) => {}
        Err(err @ StackError::NotTop { .. }) => {
            tracing::warn!(dialog = %id, %err, "dialog closed out of order");
            ctx.dialogs.remove(id);
        }
        Err(err @ StackError::Empty) => {
            tracing::warn!(dialog = %id, %err, "dialog was not on the stack");
        }
    }
    ctx.focus.set_focus(ctx.dialogs.top_focus());

    bridge.deactivate();
    drop(bridge);
    drop(root);
    tracing::debug!(dialog = %id, "dialog destroyed");
}
