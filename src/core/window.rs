//! Window tree nodes.
//!
//! A [`WindowNode`] owns its children. Dropping a node drops its whole subtree;
//! everything else in the crate holds [`WindowWeak`] back-references.
//!
//! [`WindowNode::reflow`] and the [`Component`] impl are a plain-text preview: they
//! split the node's cells among children and return `String` rows. Nothing here
//! writes to a terminal; a host with its own painter only needs the tree order and
//! the dirty flag.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::core::component::Component;
use crate::core::text::truncate_to_width;

pub type WindowRc = Rc<RefCell<WindowNode>>;
pub type WindowWeak = Weak<RefCell<WindowNode>>;

/// Stable identifier for a window allocated by a single application context.
///
/// IDs are never reused for the lifetime of the context.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct WindowId(u64);

impl WindowId {
    pub fn raw(self) -> u64 {
        self.0
    }

    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win#{}", self.0)
    }
}

/// Which list a dialog is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Alias,
    Attach,
    Autocrypt,
    Browser,
    Certificate,
    History,
    Pattern,
    Pgp,
    Postpone,
    Query,
    Smime,
}

impl DialogKind {
    /// Title shown in the dialog's status bar.
    pub fn title(self) -> &'static str {
        match self {
            Self::Alias => "Aliases",
            Self::Attach => "Attachments",
            Self::Autocrypt => "Autocrypt Accounts",
            Self::Browser => "Folders",
            Self::Certificate => "Certificates",
            Self::History => "History",
            Self::Pattern => "Patterns",
            Self::Pgp => "PGP Keys",
            Self::Postpone => "Postponed Messages",
            Self::Query => "Query Results",
            Self::Smime => "S/MIME Certificates",
        }
    }
}

/// Menu flavour requested from the menu collaborator; also selects help bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    Alias,
    Attach,
    Autocrypt,
    Folder,
    Generic,
    Pgp,
    Postpone,
    Query,
    Smime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Dialog(DialogKind),
    Menu,
    StatusBar,
}

impl WindowKind {
    pub fn is_dialog(self) -> bool {
        matches!(self, Self::Dialog(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// How a window competes for space with its siblings during reflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePolicy {
    /// Take exactly the requested size.
    Fixed,
    /// Share whatever the fixed siblings leave over.
    #[default]
    Maximise,
}

/// One `key:label` entry of a help bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpMapping {
    pub key: &'static str,
    pub label: &'static str,
}

impl HelpMapping {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Help-bar metadata attached to a dialog root. Not interpreted by the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpBinding {
    pub menu: MenuKind,
    pub table: Option<&'static [HelpMapping]>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("new children of {parent} must be a permutation of its current children")]
    NotAPermutation { parent: WindowId },
}

pub struct WindowNode {
    id: WindowId,
    kind: WindowKind,
    orientation: Orientation,
    size: SizePolicy,
    req_cols: Option<usize>,
    req_rows: Option<usize>,
    children: Vec<WindowRc>,
    focus: Option<WindowId>,
    payload: Option<Box<dyn Component>>,
    wdata: Option<Rc<dyn Any>>,
    help: Option<HelpBinding>,
    allocated: Option<(usize, usize)>,
    dirty: bool,
}

impl WindowNode {
    /// `None` for `cols`/`rows` means unlimited.
    pub fn new(
        id: WindowId,
        kind: WindowKind,
        orientation: Orientation,
        size: SizePolicy,
        cols: Option<usize>,
        rows: Option<usize>,
    ) -> Self {
        Self {
            id,
            kind,
            orientation,
            size,
            req_cols: cols,
            req_rows: rows,
            children: Vec::new(),
            focus: None,
            payload: None,
            wdata: None,
            help: None,
            allocated: None,
            dirty: true,
        }
    }

    pub fn with_payload(mut self, payload: Box<dyn Component>) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn into_rc(self) -> WindowRc {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn size_policy(&self) -> SizePolicy {
        self.size
    }

    pub fn requested_size(&self) -> (Option<usize>, Option<usize>) {
        (self.req_cols, self.req_rows)
    }

    /// Space given by the last reflow, as `(cols, rows)`.
    pub fn allocated(&self) -> Option<(usize, usize)> {
        self.allocated
    }

    pub fn add_child(&mut self, child: WindowRc) {
        self.children.push(child);
        self.dirty = true;
    }

    pub fn children(&self) -> &[WindowRc] {
        &self.children
    }

    pub fn child_ids(&self) -> Vec<WindowId> {
        self.children.iter().map(|child| child.borrow().id).collect()
    }

    pub fn find_child(&self, kind: WindowKind) -> Option<WindowRc> {
        self.children
            .iter()
            .find(|child| child.borrow().kind == kind)
            .map(Rc::clone)
    }

    pub fn child_by_id(&self, id: WindowId) -> Option<WindowRc> {
        self.children
            .iter()
            .find(|child| child.borrow().id == id)
            .map(Rc::clone)
    }

    /// Swap in a new ordering of the same children.
    ///
    /// The replacement must contain exactly the current child nodes (by
    /// identity); anything else is rejected and the old order is kept.
    pub fn replace_children(&mut self, children: Vec<WindowRc>) -> Result<(), WindowError> {
        let is_permutation = children.len() == self.children.len()
            && children.iter().all(|next| {
                self.children.iter().any(|current| Rc::ptr_eq(current, next))
            })
            && self.children.iter().all(|current| {
                children.iter().filter(|next| Rc::ptr_eq(current, next)).count() == 1
            });
        if !is_permutation {
            return Err(WindowError::NotAPermutation { parent: self.id });
        }

        self.children = children;
        self.dirty = true;
        Ok(())
    }

    pub fn set_focus(&mut self, child: WindowId) {
        self.focus = Some(child);
    }

    pub fn focus(&self) -> Option<WindowId> {
        self.focus
    }

    pub fn focus_window(&self) -> Option<WindowRc> {
        self.focus.and_then(|id| self.child_by_id(id))
    }

    pub fn set_wdata(&mut self, wdata: Option<Rc<dyn Any>>) {
        self.wdata = wdata;
    }

    pub fn wdata(&self) -> Option<Rc<dyn Any>> {
        self.wdata.as_ref().map(Rc::clone)
    }

    pub fn set_help(&mut self, help: HelpBinding) {
        self.help = Some(help);
    }

    pub fn help(&self) -> Option<HelpBinding> {
        self.help
    }

    pub fn payload_mut(&mut self) -> Option<&mut (dyn Component + 'static)> {
        self.payload.as_deref_mut()
    }

    /// Route focus to the payload, if it tracks focus.
    pub fn set_focused(&mut self, focused: bool) {
        if let Some(focusable) = self.payload.as_mut().and_then(|p| p.as_focusable()) {
            focusable.set_focused(focused);
        }
    }

    pub fn is_focused(&mut self) -> bool {
        self.payload
            .as_mut()
            .and_then(|p| p.as_focusable())
            .is_some_and(|focusable| focusable.is_focused())
    }

    /// Request a reflow before the next render.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Distribute `cols` x `rows` across the subtree for the text preview.
    ///
    /// Fixed children get their requested extent along the orientation axis
    /// (clamped to what is left); maximised children split the remainder, with
    /// earlier children taking any odd cell.
    pub fn reflow(&mut self, cols: usize, rows: usize) {
        self.allocated = Some((cols, rows));
        self.dirty = false;
        if let Some(payload) = self.payload.as_mut() {
            payload.set_viewport_size(cols, rows);
        }
        if self.children.is_empty() {
            return;
        }

        let axis_total = match self.orientation {
            Orientation::Vertical => rows,
            Orientation::Horizontal => cols,
        };

        let mut extents = vec![0usize; self.children.len()];
        let mut remaining = axis_total;
        let mut maximised = Vec::new();
        for (idx, child) in self.children.iter().enumerate() {
            let child = child.borrow();
            let requested = match self.orientation {
                Orientation::Vertical => child.req_rows,
                Orientation::Horizontal => child.req_cols,
            };
            match (child.size, requested) {
                (SizePolicy::Fixed, Some(requested)) => {
                    let extent = requested.min(remaining);
                    extents[idx] = extent;
                    remaining -= extent;
                }
                _ => maximised.push(idx),
            }
        }

        if !maximised.is_empty() {
            let share = remaining / maximised.len();
            let mut extra = remaining % maximised.len();
            for idx in maximised {
                extents[idx] = share + usize::from(extra > 0);
                extra = extra.saturating_sub(1);
            }
        }

        for (child, extent) in self.children.iter().zip(extents) {
            let (child_cols, child_rows) = match self.orientation {
                Orientation::Vertical => (cols, extent),
                Orientation::Horizontal => (extent, rows),
            };
            child.borrow_mut().reflow(child_cols, child_rows);
        }
    }
}

impl Component for WindowNode {
    fn render(&mut self, width: usize) -> Vec<String> {
        let width = self.allocated.map_or(width, |(cols, _)| cols.min(width));
        let mut lines = match self.payload.as_mut() {
            Some(payload) => payload.render(width),
            None => Vec::new(),
        };

        match self.orientation {
            Orientation::Vertical => {
                for child in self.children.iter() {
                    lines.extend(child.borrow_mut().render(width));
                }
            }
            Orientation::Horizontal if !self.children.is_empty() => {
                let even = width / self.children.len();
                let columns: Vec<(usize, Vec<String>)> = self
                    .children
                    .iter()
                    .map(|child| {
                        let mut child = child.borrow_mut();
                        let cols = child.allocated.map_or(even, |(cols, _)| cols);
                        (cols, child.render(cols))
                    })
                    .collect();
                let height = columns.iter().map(|(_, col)| col.len()).max().unwrap_or(0);
                for row in 0..height {
                    let mut line = String::new();
                    for (cols, col) in columns.iter() {
                        let cell = col.get(row).map(String::as_str).unwrap_or("");
                        line.push_str(&truncate_to_width(cell, *cols, true));
                    }
                    lines.push(line);
                }
            }
            Orientation::Horizontal => {}
        }

        if let Some((_, rows)) = self.allocated {
            lines.truncate(rows);
            while lines.len() < rows {
                lines.push(" ".repeat(width));
            }
        }
        lines
    }

    fn invalidate(&mut self) {
        if let Some(payload) = self.payload.as_mut() {
            payload.invalidate();
        }
        for child in self.children.iter() {
            child.borrow_mut().invalidate();
        }
        self.dirty = true;
    }
}
