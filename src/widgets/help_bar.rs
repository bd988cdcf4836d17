//! Help bar text for a dialog's help bindings.

use crate::core::component::Component;
use crate::core::text::truncate_to_width;
use crate::core::window::{HelpMapping, WindowNode};

/// Format `key:label` pairs separated by two spaces, cut to `width`.
pub fn help_line(table: &[HelpMapping], width: usize) -> String {
    let text = table
        .iter()
        .map(|mapping| format!("{}:{}", mapping.key, mapping.label))
        .collect::<Vec<_>>()
        .join("  ");
    truncate_to_width(&text, width, true)
}

/// Renders the help bindings of whichever dialog it was built for.
pub struct HelpBar {
    table: &'static [HelpMapping],
}

impl HelpBar {
    pub fn new(table: &'static [HelpMapping]) -> Self {
        Self { table }
    }

    /// `None` when the window carries no help table.
    pub fn for_window(window: &WindowNode) -> Option<Self> {
        window.help().and_then(|help| help.table).map(Self::new)
    }
}

impl Component for HelpBar {
    fn render(&mut self, width: usize) -> Vec<String> {
        vec![help_line(self.table, width)]
    }
}
