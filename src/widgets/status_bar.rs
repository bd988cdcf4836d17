//! Single-line status bar.

use crate::core::component::Component;
use crate::core::text::truncate_to_width;

pub struct StatusBar {
    text: String,
    padding_x: usize,
}

impl StatusBar {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            padding_x: 1,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Component for StatusBar {
    fn render(&mut self, width: usize) -> Vec<String> {
        let first_line = self.text.lines().next().unwrap_or("");
        let padding = " ".repeat(self.padding_x.min(width / 2));
        let available = width.saturating_sub(padding.len() * 2);
        let body = truncate_to_width(first_line, available, true);
        vec![format!("{padding}{body}{padding}")]
    }
}
