//! Component and Focusable traits.

/// Renderable window payload.
pub trait Component {
    /// Render to a list of lines at the given width.
    fn render(&mut self, width: usize) -> Vec<String>;

    /// Provide the space the owning window was given during reflow.
    ///
    /// This is a budget, not a promise about the number of lines that will be
    /// rendered.
    fn set_viewport_size(&mut self, _cols: usize, _rows: usize) {}

    /// Invalidate any cached state.
    fn invalidate(&mut self) {}

    /// Optional focusable behavior.
    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        None
    }
}

/// Focusable behavior for components that track focus.
pub trait Focusable {
    fn set_focused(&mut self, focused: bool);
    fn is_focused(&self) -> bool;
}
