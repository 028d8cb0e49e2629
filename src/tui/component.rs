use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components follow the React pattern: they receive data via props (struct
/// fields, borrowed from `App`) and render to a `Frame` within a given `Rect`.
/// They hold no state of their own, so drawing the same `App` twice produces
/// the same buffer.
pub trait Component {
    /// Render the component into the given area.
    fn render(&self, frame: &mut Frame, area: Rect);
}
