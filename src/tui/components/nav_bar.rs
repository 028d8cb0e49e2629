use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Tabs;

use crate::core::router::NAV_ITEMS;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// The row of nav items under the title bar.
pub struct NavBar<'a> {
    pub selected: usize,
    /// True when `enter` activates the nav bar rather than the list.
    pub focused: bool,
    pub theme: &'a Theme,
}

impl Component for NavBar<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let highlight = if self.focused {
            self.theme.selected
        } else {
            self.theme.unfocused_selected
        };
        let tabs = Tabs::new(NAV_ITEMS.iter().map(|item| item.label))
            .select(self.selected)
            .style(self.theme.muted)
            .highlight_style(highlight)
            .divider("│");
        frame.render_widget(tabs, area);
    }
}
