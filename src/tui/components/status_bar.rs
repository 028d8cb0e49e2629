use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Bottom line. The current notification if there is one, key hints otherwise.
pub struct StatusBar<'a> {
    pub notification: Option<&'a str>,
    pub hint: &'a str,
    pub theme: &'a Theme,
}

impl Component for StatusBar<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let line = match self.notification {
            Some(message) => Line::styled(format!(" {message} "), self.theme.error),
            None => Line::styled(self.hint, self.theme.muted),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
