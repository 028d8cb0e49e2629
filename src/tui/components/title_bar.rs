//! # TitleBar Component
//!
//! One line at the top: app name, active screen, who is logged in and how
//! many requests are still outstanding.
//!
//! ```text
//! Shelf │ Library                                    alice · 2 requests
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct TitleBar<'a> {
    pub screen_title: &'a str,
    pub username: Option<&'a str>,
    pub in_flight: usize,
    pub theme: &'a Theme,
}

impl Component for TitleBar<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(32)]).areas(area);

        let title = Line::from(vec![
            Span::styled("Shelf", self.theme.title),
            Span::styled(" │ ", self.theme.muted),
            Span::raw(self.screen_title),
        ]);
        frame.render_widget(title, left);

        let mut status = Vec::new();
        if let Some(user) = self.username {
            status.push(Span::styled(user, self.theme.accent));
        }
        if self.in_flight > 0 {
            let noun = if self.in_flight == 1 {
                "request"
            } else {
                "requests"
            };
            if !status.is_empty() {
                status.push(Span::styled(" · ", self.theme.muted));
            }
            status.push(Span::styled(
                format!("{} {noun}", self.in_flight),
                self.theme.muted,
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(status)).alignment(Alignment::Right),
            right,
        );
    }
}
