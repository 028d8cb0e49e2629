//! # LoginPanel Component
//!
//! Centered username/password box. The password is masked. The focused
//! field is marked with `›`. Typing `user,password` into the username field
//! also works.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::{LoginField, LoginForm};
use crate::tui::component::Component;
use crate::tui::components::pane;
use crate::tui::theme::Theme;

const PANEL_WIDTH: u16 = 44;
const PANEL_HEIGHT: u16 = 8;

pub struct LoginPanel<'a> {
    pub form: &'a LoginForm,
    pub busy: bool,
    pub theme: &'a Theme,
}

impl LoginPanel<'_> {
    fn field_line(&self, field: LoginField, label: &str, value: String) -> Line<'static> {
        let focused = self.form.focus == field;
        let marker = if focused { "› " } else { "  " };
        let value_style = if focused {
            self.theme.accent
        } else {
            Default::default()
        };
        Line::from(vec![
            Span::styled(marker, self.theme.title),
            Span::styled(format!("{label:<10}"), self.theme.muted),
            Span::styled(value, value_style),
        ])
    }
}

impl Component for LoginPanel<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let [row] = Layout::vertical([Constraint::Length(PANEL_HEIGHT)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::horizontal([Constraint::Length(PANEL_WIDTH)])
            .flex(Flex::Center)
            .areas(row);

        let footer = if self.busy {
            Line::styled("Signing in…", self.theme.accent)
        } else {
            Line::styled("tab switch field · enter sign in", self.theme.muted)
        };

        let lines = vec![
            Line::default(),
            self.field_line(LoginField::Username, "Username", self.form.username.clone()),
            self.field_line(
                LoginField::Password,
                "Password",
                "•".repeat(self.form.password.chars().count()),
            ),
            Line::default(),
            footer,
        ];

        let paragraph = Paragraph::new(lines).block(pane("Sign in", !self.busy, self.theme));
        frame.render_widget(paragraph, panel);
    }
}
