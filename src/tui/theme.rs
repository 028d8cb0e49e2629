//! Colors and text styles, fixed at startup.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub title: Style,
    pub accent: Style,
    pub selected: Style,
    pub unfocused_selected: Style,
    pub muted: Style,
    pub error: Style,
    pub border: Style,
    pub focused_border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Green),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            unfocused_selected: Style::default().add_modifier(Modifier::REVERSED),
            muted: Style::default().fg(Color::DarkGray),
            error: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            focused_border: Style::default().fg(Color::Cyan),
        }
    }
}
