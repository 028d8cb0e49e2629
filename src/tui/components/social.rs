//! Profile, friends and recommendations.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::api::{Friend, Recommendation, User};
use crate::tui::component::Component;
use crate::tui::components::{pane, placeholder, truncate};
use crate::tui::theme::Theme;

fn highlight(focused: bool, theme: &Theme) -> ratatui::style::Style {
    if focused {
        theme.selected
    } else {
        theme.unfocused_selected
    }
}

pub struct ProfileView<'a> {
    pub user: Option<&'a User>,
    pub books: usize,
    pub reading: usize,
    pub loading: bool,
    pub theme: &'a Theme,
}

impl Component for ProfileView<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = pane("Profile", false, self.theme);
        let Some(user) = self.user else {
            placeholder(frame, area, block, self.loading, self.theme);
            return;
        };

        let name = if user.display_name.is_empty() {
            user.username.as_str()
        } else {
            user.display_name.as_str()
        };
        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{label:<12}"), self.theme.muted),
                Span::raw(value),
            ])
        };
        let lines = vec![
            Line::styled(name.to_string(), self.theme.title),
            Line::styled(format!("@{}", user.username), self.theme.muted),
            Line::default(),
            row("Libraries", user.libraries.join(", ")),
            row("Friends", user.friends.len().to_string()),
            row("Books", self.books.to_string()),
            row("Reading", self.reading.to_string()),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

pub struct FriendList<'a> {
    pub friends: &'a [Friend],
    pub cursor: usize,
    pub focused: bool,
    pub loading: bool,
    pub theme: &'a Theme,
}

impl Component for FriendList<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = pane("Friends", self.focused, self.theme);
        if self.friends.is_empty() {
            placeholder(frame, area, block, self.loading, self.theme);
            return;
        }

        let items: Vec<ListItem> = self
            .friends
            .iter()
            .map(|friend| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<24}", truncate(&friend.display_name, 24))),
                    Span::styled(format!("@{}", friend.username), self.theme.muted),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight(self.focused, self.theme));
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

pub struct RecommendationList<'a> {
    pub recommendations: &'a [Recommendation],
    pub cursor: usize,
    pub focused: bool,
    pub loading: bool,
    pub theme: &'a Theme,
}

impl Component for RecommendationList<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = pane("Recommendations", self.focused, self.theme);
        if self.recommendations.is_empty() {
            placeholder(frame, area, block, self.loading, self.theme);
            return;
        }

        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .recommendations
            .iter()
            .map(|rec| {
                let mut lines = vec![Line::from(vec![
                    Span::styled(rec.book.clone(), self.theme.accent),
                    Span::styled(format!("  from {}", rec.from), self.theme.muted),
                ])];
                if let Some(message) = rec.message.as_deref().filter(|m| !m.is_empty()) {
                    lines.push(Line::from(format!("  “{}”", truncate(message, width))));
                }
                ListItem::new(lines)
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight(self.focused, self.theme));
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
