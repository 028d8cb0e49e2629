use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::api::{LibrarySnapshot, ReadingSession};
use crate::tui::component::Component;
use crate::tui::components::{pane, placeholder, truncate};
use crate::tui::theme::Theme;

const TITLE_COLUMN: usize = 30;

/// Server timestamps are RFC 3339. Anything else is shown as sent.
fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Reading sessions with page progress. Titles come from the library when it
/// has been loaded, otherwise the book id is shown.
pub struct ReadingList<'a> {
    pub sessions: &'a [ReadingSession],
    pub library: &'a LibrarySnapshot,
    pub cursor: usize,
    pub focused: bool,
    pub loading: bool,
    pub theme: &'a Theme,
}

impl ReadingList<'_> {
    fn row(&self, session: &ReadingSession) -> ListItem<'static> {
        let book = self.library.book(session.book_id);
        let title = book
            .map(|b| b.name.clone())
            .unwrap_or_else(|| format!("Book #{}", session.book_id));
        let progress = match book.and_then(|b| b.pages) {
            Some(pages) if pages > 0 => format!(
                "p. {}/{} ({}%)",
                session.current_page,
                pages,
                session.current_page.min(pages) * 100 / pages
            ),
            _ => format!("p. {}", session.current_page),
        };
        let last_read = session
            .last_read_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default();

        ListItem::new(Line::from(vec![
            Span::raw(format!(
                "{:<width$}",
                truncate(&title, TITLE_COLUMN),
                width = TITLE_COLUMN
            )),
            Span::raw("  "),
            Span::styled(format!("{progress:<18}"), self.theme.accent),
            Span::styled(last_read, self.theme.muted),
        ]))
    }
}

impl Component for ReadingList<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = pane("Reading · h/l turn page", self.focused, self.theme);
        if self.sessions.is_empty() {
            placeholder(frame, area, block, self.loading, self.theme);
            return;
        }

        let items: Vec<ListItem> = self.sessions.iter().map(|s| self.row(s)).collect();
        let highlight = if self.focused {
            self.theme.selected
        } else {
            self.theme.unfocused_selected
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
