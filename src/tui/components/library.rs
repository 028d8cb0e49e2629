//! # Library Components
//!
//! `BookList` shows every book with its author and the shelf it sits on.
//! `BookDetailsView` shows one book, its metadata and reviews.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use crate::api::{Book, BookDetail, LibrarySnapshot};
use crate::tui::component::Component;
use crate::tui::components::{pane, placeholder, truncate};
use crate::tui::theme::Theme;

const TITLE_COLUMN: usize = 32;
const AUTHOR_COLUMN: usize = 22;

fn shelf_label(shelf: &str) -> String {
    shelf.replace('_', " ")
}

pub struct BookList<'a> {
    pub library: &'a LibrarySnapshot,
    pub cursor: usize,
    pub focused: bool,
    pub loading: bool,
    pub theme: &'a Theme,
}

impl Component for BookList<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = pane("Books", self.focused, self.theme);
        if self.library.is_empty() {
            placeholder(frame, area, block, self.loading, self.theme);
            return;
        }

        let items: Vec<ListItem> = self
            .library
            .books
            .iter()
            .map(|book| {
                let shelf = self
                    .library
                    .shelf_of(book.id)
                    .map(shelf_label)
                    .unwrap_or_default();
                ListItem::new(Line::from(vec![
                    Span::raw(format!(
                        "{:<width$}",
                        truncate(&book.name, TITLE_COLUMN),
                        width = TITLE_COLUMN
                    )),
                    Span::raw("  "),
                    Span::styled(
                        format!(
                            "{:<width$}",
                            truncate(&book.author, AUTHOR_COLUMN),
                            width = AUTHOR_COLUMN
                        ),
                        self.theme.muted,
                    ),
                    Span::raw("  "),
                    Span::styled(shelf, self.theme.accent),
                ]))
            })
            .collect();

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

pub struct BookDetailsView<'a> {
    /// The book as listed in the library, shown until details arrive.
    pub book: Option<&'a Book>,
    pub detail: Option<&'a BookDetail>,
    pub shelf: Option<&'a str>,
    pub loading: bool,
    pub theme: &'a Theme,
}

impl BookDetailsView<'_> {
    fn metadata(&self, book: &Book) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::styled(book.name.clone(), self.theme.title),
            Line::from(format!("by {}", book.author)),
            Line::default(),
        ];
        let mut field = |label: &str, value: Option<String>| {
            if let Some(value) = value {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label:<11}"), self.theme.muted),
                    Span::raw(value),
                ]));
            }
        };
        field("Year", book.year.map(|y| y.to_string()));
        field("Pages", book.pages.map(|p| p.to_string()));
        field("Language", book.language.clone());
        field("Publisher", book.publisher.clone());
        field("Rating", book.avg_rating.map(|r| format!("{r:.1} / 5")));
        field("Shelf", self.shelf.map(shelf_label));
        lines
    }
}

impl Component for BookDetailsView<'_> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = pane("Book", true, self.theme);
        let Some(book) = self.detail.map(|d| &d.book).or(self.book) else {
            placeholder(frame, area, block, self.loading, self.theme);
            return;
        };

        let mut lines = self.metadata(book);
        lines.push(Line::default());
        match self.detail {
            None => lines.push(Line::styled("Loading reviews…", self.theme.muted)),
            Some(detail) if detail.reviews.is_empty() => {
                lines.push(Line::styled("No reviews yet.", self.theme.muted));
            }
            Some(detail) => {
                lines.push(Line::styled("Reviews", self.theme.title));
                for review in &detail.reviews {
                    let stars = "★".repeat(review.rating.clamp(0, 5) as usize);
                    lines.push(Line::from(vec![
                        Span::styled(format!("{stars} "), self.theme.accent),
                        Span::styled(review.user.clone(), self.theme.muted),
                    ]));
                    if !review.text.is_empty() {
                        lines.push(Line::from(format!("  {}", review.text)));
                    }
                }
            }
        }
        lines.push(Line::default());
        lines.push(Line::styled("r start reading · esc back", self.theme.muted));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
