//! Top-level frame layout. `draw_ui` is a pure function of `App` and `Theme`.
//!
//! ```text
//! ┌ title bar ─────────────────────────────────┐  1 line
//! │ nav bar (hidden on Login)                  │  1 line
//! │                                            │
//! │ active screen                              │  rest
//! │                                            │
//! └ notification / key hints ──────────────────┘  1 line
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::command::DataKind;
use crate::core::router::Screen;
use crate::core::state::{App, Focus};
use crate::tui::component::Component;
use crate::tui::components::{
    BookDetailsView, BookList, FriendList, LoginPanel, NavBar, ProfileView, ReadingList,
    RecommendationList, StatusBar, TitleBar,
};
use crate::tui::theme::Theme;

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

pub fn draw_ui(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        draw_too_small(frame, area, theme);
        return;
    }

    use Constraint::{Length, Min};
    let nav_height = if app.screen == Screen::Login { 0 } else { 1 };
    let layout = Layout::vertical([Length(1), Length(nav_height), Min(0), Length(1)]);
    let [title_area, nav_area, main_area, status_area] = layout.areas(area);

    TitleBar {
        screen_title: app.screen.title(),
        username: app
            .session
            .is_authenticated()
            .then(|| app.session.username()),
        in_flight: app.in_flight,
        theme,
    }
    .render(frame, title_area);

    if app.screen != Screen::Login {
        NavBar {
            selected: app.selected_nav,
            focused: app.focus == Focus::Nav,
            theme,
        }
        .render(frame, nav_area);
    }

    draw_screen(frame, main_area, app, theme);

    StatusBar {
        notification: app.notifier.message(),
        hint: key_hint(app.screen),
        theme,
    }
    .render(frame, status_area);
}

fn draw_screen(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::List;
    let loading = |kind: DataKind| app.in_flight > 0 && app.is_empty(kind);

    match app.screen {
        Screen::Login => LoginPanel {
            form: &app.login,
            busy: app.busy,
            theme,
        }
        .render(frame, area),
        Screen::Library => BookList {
            library: &app.library,
            cursor: app.cursor,
            focused,
            loading: loading(DataKind::Library),
            theme,
        }
        .render(frame, area),
        Screen::BookDetails => {
            let book = app.selected_book.and_then(|id| app.library.book(id));
            BookDetailsView {
                book,
                detail: app.book_detail.as_ref(),
                shelf: app.selected_book.and_then(|id| app.library.shelf_of(id)),
                loading: loading(DataKind::BookDetails),
                theme,
            }
            .render(frame, area)
        }
        Screen::Reading => ReadingList {
            sessions: &app.reading,
            library: &app.library,
            cursor: app.cursor,
            focused,
            loading: loading(DataKind::ReadingSessions),
            theme,
        }
        .render(frame, area),
        Screen::Profile => ProfileView {
            user: app.profile.as_ref(),
            books: app.library.books.len(),
            reading: app.reading.len(),
            loading: loading(DataKind::Profile),
            theme,
        }
        .render(frame, area),
        Screen::Friends => FriendList {
            friends: &app.friends,
            cursor: app.cursor,
            focused,
            loading: loading(DataKind::Friends),
            theme,
        }
        .render(frame, area),
        Screen::Recommendations => RecommendationList {
            recommendations: &app.recommendations,
            cursor: app.cursor,
            focused,
            loading: loading(DataKind::Recommendations),
            theme,
        }
        .render(frame, area),
    }
}

fn key_hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "tab switch field · enter sign in · ctrl+c quit",
        Screen::Library => "←/→ nav · ↑/↓ books · enter open/read · d details · r refresh · q quit",
        Screen::BookDetails => "r start reading · esc back · q quit",
        Screen::Reading => "↑/↓ select · h/l turn page · esc library · q quit",
        Screen::Profile | Screen::Friends | Screen::Recommendations => {
            "←/→ nav · ↑/↓ select · enter open · r refresh · esc library · q quit"
        }
    }
}

fn draw_too_small(frame: &mut Frame, area: Rect, theme: &Theme) {
    let message = format!(
        "Terminal too small ({}x{}). Need at least {MIN_WIDTH}x{MIN_HEIGHT}.",
        area.width, area.height
    );
    let paragraph = Paragraph::new(message)
        .style(theme.muted)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
