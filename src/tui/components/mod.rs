//! # TUI Components
//!
//! Every component is stateless: it borrows what it shows from `App` as
//! props and renders into the area it is given.
//!
//! **Example:**
//! ```rust,ignore
//! // Good: dependencies are explicit
//! StatusBar::new(app.notifier.message(), hint, theme).render(frame, area);
//!
//! // Bad: hidden dependency on the whole App
//! StatusBar::new(app).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file, shared helpers)
//! ├── title_bar.rs    (app name, screen, user, request counter)
//! ├── nav_bar.rs      (Library | Discover | Reading | ...)
//! ├── login_panel.rs  (username/password form)
//! ├── status_bar.rs   (notification or key hints)
//! ├── library.rs      (book list and book details)
//! ├── reading.rs      (reading sessions)
//! └── social.rs       (profile, friends, recommendations)
//! ```

mod library;
mod login_panel;
mod nav_bar;
mod reading;
mod social;
mod status_bar;
mod title_bar;

pub use library::{BookDetailsView, BookList};
pub use login_panel::LoginPanel;
pub use nav_bar::NavBar;
pub use reading::ReadingList;
pub use social::{FriendList, ProfileView, RecommendationList};
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::theme::Theme;

/// Bordered block whose border color follows focus.
fn pane<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        theme.focused_border
    } else {
        theme.border
    };
    Block::bordered()
        .title(format!(" {title} "))
        .border_style(border)
        .title_style(theme.title)
}

/// Shown while a screen's collection is empty.
fn placeholder(frame: &mut Frame, area: Rect, block: Block<'_>, loading: bool, theme: &Theme) {
    let text = if loading {
        "Loading…"
    } else {
        "Nothing here yet. Press r to refresh."
    };
    let paragraph = Paragraph::new(text)
        .style(theme.muted)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Cuts `text` to at most `max` display columns, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
