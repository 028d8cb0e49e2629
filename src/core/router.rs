//! # View Router
//!
//! Which screen is active and what each key does there.
//!
//! ```text
//!            enter (login ok)
//!   Login ─────────────────────▶ Library ◀──── esc ──── any list screen
//!                                  │  ▲
//!                     d (details)  │  │ esc / backspace
//!                                  ▼  │
//!                               BookDetails
//!
//!   nav bar + enter: Library | Discover | Reading | Friends | Recommendations | Profile
//! ```
//!
//! Handlers never block on data. A screen whose collection has not arrived
//! yet renders a placeholder and keeps accepting input.

use log::{debug, info, warn};

use crate::api::{ApiError, BookId, Credentials, Direction};
use crate::core::action::Key;
use crate::core::command::{Command, DataKind};
use crate::core::state::{App, Focus, LoginField, LoginForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Library,
    BookDetails,
    Reading,
    Profile,
    Friends,
    Recommendations,
}

/// When entering a screen from the nav bar should trigger a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadPolicy {
    AlwaysReload,
    ReloadIfEmpty,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Library => "Library",
            Screen::BookDetails => "Book",
            Screen::Reading => "Reading",
            Screen::Profile => "Profile",
            Screen::Friends => "Friends",
            Screen::Recommendations => "Recommendations",
        }
    }

    /// The collection this screen displays.
    pub fn data_kind(self) -> Option<DataKind> {
        match self {
            Screen::Login => None,
            Screen::Library => Some(DataKind::Library),
            Screen::BookDetails => Some(DataKind::BookDetails),
            Screen::Reading => Some(DataKind::ReadingSessions),
            Screen::Profile => Some(DataKind::Profile),
            Screen::Friends => Some(DataKind::Friends),
            Screen::Recommendations => Some(DataKind::Recommendations),
        }
    }

    pub fn reload_policy(self) -> ReloadPolicy {
        match self {
            // Page positions move under us; always show fresh ones.
            Screen::Reading => ReloadPolicy::AlwaysReload,
            _ => ReloadPolicy::ReloadIfEmpty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub target: Screen,
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem { id: "library", label: "Library", target: Screen::Library },
    NavItem { id: "discover", label: "Discover", target: Screen::Library },
    NavItem { id: "reading", label: "Reading", target: Screen::Reading },
    NavItem { id: "friends", label: "Friends", target: Screen::Friends },
    NavItem { id: "recommendations", label: "Recommendations", target: Screen::Recommendations },
    NavItem { id: "profile", label: "Profile", target: Screen::Profile },
];

/// Keys that end the process. Handled by the event loop, never by `update`.
/// `q` is ordinary text on the login form.
pub fn is_quit_key(screen: Screen, key: Key) -> bool {
    key == Key::Char('q') && screen != Screen::Login
}

/// Routes a key press to the active screen's handler.
pub fn handle_key(app: &mut App, key: Key) -> Vec<Command> {
    match app.screen {
        Screen::Login => login_key(app, key),
        Screen::BookDetails => book_details_key(app, key),
        Screen::Library
        | Screen::Reading
        | Screen::Profile
        | Screen::Friends
        | Screen::Recommendations => list_key(app, key),
    }
}

/// Builds the load command for `kind`, stamped with a fresh generation.
pub fn load_command(app: &mut App, kind: DataKind, auth: Credentials) -> Option<Command> {
    let command = match kind {
        DataKind::Library => Command::LoadLibrary {
            auth,
            generation: app.generations.next(kind),
        },
        DataKind::Profile => Command::LoadProfile {
            auth,
            generation: app.generations.next(kind),
        },
        DataKind::Friends => Command::LoadFriends {
            auth,
            generation: app.generations.next(kind),
        },
        DataKind::Recommendations => Command::LoadRecommendations {
            auth,
            generation: app.generations.next(kind),
        },
        DataKind::ReadingSessions => Command::LoadReadingSessions {
            auth,
            generation: app.generations.next(kind),
        },
        DataKind::BookDetails => Command::LoadBookDetails {
            auth,
            book_id: app.selected_book?,
            generation: app.generations.next(kind),
        },
    };
    Some(command)
}

/// Moves to `screen` with a fresh cursor.
pub fn switch_to(app: &mut App, screen: Screen) {
    if app.screen != screen {
        debug!("Screen {:?} -> {:?}", app.screen, screen);
    }
    app.screen = screen;
    app.cursor = 0;
}

/// Back to Library with the matching nav item highlighted.
fn go_library(app: &mut App) {
    switch_to(app, Screen::Library);
    app.selected_nav = 0;
    app.focus = Focus::Nav;
}

// ============================================================================
// Login
// ============================================================================

/// Reads username and password from the form.
///
/// `user,password` typed into the username field (with the password field
/// left empty) is split on the first comma.
pub fn parse_credentials(form: &LoginForm) -> Result<(String, String), ApiError> {
    let (username, password) = if form.password.is_empty() {
        form.username
            .split_once(',')
            .unwrap_or((form.username.as_str(), ""))
    } else {
        (form.username.as_str(), form.password.as_str())
    };

    let username = username.trim();
    if username.is_empty() {
        return Err(ApiError::Validation("username is required".to_string()));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("password is required".to_string()));
    }
    Ok((username.to_string(), password.to_string()))
}

fn login_key(app: &mut App, key: Key) -> Vec<Command> {
    if app.busy {
        debug!("Login in progress, ignoring {:?}", key);
        return Vec::new();
    }

    match key {
        Key::Enter => return submit_login(app),
        Key::Tab => app.login.focus = LoginField::Password,
        Key::BackTab => app.login.focus = LoginField::Username,
        Key::Up | Key::Down => app.login.focus = app.login.focus.toggled(),
        Key::Backspace => {
            app.login.focused_mut().pop();
        }
        Key::Char(c) => app.login.focused_mut().push(c),
        Key::Esc | Key::Left | Key::Right => {}
    }
    Vec::new()
}

fn submit_login(app: &mut App) -> Vec<Command> {
    let (username, password) = match parse_credentials(&app.login) {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Login form rejected: {}", e);
            return vec![app.notifier.set_error(e.to_string())];
        }
    };

    if !app.session.begin_login() {
        warn!("Login requested in phase {:?}", app.session.phase());
        return Vec::new();
    }

    info!("Logging in as {}", username);
    app.busy = true;
    vec![Command::Login { username, password }]
}

// ============================================================================
// List screens
// ============================================================================

fn list_key(app: &mut App, key: Key) -> Vec<Command> {
    let Some(auth) = app.session.credentials() else {
        warn!("Key {:?} on {:?} without a session", key, app.screen);
        return Vec::new();
    };

    match key {
        Key::Left => {
            app.selected_nav = app.selected_nav.saturating_sub(1);
            app.focus = Focus::Nav;
        }
        Key::Right => {
            app.selected_nav = (app.selected_nav + 1).min(NAV_ITEMS.len() - 1);
            app.focus = Focus::Nav;
        }
        Key::Up => {
            app.cursor = app.cursor.saturating_sub(1);
            app.focus = Focus::List;
        }
        Key::Down => {
            app.cursor = (app.cursor + 1).min(app.list_len().saturating_sub(1));
            app.focus = Focus::List;
        }
        Key::Tab | Key::BackTab => {
            app.focus = match app.focus {
                Focus::Nav => Focus::List,
                Focus::List => Focus::Nav,
            };
        }
        Key::Enter => {
            return match app.focus {
                Focus::Nav => activate_nav(app, auth),
                Focus::List => activate_row(app, auth),
            };
        }
        Key::Char('r') => return refresh(app, auth),
        Key::Char('d') if app.screen == Screen::Library => return open_details(app, auth),
        Key::Char('h') if app.screen == Screen::Reading => {
            return turn_page(app, auth, Direction::Back);
        }
        Key::Char('l') if app.screen == Screen::Reading => {
            return turn_page(app, auth, Direction::Forward);
        }
        Key::Esc => {
            if app.screen != Screen::Library {
                go_library(app);
            }
        }
        Key::Char(_) | Key::Backspace => {}
    }
    Vec::new()
}

fn activate_nav(app: &mut App, auth: Credentials) -> Vec<Command> {
    let Some(item) = NAV_ITEMS.get(app.selected_nav).copied() else {
        return Vec::new();
    };
    info!("Nav -> {}", item.id);
    switch_to(app, item.target);

    let Some(kind) = item.target.data_kind() else {
        return Vec::new();
    };
    let wanted = match item.target.reload_policy() {
        ReloadPolicy::AlwaysReload => true,
        ReloadPolicy::ReloadIfEmpty => app.is_empty(kind),
    };
    if !wanted {
        return Vec::new();
    }
    load_command(app, kind, auth).into_iter().collect()
}

/// `enter` on a list row. Only the library's book list acts on it.
fn activate_row(app: &mut App, auth: Credentials) -> Vec<Command> {
    if app.screen != Screen::Library {
        return Vec::new();
    }
    let Some(book_id) = app.library.books.get(app.cursor).map(|b| b.id) else {
        return Vec::new();
    };
    vec![start_reading(app, auth, book_id)]
}

fn refresh(app: &mut App, auth: Credentials) -> Vec<Command> {
    info!("Refreshing library and profile");
    [DataKind::Library, DataKind::Profile]
        .into_iter()
        .filter_map(|kind| load_command(app, kind, auth.clone()))
        .collect()
}

fn open_details(app: &mut App, auth: Credentials) -> Vec<Command> {
    let Some(book_id) = app.library.books.get(app.cursor).map(|b| b.id) else {
        return Vec::new();
    };
    app.selected_book = Some(book_id);
    app.book_detail = None;
    switch_to(app, Screen::BookDetails);
    load_command(app, DataKind::BookDetails, auth)
        .into_iter()
        .collect()
}

fn start_reading(app: &mut App, auth: Credentials, book_id: BookId) -> Command {
    info!("Start reading book {}", book_id);
    Command::StartReading {
        auth,
        book_id,
        generation: app.generations.next(DataKind::ReadingSessions),
    }
}

fn turn_page(app: &mut App, auth: Credentials, direction: Direction) -> Vec<Command> {
    let Some(book_id) = app.reading.get(app.cursor).map(|s| s.book_id) else {
        debug!("No reading session under cursor, ignoring page turn");
        return Vec::new();
    };
    vec![Command::TurnPage {
        auth,
        book_id,
        direction,
        generation: app.generations.next(DataKind::ReadingSessions),
    }]
}

// ============================================================================
// Book details
// ============================================================================

fn book_details_key(app: &mut App, key: Key) -> Vec<Command> {
    match key {
        Key::Esc | Key::Backspace => {
            app.selected_book = None;
            app.book_detail = None;
            go_library(app);
            Vec::new()
        }
        Key::Char('r') => match (app.selected_book, app.session.credentials()) {
            (Some(book_id), Some(auth)) => vec![start_reading(app, auth, book_id)],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
