//! # Actions
//!
//! Everything that can happen to the client becomes an `Action`.
//! User presses Enter? That's `Action::KeyPressed(Key::Enter)`.
//! The server hands back the library? That's `Action::DataLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the commands to run next. No I/O happens here;
//! the dispatcher performs the commands and feeds their results back in.
//!
//! ```text
//! State + Action  →  update()  →  New State + Vec<Command>
//! ```
//!
//! Messages are handled in a fixed precedence: session results, data
//! results, notification expiry, resize, then keys.

use log::{debug, info, warn};

use crate::api::{ApiError, User};
use crate::core::command::{Command, DataKind, Generation, NotificationId, Payload};
use crate::core::router::{self, Screen};
use crate::core::state::{App, Focus, StaleResultPolicy};

/// A key press, independent of any terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    KeyPressed(Key),
    ResizeTerminal(u16, u16),
    LoginSucceeded {
        username: String,
        token: String,
        user: User,
    },
    LoginFailed(ApiError),
    DataLoaded {
        generation: Generation,
        payload: Payload,
    },
    OperationFailed(ApiError),
    NotificationExpired(NotificationId),
}

impl Action {
    /// True for the results of network commands.
    pub fn is_network_result(&self) -> bool {
        matches!(
            self,
            Action::LoginSucceeded { .. }
                | Action::LoginFailed(_)
                | Action::DataLoaded { .. }
                | Action::OperationFailed(_)
        )
    }
}

/// Applies one action to the state and returns the commands it schedules.
pub fn update(app: &mut App, action: Action) -> Vec<Command> {
    if action.is_network_result() {
        app.in_flight = app.in_flight.saturating_sub(1);
    }

    let commands = match action {
        Action::LoginSucceeded {
            username,
            token,
            user,
        } => login_succeeded(app, username, token, user),
        Action::LoginFailed(error) => login_failed(app, error),
        Action::DataLoaded {
            generation,
            payload,
        } => data_loaded(app, generation, payload),
        Action::OperationFailed(error) => {
            warn!("Operation failed: {}", error);
            vec![app.notifier.set_error(error.to_string())]
        }
        Action::NotificationExpired(id) => {
            if !app.notifier.expire(id) {
                debug!("Notification {} already superseded", id);
            }
            Vec::new()
        }
        Action::ResizeTerminal(width, height) => {
            app.width = width;
            app.height = height;
            Vec::new()
        }
        Action::KeyPressed(key) => router::handle_key(app, key),
    };

    app.in_flight += commands.iter().filter(|c| c.is_network()).count();
    commands
}

fn login_succeeded(app: &mut App, username: String, token: String, user: User) -> Vec<Command> {
    app.busy = false;
    if !app.session.establish(username, token) {
        debug!(
            "Ignoring login result in phase {:?}",
            app.session.phase()
        );
        return Vec::new();
    }

    info!("Logged in as {}", app.session.username());
    app.profile = Some(user);
    app.login.password.clear();
    router::switch_to(app, Screen::Library);
    app.selected_nav = 0;
    app.focus = Focus::Nav;

    let Some(auth) = app.session.credentials() else {
        return Vec::new();
    };
    [DataKind::Library, DataKind::Profile]
        .into_iter()
        .filter_map(|kind| router::load_command(app, kind, auth.clone()))
        .collect()
}

fn login_failed(app: &mut App, error: ApiError) -> Vec<Command> {
    app.busy = false;
    if !app.session.fail() {
        warn!("Ignoring stale login failure: {}", error);
        return Vec::new();
    }
    warn!("Login failed: {}", error);
    vec![app.notifier.set_error(error.to_string())]
}

fn data_loaded(app: &mut App, generation: Generation, payload: Payload) -> Vec<Command> {
    let kind = payload.kind();
    if app.settings.stale_results == StaleResultPolicy::Discard
        && app.generations.is_stale(kind, generation)
    {
        info!(
            "Discarding stale {:?} result (generation {}, showing {:?})",
            kind,
            generation,
            app.generations.last_applied(kind)
        );
        return Vec::new();
    }
    app.generations.mark_applied(kind, generation);
    debug!("Applying {:?} generation {}", kind, generation);

    match payload {
        Payload::Library(library) => app.library = library,
        Payload::Profile(user) => app.profile = Some(user),
        Payload::Friends(friends) => app.friends = friends,
        Payload::Recommendations(recommendations) => app.recommendations = recommendations,
        Payload::ReadingSessions(sessions) => app.reading = sessions,
        Payload::BookDetails(detail) => {
            if app.selected_book == Some(detail.book.id) {
                app.book_detail = Some(detail);
            } else {
                debug!("Details for book {} arrived after leaving it", detail.book.id);
            }
        }
    }
    app.clamp_cursor();
    Vec::new()
}
