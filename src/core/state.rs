//! # Application State
//!
//! Core business state for the client. Domain logic only; nothing here knows
//! about ratatui or crossterm.
//!
//! ```text
//! App
//! ├── screen: Screen               // active view
//! ├── width, height: u16           // last reported terminal size
//! ├── session: Session             // auth phase + token
//! ├── login: LoginForm             // username/password fields and focus
//! ├── selected_nav: usize          // highlighted nav bar item
//! ├── focus: Focus                 // nav bar or list
//! ├── cursor: usize                // list cursor on the active screen
//! ├── selected_book: Option<BookId>
//! ├── library / profile / reading / recommendations / friends / book_detail
//! ├── notifier: Notifier           // transient error text
//! ├── busy: bool                   // login in progress
//! ├── in_flight: usize             // outstanding network commands
//! ├── generations: Generations     // stale-result bookkeeping
//! └── settings: CoreSettings
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashMap;
use std::time::Duration;

use crate::api::{
    BookDetail, BookId, Friend, LibrarySnapshot, ReadingSession, Recommendation, User,
};
use crate::core::command::{DataKind, Generation};
use crate::core::notification::{DEFAULT_NOTIFICATION_DELAY, Notifier};
use crate::core::router::Screen;
use crate::core::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginField {
    pub fn toggled(self) -> Self {
        match self {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Which part of a list screen receives `enter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Nav,
    List,
}

/// What to do with a result older than one already applied for its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResultPolicy {
    /// Apply everything in processing order (last processed wins).
    #[default]
    Apply,
    /// Drop results whose generation is older than the last applied one.
    Discard,
}

/// Per-kind generation counters.
#[derive(Debug, Clone, Default)]
pub struct Generations {
    issued: HashMap<DataKind, Generation>,
    applied: HashMap<DataKind, Generation>,
}

impl Generations {
    /// Issues the next generation number for `kind`.
    pub fn next(&mut self, kind: DataKind) -> Generation {
        let counter = self.issued.entry(kind).or_insert(0);
        *counter += 1;
        *counter
    }

    pub fn last_applied(&self, kind: DataKind) -> Option<Generation> {
        self.applied.get(&kind).copied()
    }

    /// True if a result with `generation` is older than what is already shown.
    pub fn is_stale(&self, kind: DataKind, generation: Generation) -> bool {
        self.last_applied(kind).is_some_and(|applied| generation < applied)
    }

    pub fn mark_applied(&mut self, kind: DataKind, generation: Generation) {
        self.applied.insert(kind, generation);
    }
}

/// Behavior knobs the core needs from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreSettings {
    pub notification_delay: Duration,
    pub stale_results: StaleResultPolicy,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            notification_delay: DEFAULT_NOTIFICATION_DELAY,
            stale_results: StaleResultPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct App {
    pub screen: Screen,
    pub width: u16,
    pub height: u16,
    pub session: Session,
    pub login: LoginForm,
    pub selected_nav: usize,
    pub focus: Focus,
    pub cursor: usize,
    pub selected_book: Option<BookId>,
    pub library: LibrarySnapshot,
    pub profile: Option<User>,
    pub reading: Vec<ReadingSession>,
    pub recommendations: Vec<Recommendation>,
    pub friends: Vec<Friend>,
    pub book_detail: Option<BookDetail>,
    pub notifier: Notifier,
    pub busy: bool,
    pub in_flight: usize,
    pub generations: Generations,
    pub settings: CoreSettings,
}

impl Default for App {
    fn default() -> Self {
        Self::new(CoreSettings::default())
    }
}

impl App {
    pub fn new(settings: CoreSettings) -> Self {
        Self {
            screen: Screen::Login,
            width: 0,
            height: 0,
            session: Session::new(),
            login: LoginForm::default(),
            selected_nav: 0,
            focus: Focus::default(),
            cursor: 0,
            selected_book: None,
            library: LibrarySnapshot::default(),
            profile: None,
            reading: Vec::new(),
            recommendations: Vec::new(),
            friends: Vec::new(),
            book_detail: None,
            notifier: Notifier::new(settings.notification_delay),
            busy: false,
            in_flight: 0,
            generations: Generations::default(),
            settings,
        }
    }

    /// Number of rows the list cursor can visit on the active screen.
    pub fn list_len(&self) -> usize {
        match self.screen {
            Screen::Library => self.library.books.len(),
            Screen::Reading => self.reading.len(),
            Screen::Friends => self.friends.len(),
            Screen::Recommendations => self.recommendations.len(),
            Screen::Login | Screen::Profile | Screen::BookDetails => 0,
        }
    }

    /// Pulls the cursor back inside `[0, len - 1]` (0 when empty).
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.list_len().saturating_sub(1));
    }

    /// True if `kind` has nothing loaded yet.
    pub fn is_empty(&self, kind: DataKind) -> bool {
        match kind {
            DataKind::Library => self.library.is_empty(),
            DataKind::Profile => self.profile.is_none(),
            DataKind::Friends => self.friends.is_empty(),
            DataKind::Recommendations => self.recommendations.is_empty(),
            DataKind::ReadingSessions => self.reading.is_empty(),
            DataKind::BookDetails => self.book_detail.is_none(),
        }
    }
}
