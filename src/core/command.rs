//! # Commands
//!
//! A `Command` is deferred work with side effects: an HTTP call, a chain of
//! them, or a timer. `update()` returns commands; the dispatcher runs them.
//! Each one resolves to exactly one `Action`.
//!
//! Commands own everything they need. Credentials, ids and generation numbers
//! are copied in when the command is built, so a running command can never
//! observe (or race with) later changes to `App`.

use std::time::Duration;

use crate::api::{
    BookDetail, BookId, Credentials, Direction, Friend, LibrarySnapshot, ReadingSession,
    Recommendation, User,
};

/// Per-kind sequence number stamped on every data-producing command.
pub type Generation = u64;

/// Identifies a notification; later notifications have larger ids.
pub type NotificationId = u64;

/// The kinds of collection a command can (re)load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataKind {
    Library,
    Profile,
    Friends,
    Recommendations,
    ReadingSessions,
    BookDetails,
}

impl DataKind {
    pub const ALL: [DataKind; 6] = [
        DataKind::Library,
        DataKind::Profile,
        DataKind::Friends,
        DataKind::Recommendations,
        DataKind::ReadingSessions,
        DataKind::BookDetails,
    ];
}

/// A freshly fetched snapshot. Always replaces the previous one of its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Library(LibrarySnapshot),
    Profile(User),
    Friends(Vec<Friend>),
    Recommendations(Vec<Recommendation>),
    ReadingSessions(Vec<ReadingSession>),
    BookDetails(BookDetail),
}

impl Payload {
    pub fn kind(&self) -> DataKind {
        match self {
            Payload::Library(_) => DataKind::Library,
            Payload::Profile(_) => DataKind::Profile,
            Payload::Friends(_) => DataKind::Friends,
            Payload::Recommendations(_) => DataKind::Recommendations,
            Payload::ReadingSessions(_) => DataKind::ReadingSessions,
            Payload::BookDetails(_) => DataKind::BookDetails,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `login` then `fetch_current_user`. Resolves to `LoginSucceeded` or `LoginFailed`.
    Login { username: String, password: String },
    /// `list_books` then `fetch_user_libraries`.
    LoadLibrary {
        auth: Credentials,
        generation: Generation,
    },
    LoadProfile {
        auth: Credentials,
        generation: Generation,
    },
    /// The user, then every friend concurrently.
    LoadFriends {
        auth: Credentials,
        generation: Generation,
    },
    LoadRecommendations {
        auth: Credentials,
        generation: Generation,
    },
    LoadReadingSessions {
        auth: Credentials,
        generation: Generation,
    },
    LoadBookDetails {
        auth: Credentials,
        book_id: BookId,
        generation: Generation,
    },
    /// Write, then reload reading sessions.
    StartReading {
        auth: Credentials,
        book_id: BookId,
        generation: Generation,
    },
    /// Write, then reload reading sessions.
    TurnPage {
        auth: Credentials,
        book_id: BookId,
        direction: Direction,
        generation: Generation,
    },
    /// Sleeps `delay` on a monotonic clock, then resolves to `NotificationExpired(id)`.
    ExpireNotification { id: NotificationId, delay: Duration },
}

impl Command {
    /// True for commands that talk to the service (and count as in flight).
    pub fn is_network(&self) -> bool {
        !matches!(self, Command::ExpireNotification { .. })
    }

    /// Which collection this command's result replaces, if any.
    pub fn data_kind(&self) -> Option<DataKind> {
        match self {
            Command::Login { .. } | Command::ExpireNotification { .. } => None,
            Command::LoadLibrary { .. } => Some(DataKind::Library),
            Command::LoadProfile { .. } => Some(DataKind::Profile),
            Command::LoadFriends { .. } => Some(DataKind::Friends),
            Command::LoadRecommendations { .. } => Some(DataKind::Recommendations),
            Command::LoadReadingSessions { .. }
            | Command::StartReading { .. }
            | Command::TurnPage { .. } => Some(DataKind::ReadingSessions),
            Command::LoadBookDetails { .. } => Some(DataKind::BookDetails),
        }
    }

    /// Short name for logs. Never includes credentials.
    pub fn label(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::LoadLibrary { .. } => "load-library",
            Command::LoadProfile { .. } => "load-profile",
            Command::LoadFriends { .. } => "load-friends",
            Command::LoadRecommendations { .. } => "load-recommendations",
            Command::LoadReadingSessions { .. } => "load-reading",
            Command::LoadBookDetails { .. } => "load-book",
            Command::StartReading { .. } => "start-reading",
            Command::TurnPage { .. } => "turn-page",
            Command::ExpireNotification { .. } => "expire-notification",
        }
    }
}
