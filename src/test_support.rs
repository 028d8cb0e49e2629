//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{
    ApiError, Book, BookDetail, BookId, Credentials, Direction, Library, LibraryService,
    ReadingSession, Recommendation, User,
};
use crate::core::router::Screen;
use crate::core::state::App;

const PASSWORD: &str = "secret";
const TOKEN_PREFIX: &str = "token-";

/// In-memory stand-in for the book-tracking server.
///
/// Knows two users, `alice` (friends `bob` and the nonexistent `ghost`) and
/// `bob`, both with password `secret`. Every call is recorded by name.
pub struct FakeService {
    calls: Mutex<Vec<&'static str>>,
    failing: HashSet<&'static str>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: HashSet::new(),
        }
    }

    /// Makes `operation` fail with a transport error.
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(operation);
        if self.failing.contains(operation) {
            return Err(ApiError::Transport(format!("{operation} unavailable")));
        }
        Ok(())
    }
}

impl Default for FakeService {
    fn default() -> Self {
        Self::new()
    }
}

fn known_user(username: &str) -> Result<User, ApiError> {
    match username {
        "alice" => Ok(sample_user("alice")),
        "bob" => Ok(User {
            friends: vec!["alice".to_string()],
            ..sample_user("bob")
        }),
        _ => Err(ApiError::Status {
            status: 404,
            message: "User not found".to_string(),
        }),
    }
}

#[async_trait]
impl LibraryService for FakeService {
    fn name(&self) -> &str {
        "fake"
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.record("login")?;
        if password != PASSWORD || known_user(username).is_err() {
            return Err(ApiError::Auth("Invalid credentials".to_string()));
        }
        Ok(format!("{TOKEN_PREFIX}{username}"))
    }

    async fn fetch_current_user(&self, token: &str) -> Result<User, ApiError> {
        self.record("fetch_current_user")?;
        let username = token
            .strip_prefix(TOKEN_PREFIX)
            .ok_or_else(|| ApiError::Auth("bad token".to_string()))?;
        known_user(username)
    }

    async fn fetch_user(&self, _auth: &Credentials, username: &str) -> Result<User, ApiError> {
        self.record("fetch_user")?;
        known_user(username)
    }

    async fn list_books(&self, _auth: &Credentials) -> Result<Vec<Book>, ApiError> {
        self.record("list_books")?;
        Ok(sample_books())
    }

    async fn fetch_book(
        &self,
        _auth: &Credentials,
        book_id: BookId,
    ) -> Result<BookDetail, ApiError> {
        self.record("fetch_book")?;
        let book = sample_books()
            .into_iter()
            .find(|b| b.id == book_id)
            .ok_or(ApiError::Status {
                status: 404,
                message: "Book not found".to_string(),
            })?;
        Ok(BookDetail {
            book,
            reviews: Vec::new(),
        })
    }

    async fn fetch_user_libraries(
        &self,
        _auth: &Credentials,
        _username: &str,
    ) -> Result<Vec<Library>, ApiError> {
        self.record("fetch_user_libraries")?;
        let mut shelves = BTreeMap::new();
        shelves.insert("currently_reading".to_string(), vec![1]);
        shelves.insert("to_read".to_string(), vec![2, 3]);
        Ok(vec![Library {
            name: "Home".to_string(),
            shelves,
        }])
    }

    async fn start_reading(
        &self,
        auth: &Credentials,
        book_id: BookId,
    ) -> Result<ReadingSession, ApiError> {
        self.record("start_reading")?;
        Ok(reading(&auth.username, book_id, 1))
    }

    async fn turn_page(
        &self,
        auth: &Credentials,
        book_id: BookId,
        direction: Direction,
        count: u32,
    ) -> Result<ReadingSession, ApiError> {
        self.record("turn_page")?;
        let page = match direction {
            Direction::Forward => 10 + count,
            Direction::Back => 10 - count,
        };
        Ok(reading(&auth.username, book_id, page))
    }

    async fn fetch_reading_sessions(
        &self,
        _auth: &Credentials,
        _username: &str,
    ) -> Result<Vec<ReadingSession>, ApiError> {
        self.record("fetch_reading_sessions")?;
        Ok(sample_reading())
    }

    async fn fetch_recommendations(
        &self,
        _auth: &Credentials,
        username: &str,
    ) -> Result<Vec<Recommendation>, ApiError> {
        self.record("fetch_recommendations")?;
        Ok(vec![Recommendation {
            from: "bob".to_string(),
            book: "Dune".to_string(),
            message: Some(format!("{username}, you'll love this")),
            date: None,
        }])
    }
}

pub fn alice() -> Credentials {
    Credentials {
        username: "alice".to_string(),
        token: format!("{TOKEN_PREFIX}alice"),
    }
}

pub fn sample_user(username: &str) -> User {
    User {
        username: username.to_string(),
        display_name: format!("{}{}", username[..1].to_uppercase(), &username[1..]),
        friends: vec!["bob".to_string(), "ghost".to_string()],
        libraries: vec!["Home".to_string()],
    }
}

fn book(id: BookId, name: &str, author: &str, pages: u32) -> Book {
    Book {
        id,
        name: name.to_string(),
        author: author.to_string(),
        year: None,
        language: Some("en".to_string()),
        publisher: None,
        pages: Some(pages),
        avg_rating: None,
    }
}

pub fn sample_books() -> Vec<Book> {
    vec![
        book(1, "Dune", "Frank Herbert", 412),
        book(2, "Hyperion", "Dan Simmons", 482),
        book(3, "Solaris", "Stanisław Lem", 204),
    ]
}

fn reading(user: &str, book_id: BookId, page: u32) -> ReadingSession {
    ReadingSession {
        user: user.to_string(),
        book_id,
        current_page: page,
        started_at: Some("2024-03-01T09:00:00Z".to_string()),
        last_read_at: Some("2024-03-02T21:30:00Z".to_string()),
    }
}

pub fn sample_reading() -> Vec<ReadingSession> {
    vec![reading("alice", 1, 42), reading("alice", 3, 7)]
}

/// A fresh App on the login screen.
pub fn test_app() -> App {
    App::default()
}

/// An App logged in as alice, on Library, with nothing loaded or issued.
pub fn authenticated_app() -> App {
    let mut app = test_app();
    app.session.begin_login();
    app.session.establish("alice".to_string(), format!("{TOKEN_PREFIX}alice"));
    app.screen = Screen::Library;
    app
}

/// Draws into an in-memory terminal and returns the buffer, one line per row.
pub fn render_text(width: u16, height: u16, draw: impl FnOnce(&mut ratatui::Frame)) -> String {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
