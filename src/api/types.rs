use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type BookId = u64;

/// Shelves every library view shows, even when the server knows none of them.
pub const DEFAULT_SHELVES: [&str; 3] = ["to_read", "currently_reading", "read"];

/// Who is asking. Captured by value when a command is created so that
/// background work never reads the live session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub friends: Vec<String>,
    /// Library names only; shelf contents come from `/users/{u}/libraries`.
    #[serde(default)]
    pub libraries: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub user: String,
    pub rating: i32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub likes: u32,
}

/// `GET /books/{id}`: the book plus its reviews.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// A named library as the server stores it: shelf name → book ids.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Library {
    pub name: String,
    #[serde(default)]
    pub shelves: BTreeMap<String, Vec<BookId>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReadingSession {
    #[serde(default)]
    pub user: String,
    pub book_id: BookId,
    pub current_page: u32,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub last_read_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub from: String,
    pub book: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Friend {
    pub username: String,
    pub display_name: String,
}

impl From<User> for Friend {
    fn from(user: User) -> Self {
        Friend {
            username: user.username,
            display_name: user.display_name,
        }
    }
}

/// Page-turn direction, serialized the way the server expects it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Back,
    Forward,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Back => "back",
            Direction::Forward => "forward",
        }
    }
}

/// Books grouped for display. Built client-side from `/books` and the
/// user's first library.
#[derive(Debug, Clone, PartialEq)]
pub struct LibrarySnapshot {
    pub books: Vec<Book>,
    pub shelves: BTreeMap<String, Vec<Book>>,
}

impl Default for LibrarySnapshot {
    fn default() -> Self {
        Self::from_parts(Vec::new(), None)
    }
}

impl LibrarySnapshot {
    /// Places each book id listed in `library` on its shelf. Unknown ids are skipped.
    pub fn from_parts(books: Vec<Book>, library: Option<&Library>) -> Self {
        let mut shelves: BTreeMap<String, Vec<Book>> = DEFAULT_SHELVES
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();

        if let Some(library) = library {
            for (shelf, ids) in &library.shelves {
                let entry = shelves.entry(shelf.clone()).or_default();
                for id in ids {
                    if let Some(book) = books.iter().find(|b| b.id == *id) {
                        entry.push(book.clone());
                    }
                }
            }
        }

        Self { books, shelves }
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Name of the first shelf holding `id`, if any.
    pub fn shelf_of(&self, id: BookId) -> Option<&str> {
        self.shelves
            .iter()
            .find(|(_, books)| books.iter().any(|b| b.id == id))
            .map(|(name, _)| name.as_str())
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }
}
