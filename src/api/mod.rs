//! # Remote Service
//!
//! Everything the client knows about the book-tracking server: wire types,
//! the error taxonomy, the `LibraryService` seam, and its HTTP implementation.

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::HttpLibraryClient;
pub use error::ApiError;
pub use service::LibraryService;
pub use types::{
    Book, BookDetail, BookId, Credentials, Direction, Friend, Library, LibrarySnapshot,
    ReadingSession, Recommendation, Review, User,
};
