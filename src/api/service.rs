use async_trait::async_trait;

use super::error::ApiError;
use super::types::{
    Book, BookDetail, BookId, Credentials, Direction, Library, ReadingSession, Recommendation,
    User,
};

/// Operations the client needs from the remote book-tracking service.
///
/// Every authenticated call receives the caller's `Credentials` explicitly;
/// implementations hold no session state of their own.
#[async_trait]
pub trait LibraryService: Send + Sync {
    /// Returns the name of the backend (for logs).
    fn name(&self) -> &str;

    /// Exchanges a username and password for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;

    /// The user the token belongs to.
    async fn fetch_current_user(&self, token: &str) -> Result<User, ApiError>;

    async fn fetch_user(&self, auth: &Credentials, username: &str) -> Result<User, ApiError>;

    async fn list_books(&self, auth: &Credentials) -> Result<Vec<Book>, ApiError>;

    async fn fetch_book(&self, auth: &Credentials, book_id: BookId)
    -> Result<BookDetail, ApiError>;

    async fn fetch_user_libraries(
        &self,
        auth: &Credentials,
        username: &str,
    ) -> Result<Vec<Library>, ApiError>;

    async fn start_reading(
        &self,
        auth: &Credentials,
        book_id: BookId,
    ) -> Result<ReadingSession, ApiError>;

    async fn turn_page(
        &self,
        auth: &Credentials,
        book_id: BookId,
        direction: Direction,
        count: u32,
    ) -> Result<ReadingSession, ApiError>;

    async fn fetch_reading_sessions(
        &self,
        auth: &Credentials,
        username: &str,
    ) -> Result<Vec<ReadingSession>, ApiError>;

    async fn fetch_recommendations(
        &self,
        auth: &Credentials,
        username: &str,
    ) -> Result<Vec<Recommendation>, ApiError>;
}
