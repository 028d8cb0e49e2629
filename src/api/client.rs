//! HTTP implementation of `LibraryService`.
//!
//! Plain REST/JSON. Authenticated requests carry `Authorization: Bearer <token>`;
//! usernames and ids are appended as percent-encoded path segments, never
//! formatted into the URL string.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::service::LibraryService;
use super::types::{
    Book, BookDetail, BookId, Credentials, Direction, Library, ReadingSession, Recommendation,
    User,
};

// ============================================================================
// Wire-only request/response bodies
// ============================================================================

#[derive(Serialize, Debug)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize, Debug)]
struct LoginResponse {
    token: String,
}

#[derive(Serialize, Debug)]
struct StartReadingRequest<'a> {
    username: &'a str,
    book_id: BookId,
}

#[derive(Serialize, Debug)]
struct TurnPageRequest<'a> {
    username: &'a str,
    book_id: BookId,
    direction: Direction,
    count: u32,
}

/// Error body FastAPI-style servers send back (`{"detail": "..."}`).
#[derive(Deserialize, Debug)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Pulls a human-readable reason out of an error response body.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorBody { detail }) if !detail.is_null() => detail.to_string(),
        _ => body.trim().to_string(),
    }
}

// ============================================================================
// Client
// ============================================================================

pub struct HttpLibraryClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpLibraryClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// Fails with `ApiError::Validation` if the address is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Validation(format!("bad service address {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Validation(format!(
                "service address cannot hold a path: {base_url}"
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        info!("HTTP library client targeting {}", base_url);
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Validation(format!("bad service address: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("Content-Type", "application/json");
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes a JSON body of type `T`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!("{} -> {} ({} bytes)", url, status, body.len());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("Auth rejected for {}: {}", url, status);
            let detail = error_detail(&body);
            return Err(ApiError::Auth(if detail.is_empty() {
                status.to_string()
            } else {
                detail
            }));
        }

        if !status.is_success() {
            warn!("Service error for {}: {} - {}", url, status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }

        serde_json::from_str(&body).map_err(ApiError::from)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::GET, url, token)).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::POST, url, token).json(body))
            .await
    }
}

#[async_trait]
impl LibraryService for HttpLibraryClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = LoginRequest { username, password };
        let response: LoginResponse = self
            .post(&["auth", "login"], None, &body)
            .await
            .map_err(|e| match e {
                // Any rejection of the login call is a credential problem from the user's view.
                ApiError::Status { message, .. } => ApiError::Auth(if message.is_empty() {
                    "login failed".to_string()
                } else {
                    message
                }),
                other => other,
            })?;
        info!("Login accepted for {}", username);
        Ok(response.token)
    }

    async fn fetch_current_user(&self, token: &str) -> Result<User, ApiError> {
        self.get(&["me"], Some(token)).await
    }

    async fn fetch_user(&self, auth: &Credentials, username: &str) -> Result<User, ApiError> {
        self.get(&["users", username], Some(&auth.token)).await
    }

    async fn list_books(&self, auth: &Credentials) -> Result<Vec<Book>, ApiError> {
        self.get(&["books"], Some(&auth.token)).await
    }

    async fn fetch_book(
        &self,
        auth: &Credentials,
        book_id: BookId,
    ) -> Result<BookDetail, ApiError> {
        let id = book_id.to_string();
        self.get(&["books", &id], Some(&auth.token)).await
    }

    async fn fetch_user_libraries(
        &self,
        auth: &Credentials,
        username: &str,
    ) -> Result<Vec<Library>, ApiError> {
        self.get(&["users", username, "libraries"], Some(&auth.token))
            .await
    }

    async fn start_reading(
        &self,
        auth: &Credentials,
        book_id: BookId,
    ) -> Result<ReadingSession, ApiError> {
        let body = StartReadingRequest {
            username: &auth.username,
            book_id,
        };
        self.post(&["reading", "start"], Some(&auth.token), &body)
            .await
    }

    async fn turn_page(
        &self,
        auth: &Credentials,
        book_id: BookId,
        direction: Direction,
        count: u32,
    ) -> Result<ReadingSession, ApiError> {
        let body = TurnPageRequest {
            username: &auth.username,
            book_id,
            direction,
            count,
        };
        self.post(&["reading", "turn"], Some(&auth.token), &body)
            .await
    }

    async fn fetch_reading_sessions(
        &self,
        auth: &Credentials,
        username: &str,
    ) -> Result<Vec<ReadingSession>, ApiError> {
        self.get(&["users", username, "reading"], Some(&auth.token))
            .await
    }

    async fn fetch_recommendations(
        &self,
        auth: &Credentials,
        username: &str,
    ) -> Result<Vec<Recommendation>, ApiError> {
        self.get(&["users", username, "recommendations"], Some(&auth.token))
            .await
    }
}
