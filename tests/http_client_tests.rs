use std::time::Duration;

use serde_json::json;
use shelf::api::{ApiError, Credentials, Direction, HttpLibraryClient, LibraryService};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> HttpLibraryClient {
    HttpLibraryClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn alice() -> Credentials {
    Credentials {
        username: "alice".to_string(),
        token: "tok-alice".to_string(),
    }
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_login_posts_credentials_and_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "alice", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-alice"})))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server).login("alice", "secret").await.unwrap();
    assert_eq!(token, "tok-alice");
}

#[tokio::test]
async fn test_login_rejection_is_auth_error_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).login("alice", "nope").await.unwrap_err();
    assert_eq!(err, ApiError::Auth("Invalid credentials".to_string()));
}

#[tokio::test]
async fn test_login_server_error_reads_as_login_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).login("alice", "secret").await.unwrap_err();
    assert_eq!(err, ApiError::Auth("login failed".to_string()));
}

#[tokio::test]
async fn test_current_user_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok-alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "display_name": "Alice",
            "friends": ["bob"],
            "libraries": ["Home"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .fetch_current_user("tok-alice")
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.friends, vec!["bob"]);
}

#[tokio::test]
async fn test_expired_token_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client_for(&server).list_books(&alice()).await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(_)));
}

// ============================================================================
// Reads
// ============================================================================

#[tokio::test]
async fn test_list_books_tolerates_missing_optional_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Dune", "author": "Frank Herbert", "year": 1965, "pages": 412},
            {"id": 2, "name": "Untitled"}
        ])))
        .mount(&server)
        .await;

    let books = client_for(&server).list_books(&alice()).await.unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].year, Some(1965));
    assert_eq!(books[1].author, "");
    assert_eq!(books[1].pages, None);
}

#[tokio::test]
async fn test_book_details_include_reviews() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Solaris",
            "author": "Stanisław Lem",
            "reviews": [{"user": "bob", "rating": 5, "text": "Ocean!", "likes": 2}]
        })))
        .mount(&server)
        .await;

    let detail = client_for(&server).fetch_book(&alice(), 7).await.unwrap();
    assert_eq!(detail.book.name, "Solaris");
    assert_eq!(detail.reviews.len(), 1);
    assert_eq!(detail.reviews[0].rating, 5);
}

#[tokio::test]
async fn test_user_libraries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/libraries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Home", "shelves": {"read": [1, 2], "to_read": []}}
        ])))
        .mount(&server)
        .await;

    let libraries = client_for(&server)
        .fetch_user_libraries(&alice(), "alice")
        .await
        .unwrap();
    assert_eq!(libraries[0].shelves["read"], vec![1, 2]);
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/nobody"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_user(&alice(), "nobody")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 404,
            message: "User not found".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_recommendations(&alice(), "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Nothing listens on the discard port
    let client = HttpLibraryClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = client.list_books(&alice()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_start_reading_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reading/start"))
        .and(header("authorization", "Bearer tok-alice"))
        .and(body_json(json!({"username": "alice", "book_id": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": "alice", "book_id": 3, "current_page": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server)
        .start_reading(&alice(), 3)
        .await
        .unwrap();
    assert_eq!(session.current_page, 1);
}

#[tokio::test]
async fn test_turn_page_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reading/turn"))
        .and(body_json(json!({
            "username": "alice", "book_id": 3, "direction": "back", "count": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": "alice", "book_id": 3, "current_page": 41
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server)
        .turn_page(&alice(), 3, Direction::Back, 1)
        .await
        .unwrap();
    assert_eq!(session.current_page, 41);
}
