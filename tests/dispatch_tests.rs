//! Full message cycles: keys → update → commands → HTTP (mocked) → update.

use std::time::Duration;

use serde_json::json;
use shelf::api::{ApiError, HttpLibraryClient};
use shelf::core::action::{Action, Key, update};
use shelf::core::command::{Command, Payload};
use shelf::core::router::Screen;
use shelf::core::session::AuthPhase;
use shelf::core::state::App;
use shelf::dispatch::execute;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_backend(server: &MockServer) {
    mount_json(server, "POST", "/auth/login", 200, json!({"token": "tok-alice"})).await;
    mount_json(
        server,
        "GET",
        "/me",
        200,
        json!({"username": "alice", "display_name": "Alice", "friends": ["bob", "ghost"], "libraries": ["Home"]}),
    )
    .await;
    mount_json(
        server,
        "GET",
        "/users/alice",
        200,
        json!({"username": "alice", "display_name": "Alice", "friends": ["bob", "ghost"], "libraries": ["Home"]}),
    )
    .await;
    mount_json(
        server,
        "GET",
        "/users/bob",
        200,
        json!({"username": "bob", "display_name": "Bob", "friends": ["alice"]}),
    )
    .await;
    mount_json(server, "GET", "/users/ghost", 404, json!({"detail": "User not found"})).await;
    mount_json(
        server,
        "GET",
        "/books",
        200,
        json!([
            {"id": 1, "name": "Dune", "author": "Frank Herbert", "pages": 412},
            {"id": 2, "name": "Hyperion", "author": "Dan Simmons"}
        ]),
    )
    .await;
    mount_json(
        server,
        "GET",
        "/users/alice/libraries",
        200,
        json!([{"name": "Home", "shelves": {"currently_reading": [1]}}]),
    )
    .await;
    mount_json(
        server,
        "GET",
        "/users/alice/reading",
        200,
        json!([{"user": "alice", "book_id": 1, "current_page": 43}]),
    )
    .await;
    mount_json(
        server,
        "POST",
        "/reading/turn",
        200,
        json!({"user": "alice", "book_id": 1, "current_page": 43}),
    )
    .await;
}

fn client_for(server: &MockServer) -> HttpLibraryClient {
    HttpLibraryClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        update(app, Action::KeyPressed(Key::Char(c)));
    }
}

/// Executes every network command and feeds the results back, in order.
async fn settle(app: &mut App, client: &HttpLibraryClient, mut pending: Vec<Command>) {
    while let Some(command) = pending.pop() {
        if !command.is_network() {
            continue;
        }
        let action = execute(client, command).await;
        pending.extend(update(app, action));
    }
}

async fn logged_in(server: &MockServer, client: &HttpLibraryClient) -> App {
    mount_backend(server).await;
    let mut app = App::default();
    type_text(&mut app, "alice,secret");
    let commands = update(&mut app, Action::KeyPressed(Key::Enter));
    settle(&mut app, client, commands).await;
    app
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_login_loads_library_and_profile() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let app = logged_in(&server, &client).await;

    assert_eq!(app.screen, Screen::Library);
    assert_eq!(app.session.phase(), AuthPhase::Authenticated);
    assert_eq!(app.in_flight, 0);
    assert!(!app.busy);
    assert_eq!(app.library.books.len(), 2);
    assert_eq!(app.library.shelf_of(1), Some("currently_reading"));
    assert_eq!(app.profile.as_ref().unwrap().display_name, "Alice");
}

#[tokio::test]
async fn test_failed_login_stays_on_login() {
    let server = MockServer::start().await;
    mount_json(&server, "POST", "/auth/login", 401, json!({"detail": "Invalid credentials"})).await;
    let client = client_for(&server);

    let mut app = App::default();
    type_text(&mut app, "alice,wrong");
    let commands = update(&mut app, Action::KeyPressed(Key::Enter));
    assert_eq!(commands.len(), 1);
    let action = execute(&client, commands.into_iter().next().unwrap()).await;
    assert_eq!(
        action,
        Action::LoginFailed(ApiError::Auth("Invalid credentials".to_string()))
    );
    let commands = update(&mut app, action);

    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.session.phase(), AuthPhase::Anonymous);
    assert!(app.notifier.message().unwrap().contains("Invalid credentials"));
    assert!(matches!(
        commands.as_slice(),
        [Command::ExpireNotification { .. }]
    ));
}

#[tokio::test]
async fn test_friends_skip_unknown_users() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let mut app = logged_in(&server, &client).await;

    app.selected_nav = 3;
    let commands = update(&mut app, Action::KeyPressed(Key::Enter));
    settle(&mut app, &client, commands).await;

    assert_eq!(app.screen, Screen::Friends);
    let names: Vec<_> = app.friends.iter().map(|f| f.username.as_str()).collect();
    assert_eq!(names, vec!["bob"]);
}

#[tokio::test]
async fn test_turn_page_refreshes_sessions() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let mut app = logged_in(&server, &client).await;

    app.selected_nav = 2;
    let commands = update(&mut app, Action::KeyPressed(Key::Enter));
    settle(&mut app, &client, commands).await;
    assert_eq!(app.screen, Screen::Reading);
    assert_eq!(app.reading.len(), 1);

    let commands = update(&mut app, Action::KeyPressed(Key::Char('l')));
    assert!(matches!(commands.as_slice(), [Command::TurnPage { .. }]));
    let action = execute(&client, commands.into_iter().next().unwrap()).await;
    assert!(matches!(
        &action,
        Action::DataLoaded {
            payload: Payload::ReadingSessions(sessions),
            ..
        } if sessions[0].current_page == 43
    ));
    update(&mut app, action);
    assert_eq!(app.in_flight, 0);
}

#[tokio::test]
async fn test_server_error_becomes_notification() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/users/alice/recommendations", 500, json!({"detail": "boom"})).await;
    let client = client_for(&server);
    let mut app = logged_in(&server, &client).await;

    app.selected_nav = 4;
    let commands = update(&mut app, Action::KeyPressed(Key::Enter));
    settle(&mut app, &client, commands).await;

    assert_eq!(app.screen, Screen::Recommendations);
    assert!(app.recommendations.is_empty());
    assert!(app.notifier.message().unwrap().contains("boom"));
    assert_eq!(app.in_flight, 0);
}
