//! # Command Dispatcher
//!
//! Runs the commands `update()` returns. Each command becomes one tokio task
//! that resolves to exactly one `Action`, sent back to the event loop over a
//! `std::sync::mpsc` channel.
//!
//! ```text
//! update() ──▶ Vec<Command> ──▶ Dispatcher::run_batch ──▶ tokio::spawn(execute)
//!                                                              │
//!   event loop ◀──── rx.try_recv() ◀──── tx.send(Action) ◀─────┘
//! ```
//!
//! Tasks never touch `App`. Everything they need was captured in the command.

use std::sync::{Arc, mpsc};

use futures::future::join_all;
use log::{debug, info, warn};
use tokio::time::{Instant, sleep_until};

use crate::api::{ApiError, Credentials, Friend, LibraryService, LibrarySnapshot};
use crate::core::action::Action;
use crate::core::command::{Command, Generation, Payload};

/// Pages moved by one `h`/`l` press.
const PAGE_STEP: u32 = 1;

pub struct Dispatcher {
    service: Arc<dyn LibraryService>,
    tx: mpsc::Sender<Action>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn LibraryService>, tx: mpsc::Sender<Action>) -> Self {
        Self { service, tx }
    }

    /// Spawns `command` on the runtime. Its result arrives on the channel.
    pub fn run(&self, command: Command) {
        let label = command.label();
        info!("Dispatching {} via {}", label, self.service.name());

        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = execute(service.as_ref(), command).await;
            debug!("{} resolved", label);
            if tx.send(action).is_err() {
                warn!("Dropping result of {}: receiver dropped", label);
            }
        });
    }

    /// Spawns every command independently; none waits on another.
    pub fn run_batch(&self, commands: Vec<Command>) {
        for command in commands {
            self.run(command);
        }
    }
}

/// Performs `command` against `service` and returns the action it resolves to.
pub async fn execute(service: &dyn LibraryService, command: Command) -> Action {
    match command {
        Command::Login { username, password } => login(service, &username, &password).await,
        Command::LoadLibrary { auth, generation } => {
            loaded(generation, load_library(service, &auth).await)
        }
        Command::LoadProfile { auth, generation } => loaded(
            generation,
            service
                .fetch_user(&auth, &auth.username)
                .await
                .map(Payload::Profile),
        ),
        Command::LoadFriends { auth, generation } => {
            loaded(generation, load_friends(service, &auth).await)
        }
        Command::LoadRecommendations { auth, generation } => loaded(
            generation,
            service
                .fetch_recommendations(&auth, &auth.username)
                .await
                .map(Payload::Recommendations),
        ),
        Command::LoadReadingSessions { auth, generation } => {
            loaded(generation, reading_sessions(service, &auth).await)
        }
        Command::LoadBookDetails {
            auth,
            book_id,
            generation,
        } => loaded(
            generation,
            service
                .fetch_book(&auth, book_id)
                .await
                .map(Payload::BookDetails),
        ),
        Command::StartReading {
            auth,
            book_id,
            generation,
        } => {
            let result = match service.start_reading(&auth, book_id).await {
                Ok(_) => reading_sessions(service, &auth).await,
                Err(e) => Err(e),
            };
            loaded(generation, result)
        }
        Command::TurnPage {
            auth,
            book_id,
            direction,
            generation,
        } => {
            let result = match service
                .turn_page(&auth, book_id, direction, PAGE_STEP)
                .await
            {
                Ok(_) => reading_sessions(service, &auth).await,
                Err(e) => Err(e),
            };
            loaded(generation, result)
        }
        Command::ExpireNotification { id, delay } => {
            sleep_until(Instant::now() + delay).await;
            Action::NotificationExpired(id)
        }
    }
}

fn loaded(generation: Generation, result: Result<Payload, ApiError>) -> Action {
    match result {
        Ok(payload) => Action::DataLoaded {
            generation,
            payload,
        },
        Err(e) => Action::OperationFailed(e),
    }
}

async fn login(service: &dyn LibraryService, username: &str, password: &str) -> Action {
    let token = match service.login(username, password).await {
        Ok(token) => token,
        Err(e) => return Action::LoginFailed(e),
    };
    match service.fetch_current_user(&token).await {
        Ok(user) => Action::LoginSucceeded {
            username: user.username.clone(),
            token,
            user,
        },
        Err(e) => Action::LoginFailed(e),
    }
}

/// All books, shelved according to the user's first library. A failed
/// library lookup still yields the books, on empty default shelves.
async fn load_library(
    service: &dyn LibraryService,
    auth: &Credentials,
) -> Result<Payload, ApiError> {
    let books = service.list_books(auth).await?;
    let libraries = match service.fetch_user_libraries(auth, &auth.username).await {
        Ok(libraries) => libraries,
        Err(e) => {
            warn!("Library lookup for {} failed: {}", auth.username, e);
            Vec::new()
        }
    };
    Ok(Payload::Library(LibrarySnapshot::from_parts(
        books,
        libraries.first(),
    )))
}

/// The user's friends, looked up concurrently. Friends that fail to load are left out.
async fn load_friends(
    service: &dyn LibraryService,
    auth: &Credentials,
) -> Result<Payload, ApiError> {
    let user = service.fetch_user(auth, &auth.username).await?;
    let lookups = user
        .friends
        .iter()
        .map(|name| service.fetch_user(auth, name));

    let friends: Vec<Friend> = join_all(lookups)
        .await
        .into_iter()
        .zip(&user.friends)
        .filter_map(|(result, name)| match result {
            Ok(friend) => Some(Friend::from(friend)),
            Err(e) => {
                debug!("Skipping friend {}: {}", name, e);
                None
            }
        })
        .collect();
    Ok(Payload::Friends(friends))
}

async fn reading_sessions(
    service: &dyn LibraryService,
    auth: &Credentials,
) -> Result<Payload, ApiError> {
    service
        .fetch_reading_sessions(auth, &auth.username)
        .await
        .map(Payload::ReadingSessions)
}
