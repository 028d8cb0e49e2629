//! # Core Application Logic
//!
//! Shelf's business logic. It knows nothing about any specific UI technology
//! and performs no I/O.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (messages)    │
//!                    │  • update() (reducer)   │
//!                    │  • Command (effects)    │
//!                    └───────────┬─────────────┘
//!                                │ Vec<Command>
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │ Dispatcher │
//!     │  Adapter   │ ◀──────── Action ─────── │  (tokio)   │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all client state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`command`]: Deferred side effects returned by `update()`
//! - [`router`]: Screens, nav bar and per-screen key bindings
//! - [`session`]: Login phases and the bearer token
//! - [`notification`]: The single transient error message
//! - [`config`]: `~/.shelf/config.toml` and override resolution

pub mod action;
pub mod command;
pub mod config;
pub mod notification;
pub mod router;
pub mod session;
pub mod state;
