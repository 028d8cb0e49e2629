//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! ```text
//! draw ─▶ poll key (≤ 100ms) ─▶ update ─▶ dispatch commands
//!   ▲                                          │
//!   └──── update ◀── rx.try_recv() one by one ◀┘
//! ```
//!
//! Each message is handled to completion before the next is taken. Redraws
//! happen only after something was processed.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::api::LibraryService;
use crate::core::action::{Action, Key, update};
use crate::core::config::ResolvedConfig;
use crate::core::router::{Screen, is_quit_key};
use crate::core::state::App;
use crate::dispatch::Dispatcher;
use crate::tui::event::{TuiEvent, poll_event_timeout};

pub use theme::Theme;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // Lets the terminal report Esc distinctly from escape sequences.
        // Terminals without the protocol ignore it.
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

/// Runs the client until the user quits. Must be called inside a tokio runtime.
///
/// Fails only if the terminal cannot be set up or drawn to.
pub fn run(config: &ResolvedConfig, service: Arc<dyn LibraryService>) -> io::Result<()> {
    let mut terminal = ratatui::try_init()?;
    let guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Could not enable terminal modes: {}", e);
            None
        }
    };

    let result = event_loop(&mut terminal, App::new(config.core), service);

    drop(guard);
    ratatui::restore();
    info!("Terminal restored");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    mut app: App,
    service: Arc<dyn LibraryService>,
) -> io::Result<()> {
    let theme = Theme::default();
    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(service, tx);

    let size = terminal.size()?;
    process(&mut app, &dispatcher, Action::ResizeTerminal(size.width, size.height));
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &theme))?;
            needs_redraw = false;
        }

        if let Some(event) = poll_event_timeout(POLL_INTERVAL)? {
            let action = match event {
                TuiEvent::Quit => {
                    info!("Quit requested (Ctrl+C)");
                    return Ok(());
                }
                TuiEvent::Key(key) if is_quit_key(app.screen, key) => {
                    info!("Quit requested on {:?}", app.screen);
                    return Ok(());
                }
                TuiEvent::Key(key) => Action::KeyPressed(key),
                TuiEvent::Resize(width, height) => Action::ResizeTerminal(width, height),
            };
            process(&mut app, &dispatcher, action);
            needs_redraw = true;
        }

        // Completed commands, one message at a time
        while let Ok(action) = rx.try_recv() {
            process(&mut app, &dispatcher, action);
            needs_redraw = true;
        }
    }
}

/// Log line for an action. Tokens and login-form keystrokes stay out of the log.
fn describe(action: &Action, screen: Screen) -> String {
    match action {
        Action::LoginSucceeded { username, .. } => format!("LoginSucceeded({username})"),
        Action::KeyPressed(Key::Char(_)) if screen == Screen::Login => {
            "KeyPressed(<text>)".to_string()
        }
        Action::DataLoaded { generation, payload } => {
            format!("DataLoaded({:?}, generation {generation})", payload.kind())
        }
        other => format!("{other:?}"),
    }
}

fn process(app: &mut App, dispatcher: &Dispatcher, action: Action) {
    debug!("Event loop received: {}", describe(&action, app.screen));
    let commands = update(app, action);
    if !commands.is_empty() {
        debug!(
            "Scheduling {} command(s), {} in flight",
            commands.len(),
            app.in_flight
        );
    }
    dispatcher.run_batch(commands);
}
