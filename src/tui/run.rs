//! TUI effects boundary: event loop, terminal lifecycle, input mapping.
//!
//! This is the only module that touches the real terminal. It wires the
//! state, update, and view layers to crossterm and ratatui.
//!
//! A reader thread forwards terminal events over an mpsc channel; the
//! loop handles them one at a time, so every command is fully processed
//! and drawn before the next one is read.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::ExecutableCommand;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::info;

use crate::deck::Deck;
use crate::types::QuizConfig;

use super::state::{Action, App, AppEvent};
use super::update::update;
use super::view::render;

// ============================================================================
// INPUT MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('l') => Some(Action::Redraw),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Esc => Some(Action::ClearInput),
        KeyCode::PageUp => Some(Action::ScrollUp),
        KeyCode::PageDown => Some(Action::ScrollDown),
        KeyCode::Char(c) => Some(Action::Insert(c)),
        _ => None,
    }
}

/// Map a crossterm mouse event to a semantic Action.
pub fn map_mouse(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        MouseEventKind::ScrollUp => Some(Action::ScrollUp),
        MouseEventKind::ScrollDown => Some(Action::ScrollDown),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_event_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue, // focus, paste
                Err(_) => break,
            };
            if tx.send(event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the quiz until the user quits or the screen stack empties.
pub fn run(config: QuizConfig, decks: Vec<Deck>) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config, decks);
    info!(decks = app.context.decks.len(), "quiz started");

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_event_reader(tx);

    loop {
        let size = terminal.size()?;
        app.viewport = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|frame| render(&app, frame))?;

        if app.should_quit {
            break;
        }

        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // reader thread gone
        };

        let action = match event {
            AppEvent::Key(key) => map_key(key),
            AppEvent::Mouse(mouse) => map_mouse(mouse),
            AppEvent::Resize => None,
        };
        if let Some(action) = action {
            update(&mut app, action);
        }
    }

    info!("quiz finished");
    restore_terminal()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
