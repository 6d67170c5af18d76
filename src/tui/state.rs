//! TUI state: the application model and the messages that drive it.
//!
//! The model owns everything interactive: the screen stack, the console
//! the screens write to, and the line being typed. Host events are mapped
//! to [`Action`]s; the update layer applies them one at a time.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;

use crate::console::Console;
use crate::deck::Deck;
use crate::scheduler::LeitnerScheduler;
use crate::screen::{Context, MenuScreen, NavState, Screen, ScreenNavigator};
use crate::types::QuizConfig;

use super::theme;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// A mouse event (clicks and wheel).
    Mouse(MouseEvent),
    /// The terminal was resized; only a redraw is needed.
    Resize,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Type a character into the input line.
    Insert(char),
    /// Delete the last character of the input line.
    Backspace,
    /// Submit the input line as a command.
    Submit,
    /// Discard the input line.
    ClearInput,
    /// Left click at a terminal cell.
    Click { column: u16, row: u16 },
    /// Scroll history up (towards older output).
    ScrollUp,
    /// Scroll history down (towards the tail).
    ScrollDown,
    /// Clear the console and redraw the active screen.
    Redraw,
    /// Quit the application.
    Quit,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub navigator: ScreenNavigator,
    pub context: Context,
    /// The command line being typed.
    pub input: String,
    /// Rows scrolled up from the tail of the history pane.
    pub scroll_back: usize,
    /// Last known terminal area, for mapping clicks to panes.
    pub viewport: Rect,
    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
    seen_revision: u64,
}

impl App {
    /// Build the app and show the root menu.
    pub fn new(config: QuizConfig, decks: Vec<Deck>) -> Self {
        let console = Console::new(config.layout);
        let root = MenuScreen::mode_picker(config.match_policy);
        let mut context = Context::new(console, decks, Box::new(LeitnerScheduler::new()), config);
        context
            .console
            .log()
            .write_line("Welcome to Loana!", Some(theme::COLOR_WELCOME));

        let mut navigator = ScreenNavigator::new();
        navigator.push(Screen::Menu(root), &mut context);

        let seen_revision = context.console.revision();
        App {
            navigator,
            context,
            input: String::new(),
            scroll_back: 0,
            viewport: Rect::default(),
            should_quit: false,
            seen_revision,
        }
    }

    /// Hand a command to the active screen. An emptied stack quits.
    pub fn submit(&mut self, command: &str) {
        if self.navigator.submit(command, &mut self.context) == NavState::Idle {
            self.should_quit = true;
        }
    }

    /// Wipe the console and let the active screen draw itself again.
    pub fn redraw(&mut self) {
        self.context.console.clear();
        self.navigator.redraw(&mut self.context);
    }

    /// Snap back to the tail whenever the console changed.
    pub fn follow_output(&mut self) {
        let revision = self.context.console.revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.scroll_back = 0;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
