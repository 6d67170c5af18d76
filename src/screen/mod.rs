//! Screens and the stack that routes commands to them.
//!
//! A screen renders itself onto the console and consumes one command line
//! per `accept` call, answering whether it stays active. Screens never
//! touch the stack directly: they queue pushes on the [`Context`] and the
//! [`ScreenNavigator`] applies them once `accept` returns.

pub mod menu;
pub mod navigator;
pub mod session;

pub use menu::{MenuAction, MenuOption, MenuScreen};
pub use navigator::{NavState, ScreenNavigator};
pub use session::SessionScreen;

use crate::console::Console;
use crate::deck::Deck;
use crate::scheduler::Scheduler;
use crate::types::QuizConfig;

/// The closed set of screens.
#[derive(Debug)]
pub enum Screen {
    Menu(MenuScreen),
    Session(SessionScreen),
}

impl Screen {
    pub fn render(&mut self, ctx: &mut Context) {
        match self {
            Screen::Menu(menu) => menu.render(ctx),
            Screen::Session(session) => session.render(ctx),
        }
    }

    /// Handle one command line. `false` means this screen is done.
    pub fn accept(&mut self, command: &str, ctx: &mut Context) -> bool {
        match self {
            Screen::Menu(menu) => menu.accept(command, ctx),
            Screen::Session(session) => session.accept(command, ctx),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Screen::Menu(menu) => menu.title(),
            Screen::Session(session) => session.deck_name(),
        }
    }
}

/// Everything a screen may read or mutate while handling a command.
#[derive(Debug)]
pub struct Context {
    pub console: Console,
    pub decks: Vec<Deck>,
    pub scheduler: Box<dyn Scheduler>,
    pub config: QuizConfig,
    pending: Vec<Screen>,
}

impl Context {
    pub fn new(
        console: Console,
        decks: Vec<Deck>,
        scheduler: Box<dyn Scheduler>,
        config: QuizConfig,
    ) -> Self {
        Context {
            console,
            decks,
            scheduler,
            config,
            pending: Vec::new(),
        }
    }

    /// Ask the navigator to push `screen` once the current `accept` returns.
    pub fn push(&mut self, screen: Screen) {
        self.pending.push(screen);
    }

    pub(crate) fn take_pending(&mut self) -> Vec<Screen> {
        std::mem::take(&mut self.pending)
    }
}
