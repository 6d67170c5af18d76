//! Menu screens: a titled list of named options.
//!
//! Each option is bound to a [`MenuAction`] value rather than a closure,
//! so the menu never captures application state. On a match the menu
//! performs the action and reports itself done; whatever the action pushed
//! takes over, and the menu comes back once that screen is popped.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::deck::Deck;
use crate::tui::theme;
use crate::types::{MatchPolicy, StudyMode};

use super::session::SessionScreen;
use super::{Context, Screen};

const BACK: &str = "Back";

/// What choosing an option does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Open the deck picker for a study mode.
    ChooseMode(StudyMode),
    /// Start a session over `decks[deck]`.
    StartSession { deck: usize, mode: StudyMode },
    /// Leave this menu (back to the caller, or quit at the root).
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub name: String,
    pub action: MenuAction,
}

impl MenuOption {
    pub fn new(name: impl Into<String>, action: MenuAction) -> Self {
        MenuOption {
            name: name.into(),
            action,
        }
    }
}

#[derive(Debug)]
pub struct MenuScreen {
    title: String,
    options: Vec<MenuOption>,
    policy: MatchPolicy,
}

impl MenuScreen {
    /// Option names are trimmed and made unique (case-insensitively), so
    /// every option has a name that selects it and nothing else.
    pub fn new(title: impl Into<String>, mut options: Vec<MenuOption>, policy: MatchPolicy) -> Self {
        make_names_unique(&mut options, &[]);
        MenuScreen {
            title: title.into(),
            options,
            policy,
        }
    }

    /// Root menu: pick how to study.
    pub fn mode_picker(policy: MatchPolicy) -> Self {
        MenuScreen::new(
            "Choose a mode",
            vec![
                MenuOption::new("Review", MenuAction::ChooseMode(StudyMode::Review)),
                MenuOption::new("Cram", MenuAction::ChooseMode(StudyMode::Cram)),
                MenuOption::new("Quit", MenuAction::Close),
            ],
            policy,
        )
    }

    /// One option per deck, then Back.
    pub fn deck_picker(decks: &[Deck], mode: StudyMode, policy: MatchPolicy) -> Self {
        let mut options: Vec<MenuOption> = decks
            .iter()
            .enumerate()
            .map(|(deck, d)| MenuOption::new(&d.name, MenuAction::StartSession { deck, mode }))
            .collect();
        make_names_unique(&mut options, &[BACK]);
        options.push(MenuOption::new(BACK, MenuAction::Close));

        MenuScreen::new(format!("{}: choose a deck", mode.label()), options, policy)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    /// The command a click on option `index` submits.
    pub fn command_for(&self, index: usize) -> String {
        match self.policy {
            MatchPolicy::Index => (index + 1).to_string(),
            MatchPolicy::Name | MatchPolicy::Either => self.options[index].name.clone(),
        }
    }

    /// Index of the option `command` selects under the menu's policy.
    pub fn find(&self, command: &str) -> Option<usize> {
        let input = command.trim();
        if input.is_empty() {
            return None;
        }

        let by_name = || {
            let wanted = input.to_lowercase();
            self.options
                .iter()
                .position(|option| option.name.to_lowercase() == wanted)
        };
        let by_index = || {
            input
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=self.options.len()).contains(n))
                .map(|n| n - 1)
        };

        match self.policy {
            MatchPolicy::Name => by_name(),
            MatchPolicy::Index => by_index(),
            MatchPolicy::Either => by_name().or_else(by_index),
        }
    }

    pub fn render(&mut self, ctx: &mut Context) {
        ctx.console.begin_frame();
        let out = ctx.console.display();

        out.write_line("", None);
        out.write_line(&self.title, Some(theme::COLOR_IMPORTANT));
        for index in 0..self.options.len() {
            let label = format!("[{}] {}", index + 1, self.options[index].name);
            out.write("  ", None, None);
            out.button(&label, &self.command_for(index), Some(theme::COLOR_INTERACTIVE), None);
            out.write_line("", None);
        }
        let hint = match self.policy {
            MatchPolicy::Name => "Type an option name, or click one.",
            MatchPolicy::Index => "Type an option number, or click one.",
            MatchPolicy::Either => "Type an option name or number, or click one.",
        };
        out.write_line(hint, Some(theme::COLOR_DIM));
    }

    pub fn accept(&mut self, command: &str, ctx: &mut Context) -> bool {
        match self.find(command) {
            Some(index) => {
                let option = &self.options[index];
                info!(menu = %self.title, option = %option.name, "menu option chosen");
                perform(option.action.clone(), ctx);
                false
            }
            None => {
                let message = if command.trim().is_empty() {
                    "Please choose an option.".to_string()
                } else {
                    format!("Unknown option: {}", command.trim())
                };
                ctx.console.log().write_line(&message, Some(theme::COLOR_DANGER));
                self.render(ctx);
                true
            }
        }
    }
}

/// Trim names, fill in blank ones and suffix repeats with " (2)", " (3)", ...
/// The first occurrence keeps its name unless it collides with `reserved`.
fn make_names_unique(options: &mut [MenuOption], reserved: &[&str]) {
    let mut taken: HashSet<String> = reserved.iter().map(|name| name.to_lowercase()).collect();

    for (index, option) in options.iter_mut().enumerate() {
        let base = match option.name.trim() {
            "" => format!("Option {}", index + 1),
            name => name.to_string(),
        };
        let mut name = base.clone();
        let mut n = 2;
        while !taken.insert(name.to_lowercase()) {
            name = format!("{base} ({n})");
            n += 1;
        }
        option.name = name;
    }
}

fn perform(action: MenuAction, ctx: &mut Context) {
    let policy = ctx.config.match_policy;

    match action {
        MenuAction::ChooseMode(mode) => {
            let picker = MenuScreen::deck_picker(&ctx.decks, mode, policy);
            ctx.push(Screen::Menu(picker));
        }
        MenuAction::StartSession { deck, mode } => {
            let Some(d) = ctx.decks.get(deck) else {
                warn!(deck, "menu referenced a deck that no longer exists");
                return;
            };
            let cards = ctx.scheduler.queue(d, mode, ctx.config.session_limit);
            let session = SessionScreen::new(deck, &d.name, mode, cards, ctx.config.echo_input);
            ctx.push(Screen::Session(session));
        }
        MenuAction::Close => {}
    }
}

// ============================================================================
// TESTS
// ============================================================================
