//! The screen stack.
//!
//! State machine:
//! - `Idle`: empty stack, commands are ignored
//! - `Active`: the top screen receives every command
//!
//! After `accept` returns, screens the active screen queued are pushed on
//! top of it (each rendered once). With nothing queued, `true` keeps the
//! screen and `false` pops it, re-rendering whatever is revealed.

use tracing::{debug, info};

use super::{Context, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Active,
}

#[derive(Debug, Default)]
pub struct ScreenNavigator {
    stack: Vec<Screen>,
}

impl ScreenNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavState {
        if self.stack.is_empty() {
            NavState::Idle
        } else {
            NavState::Active
        }
    }

    pub fn is_idle(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn active(&self) -> Option<&Screen> {
        self.stack.last()
    }

    /// Titles from the root to the active screen.
    pub fn breadcrumbs(&self) -> Vec<&str> {
        self.stack.iter().map(Screen::title).collect()
    }

    /// Make `screen` active and render it.
    pub fn push(&mut self, screen: Screen, ctx: &mut Context) {
        debug!(screen = screen.title(), depth = self.stack.len() + 1, "push screen");
        self.stack.push(screen);
        if let Some(top) = self.stack.last_mut() {
            top.render(ctx);
        }
    }

    /// Route one command line to the active screen.
    pub fn submit(&mut self, command: &str, ctx: &mut Context) -> NavState {
        let Some(top) = self.stack.last_mut() else {
            return NavState::Idle;
        };

        let keep = top.accept(command, ctx);

        let pushed = ctx.take_pending();
        if !pushed.is_empty() {
            for screen in pushed {
                self.push(screen, ctx);
            }
            return NavState::Active;
        }

        if !keep {
            if let Some(done) = self.stack.pop() {
                info!(screen = done.title(), depth = self.stack.len(), "pop screen");
            }
            self.redraw(ctx);
        }
        self.state()
    }

    /// Render the active screen again, e.g. after the console was cleared.
    pub fn redraw(&mut self, ctx: &mut Context) {
        if let Some(top) = self.stack.last_mut() {
            top.render(ctx);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Console, ConsoleLayout};
    use crate::deck::{Card, Deck};
    use crate::scheduler::LeitnerScheduler;
    use crate::screen::{MenuAction, MenuOption, MenuScreen, SessionScreen};
    use crate::types::{MatchPolicy, QuizConfig, StudyMode};

    fn context() -> Context {
        Context::new(
            Console::new(ConsoleLayout::Single),
            vec![Deck::example()],
            Box::new(LeitnerScheduler::new()),
            QuizConfig::default(),
        )
    }

    fn menu_ab() -> Screen {
        Screen::Menu(MenuScreen::new(
            "Root",
            vec![
                MenuOption::new("A", MenuAction::Close),
                MenuOption::new(
                    "B",
                    MenuAction::StartSession {
                        deck: 0,
                        mode: StudyMode::Cram,
                    },
                ),
            ],
            MatchPolicy::Name,
        ))
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn push_renders_immediately() {
        let mut ctx = context();
        let mut nav = ScreenNavigator::new();
        assert_eq!(nav.state(), NavState::Idle);

        nav.push(menu_ab(), &mut ctx);
        assert_eq!(nav.state(), NavState::Active);
        assert!(ctx.console.display_surface().text().contains("[1] A"));
    }

    #[test]
    fn rejected_commands_keep_depth() {
        let mut ctx = context();
        let mut nav = ScreenNavigator::new();
        nav.push(menu_ab(), &mut ctx);

        for _ in 0..5 {
            assert_eq!(nav.submit("nonsense", &mut ctx), NavState::Active);
            assert_eq!(nav.depth(), 1);
        }
    }

    #[test]
    fn option_pushing_session_keeps_menu_beneath() {
        let mut ctx = context();
        let mut nav = ScreenNavigator::new();
        nav.push(menu_ab(), &mut ctx);
        let before = count(ctx.console.display_surface().text(), "Capital of France");

        nav.submit("B", &mut ctx);

        assert_eq!(nav.breadcrumbs(), vec!["Root", "Capitals"]);
        assert!(matches!(nav.active(), Some(Screen::Session(_))));
        let after = count(ctx.console.display_surface().text(), "Capital of France");
        assert_eq!(after - before, 1, "session rendered exactly once");
    }

    #[test]
    fn false_without_push_pops_and_redraws_previous() {
        let mut ctx = context();
        let mut nav = ScreenNavigator::new();
        nav.push(menu_ab(), &mut ctx);
        nav.submit("B", &mut ctx);
        assert_eq!(nav.depth(), 2);

        ctx.console.clear();
        assert_eq!(nav.submit(":quit", &mut ctx), NavState::Active);
        assert_eq!(nav.depth(), 1);
        assert!(ctx.console.display_surface().text().contains("[2] B"));
    }

    #[test]
    fn popping_the_root_goes_idle() {
        let mut ctx = context();
        let mut nav = ScreenNavigator::new();
        nav.push(menu_ab(), &mut ctx);

        assert_eq!(nav.submit("a", &mut ctx), NavState::Idle);
        assert!(nav.is_idle());
        assert_eq!(nav.submit("a", &mut ctx), NavState::Idle);
    }

    #[test]
    fn exhausted_session_returns_to_menu() {
        let mut ctx = context();
        let mut nav = ScreenNavigator::new();
        nav.push(menu_ab(), &mut ctx);
        nav.push(
            Screen::Session(SessionScreen::new(
                0,
                "Tiny",
                StudyMode::Cram,
                vec![Card::new("q", "a")],
                false,
            )),
            &mut ctx,
        );

        assert_eq!(nav.submit("a", &mut ctx), NavState::Active);
        assert_eq!(nav.breadcrumbs(), vec!["Root"]);
    }

    #[test]
    fn clear_mid_session_leaves_stack_alone() {
        let mut ctx = context();
        let mut nav = ScreenNavigator::new();
        nav.push(menu_ab(), &mut ctx);
        nav.submit("B", &mut ctx);

        ctx.console.clear();
        assert_eq!(nav.depth(), 2);
        assert!(ctx.console.display_surface().is_empty());

        nav.redraw(&mut ctx);
        let text = ctx.console.display_surface().text();
        assert!(text.contains("Capital of France"));
        assert!(!text.contains("[1] A"));
    }
}
