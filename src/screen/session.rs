//! Review session: one pass over a queue of cards.
//!
//! Each command is the answer to the card at the front of the queue.
//! Two commands are reserved: `:skip` sends the card to the back without
//! grading it, `:quit` ends the session early. The session reports itself
//! done exactly when the queue runs dry.

use std::collections::VecDeque;

use tracing::{error, info};

use crate::deck::Card;
use crate::scheduler::Response;
use crate::tui::theme;
use crate::types::StudyMode;

use super::Context;

pub const SKIP_COMMAND: &str = ":skip";
pub const QUIT_COMMAND: &str = ":quit";

#[derive(Debug)]
pub struct SessionScreen {
    deck: usize,
    deck_name: String,
    mode: StudyMode,
    queue: VecDeque<Card>,
    echo_input: bool,
    total: usize,
    answered: usize,
    correct: usize,
}

impl SessionScreen {
    pub fn new(
        deck: usize,
        deck_name: &str,
        mode: StudyMode,
        cards: Vec<Card>,
        echo_input: bool,
    ) -> Self {
        SessionScreen {
            deck,
            deck_name: deck_name.to_string(),
            mode,
            total: cards.len(),
            queue: cards.into(),
            echo_input,
            answered: 0,
            correct: 0,
        }
    }

    pub fn deck(&self) -> usize {
        self.deck
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn current(&self) -> Option<&Card> {
        self.queue.front()
    }

    /// (correct, answered) so far.
    pub fn score(&self) -> (usize, usize) {
        (self.correct, self.answered)
    }

    pub fn render(&mut self, ctx: &mut Context) {
        ctx.console.begin_frame();
        let out = ctx.console.display();

        let Some(card) = self.queue.front() else {
            out.write_line("Nothing to review. Press Enter to return.", Some(theme::COLOR_WARNING));
            return;
        };

        let position = self.answered + 1;
        let shown = (self.answered + self.queue.len()).max(position);
        out.write_line("", None);
        out.write_line(
            &format!("{} · {} · card {} of {}", self.deck_name, self.mode.label(), position, shown),
            Some(theme::COLOR_DIM),
        );
        out.write_line(&card.front, Some(theme::COLOR_IMPORTANT));
        out.button("[skip]", SKIP_COMMAND, Some(theme::COLOR_INTERACTIVE), None);
        out.write(" ", None, None);
        out.button("[quit]", QUIT_COMMAND, Some(theme::COLOR_INTERACTIVE), None);
        out.write_line("", None);
        out.write_line("Type your answer and press Enter.", Some(theme::COLOR_DIM));
    }

    pub fn accept(&mut self, command: &str, ctx: &mut Context) -> bool {
        let Some(card) = self.queue.pop_front() else {
            return false;
        };

        let input = command.trim();
        match input {
            QUIT_COMMAND => {
                self.queue.push_front(card);
                info!(deck = %self.deck_name, remaining = self.queue.len(), "session abandoned");
                self.write_summary(ctx);
                return false;
            }
            SKIP_COMMAND => {
                ctx.console
                    .log()
                    .write_line(&format!("Skipped: {}", card.front), Some(theme::COLOR_WARNING));
                self.queue.push_back(card);
                self.render(ctx);
                return true;
            }
            _ => {}
        }

        let echoed = self
            .echo_input
            .then(|| ctx.console.log().write_line(&format!("> {command}"), None));

        let correct = card.accepts(input);
        self.answered += 1;
        if correct {
            self.correct += 1;
        }

        let log = ctx.console.log();
        if let Some(range) = echoed {
            // Recolor the echoed answer now that it is graded; skip the newline
            let color = if correct { theme::COLOR_SAFE } else { theme::COLOR_DANGER };
            if let Err(e) = log.overlay(range.start, range.len() - 1, Some(color), None) {
                error!(error = %e, "failed to restyle echoed answer");
            }
        }
        if correct {
            log.write_line("Correct!", Some(theme::COLOR_SAFE));
        } else {
            log.write("Wrong. ", Some(theme::COLOR_DANGER), None);
            log.write_line(&format!("Answer: {}", card.back), Some(theme::COLOR_IMPORTANT));
        }

        let response = Response {
            answer: input.to_string(),
            correct,
        };
        ctx.scheduler.record(&self.deck_name, &card, &response);

        if self.queue.is_empty() {
            info!(deck = %self.deck_name, correct = self.correct, answered = self.answered, "session complete");
            self.write_summary(ctx);
            return false;
        }

        self.render(ctx);
        true
    }

    fn write_summary(&self, ctx: &mut Context) {
        let color = if self.answered > 0 && self.correct == self.answered {
            theme::COLOR_SAFE
        } else {
            theme::COLOR_IMPORTANT
        };
        ctx.console.log().write_line(
            &format!(
                "Session over: {} of {} correct ({} cards queued).",
                self.correct, self.answered, self.total
            ),
            Some(color),
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
