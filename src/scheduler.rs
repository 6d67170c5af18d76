//! Review scheduling.
//!
//! Sessions only see the `Scheduler` trait: hand me a queue, take my
//! results. `LeitnerScheduler` is the in-memory implementation the app
//! ships with. Progress is not persisted between runs.
//!
//! Leitner rules:
//! - every card starts in box 1 and is due immediately
//! - a correct answer moves it up one box (max 5), a wrong one back to 1
//! - a card in box `n` is due again `2^(n-1)` review sessions later

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::deck::{Card, Deck};
use crate::types::StudyMode;

/// Highest Leitner box.
pub const MAX_BOX: u8 = 5;

/// What the user did with one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The raw answer, trimmed.
    pub answer: String,
    pub correct: bool,
}

/// Source of review queues and sink for review results.
pub trait Scheduler: fmt::Debug {
    /// Cards to study from `deck` this session, in order.
    fn queue(&mut self, deck: &Deck, mode: StudyMode, limit: Option<usize>) -> Vec<Card>;

    /// Record the user's response to `card` from the deck named `deck`.
    fn record(&mut self, deck: &str, card: &Card, response: &Response);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CardProgress {
    level: u8,
    due: u32,
}

impl Default for CardProgress {
    fn default() -> Self {
        CardProgress { level: 1, due: 0 }
    }
}

#[derive(Debug, Default)]
struct DeckProgress {
    session: u32,
    cards: HashMap<String, CardProgress>,
}

/// In-memory Leitner box scheduler, keyed by deck name and card front.
#[derive(Debug, Default)]
pub struct LeitnerScheduler {
    decks: HashMap<String, DeckProgress>,
}

impl LeitnerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current box of a card, if it has been reviewed.
    pub fn level(&self, deck: &str, card: &Card) -> Option<u8> {
        self.decks
            .get(deck)?
            .cards
            .get(&card.front)
            .map(|p| p.level)
    }
}

fn interval(level: u8) -> u32 {
    1 << (level.clamp(1, MAX_BOX) - 1)
}

impl Scheduler for LeitnerScheduler {
    fn queue(&mut self, deck: &Deck, mode: StudyMode, limit: Option<usize>) -> Vec<Card> {
        let limit = limit.unwrap_or(usize::MAX);

        let queue: Vec<Card> = match mode {
            StudyMode::Cram => deck.cards.iter().take(limit).cloned().collect(),
            StudyMode::Review => {
                let progress = self.decks.entry(deck.name.clone()).or_default();
                progress.session += 1;
                let now = progress.session;

                let mut due: Vec<(u8, &Card)> = deck
                    .cards
                    .iter()
                    .map(|card| {
                        let p = progress.cards.get(&card.front).copied().unwrap_or_default();
                        (p, card)
                    })
                    .filter(|(p, _)| p.due <= now)
                    .map(|(p, card)| (p.level, card))
                    .collect();
                // Stable: equal boxes keep deck order
                due.sort_by_key(|(level, _)| *level);
                due.into_iter()
                    .take(limit)
                    .map(|(_, card)| card.clone())
                    .collect()
            }
        };

        debug!(deck = %deck.name, mode = mode.label(), cards = queue.len(), "built review queue");
        queue
    }

    fn record(&mut self, deck: &str, card: &Card, response: &Response) {
        let progress = self.decks.entry(deck.to_string()).or_default();
        let session = progress.session;
        let entry = progress.cards.entry(card.front.clone()).or_default();

        entry.level = if response.correct {
            (entry.level + 1).min(MAX_BOX)
        } else {
            1
        };
        entry.due = session + interval(entry.level);

        debug!(
            deck,
            card = %card.front,
            correct = response.correct,
            level = entry.level,
            due = entry.due,
            "recorded response"
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
