//! Shared configuration and domain enums for loana.

use std::path::PathBuf;

use crate::console::ConsoleLayout;

// ============================================================================
// ENUMS
// ============================================================================

/// How a menu matches a typed command against its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Option name, trimmed and case-insensitive ("review", "Capitals").
    #[default]
    Name,
    /// 1-based position in the option list ("1", "2").
    Index,
    /// Name first, then index.
    Either,
}

/// Which cards a session draws from a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    /// Cards the scheduler considers due, weakest first.
    Review,
    /// Every card in deck order, ignoring the schedule.
    Cram,
}

impl StudyMode {
    pub fn label(self) -> &'static str {
        match self {
            StudyMode::Review => "Review",
            StudyMode::Cram => "Cram",
        }
    }
}

/// Output format for non-interactive listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Resolved settings for an interactive quiz.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Directory holding `*.json` decks. None = default data directory.
    pub deck_dir: Option<PathBuf>,
    /// Menu command matching.
    pub match_policy: MatchPolicy,
    /// One shared surface or log + display.
    pub layout: ConsoleLayout,
    /// Echo each answer into the console before grading it.
    pub echo_input: bool,
    /// Maximum cards per session (None = whole queue).
    pub session_limit: Option<usize>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            deck_dir: None,
            match_policy: MatchPolicy::Name,
            layout: ConsoleLayout::Single,
            echo_input: false,
            session_limit: Some(20),
        }
    }
}
