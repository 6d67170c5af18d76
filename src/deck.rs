//! Cards, decks, and deck discovery.
//!
//! Decks are JSON files:
//!
//! ```json
//! { "name": "Capitals", "cards": [ { "front": "France", "back": "Paris" } ] }
//! ```
//!
//! Discovery walks a directory, loads every `*.json` it finds, and keeps
//! going past bad files: they land in `DeckCatalog::skipped`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// How deep discovery descends below the deck directory.
const DISCOVERY_DEPTH: usize = 3;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck directory {0} does not exist")]
    MissingDir(PathBuf),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid deck {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("deck {0} has no cards")]
    Empty(PathBuf),
}

// ============================================================================
// TYPES
// ============================================================================

/// A single flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// What the user is shown.
    pub front: String,
    /// The expected answer.
    pub back: String,
    /// Other answers that also count as correct.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Card {
            front: front.into(),
            back: back.into(),
            aliases: Vec::new(),
        }
    }

    /// Whether `answer` matches the back or an alias, ignoring case and
    /// runs of whitespace.
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = normalize(answer);
        if answer.is_empty() {
            return false;
        }
        std::iter::once(&self.back)
            .chain(&self.aliases)
            .any(|candidate| normalize(candidate) == answer)
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cards: Vec<Card>,
}

impl Deck {
    /// Load and validate a deck file.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let contents = fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let deck: Deck = serde_json::from_str(&contents).map_err(|source| DeckError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if deck.cards.is_empty() {
            return Err(DeckError::Empty(path.to_path_buf()));
        }
        Ok(deck)
    }

    /// Built-in deck used when no deck files are available.
    pub fn example() -> Self {
        let cards = [
            ("Capital of France", "Paris"),
            ("Capital of Japan", "Tokyo"),
            ("Capital of Canada", "Ottawa"),
            ("Capital of Australia", "Canberra"),
            ("Capital of Kenya", "Nairobi"),
        ]
        .into_iter()
        .map(|(front, back)| Card::new(front, back))
        .collect();

        Deck {
            name: "Capitals".to_string(),
            description: Some("Built-in example deck".to_string()),
            cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A deck plus the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedDeck {
    pub path: PathBuf,
    pub deck: Deck,
}

/// Everything discovery found under one directory.
#[derive(Debug, Default)]
pub struct DeckCatalog {
    pub decks: Vec<LoadedDeck>,
    /// Files that looked like decks but failed to load (path, reason).
    pub skipped: Vec<(PathBuf, String)>,
}

impl DeckCatalog {
    pub fn into_decks(self) -> Vec<Deck> {
        self.decks.into_iter().map(|loaded| loaded.deck).collect()
    }
}

// ============================================================================
// DISCOVERY
// ============================================================================

/// Returns the default deck directory.
///
/// On Linux: ~/.local/share/loana/decks/
pub fn default_deck_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("loana")
        .join("decks")
}

/// Load every deck file under `dir`, in file name order.
///
/// # Errors
/// Returns an error only if `dir` itself is missing. Unreadable or
/// malformed files are recorded in `skipped`.
pub fn discover(dir: &Path) -> Result<DeckCatalog, DeckError> {
    if !dir.is_dir() {
        return Err(DeckError::MissingDir(dir.to_path_buf()));
    }

    let mut catalog = DeckCatalog::default();
    let walker = WalkDir::new(dir)
        .max_depth(DISCOVERY_DEPTH)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || !is_deck_file(path) {
            continue;
        }

        match Deck::load(path) {
            Ok(deck) => {
                debug!(path = %path.display(), cards = deck.len(), "loaded deck");
                catalog.decks.push(LoadedDeck {
                    path: path.to_path_buf(),
                    deck,
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping deck");
                catalog.skipped.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    Ok(catalog)
}

fn is_deck_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|s| s.to_str())
        .is_none_or(|name| name.starts_with('.'));
    let json = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    !hidden && json
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    const SPANISH: &str = r#"{
        "name": "Spanish",
        "cards": [
            { "front": "hola", "back": "hello", "aliases": ["hi"] },
            { "front": "gato", "back": "cat" }
        ]
    }"#;

    #[test]
    fn card_accepts_back_and_aliases_loosely() {
        let mut card = Card::new("hola", "Hello  there");
        card.aliases.push("hi".into());
        assert!(card.accepts("  hello there "));
        assert!(card.accepts("HI"));
        assert!(!card.accepts("bye"));
        assert!(!card.accepts("   "));
    }

    #[test]
    fn load_parses_deck_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_file(tmp.path(), "spanish.json", SPANISH);

        let deck = Deck::load(&path).unwrap();
        assert_eq!(deck.name, "Spanish");
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards[0].aliases, vec!["hi".to_string()]);
        assert!(deck.cards[1].aliases.is_empty());
    }

    #[test]
    fn load_rejects_empty_and_malformed_decks() {
        let tmp = TempDir::new().unwrap();
        let empty = write_file(tmp.path(), "empty.json", r#"{"name":"E","cards":[]}"#);
        let broken = write_file(tmp.path(), "broken.json", "{ not json");

        assert!(matches!(Deck::load(&empty), Err(DeckError::Empty(_))));
        assert!(matches!(Deck::load(&broken), Err(DeckError::Parse { .. })));
        assert!(matches!(
            Deck::load(&tmp.path().join("missing.json")),
            Err(DeckError::Io { .. })
        ));
    }

    #[test]
    fn discover_collects_decks_and_skips_bad_files() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "b_spanish.json", SPANISH);
        write_file(tmp.path(), "nested/a_more.json", SPANISH);
        write_file(tmp.path(), "c_broken.json", "[]");
        write_file(tmp.path(), ".hidden.json", SPANISH);
        write_file(tmp.path(), "notes.txt", "not a deck");

        let catalog = discover(tmp.path()).unwrap();
        assert_eq!(catalog.decks.len(), 2);
        assert_eq!(catalog.skipped.len(), 1);
        assert!(catalog.skipped[0].0.ends_with("c_broken.json"));
    }

    #[test]
    fn discover_missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = discover(&tmp.path().join("nope"));
        assert!(matches!(result, Err(DeckError::MissingDir(_))));
    }

    #[test]
    fn example_deck_is_usable() {
        let deck = Deck::example();
        assert!(!deck.is_empty());
        assert!(deck.cards[0].accepts("paris"));
    }

    #[test]
    fn default_deck_dir_is_reasonable() {
        let dir = default_deck_dir();
        assert!(dir.ends_with("loana/decks"));
    }
}
