//! Deck listing output.
//!
//! Pure functions: (DeckCatalog, OutputFormat) → String.
//! No I/O, no side effects.

use std::path::PathBuf;

use serde::Serialize;

use crate::deck::DeckCatalog;
use crate::types::OutputFormat;

/// Format a deck catalog for output.
pub fn format_catalog(catalog: &DeckCatalog, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(catalog),
        OutputFormat::Json => format_json(catalog),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(catalog: &DeckCatalog) -> String {
    let mut out = String::new();

    if !catalog.decks.is_empty() {
        out.push_str("=== Decks ===\n");
        for loaded in &catalog.decks {
            out.push_str(&format!(
                "{} ({} cards)\n  └─ {}\n",
                loaded.deck.name,
                loaded.deck.len(),
                loaded.path.display()
            ));
            if let Some(description) = &loaded.deck.description {
                out.push_str(&format!("     {}\n", description));
            }
        }
        out.push('\n');
    }

    if !catalog.skipped.is_empty() {
        out.push_str("=== Skipped (could not load) ===\n");
        for (path, error) in &catalog.skipped {
            out.push_str(&format!("  {} - {}\n", path.display(), error));
        }
        out.push('\n');
    }

    let total_cards: usize = catalog.decks.iter().map(|d| d.deck.len()).sum();
    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Decks:   {}\n", catalog.decks.len()));
    out.push_str(&format!("Cards:   {}\n", total_cards));
    if !catalog.skipped.is_empty() {
        out.push_str(&format!("Skipped: {}\n", catalog.skipped.len()));
    }

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct DeckEntry<'a> {
    name: &'a str,
    path: &'a PathBuf,
    cards: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct SkippedEntry<'a> {
    path: &'a PathBuf,
    error: &'a str,
}

#[derive(Serialize)]
struct Listing<'a> {
    decks: Vec<DeckEntry<'a>>,
    skipped: Vec<SkippedEntry<'a>>,
}

fn format_json(catalog: &DeckCatalog) -> String {
    let listing = Listing {
        decks: catalog
            .decks
            .iter()
            .map(|loaded| DeckEntry {
                name: &loaded.deck.name,
                path: &loaded.path,
                cards: loaded.deck.len(),
                description: loaded.deck.description.as_deref(),
            })
            .collect(),
        skipped: catalog
            .skipped
            .iter()
            .map(|(path, error)| SkippedEntry { path, error })
            .collect(),
    };

    serde_json::to_string_pretty(&listing).unwrap_or_else(|e| {
        // This should never happen with our types, but fail explicitly
        panic!("Failed to serialize deck listing to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Card, Deck, LoadedDeck};

    fn sample_catalog() -> DeckCatalog {
        DeckCatalog {
            decks: vec![
                LoadedDeck {
                    path: PathBuf::from("/decks/spanish.json"),
                    deck: Deck {
                        name: "Spanish".into(),
                        description: Some("Everyday words".into()),
                        cards: vec![Card::new("hola", "hello"), Card::new("gato", "cat")],
                    },
                },
                LoadedDeck {
                    path: PathBuf::from("/decks/capitals.json"),
                    deck: Deck::example(),
                },
            ],
            skipped: vec![(
                PathBuf::from("/decks/broken.json"),
                "invalid deck".to_string(),
            )],
        }
    }

    #[test]
    fn human_format_lists_decks_with_paths() {
        let output = format_catalog(&sample_catalog(), OutputFormat::Human);
        assert!(output.contains("=== Decks ==="));
        assert!(output.contains("Spanish (2 cards)"));
        assert!(output.contains("└─ /decks/spanish.json"));
        assert!(output.contains("Everyday words"));
    }

    #[test]
    fn human_format_includes_skipped_and_summary() {
        let output = format_catalog(&sample_catalog(), OutputFormat::Human);
        assert!(output.contains("=== Skipped"));
        assert!(output.contains("/decks/broken.json - invalid deck"));
        assert!(output.contains("Decks:   2"));
        assert!(output.contains("Cards:   7"));
        assert!(output.contains("Skipped: 1"));
    }

    #[test]
    fn human_format_empty_catalog() {
        let output = format_catalog(&DeckCatalog::default(), OutputFormat::Human);
        assert!(!output.contains("=== Decks"));
        assert!(!output.contains("=== Skipped"));
        assert!(output.contains("Decks:   0"));
    }

    #[test]
    fn json_format_has_expected_fields() {
        let output = format_catalog(&sample_catalog(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("Invalid JSON");

        assert_eq!(parsed["decks"][0]["name"], "Spanish");
        assert_eq!(parsed["decks"][0]["cards"], 2);
        assert_eq!(parsed["decks"][1]["cards"], 5);
        assert_eq!(parsed["skipped"][0]["error"], "invalid deck");
    }

    #[test]
    fn json_format_empty_catalog() {
        let output = format_catalog(&DeckCatalog::default(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["decks"].as_array().unwrap().len(), 0);
        assert_eq!(parsed["skipped"].as_array().unwrap().len(), 0);
    }
}
