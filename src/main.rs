//! loana CLI
//!
//! Flashcard quizzes in a clickable terminal console.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use loana::console::ConsoleLayout;
use loana::deck::{Deck, DeckError, default_deck_dir, discover};
use loana::logging;
use loana::report::format_catalog;
use loana::types::{MatchPolicy, OutputFormat, QuizConfig};

#[derive(Parser)]
#[command(name = "loana")]
#[command(about = "Flashcard quizzes in a clickable terminal console")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log file (default: loana.log in the data directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive quiz (the default)
    Quiz(QuizArgs),

    /// List the decks found in the deck directory
    Decks {
        /// Deck directory (default: data directory)
        #[arg(long)]
        decks: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Args, Default)]
struct QuizArgs {
    /// Deck directory (default: data directory, or the built-in deck)
    #[arg(long)]
    decks: Option<PathBuf>,

    /// How menu options are selected by typed commands
    #[arg(long, value_enum, default_value = "name")]
    select: MatchPolicyArg,

    /// Single scrolling console, or a log above a redrawn display
    #[arg(long, value_enum, default_value = "single")]
    layout: LayoutArg,

    /// Echo each answer into the console before grading it
    #[arg(long)]
    echo: bool,

    /// Maximum cards per session (0 = no limit)
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum MatchPolicyArg {
    #[default]
    Name,
    Index,
    Either,
}

impl From<MatchPolicyArg> for MatchPolicy {
    fn from(arg: MatchPolicyArg) -> Self {
        match arg {
            MatchPolicyArg::Name => MatchPolicy::Name,
            MatchPolicyArg::Index => MatchPolicy::Index,
            MatchPolicyArg::Either => MatchPolicy::Either,
        }
    }
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum LayoutArg {
    #[default]
    Single,
    Split,
}

impl From<LayoutArg> for ConsoleLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Single => ConsoleLayout::Single,
            LayoutArg::Split => ConsoleLayout::Split,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

impl From<QuizArgs> for QuizConfig {
    fn from(args: QuizArgs) -> Self {
        QuizConfig {
            deck_dir: args.decks,
            match_policy: args.select.into(),
            layout: args.layout.into(),
            echo_input: args.echo,
            session_limit: (args.limit > 0).then_some(args.limit),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("Note: logging disabled ({})", e);
    }

    let command = cli.command.unwrap_or_else(|| Commands::Quiz(QuizArgs {
        limit: 20,
        ..Default::default()
    }));

    let result = match command {
        Commands::Quiz(args) => cmd_quiz(args.into()),
        Commands::Decks { decks, format } => cmd_decks(decks, format.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// DECK RESOLUTION
// ============================================================================

/// Decks for a quiz.
///
/// An explicit directory must exist and hold at least one deck. The
/// default directory is optional: without it the built-in deck is used.
fn resolve_decks(deck_dir: Option<PathBuf>) -> Result<Vec<Deck>, String> {
    match deck_dir {
        Some(dir) => {
            let catalog = discover(&dir).map_err(|e| e.to_string())?;
            for (path, error) in &catalog.skipped {
                eprintln!("Note: skipped {}: {}", path.display(), error);
            }
            if catalog.decks.is_empty() {
                return Err(format!("No decks found in {}", dir.display()));
            }
            Ok(catalog.into_decks())
        }
        None => {
            let dir = default_deck_dir();
            match discover(&dir) {
                Ok(catalog) if !catalog.decks.is_empty() => Ok(catalog.into_decks()),
                Ok(_) => {
                    info!(dir = %dir.display(), "no decks found, using built-in deck");
                    Ok(vec![Deck::example()])
                }
                Err(DeckError::MissingDir(_)) => {
                    info!(dir = %dir.display(), "deck directory missing, using built-in deck");
                    Ok(vec![Deck::example()])
                }
                Err(e) => {
                    warn!(error = %e, "deck discovery failed, using built-in deck");
                    Ok(vec![Deck::example()])
                }
            }
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_quiz(config: QuizConfig) -> Result<(), String> {
    let decks = resolve_decks(config.deck_dir.clone())?;
    info!(
        decks = decks.len(),
        policy = ?config.match_policy,
        layout = ?config.layout,
        "starting quiz"
    );
    loana::tui::run(config, decks).map_err(|e| e.to_string())
}

fn cmd_decks(deck_dir: Option<PathBuf>, format: OutputFormat) -> Result<(), String> {
    let dir = deck_dir.unwrap_or_else(default_deck_dir);
    let catalog = discover(&dir).map_err(|e| e.to_string())?;

    if format == OutputFormat::Human {
        eprintln!("Deck directory: {}", dir.display());
        eprintln!();
    }
    print!("{}", format_catalog(&catalog, format));

    Ok(())
}
