//! Color semantics and style constants.
//!
//! Colors are what screens pass to the output surface; styles dress the
//! chrome around it (title bar, input box, help line).
//!
//! Color semantics:
//! - Green: correct answers, completed sessions
//! - Red: wrong answers, unknown commands
//! - Cyan: clickable buttons
//! - Dim: prompts and hints
//! - Wheat: the greeting

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// CONSOLE COLORS
// ============================================================================

/// Correct / success.
pub const COLOR_SAFE: Color = Color::Green;

/// Not yet due, skipped.
pub const COLOR_WARNING: Color = Color::Yellow;

/// Wrong / rejected input.
pub const COLOR_DANGER: Color = Color::Red;

/// Buttons.
pub const COLOR_INTERACTIVE: Color = Color::Cyan;

/// Prompts and hints.
pub const COLOR_DIM: Color = Color::DarkGray;

/// Headings and card fronts.
pub const COLOR_IMPORTANT: Color = Color::White;

/// Welcome banner.
pub const COLOR_WELCOME: Color = Color::Rgb(245, 222, 179);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Input line prompt marker.
pub const STYLE_PROMPT: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Text being typed.
pub const STYLE_INPUT: Style = Style::new().fg(Color::White);

/// Rule between log and display.
pub const STYLE_SEPARATOR: Style = Style::new().fg(Color::DarkGray);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
