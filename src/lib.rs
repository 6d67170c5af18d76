//! loana: flashcard quizzes on a styled, clickable text console.

pub mod console;
pub mod deck;
pub mod logging;
pub mod report;
pub mod scheduler;
pub mod screen;
pub mod tui;
pub mod types;
