//! Terminal host for the console and its screens.
//!
//! Organized along the same boundaries as the rest of the crate:
//! - `state`: the model (App), host events, and Actions
//! - `update`: applies Actions to the model
//! - `view`: draws the model, and maps cells back to buffer offsets
//! - `run`: terminal lifecycle and the event loop (the only effects)
//! - `theme`: colors and styles

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
