//! State transitions: apply one Action to the App.
//!
//! Typed lines and clicked buttons end up in the same place: a command
//! string handed to the screen navigator. Everything else here is input
//! line editing and scrolling.

use tracing::debug;

use super::state::{Action, App};
use super::view::{max_scroll, panes};

/// Rows moved per scroll step.
const SCROLL_STEP: usize = 3;

/// Apply `action` to the app.
pub fn update(app: &mut App, action: Action) {
    match action {
        Action::Insert(c) => app.input.push(c),
        Action::Backspace => {
            app.input.pop();
        }
        Action::ClearInput => app.input.clear(),
        Action::Submit => {
            let command = std::mem::take(&mut app.input);
            debug!(command = %command, "submit");
            app.submit(&command);
        }
        Action::Click { column, row } => {
            if let Some(command) = command_at(app, column, row) {
                debug!(command = %command, column, row, "button clicked");
                app.submit(&command);
            }
        }
        Action::ScrollUp => {
            app.scroll_back = (app.scroll_back + SCROLL_STEP).min(max_scroll(app));
        }
        Action::ScrollDown => {
            app.scroll_back = app.scroll_back.saturating_sub(SCROLL_STEP);
        }
        Action::Redraw => app.redraw(),
        Action::Quit => app.should_quit = true,
    }

    app.follow_output();
}

/// The command of the button drawn at a terminal cell, if any.
///
/// Buttons with an empty command are visible but do nothing.
fn command_at(app: &App, column: u16, row: u16) -> Option<String> {
    let (_, panes) = panes(app, app.viewport);
    panes.iter().find_map(|pane| {
        let offset = pane.offset_at(column, row)?;
        let button = pane.surface.locate(offset)?;
        (!button.is_inert()).then(|| button.command().to_string())
    })
}

// ============================================================================
// TESTS
// ============================================================================
