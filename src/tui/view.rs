//! Rendering: map App state to ratatui widgets.
//!
//! Surfaces are laid out with the same row functions the click handler
//! uses (`console::hit`), so what is drawn in a cell is what a click on
//! that cell hits.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::console::hit::{VisualRow, layout_rows, visible_rows};
use crate::console::{ConsoleLayout, OutputSurface, StyleRun};
use crate::screen::Screen;

use super::state::App;
use super::theme;

// ============================================================================
// LAYOUT
// ============================================================================

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub title: Rect,
    pub log: Option<Rect>,
    pub separator: Option<Rect>,
    pub display: Rect,
    pub input: Rect,
    pub help: Rect,
}

impl Areas {
    pub fn compute(area: Rect, layout: ConsoleLayout) -> Self {
        match layout {
            ConsoleLayout::Single => {
                let chunks = Layout::vertical([
                    Constraint::Length(1), // title
                    Constraint::Min(0),    // display
                    Constraint::Length(1), // input
                    Constraint::Length(1), // help
                ])
                .split(area);
                Areas {
                    title: chunks[0],
                    log: None,
                    separator: None,
                    display: chunks[1],
                    input: chunks[2],
                    help: chunks[3],
                }
            }
            ConsoleLayout::Split => {
                let chunks = Layout::vertical([
                    Constraint::Length(1),      // title
                    Constraint::Percentage(45), // log
                    Constraint::Length(1),      // separator
                    Constraint::Min(0),         // display
                    Constraint::Length(1),      // input
                    Constraint::Length(1),      // help
                ])
                .split(area);
                Areas {
                    title: chunks[0],
                    log: Some(chunks[1]),
                    separator: Some(chunks[2]),
                    display: chunks[3],
                    input: chunks[4],
                    help: chunks[5],
                }
            }
        }
    }
}

/// A surface placed in a screen region.
#[derive(Debug, Clone, Copy)]
pub struct Pane<'a> {
    pub surface: &'a OutputSurface,
    pub area: Rect,
    /// Rows scrolled up from the tail.
    pub scroll: usize,
}

impl Pane<'_> {
    pub fn rows(&self) -> Vec<VisualRow> {
        layout_rows(self.surface.text(), self.area.width)
    }

    /// Byte offset of the character drawn at an absolute terminal cell.
    pub fn offset_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.area.contains(Position::new(column, row)) {
            return None;
        }
        let rows = self.rows();
        let window = visible_rows(rows.len(), self.area.height, self.scroll);
        let index = window.start + usize::from(row - self.area.y);
        if index >= window.end {
            return None;
        }
        crate::console::hit::offset_at(self.surface.text(), &rows, column - self.area.x, index)
    }
}

/// The panes shown inside `area`. The history pane (log when split,
/// display otherwise) honours `scroll_back`; a split display always
/// shows its tail.
pub fn panes(app: &App, area: Rect) -> (Areas, Vec<Pane<'_>>) {
    let console = &app.context.console;
    let areas = Areas::compute(area, console.layout());

    let mut panes = Vec::with_capacity(2);
    match (console.log_surface(), areas.log) {
        (Some(log), Some(log_area)) => {
            panes.push(Pane {
                surface: log,
                area: log_area,
                scroll: app.scroll_back,
            });
            panes.push(Pane {
                surface: console.display_surface(),
                area: areas.display,
                scroll: 0,
            });
        }
        _ => panes.push(Pane {
            surface: console.display_surface(),
            area: areas.display,
            scroll: app.scroll_back,
        }),
    }
    (areas, panes)
}

/// How far the history pane can scroll up.
pub fn max_scroll(app: &App) -> usize {
    let (_, panes) = panes(app, app.viewport);
    panes
        .first()
        .map(|pane| {
            pane.rows()
                .len()
                .saturating_sub(usize::from(pane.area.height))
        })
        .unwrap_or(0)
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole UI to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let (areas, panes) = panes(app, frame.area());

    frame.render_widget(render_title(app), areas.title);

    for pane in &panes {
        frame.render_widget(render_pane(pane), pane.area);
    }

    if let Some(separator) = areas.separator {
        let rule = "─".repeat(usize::from(separator.width));
        frame.render_widget(
            Paragraph::new(Span::styled(rule, theme::STYLE_SEPARATOR)),
            separator,
        );
    }

    render_input(&app.input, frame, areas.input);
    frame.render_widget(render_help(app.navigator.active()), areas.help);
}

// ============================================================================
// WIDGETS
// ============================================================================

/// Title bar: app name plus the path through the screen stack.
fn render_title(app: &App) -> Paragraph<'_> {
    let crumbs = app.navigator.breadcrumbs();
    let title = if crumbs.is_empty() {
        "loana".to_string()
    } else {
        format!("loana · {}", crumbs.join(" › "))
    };
    Paragraph::new(Line::from(Span::styled(title, theme::STYLE_TITLE)))
}

fn render_pane<'a>(pane: &Pane<'a>) -> Paragraph<'a> {
    let text = pane.surface.text();
    let rows = pane.rows();
    let window = visible_rows(rows.len(), pane.area.height, pane.scroll);
    let runs = pane.surface.style_runs();

    let lines: Vec<Line<'a>> = rows[window]
        .iter()
        .map(|row| styled_row(text, *row, &runs))
        .collect();
    Paragraph::new(lines)
}

/// Cut the style runs overlapping `row` down to the row's range.
fn styled_row<'a>(text: &'a str, row: VisualRow, runs: &[StyleRun]) -> Line<'a> {
    let spans: Vec<Span<'a>> = runs
        .iter()
        .filter(|run| run.start < row.end && run.end > row.start)
        .map(|run| {
            let start = run.start.max(row.start);
            let end = run.end.min(row.end);
            Span::styled(
                &text[start..end],
                Style::new().fg(run.foreground).bg(run.background),
            )
        })
        .collect();
    Line::from(spans)
}

const PROMPT: &str = "> ";

/// The tail of `input` that fits in `room` cells, and its width.
fn input_tail(input: &str, room: usize) -> (&str, usize) {
    let mut start = input.len();
    let mut cells = 0;
    for (index, ch) in input.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if cells + w > room {
            break;
        }
        cells += w;
        start = index;
    }
    (&input[start..], cells)
}

/// Input line with the cursor after the last typed character.
fn render_input(input: &str, frame: &mut Frame, area: Rect) {
    let prompt_width = PROMPT.width();
    let room = usize::from(area.width).saturating_sub(prompt_width + 1);
    let (shown, cells) = input_tail(input, room);
    let cursor_x = area.x + (prompt_width + cells) as u16;

    let line = Line::from(vec![
        Span::styled(PROMPT, theme::STYLE_PROMPT),
        Span::styled(shown, theme::STYLE_INPUT),
    ]);
    frame.render_widget(Paragraph::new(line), area);
    frame.set_cursor_position(Position::new(cursor_x, area.y));
}

/// Help line showing what the active screen accepts.
fn render_help(active: Option<&Screen>) -> Paragraph<'static> {
    let help_text = match active {
        Some(Screen::Menu(_)) => "[Enter] choose  [click] select  [PgUp/PgDn] scroll  [^L] clear  [^C] quit",
        Some(Screen::Session(_)) => "[Enter] answer  :skip  :quit  [PgUp/PgDn] scroll  [^L] clear  [^C] quit",
        None => "",
    };
    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// TESTS
// ============================================================================
