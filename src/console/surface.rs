//! Append-only styled text buffer with clickable regions.
//!
//! The surface is plain data: the text written so far plus two ordered
//! span lists, one for colors and one for buttons. Screens write to it,
//! the rendering host reads it. Nothing in here knows about terminals.
//!
//! Offsets are byte offsets into the UTF-8 buffer. Every offset the
//! append API produces lies on a character boundary.

use std::ops::Range;

use ratatui::style::Color;
use thiserror::Error;

use super::hit;

/// Foreground used when a write does not name one.
pub const DEFAULT_FOREGROUND: Color = Color::Gray;

/// Background used when a write does not name one.
pub const DEFAULT_BACKGROUND: Color = Color::Reset;

// ============================================================================
// ERRORS
// ============================================================================

/// A span was requested over a range the buffer does not hold.
///
/// Appends can never produce this; it only comes out of the overlay API
/// and always means the caller computed a bad range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("span {start}..{end} is outside the buffer (length {len}) or splits a character")]
    InvalidRange { start: usize, end: usize, len: usize },
}

fn check_range(buffer: &str, start: usize, length: usize) -> Result<Range<usize>, SurfaceError> {
    let invalid = |end| SurfaceError::InvalidRange {
        start,
        end,
        len: buffer.len(),
    };

    let end = start.checked_add(length).ok_or_else(|| invalid(usize::MAX))?;
    if end > buffer.len() || !buffer.is_char_boundary(start) || !buffer.is_char_boundary(end) {
        return Err(invalid(end));
    }
    Ok(start..end)
}

// ============================================================================
// SPANS
// ============================================================================

/// Colors applied to `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    start: usize,
    length: usize,
    foreground: Color,
    background: Color,
}

impl StyledSpan {
    /// Build a span over text that already exists in `buffer`.
    pub fn new(
        start: usize,
        length: usize,
        foreground: Color,
        background: Color,
        buffer: &str,
    ) -> Result<Self, SurfaceError> {
        check_range(buffer, start, length)?;
        Ok(StyledSpan {
            start,
            length,
            foreground,
            background,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    pub fn background(&self) -> Color {
        self.background
    }

    fn run(&self) -> StyleRun {
        StyleRun {
            start: self.start,
            end: self.end(),
            foreground: self.foreground,
            background: self.background,
        }
    }

    /// Zero-length spans contain nothing.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }
}

/// Clickable region `[start, end)` that submits `command` when hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpan {
    start: usize,
    end: usize,
    command: String,
}

impl ButtonSpan {
    /// Build a button over non-empty text that already exists in `buffer`.
    pub fn new(
        start: usize,
        end: usize,
        command: impl Into<String>,
        buffer: &str,
    ) -> Result<Self, SurfaceError> {
        if end <= start {
            return Err(SurfaceError::InvalidRange {
                start,
                end,
                len: buffer.len(),
            });
        }
        check_range(buffer, start, end - start)?;
        Ok(ButtonSpan {
            start,
            end,
            command: command.into(),
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// A button with an empty command still hit-tests, but clicking it
    /// does nothing.
    pub fn is_inert(&self) -> bool {
        self.command.is_empty()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// A maximal stretch of the buffer that renders with one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRun {
    pub start: usize,
    pub end: usize,
    pub foreground: Color,
    pub background: Color,
}

// ============================================================================
// SURFACE
// ============================================================================

/// Append-only output buffer.
///
/// `revision` increases on every mutation; hosts compare it with the last
/// value they drew to know when to redraw and snap back to the tail.
///
/// Spans from writes tile the buffer in order, so they are indexed apart
/// from overlays: lookups binary-search the former and scan only the latter.
#[derive(Debug, Clone, Default)]
pub struct OutputSurface {
    buffer: String,
    styled_spans: Vec<StyledSpan>,
    button_spans: Vec<ButtonSpan>,
    /// Indices into `styled_spans` of spans recorded by writes.
    written: Vec<usize>,
    /// Indices into `styled_spans` of spans recorded by `overlay`.
    overlays: Vec<usize>,
    revision: u64,
}

impl OutputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn styled_spans(&self) -> &[StyledSpan] {
        &self.styled_spans
    }

    pub fn button_spans(&self) -> &[ButtonSpan] {
        &self.button_spans
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append `text` with the given colors. Returns the appended range.
    ///
    /// Empty text still records a (zero-length, inert) span.
    pub fn write(
        &mut self,
        text: &str,
        foreground: Option<Color>,
        background: Option<Color>,
    ) -> Range<usize> {
        let start = self.buffer.len();
        self.buffer.push_str(text);
        let end = self.buffer.len();

        self.written.push(self.styled_spans.len());
        self.styled_spans.push(StyledSpan {
            start,
            length: end - start,
            foreground: foreground.unwrap_or(DEFAULT_FOREGROUND),
            background: background.unwrap_or(DEFAULT_BACKGROUND),
        });
        self.touch();

        start..end
    }

    /// Append `text` followed by a newline on the default background.
    pub fn write_line(&mut self, text: &str, foreground: Option<Color>) -> Range<usize> {
        self.write(&format!("{text}\n"), foreground, None)
    }

    /// Append `text` as a button that submits `command` when clicked.
    ///
    /// Empty text is written like any other write but gets no button,
    /// since there is nothing on screen to click.
    pub fn button(
        &mut self,
        text: &str,
        command: &str,
        foreground: Option<Color>,
        background: Option<Color>,
    ) -> Range<usize> {
        let range = self.write(text, foreground, background);
        if !range.is_empty() {
            self.button_spans.push(ButtonSpan {
                start: range.start,
                end: range.end,
                command: command.to_string(),
            });
        }
        range
    }

    /// Restyle text that was already written.
    ///
    /// The overlay is stored after every existing span, so it wins at the
    /// offsets it covers.
    pub fn overlay(
        &mut self,
        start: usize,
        length: usize,
        foreground: Option<Color>,
        background: Option<Color>,
    ) -> Result<(), SurfaceError> {
        let span = StyledSpan::new(
            start,
            length,
            foreground.unwrap_or(DEFAULT_FOREGROUND),
            background.unwrap_or(DEFAULT_BACKGROUND),
            &self.buffer,
        )?;
        self.overlays.push(self.styled_spans.len());
        self.styled_spans.push(span);
        self.touch();
        Ok(())
    }

    /// Drop all text and spans.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.styled_spans.clear();
        self.button_spans.clear();
        self.written.clear();
        self.overlays.clear();
        self.touch();
    }

    /// The first button (in insertion order) covering `offset`.
    pub fn locate(&self, offset: usize) -> Option<&ButtonSpan> {
        hit::locate(&self.button_spans, offset)
    }

    /// Colors at `offset`: the latest covering span wins.
    pub fn style_at(&self, offset: usize) -> (Color, Color) {
        let overlay = self
            .overlays
            .iter()
            .rev()
            .map(|&i| &self.styled_spans[i])
            .find(|span| span.contains(offset));
        let written = || {
            let at = self
                .written
                .partition_point(|&i| self.styled_spans[i].end() <= offset);
            self.written
                .get(at)
                .map(|&i| &self.styled_spans[i])
                .filter(|span| span.contains(offset))
        };

        overlay
            .or_else(written)
            .map(|span| (span.foreground, span.background))
            .unwrap_or((DEFAULT_FOREGROUND, DEFAULT_BACKGROUND))
    }

    /// Partition the whole buffer into runs of uniform style.
    pub fn style_runs(&self) -> Vec<StyleRun> {
        let mut runs: Vec<StyleRun> = self
            .written
            .iter()
            .map(|&i| self.styled_spans[i].run())
            .filter(|run| run.start < run.end)
            .collect();
        for &i in &self.overlays {
            paint(&mut runs, self.styled_spans[i].run());
        }

        runs.dedup_by(|next, prev| {
            let same = prev.end == next.start
                && prev.foreground == next.foreground
                && prev.background == next.background;
            if same {
                prev.end = next.end;
            }
            same
        });
        runs
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Lay `top` over `runs`, which tile the buffer in order.
fn paint(runs: &mut Vec<StyleRun>, top: StyleRun) {
    if top.start >= top.end {
        return;
    }
    let first = runs.partition_point(|run| run.end <= top.start);
    let last = runs.partition_point(|run| run.start < top.end);

    let mut replacement = Vec::with_capacity(3);
    if let Some(head) = runs.get(first).filter(|head| head.start < top.start) {
        replacement.push(StyleRun {
            end: top.start,
            ..*head
        });
    }
    replacement.push(top);
    if let Some(tail) = last
        .checked_sub(1)
        .and_then(|i| runs.get(i))
        .filter(|tail| tail.end > top.end)
    {
        replacement.push(StyleRun {
            start: top.end,
            ..*tail
        });
    }
    runs.splice(first..last.max(first), replacement);
}

// ============================================================================
// TESTS
// ============================================================================
