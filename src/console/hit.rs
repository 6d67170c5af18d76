//! Hit testing: from a clicked cell to the button under it.
//!
//! Two halves:
//! - `locate`: buffer offset → button span (pure span search)
//! - `layout_rows` / `visible_rows` / `offset_at`: the host's view of the
//!   buffer as wrapped rows, used to turn a (column, row) cell into an offset
//!
//! Layout and rendering share these functions, so a click always lands on
//! the character that was drawn in that cell.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use super::surface::ButtonSpan;

/// First button in insertion order whose `[start, end)` covers `offset`.
pub fn locate(spans: &[ButtonSpan], offset: usize) -> Option<&ButtonSpan> {
    spans.iter().find(|span| span.contains(offset))
}

/// One on-screen row: a byte range of the buffer without its newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualRow {
    pub start: usize,
    pub end: usize,
}

impl VisualRow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split `text` into rows: one per line, wrapped once a row fills `width`
/// terminal cells.
///
/// Wide characters never straddle a row boundary; zero-width characters
/// stay with the character before them. A trailing newline does not
/// produce an extra empty row.
pub fn layout_rows(text: &str, width: u16) -> Vec<VisualRow> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let mut row_start = line_start;
        let mut cells = 0;
        for (index, ch) in line.char_indices() {
            let w = ch.width().unwrap_or(0);
            if cells > 0 && cells + w > width {
                rows.push(VisualRow {
                    start: row_start,
                    end: line_start + index,
                });
                row_start = line_start + index;
                cells = 0;
            }
            cells += w;
        }
        rows.push(VisualRow {
            start: row_start,
            end: line_start + line.len(),
        });
        line_start += line.len() + 1;
    }

    if text.ends_with('\n') {
        rows.pop();
    }
    rows
}

/// Rows shown in a viewport `height` rows tall, scrolled `scroll_back`
/// rows up from the tail. Clamped so the window never runs past the top.
pub fn visible_rows(total: usize, height: u16, scroll_back: usize) -> Range<usize> {
    let height = usize::from(height);
    let max_back = total.saturating_sub(height);
    let end = total - scroll_back.min(max_back);
    end.saturating_sub(height)..end
}

/// Byte offset of the character drawn at `column` in row `row`.
///
/// Both cells of a wide character map to its offset. Cells past the end of
/// a row's text hold no character.
pub fn offset_at(text: &str, rows: &[VisualRow], column: u16, row: usize) -> Option<usize> {
    let visual = rows.get(row)?;
    let column = usize::from(column);
    let mut cell = 0;
    for (index, ch) in text[visual.range()].char_indices() {
        let w = ch.width().unwrap_or(0);
        if w > 0 && column < cell + w {
            return Some(visual.start + index);
        }
        cell += w;
        if cell > column {
            break;
        }
    }
    None
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::OutputSurface;

    #[test]
    fn locate_returns_first_covering_span() {
        let spans = vec![
            ButtonSpan::new(0, 4, "first", "abcdef").unwrap(),
            ButtonSpan::new(2, 6, "second", "abcdef").unwrap(),
        ];
        assert_eq!(locate(&spans, 3).map(|b| b.command()), Some("first"));
        assert_eq!(locate(&spans, 5).map(|b| b.command()), Some("second"));
        assert!(locate(&spans, 6).is_none());
    }

    #[test]
    fn every_offset_hits_at_most_one_appended_button() {
        let mut surface = OutputSurface::new();
        surface.button("[1] Review", "1", None, None);
        surface.write(" ", None, None);
        surface.button("[2] Cram", "2", None, None);
        surface.write_line("", None);

        for offset in 0..surface.len() + 2 {
            let matches = surface
                .button_spans()
                .iter()
                .filter(|b| b.contains(offset))
                .count();
            assert!(matches <= 1);
            assert_eq!(surface.locate(offset).is_some(), matches == 1);
        }
    }

    #[test]
    fn rows_split_on_newlines() {
        let rows = layout_rows("ab\n\ncd", 80);
        assert_eq!(
            rows,
            vec![
                VisualRow { start: 0, end: 2 },
                VisualRow { start: 3, end: 3 },
                VisualRow { start: 4, end: 6 },
            ]
        );
    }

    #[test]
    fn rows_wrap_at_width() {
        let rows = layout_rows("abcdefg", 3);
        let ranges: Vec<_> = rows.iter().map(|r| r.range()).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn wide_characters_wrap_by_cell_width() {
        let text = "日本語日本語";
        let rows = layout_rows(text, 4);
        let shown: Vec<_> = rows.iter().map(|r| &text[r.range()]).collect();
        assert_eq!(shown, vec!["日本", "語日", "本語"]);

        // An odd width leaves the last cell empty rather than splitting 語
        let rows = layout_rows(text, 5);
        let shown: Vec<_> = rows.iter().map(|r| &text[r.range()]).collect();
        assert_eq!(shown, vec!["日本", "語日", "本語"]);
    }

    #[test]
    fn wide_character_wider_than_pane_gets_its_own_row() {
        let text = "a日b";
        let rows = layout_rows(text, 1);
        let shown: Vec<_> = rows.iter().map(|r| &text[r.range()]).collect();
        assert_eq!(shown, vec!["a", "日", "b"]);
    }

    #[test]
    fn wrapping_counts_characters_not_bytes() {
        let text = "ééé";
        let rows = layout_rows(text, 2);
        assert_eq!(&text[rows[0].range()], "éé");
        assert_eq!(&text[rows[1].range()], "é");
    }

    #[test]
    fn trailing_newline_adds_no_row() {
        assert_eq!(layout_rows("ab\n", 10).len(), 1);
        assert!(layout_rows("", 10).len() == 1);
    }

    #[test]
    fn visible_rows_follow_the_tail() {
        assert_eq!(visible_rows(10, 4, 0), 6..10);
        assert_eq!(visible_rows(10, 4, 2), 4..8);
        assert_eq!(visible_rows(10, 4, 99), 0..4);
        assert_eq!(visible_rows(2, 4, 0), 0..2);
    }

    #[test]
    fn offset_at_maps_cells_to_characters() {
        let text = "hello\nwörld";
        let rows = layout_rows(text, 80);
        assert_eq!(offset_at(text, &rows, 1, 0), Some(1));
        // "ö" is two bytes wide
        assert_eq!(offset_at(text, &rows, 2, 1), Some(9));
        assert_eq!(offset_at(text, &rows, 9, 0), None);
        assert_eq!(offset_at(text, &rows, 0, 5), None);
    }

    #[test]
    fn both_halves_of_a_wide_character_map_to_it() {
        let mut surface = OutputSurface::new();
        surface.write("日本 ", None, None);
        surface.button("Yes", "opt:yes", None, None);
        let text = surface.text();
        let rows = layout_rows(text, 80);

        // 日 covers cells 0-1, 本 cells 2-3, the space cell 4, "Yes" cells 5-7
        assert_eq!(offset_at(text, &rows, 0, 0), Some(0));
        assert_eq!(offset_at(text, &rows, 1, 0), Some(0));
        assert_eq!(offset_at(text, &rows, 2, 0), Some(3));
        assert_eq!(offset_at(text, &rows, 3, 0), Some(3));
        assert_eq!(offset_at(text, &rows, 4, 0), Some(6));
        assert_eq!(offset_at(text, &rows, 5, 0), Some(7));
        assert_eq!(offset_at(text, &rows, 8, 0), None);

        let right_half_of_hon = offset_at(text, &rows, 3, 0).unwrap();
        assert!(surface.locate(right_half_of_hon).is_none());
        let first_cell_of_yes = offset_at(text, &rows, 5, 0).unwrap();
        assert_eq!(surface.locate(first_cell_of_yes).map(|b| b.command()), Some("opt:yes"));
    }

    #[test]
    fn zero_width_marks_belong_to_the_previous_cell() {
        // "e" followed by a combining acute accent, then "x"
        let text = "e\u{301}x";
        let rows = layout_rows(text, 80);
        assert_eq!(offset_at(text, &rows, 0, 0), Some(0));
        assert_eq!(offset_at(text, &rows, 1, 0), Some(3));
        assert_eq!(offset_at(text, &rows, 2, 0), None);
    }

    #[test]
    fn click_on_wrapped_button_resolves_command() {
        let mut surface = OutputSurface::new();
        surface.write("Choose ", None, None);
        surface.button("Yes", "opt:yes", None, None);

        let rows = layout_rows(surface.text(), 8);
        // "Choose Y" on row 0, "es" on row 1
        let offset = offset_at(surface.text(), &rows, 1, 1).unwrap();
        assert_eq!(surface.locate(offset).map(|b| b.command()), Some("opt:yes"));
    }
}
