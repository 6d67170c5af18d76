//! Properties of the output surface and hit tester over generated
//! sequences of writes, buttons and overlays.

use loana::console::hit::{layout_rows, offset_at};
use loana::console::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, OutputSurface};
use proptest::prelude::*;
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;

const PALETTE: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

/// One append: (is_button, text, command, palette index).
type Append = (bool, String, String, usize);

fn appends() -> impl Strategy<Value = Vec<Append>> {
    prop::collection::vec(
        (
            any::<bool>(),
            "[ab é日\n]{0,6}",
            "[a-z:]{0,4}",
            0usize..PALETTE.len(),
        ),
        0..16,
    )
}

fn build(appends: &[Append]) -> OutputSurface {
    let mut surface = OutputSurface::new();
    for (is_button, text, command, color) in appends {
        let fg = Some(PALETTE[*color]);
        if *is_button {
            surface.button(text, command, fg, None);
        } else {
            surface.write(text, fg, None);
        }
    }
    surface
}

/// Byte offsets of every character boundary, end included.
fn boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

fn latest_wins(surface: &OutputSurface, offset: usize) -> (Color, Color) {
    surface
        .styled_spans()
        .iter()
        .rev()
        .find(|span| span.contains(offset))
        .map(|span| (span.foreground(), span.background()))
        .unwrap_or((DEFAULT_FOREGROUND, DEFAULT_BACKGROUND))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_spans_slice_back_to_what_was_written(appends in appends()) {
        let surface = build(&appends);

        let total: usize = appends.iter().map(|(_, text, _, _)| text.len()).sum();
        prop_assert_eq!(surface.len(), total);
        prop_assert_eq!(surface.styled_spans().len(), appends.len());

        let mut buttons = surface.button_spans().iter();
        for ((is_button, text, command, color), span) in appends.iter().zip(surface.styled_spans()) {
            prop_assert_eq!(&surface.text()[span.range()], text.as_str());
            prop_assert_eq!(span.foreground(), PALETTE[*color]);

            if *is_button && !text.is_empty() {
                let button = buttons.next();
                prop_assert!(button.is_some(), "missing button for {:?}", text);
                let button = button.unwrap();
                prop_assert_eq!(button.range(), span.range());
                prop_assert_eq!(button.command(), command.as_str());
            }
        }
        prop_assert!(buttons.next().is_none());
    }

    #[test]
    fn prop_locate_hits_exactly_the_covering_button(appends in appends()) {
        let surface = build(&appends);

        for offset in 0..=surface.len() + 1 {
            let covering: Vec<_> = surface
                .button_spans()
                .iter()
                .filter(|b| b.start() <= offset && offset < b.end())
                .collect();
            prop_assert!(covering.len() <= 1);
            prop_assert_eq!(surface.locate(offset), covering.first().copied());
        }
    }

    #[test]
    fn prop_style_runs_agree_with_latest_wins(
        appends in appends(),
        overlays in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>(), 0usize..PALETTE.len()), 0..6),
    ) {
        let mut surface = build(&appends);
        let cuts = boundaries(surface.text());
        for (a, b, color) in &overlays {
            let (x, y) = (a.get(&cuts), b.get(&cuts));
            let (start, end) = (*x.min(y), *x.max(y));
            prop_assert!(surface.overlay(start, end - start, Some(PALETTE[*color]), None).is_ok());
        }

        let runs = surface.style_runs();
        let mut expected_start = 0;
        for (i, run) in runs.iter().enumerate() {
            prop_assert_eq!(run.start, expected_start);
            prop_assert!(run.start < run.end);
            expected_start = run.end;
            if i > 0 {
                let prev = &runs[i - 1];
                prop_assert!((prev.foreground, prev.background) != (run.foreground, run.background));
            }
        }
        prop_assert_eq!(expected_start, surface.len());

        for &offset in &cuts[..cuts.len() - 1] {
            let run = runs.iter().find(|r| r.start <= offset && offset < r.end).unwrap();
            prop_assert_eq!((run.foreground, run.background), latest_wins(&surface, offset));
            prop_assert_eq!(surface.style_at(offset), latest_wins(&surface, offset));
        }
    }

    #[test]
    fn prop_every_drawn_cell_maps_to_the_character_in_it(
        text in "[ab é日語\n]{0,24}",
        width in 1u16..10,
    ) {
        let rows = layout_rows(&text, width);

        for (r, row) in rows.iter().enumerate() {
            let slice = &text[row.range()];
            prop_assert!(!slice.contains('\n'));

            let mut cell = 0usize;
            for (i, ch) in slice.char_indices() {
                let w = ch.width().unwrap_or(0);
                for column in cell..cell + w {
                    prop_assert_eq!(offset_at(&text, &rows, column as u16, r), Some(row.start + i));
                }
                cell += w;
            }
            let single_wide = slice.chars().count() == 1;
            prop_assert!(cell <= usize::from(width) || single_wide, "row {:?} is {} cells", slice, cell);
            prop_assert_eq!(offset_at(&text, &rows, cell as u16, r), None);
        }
    }
}
