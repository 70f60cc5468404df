// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized edit sequences.

use std::sync::Arc;

use proptest::prelude::*;

use crate::util::{
    assert_document_invariants, assert_layout_matches_fresh, colored, document, layout,
    layout_with, style, Color, TestLayout,
};
use quire::{
    Alignment, CharacterStyle, Font, LineStyle, Overflow, Selection, TabKind, TabStop,
    VerticalAlignment, WrapConfig,
};
use quire_hyphen::Hyphenator;

#[derive(Clone, Debug)]
enum Edit {
    Insert { at: usize, text: String, style: u8 },
    Remove { from: usize, to: usize },
    Restyle { from: usize, to: usize, style: u8 },
    SetLineStyle { at: usize, style: u8 },
}

fn pick_style(style_id: u8) -> CharacterStyle<Color> {
    match style_id % 3 {
        0 => style(),
        1 => colored(1),
        _ => style().with_font(Font::new("mono", 20.0)),
    }
}

fn pick_line_style(style_id: u8) -> LineStyle {
    let base = LineStyle::default();
    match style_id % 6 {
        0 => base,
        1 => base.with_first_indent(10.0).with_left_indent(5.0),
        2 => base.with_alignment(Alignment::Center).with_right_indent(7.0),
        3 => base.with_alignment(Alignment::Justify).with_first_indent(5.0),
        4 => base
            .with_alignment(Alignment::Right)
            .with_paragraph_spacing(3.0),
        _ => base.with_tabs([
            TabStop::new(12.0, TabKind::Left),
            TabStop::new(30.0, TabKind::Right),
            TabStop::new(45.0, TabKind::Center),
        ]),
    }
}

/// Text without tabs, whose carets line up across lines.
fn arb_plain_text() -> impl Strategy<Value = String> {
    "[a-c \n]{0,40}"
}

/// Words that hyphenate between double "n"s, mixed with tabs and breaks.
fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("runner".to_owned()),
            Just("an".to_owned()),
            "[abn]{1,7}",
            "[ \t\n]",
        ],
        0..14,
    )
    .prop_map(|pieces| pieces.concat())
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (any::<usize>(), "[abn \t\n]{1,5}", any::<u8>())
            .prop_map(|(at, text, style)| Edit::Insert { at, text, style }),
        (any::<usize>(), any::<usize>()).prop_map(|(from, to)| Edit::Remove { from, to }),
        (any::<usize>(), any::<usize>(), any::<u8>())
            .prop_map(|(from, to, style)| Edit::Restyle { from, to, style }),
        (any::<usize>(), any::<u8>()).prop_map(|(at, style)| Edit::SetLineStyle { at, style }),
    ]
}

fn arb_config() -> impl Strategy<Value = WrapConfig> {
    (
        5.0..120.0_f64,
        any::<bool>(),
        prop::option::of(15.0..60.0_f64),
        0..3_u8,
        0..12_usize,
    )
        .prop_map(|(width, hyphenate, clip, vertical, start)| {
            let config = WrapConfig::default()
                .with_width(width)
                .with_hyphenate(hyphenate)
                .with_start(start);
            match clip {
                Some(height) => config
                    .with_height(height)
                    .with_overflow(Overflow::Clip)
                    .with_vertical_alignment(match vertical {
                        0 => VerticalAlignment::Top,
                        1 => VerticalAlignment::Middle,
                        _ => VerticalAlignment::Bottom,
                    }),
                None => config,
            }
        })
}

/// Lays out `text` with a dictionary that hyphenates between double "n"s.
fn hyphenated_layout(text: &str, config: WrapConfig) -> TestLayout {
    let mut layout = layout_with(document(text), config);
    let hyphenator = Hyphenator::from_patterns("UTF-8\nn1n\n").unwrap();
    layout.set_hyphenator(Some(Arc::new(hyphenator)));
    layout
}

/// Orders two raw indices into a valid range of a text `len` long.
fn range(from: usize, to: usize, len: usize) -> core::ops::Range<usize> {
    let (a, b) = (from % (len + 1), to % (len + 1));
    a.min(b)..a.max(b)
}

fn apply(layout: &mut TestLayout, edit: &Edit) {
    let len = layout.document().len();
    let result = match edit {
        Edit::Insert { at, text, style } => {
            layout.insert(at % (len + 1), text, Some(&pick_style(*style)))
        }
        Edit::Remove { from, to } => layout.remove(range(*from, *to, len)),
        Edit::Restyle { from, to, style } => {
            layout.set_style(range(*from, *to, len), &pick_style(*style))
        }
        Edit::SetLineStyle { at, style } => {
            let at = at % (len + 1);
            layout.set_line_style(at..at, &pick_line_style(*style))
        }
    };
    if let Err(err) = result {
        panic!("{edit:?} was rejected: {err}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn properties_edits_keep_invariants(
        text in arb_text(),
        config in arb_config(),
        edits in prop::collection::vec(arb_edit(), 1..12),
    ) {
        let mut layout = hyphenated_layout(&text, config);
        for edit in &edits {
            apply(&mut layout, edit);
            assert_document_invariants(layout.document());
            assert_layout_matches_fresh(&layout);
        }
    }

    #[test]
    fn properties_insert_then_remove_restores(
        text in arb_text(),
        edits in prop::collection::vec(arb_edit(), 0..4),
        at in any::<usize>(),
        inserted in "[abn \t\n]{1,8}",
        style_id in any::<u8>(),
    ) {
        let config = WrapConfig::default().with_width(40.0).with_hyphenate(true);
        let mut layout = hyphenated_layout(&text, config);
        for edit in &edits {
            apply(&mut layout, edit);
        }
        let before = layout.document().clone();
        let at = at % (before.len() + 1);
        layout.insert(at, &inserted, Some(&pick_style(style_id))).unwrap();
        layout.remove(at..at + inserted.chars().count()).unwrap();

        let after = layout.document();
        prop_assert_eq!(after.text(), before.text());
        for index in 0..before.len() {
            prop_assert_eq!(after.style_at(index).unwrap(), before.style_at(index).unwrap());
        }
        assert_layout_matches_fresh(&layout);
    }

    #[test]
    fn properties_tokens_stay_within_width(
        text in arb_plain_text(),
        width in 1.0..100.0_f64,
    ) {
        let layout = layout_with(document(&text), WrapConfig::default().with_width(width));
        for line in layout.lines() {
            for (index, token) in line.tokens().iter().enumerate() {
                if token.x() + token.width() > width + 1e-9 {
                    // Only a line's first character may be placed past the edge.
                    prop_assert_eq!(index, 0);
                    prop_assert_eq!(token.range().len(), 1);
                }
            }
        }
    }

    #[test]
    fn properties_down_then_up_returns(
        text in arb_plain_text(),
        width in 5.0..80.0_f64,
        index in any::<usize>(),
    ) {
        let layout = layout(&text, width);
        let index = index % (layout.len() + 1);
        let line = layout.line_for_index(index).unwrap();
        prop_assume!(line + 1 < layout.line_count());
        let caret = Selection::caret(index);
        let back = caret.move_down(&layout, false).move_up(&layout, false);
        prop_assert_eq!(back.index(), index);
    }
}
