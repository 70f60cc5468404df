// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection movement over wrapped lines.

use crate::util::layout;
use peniko::kurbo::Point;
use quire::{Selection, TextLines};

const FOX: &str = "The quick brown fox";

#[test]
fn selection_vertical_moves_follow_wrapped_lines() {
    let layout = layout(FOX, 50.0);
    let down = Selection::caret(2).move_down(&layout, false);
    assert_eq!(down.index(), 12);
    assert_eq!(down.move_up(&layout, false).index(), 2);
    assert_eq!(Selection::caret(18).move_up(&layout, false).index(), 8);
    assert_eq!(
        Selection::caret(9).move_down(&layout, false).index(),
        19,
        "the column is clamped to the end of the text"
    );
    assert_eq!(
        Selection::caret(14).move_down(&layout, false),
        Selection::caret(14),
        "the last line has nothing below it"
    );
}

#[test]
fn selection_skips_trailing_space_of_wrapped_line() {
    let layout = layout(FOX, 50.0);
    assert_eq!(layout.max_column(0), 9);
    assert_eq!(layout.max_column(1), 9);
    let extended = Selection::caret(4).move_lines(&layout, 1, true);
    assert_eq!(extended, Selection::new(4, 14));
}

#[test]
fn selection_from_point() {
    let layout = layout(FOX, 50.0);
    assert_eq!(
        Selection::from_point(&layout, Point::new(12.0, 15.0)),
        Selection::caret(12)
    );
    let word = Selection::word_at(&layout, 12);
    assert_eq!(word.range(), 10..15);
}

#[test]
fn selection_geometry_matches_range_rects() {
    let layout = layout(FOX, 50.0);
    let selection = Selection::new(13, 4);
    assert_eq!(selection.geometry(&layout), layout.range_rects(4..13));
    let mut count = 0;
    selection.geometry_with(&layout, |_| count += 1);
    assert_eq!(count, 2);
    assert!(
        Selection::caret(4).geometry(&layout).is_empty(),
        "a caret covers no characters"
    );
}

#[test]
fn selection_select_all_on_layout() {
    let layout = layout("a\nbc", 50.0);
    assert_eq!(Selection::select_all(&layout).range(), 0..4);
    assert_eq!(
        Selection::caret(0).line_end(&layout, true),
        Selection::new(0, 1)
    );
}
