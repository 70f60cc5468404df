// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod asserts;

pub(crate) use asserts::{assert_document_invariants, assert_layout_matches_fresh};

use quire::{BoundedLayout, CharacterStyle, Document, FixedMetrics, Font, LineStyle, WrapConfig};

/// Brushes are plain color ids in tests.
pub(crate) type Color = u32;

pub(crate) type TestLayout = BoundedLayout<Color, FixedMetrics>;

/// Font size of [`style`]; with [`FixedMetrics::default`] every character is
/// half as wide and lines are this tall.
pub(crate) const FONT_SIZE: f64 = 10.0;

/// Advance of every character in [`style`].
pub(crate) const CHAR_WIDTH: f64 = 5.0;

pub(crate) fn style() -> CharacterStyle<Color> {
    CharacterStyle::new(Font::new("mono", FONT_SIZE))
}

pub(crate) fn colored(color: Color) -> CharacterStyle<Color> {
    style().with_brush(color)
}

pub(crate) fn document(text: &str) -> Document<Color> {
    Document::with_text(text, style(), LineStyle::default())
}

/// Lays out `text` wrapped at `width`.
pub(crate) fn layout(text: &str, width: f64) -> TestLayout {
    layout_with(document(text), WrapConfig::default().with_width(width))
}

pub(crate) fn layout_with(document: Document<Color>, config: WrapConfig) -> TestLayout {
    BoundedLayout::new(document, FixedMetrics::default(), config)
}

/// The text of every laid out line.
pub(crate) fn line_texts(layout: &TestLayout) -> Vec<String> {
    (0..layout.line_count())
        .filter_map(|line| layout.line_text(line))
        .collect()
}
