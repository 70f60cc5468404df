// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret and selection arithmetic.

mod selection;

use core::ops::Range;

pub use selection::Selection;

use crate::document::{Document, Line};
use crate::layout::{BoundedLayout, BoxLine};
use crate::metrics::FontMetrics;
use crate::style::Brush;

/// A sequence of characters broken into lines, as seen by a [`Selection`].
///
/// Documents present their paragraphs as lines; layouts present their
/// wrapped lines.
pub trait TextLines {
    /// Number of addressable characters.
    fn len(&self) -> usize;

    /// Whether there are no addressable characters.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The character at `index`.
    fn char_at(&self, index: usize) -> Option<char>;

    /// Number of lines.
    fn line_count(&self) -> usize;

    /// Character range of the line at `line`, including any terminator.
    fn line_range(&self, line: usize) -> Option<Range<usize>>;

    /// Index of the line containing the caret position `index`.
    fn line_for_index(&self, index: usize) -> Option<usize>;

    /// Largest caret offset within the line at `line`, relative to its
    /// start.
    fn max_column(&self, line: usize) -> usize;
}

impl<B: Brush> TextLines for Document<B> {
    fn len(&self) -> usize {
        self.len()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.char_at(index).ok()
    }

    fn line_count(&self) -> usize {
        self.line_count()
    }

    fn line_range(&self, line: usize) -> Option<Range<usize>> {
        self.line(line).map(Line::range)
    }

    fn line_for_index(&self, index: usize) -> Option<usize> {
        self.line_for_index(index).ok()
    }

    fn max_column(&self, line: usize) -> usize {
        self.line(line).map_or(0, Line::content_len)
    }
}

impl<B: Brush, M: FontMetrics<B>> TextLines for BoundedLayout<B, M> {
    fn len(&self) -> usize {
        self.len()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        if index < self.len() {
            self.document().char_at(index).ok()
        } else {
            None
        }
    }

    fn line_count(&self) -> usize {
        self.line_count()
    }

    fn line_range(&self, line: usize) -> Option<Range<usize>> {
        self.line(line).map(BoxLine::range)
    }

    fn line_for_index(&self, index: usize) -> Option<usize> {
        self.line_for_index(index)
    }

    fn max_column(&self, line: usize) -> usize {
        self.line(line).map_or(0, BoxLine::caret_max)
    }
}
