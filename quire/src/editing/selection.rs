// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use peniko::kurbo::{Point, Rect};

use super::TextLines;
use crate::layout::BoundedLayout;
use crate::metrics::FontMetrics;
use crate::style::Brush;

/// A range of characters between an anchor and a caret.
///
/// Positions are character indices; `index == len` is the end of the text.
/// Every movement returns a new selection and leaves `self` untouched.
#[derive(Copy, Clone, Default, Debug)]
pub struct Selection {
    anchor: usize,
    index: usize,
    /// Column kept across vertical movement.
    column: Option<usize>,
}

impl Selection {
    /// Creates a selection from `anchor` to `index`.
    pub fn new(anchor: usize, index: usize) -> Self {
        Self {
            anchor,
            index,
            column: None,
        }
    }

    /// Creates a collapsed selection at `index`.
    pub fn caret(index: usize) -> Self {
        Self::new(index, index)
    }

    /// Creates a collapsed selection at the caret position closest to
    /// `point`.
    pub fn from_point<B: Brush, M: FontMetrics<B>>(
        layout: &BoundedLayout<B, M>,
        point: Point,
    ) -> Self {
        Self::caret(layout.index_for_point(point))
    }

    /// Creates a selection covering all of `text`.
    pub fn select_all(text: &impl TextLines) -> Self {
        let start = text.line_range(0).map_or(0, |range| range.start);
        Self::new(start, text.len())
    }

    /// Creates a selection covering the word at `index`: the longest run of
    /// alphanumeric characters around it, or the single character at
    /// `index` otherwise.
    pub fn word_at(text: &impl TextLines, index: usize) -> Self {
        let is_word = |index: usize| text.char_at(index).is_some_and(char::is_alphanumeric);
        match text.char_at(index) {
            None => Self::caret(index.min(text.len())),
            Some(ch) if !ch.is_alphanumeric() => Self::new(index, index + 1),
            Some(_) => {
                let mut start = index;
                while start > 0 && is_word(start - 1) {
                    start -= 1;
                }
                let mut end = index + 1;
                while is_word(end) {
                    end += 1;
                }
                Self::new(start, end)
            }
        }
    }

    /// Creates a selection covering the paragraph containing `index`,
    /// including its terminator.
    pub fn paragraph_at(text: &impl TextLines, index: usize) -> Self {
        let index = index.min(text.len());
        let mut start = index;
        while start > 0 && text.char_at(start - 1) != Some('\n') {
            start -= 1;
        }
        let mut end = index;
        while let Some(ch) = text.char_at(end) {
            end += 1;
            if ch == '\n' {
                break;
            }
        }
        Self::new(start, end)
    }

    /// Where the selection started.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// The caret position, which moves when the selection is extended.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The lower end.
    pub fn start(&self) -> usize {
        self.anchor.min(self.index)
    }

    /// The upper end.
    pub fn end(&self) -> usize {
        self.anchor.max(self.index)
    }

    /// The selected characters.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Whether the anchor and caret coincide.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.index
    }

    /// Returns a collapsed selection at the caret.
    #[must_use]
    pub fn collapse(&self) -> Self {
        Self::caret(self.index)
    }

    /// Returns the selection with the caret moved to `index`.
    #[must_use]
    pub fn extend_to(&self, index: usize) -> Self {
        Self::new(self.anchor, index)
    }

    /// Returns the selection with both ends at most `len`.
    #[must_use]
    pub fn clamp(&self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            index: self.index.min(len),
            column: self.column,
        }
    }

    /// Moves one character left.
    ///
    /// A non-empty selection collapses to its start unless `extend` is set.
    /// A `"\r\n"` terminator is stepped over at once.
    #[must_use]
    pub fn move_left(&self, text: &impl TextLines, extend: bool) -> Self {
        if !self.is_collapsed() && !extend {
            return Self::caret(self.start());
        }
        let index = self.index.min(text.len());
        let target = match index {
            0 => 0,
            _ if index >= 2
                && text.char_at(index - 1) == Some('\n')
                && text.char_at(index - 2) == Some('\r') =>
            {
                index - 2
            }
            _ => index - 1,
        };
        self.maybe_extend(target, extend)
    }

    /// Moves one character right.
    ///
    /// A non-empty selection collapses to its end unless `extend` is set.
    /// A `"\r\n"` terminator is stepped over at once.
    #[must_use]
    pub fn move_right(&self, text: &impl TextLines, extend: bool) -> Self {
        if !self.is_collapsed() && !extend {
            return Self::caret(self.end());
        }
        let len = text.len();
        let index = self.index.min(len);
        let target = if index >= len {
            len
        } else if text.char_at(index) == Some('\r') && text.char_at(index + 1) == Some('\n') {
            index + 2
        } else {
            index + 1
        };
        self.maybe_extend(target, extend)
    }

    /// Moves to the previous line, keeping the column.
    ///
    /// Does nothing on the first line.
    #[must_use]
    pub fn move_up(&self, text: &impl TextLines, extend: bool) -> Self {
        self.move_lines(text, -1, extend)
    }

    /// Moves to the next line, keeping the column.
    ///
    /// Does nothing on the last line.
    #[must_use]
    pub fn move_down(&self, text: &impl TextLines, extend: bool) -> Self {
        self.move_lines(text, 1, extend)
    }

    /// Moves `delta` lines down, or up for a negative `delta`.
    ///
    /// The column the caret had before the first vertical move is kept and
    /// clamped to the length of each line it lands on.
    #[must_use]
    pub fn move_lines(&self, text: &impl TextLines, delta: isize, extend: bool) -> Self {
        let Some(line) = text.line_for_index(self.index) else {
            return *self;
        };
        let Some(target) = line
            .checked_add_signed(delta)
            .filter(|target| *target < text.line_count())
        else {
            return *self;
        };
        let (Some(current), Some(range)) = (text.line_range(line), text.line_range(target)) else {
            return *self;
        };
        let column = self.column.unwrap_or(self.index - current.start);
        let mut moved = self.maybe_extend(range.start + column.min(text.max_column(target)), extend);
        moved.column = Some(column);
        moved
    }

    /// Moves to the first non-blank character of the line, or to the very
    /// start of the line when the caret is already there or, when extending,
    /// the selection already reaches it.
    #[must_use]
    pub fn line_start(&self, text: &impl TextLines, extend: bool) -> Self {
        let Some(range) = text
            .line_for_index(self.index)
            .and_then(|line| text.line_range(line))
        else {
            return *self;
        };
        let mut first = range.start;
        while first < range.end && matches!(text.char_at(first), Some(' ' | '\t')) {
            first += 1;
        }
        let spans_first = self.index == first || (extend && self.start() == first);
        let target = if spans_first { range.start } else { first };
        self.maybe_extend(target, extend)
    }

    /// Moves to just before the next terminator, or to the end of the text.
    #[must_use]
    pub fn line_end(&self, text: &impl TextLines, extend: bool) -> Self {
        let mut target = self.index.min(text.len());
        while let Some(ch) = text.char_at(target) {
            if ch == '\n' {
                break;
            }
            target += 1;
        }
        if text.char_at(target) == Some('\n')
            && target > self.index
            && text.char_at(target - 1) == Some('\r')
        {
            target -= 1;
        }
        self.maybe_extend(target, extend)
    }

    /// Rectangles covering the selected characters, one per line.
    pub fn geometry<B: Brush, M: FontMetrics<B>>(&self, layout: &BoundedLayout<B, M>) -> Vec<Rect> {
        layout.range_rects(self.range())
    }

    /// Invokes `f` with a rectangle covering the selected characters on each
    /// line.
    pub fn geometry_with<B: Brush, M: FontMetrics<B>>(
        &self,
        layout: &BoundedLayout<B, M>,
        f: impl FnMut(Rect),
    ) {
        layout.range_rects_with(self.range(), f);
    }

    fn maybe_extend(&self, index: usize, extend: bool) -> Self {
        if extend {
            Self::new(self.anchor, index)
        } else {
            Self::caret(index)
        }
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.anchor == other.anchor && self.index == other.index
    }
}

impl Eq for Selection {}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::document::Document;

    fn document(text: &str) -> Document<()> {
        Document::from_text(text)
    }

    #[test]
    fn horizontal_moves_collapse_first() {
        let text = document("hello");
        let selection = Selection::new(1, 4);
        assert_eq!(selection.move_left(&text, false), Selection::caret(1));
        assert_eq!(selection.move_right(&text, false), Selection::caret(4));
        assert_eq!(selection.move_right(&text, true), Selection::new(1, 5));
        assert_eq!(Selection::caret(5).move_right(&text, false).index(), 5);
        assert_eq!(Selection::caret(0).move_left(&text, false).index(), 0);
    }

    #[test]
    fn crlf_is_one_step() {
        let text = document("ab\r\ncd");
        assert_eq!(Selection::caret(2).move_right(&text, false).index(), 4);
        assert_eq!(Selection::caret(4).move_left(&text, false).index(), 2);
    }

    #[test]
    fn vertical_moves_keep_column() {
        let text = document("hello\nhi\nworld");
        let down = Selection::caret(4).move_down(&text, false);
        assert_eq!(down.index(), 8, "clamped to the end of \"hi\"");
        let down = down.move_down(&text, false);
        assert_eq!(down.index(), 13, "column restored on a longer line");
        assert_eq!(down.move_down(&text, false), down);
        let up = down.move_up(&text, false).move_up(&text, false);
        assert_eq!(up.index(), 4);
        assert_eq!(up.move_up(&text, false), up);
    }

    #[test]
    fn line_start_toggles() {
        let text = document("a\n   indented");
        let first = Selection::caret(10).line_start(&text, false);
        assert_eq!(first.index(), 5);
        assert_eq!(first.line_start(&text, false).index(), 2);
        assert_eq!(
            Selection::caret(10).line_start(&text, true),
            Selection::new(10, 5)
        );
    }

    #[test]
    fn line_start_toggles_when_selection_reaches_first_character() {
        let text = document("a
   indented");
        let extended = Selection::new(5, 10).line_start(&text, true);
        assert_eq!(extended, Selection::new(5, 2));
        assert_eq!(
            Selection::new(5, 10).line_start(&text, false).index(),
            5,
            "without extending only the caret counts"
        );
    }

    #[test]
    fn line_end_stops_before_terminator() {
        let text = document("ab\r\ncd\nef");
        assert_eq!(Selection::caret(0).line_end(&text, false).index(), 2);
        assert_eq!(Selection::caret(4).line_end(&text, false).index(), 6);
        assert_eq!(Selection::caret(7).line_end(&text, false).index(), 9);
    }

    #[test]
    fn words_and_paragraphs() {
        let text = document("one two, three\nfour");
        assert_eq!(Selection::word_at(&text, 5).range(), 4..7);
        assert_eq!(Selection::word_at(&text, 7).range(), 7..8);
        assert_eq!(Selection::paragraph_at(&text, 2).range(), 0..15);
        assert_eq!(Selection::paragraph_at(&text, 16).range(), 15..19);
        assert_eq!(Selection::select_all(&text).range(), 0..19);
        assert_eq!(Selection::new(30, 2).clamp(19).range(), 2..19);
    }
}
