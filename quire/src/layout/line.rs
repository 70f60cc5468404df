// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use peniko::kurbo::Rect;

/// Vertical metrics of a laid out line.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct LineMetrics {
    /// Largest ascent of the styles on the line, including raised scripts.
    pub ascent: f64,
    /// Largest descent of the styles on the line, including lowered scripts.
    pub descent: f64,
    /// Largest leading of the styles on the line.
    pub leading: f64,
    /// Distance from the top of this line to the top of the next, before
    /// paragraph spacing.
    pub advance: f64,
}

/// A token placed on a [`BoxLine`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct BoxToken {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) run: usize,
    pub(crate) x: f64,
    pub(crate) width: f64,
    pub(crate) shift: f64,
    pub(crate) hyphenated: bool,
    pub(crate) baseline_offset: f64,
}

impl BoxToken {
    /// Offset of the first character within the box line.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset past the last character within the box line.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The characters covered, relative to the box line.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Index of the source run containing the first character.
    pub fn run(&self) -> usize {
        self.run
    }

    /// Left edge, including alignment and justification.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Width of the characters, without any hyphen.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Distance the token was moved by justification.
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Whether a hyphen is drawn after the token.
    pub fn is_hyphenated(&self) -> bool {
        self.hyphenated
    }

    /// Vertical offset of the token's baseline from the line's baseline.
    pub fn baseline_offset(&self) -> f64 {
        self.baseline_offset
    }
}

/// One line of a [`BoundedLayout`](super::BoundedLayout): a span of a single
/// source line, positioned in the layout.
#[derive(Clone, PartialEq, Debug)]
pub struct BoxLine {
    pub(crate) source: usize,
    pub(crate) offset: usize,
    pub(crate) start: usize,
    pub(crate) len: usize,
    pub(crate) tokens: Vec<BoxToken>,
    /// Left edge of every character plus the right edge of the last.
    pub(crate) positions: Vec<f64>,
    pub(crate) metrics: LineMetrics,
    pub(crate) y: f64,
    pub(crate) left: f64,
    pub(crate) right: f64,
    pub(crate) align_offset: f64,
    pub(crate) content_width: f64,
    pub(crate) paragraph_end: bool,
    pub(crate) terminator_len: usize,
    pub(crate) paragraph_spacing: f64,
}

impl BoxLine {
    /// Index of the source line in the document.
    pub fn source_line(&self) -> usize {
        self.source
    }

    /// Offset of the first character within the source line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Document index of the first character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Document index past the last character.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The document range covered, including any terminator.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Number of characters, including any terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the line has no characters; only an empty paragraph lays out
    /// that way.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The tokens on the line, left to right.
    pub fn tokens(&self) -> &[BoxToken] {
        &self.tokens
    }

    /// Vertical metrics.
    pub fn metrics(&self) -> &LineMetrics {
        &self.metrics
    }

    /// Top of the line.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Position of the baseline.
    pub fn baseline(&self) -> f64 {
        self.y + self.metrics.ascent
    }

    /// Bottom of the line, where the next line starts unless paragraph
    /// spacing follows.
    pub fn bottom(&self) -> f64 {
        self.y + self.metrics.advance
    }

    /// Horizontal offset applied by alignment.
    pub fn align_offset(&self) -> f64 {
        self.align_offset
    }

    /// Width from the left edge to the end of the last token, before
    /// alignment.
    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Width between the indents.
    pub fn available_width(&self) -> f64 {
        self.right - self.left
    }

    /// The box the line was fitted into, between the indents.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.left, self.y, self.right, self.bottom())
    }

    /// Whether the line ends its paragraph.
    pub fn is_paragraph_end(&self) -> bool {
        self.paragraph_end
    }

    /// Whether the line ends with a terminator.
    pub fn is_terminated(&self) -> bool {
        self.terminator_len > 0
    }

    /// Length of the terminator at the end of the line, if any.
    pub fn terminator_len(&self) -> usize {
        self.terminator_len
    }

    /// Whether the line was broken inside a word with a hyphen.
    pub fn is_hyphenated(&self) -> bool {
        self.tokens.last().is_some_and(|token| token.hyphenated)
    }

    /// Left edge of the character at `offset` within the line, or the right
    /// edge of the line's last character at `offset == len`.
    pub fn x_for_offset(&self, offset: usize) -> Option<f64> {
        self.positions.get(offset).copied()
    }

    /// Offset of the caret position closest to `x`, at most `max`.
    pub(crate) fn offset_for_x(&self, x: f64, max: usize) -> usize {
        let mut offset = 0;
        while offset < max {
            let left = self.positions[offset];
            let right = self.positions[offset + 1];
            if x < (left + right) * 0.5 {
                break;
            }
            offset += 1;
        }
        offset
    }

    /// The last offset a caret can take on this line.
    ///
    /// Terminators are skipped, as is the whitespace a line was wrapped
    /// after, since the caret at the very end of a wrapped line belongs to
    /// the next line.
    pub(crate) fn caret_max(&self) -> usize {
        if self.paragraph_end {
            self.len - self.terminator_len
        } else {
            self.len.saturating_sub(1)
        }
    }

    /// Whether the line was cut inside a token, by a hyphen or a forced
    /// split, so the next line continues the same word.
    pub(crate) fn ends_mid_word(&self) -> bool {
        !self.paragraph_end && self.tokens.last().is_some_and(|token| token.end == self.len)
    }

    pub(crate) fn shift(&mut self, index_delta: isize, source_delta: isize) {
        self.start = self.start.saturating_add_signed(index_delta);
        self.source = self.source.saturating_add_signed(source_delta);
    }
}
