// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking of a single source line.

use quire_hyphen::Hyphenator;

use super::align::align;
use super::bounds::{scan_extent, WrapBounds};
use super::{BoxLine, BoxToken, LineMetrics, WrapConfig};
use crate::document::Line;
use crate::metrics::FontMetrics;
use crate::style::{Brush, CharacterStyle, TabKind};

/// Slack allowed when comparing positions against the right edge.
const EPSILON: f64 = 1e-9;

/// Space widths a tab advances by past the last tab stop.
const TAB_SPACES: f64 = 4.0;

/// Hyphenation never leaves fewer characters than this on either side.
const MIN_FRAGMENT: usize = 2;

/// Per-character measurement of one source line at the layout's font scale.
struct Measure<'a, B: Brush, M> {
    line: &'a Line<B>,
    styles: Vec<CharacterStyle<B>>,
    metrics: &'a M,
}

impl<'a, B: Brush, M: FontMetrics<B>> Measure<'a, B, M> {
    fn new(line: &'a Line<B>, metrics: &'a M, scale: f64) -> Self {
        Self {
            line,
            styles: line
                .runs()
                .iter()
                .map(|run| run.style().scaled(scale))
                .collect(),
            metrics,
        }
    }

    fn style(&self, offset: usize) -> &CharacterStyle<B> {
        &self.styles[self.line.run_index_at(offset)]
    }

    fn advance(&self, offset: usize) -> f64 {
        match self.line.chars()[offset] {
            '\n' | '\r' => 0.0,
            ch => self.metrics.advance(self.style(offset), ch),
        }
    }

    /// Width of the characters from `offset` up to whitespace, or up to a
    /// `'.'` when `decimal` is set.
    fn following_width(&self, offset: usize, decimal: bool) -> f64 {
        self.line.chars()[offset..]
            .iter()
            .take_while(|ch| !ch.is_whitespace() && !(decimal && **ch == '.'))
            .enumerate()
            .map(|(i, _)| self.advance(offset + i))
            .sum()
    }
}

/// Collects placed tokens and character positions for one box line.
#[derive(Default)]
struct Placement {
    tokens: Vec<BoxToken>,
    positions: Vec<f64>,
}

impl Placement {
    /// Places the characters starting at `start` with the given widths as a
    /// token, returning its total width.
    fn push_token<B: Brush, M: FontMetrics<B>>(
        &mut self,
        measure: &Measure<'_, B, M>,
        offset: usize,
        start: usize,
        x: f64,
        widths: &[f64],
        hyphenated: bool,
    ) -> f64 {
        let style = measure.style(start);
        let width: f64 = widths.iter().sum();
        self.tokens.push(BoxToken {
            start: start - offset,
            end: start + widths.len() - offset,
            run: measure.line.run_index_at(start),
            x,
            width,
            shift: 0.0,
            hyphenated,
            baseline_offset: style.scripting().baseline_offset(style.font().size()),
        });
        let mut x = x;
        for width in widths {
            self.positions.push(x);
            x += width;
        }
        width
    }
}

/// Breaks source lines into box lines.
pub(crate) struct Breaker<'a, M> {
    pub(crate) metrics: &'a M,
    pub(crate) config: &'a WrapConfig,
    pub(crate) bounds: Option<&'a dyn WrapBounds>,
    pub(crate) hyphenator: Option<&'a Hyphenator>,
}

impl<M> Breaker<'_, M> {
    /// Lays out the longest prefix of `line` starting at `offset` that fits
    /// a box line whose top is at `y`.
    ///
    /// Tokens are placed left to right. The first token that does not fit is
    /// hyphenated if possible, and otherwise moved to the next line with the
    /// whitespace before it left behind. A token that does not fit on an
    /// otherwise empty line is cut after its longest fitting prefix, and
    /// after at least one character.
    pub(crate) fn break_line<B: Brush>(
        &self,
        source: usize,
        line: &Line<B>,
        offset: usize,
        y: f64,
    ) -> BoxLine
    where
        M: FontMetrics<B>,
    {
        let measure = Measure::new(line, self.metrics, self.config.font_scale());
        let chars = line.chars();
        let style = line.style();
        let content_end = if line.is_terminated() {
            line.len() - 1
        } else {
            line.len()
        };

        let (edge_left, edge_right) = match self.bounds {
            Some(bounds) => {
                let lead = measure.style(offset);
                let height = self.metrics.ascent(lead) + self.metrics.descent(lead);
                let (left, right) = scan_extent(bounds, y, height);
                (left, right.min(self.config.width()))
            }
            None => (0.0, self.config.width()),
        };
        let left = edge_left + style.indent(offset == 0);
        let right = edge_right - style.right_indent();
        let limit = if self.config.wrap() {
            right
        } else {
            f64::INFINITY
        };

        let source_tokens = line.tokens();
        let mut next = source_tokens.partition_point(|token| token.end() <= offset);
        let mut placed = Placement::default();
        let mut x = left;
        let mut i = offset;
        let mut hyphen_width = 0.0;
        let mut end = None;

        loop {
            let gap_end = source_tokens
                .get(next)
                .map_or(content_end, |token| token.start().max(offset));
            while i < gap_end {
                placed.positions.push(x);
                x = if chars[i] == '\t' {
                    self.tab(&measure, i, x, edge_left)
                } else {
                    x + measure.advance(i)
                };
                i += 1;
            }
            let Some(token) = source_tokens.get(next) else {
                break;
            };

            let widths: Vec<f64> = (i..token.end()).map(|k| measure.advance(k)).collect();
            let width: f64 = widths.iter().sum();
            if x + width <= limit + EPSILON {
                x += placed.push_token(&measure, offset, i, x, &widths, false);
                i = token.end();
                next += 1;
                continue;
            }

            if let Some((split, dash)) =
                self.hyphen_split(&measure, token.start(), i, x, &widths, limit)
            {
                x += placed.push_token(&measure, offset, i, x, &widths[..split - i], true);
                hyphen_width = dash;
                i = split;
            } else if placed.tokens.is_empty() {
                let mut split = i + 1;
                let mut fit = widths[0];
                while split < token.end() && x + fit + widths[split - i] <= limit + EPSILON {
                    fit += widths[split - i];
                    split += 1;
                }
                x += placed.push_token(&measure, offset, i, x, &widths[..split - i], false);
                i = split;
            }
            end = Some(i);
            break;
        }

        let end = match end {
            Some(end) => end,
            None => {
                // The terminator takes no space.
                placed.positions.extend((i..line.len()).map(|_| x));
                line.len()
            }
        };
        placed.positions.push(x);

        let paragraph_end = end == line.len();
        let content_width = placed
            .tokens
            .last()
            .map_or(0.0, |token| token.x + token.width - left);
        let mut boxed = BoxLine {
            source,
            offset,
            start: line.start() + offset,
            len: end - offset,
            tokens: placed.tokens,
            positions: placed.positions,
            metrics: self.line_metrics(&measure, offset, end),
            y,
            left,
            right,
            align_offset: 0.0,
            content_width,
            paragraph_end,
            terminator_len: if paragraph_end {
                line.terminator_len()
            } else {
                0
            },
            paragraph_spacing: if paragraph_end && line.is_terminated() {
                style.paragraph_spacing()
            } else {
                0.0
            },
        };
        align(&mut boxed, style.alignment(), hyphen_width);
        boxed
    }

    /// Position after a tab at `offset` that starts at `x`.
    fn tab<B: Brush>(
        &self,
        measure: &Measure<'_, B, M>,
        offset: usize,
        x: f64,
        origin: f64,
    ) -> f64
    where
        M: FontMetrics<B>,
    {
        let Some(stop) = measure.line.style().tab_stop_after(x - origin) else {
            return x + TAB_SPACES * self.metrics.advance(measure.style(offset), ' ');
        };
        let target = origin + stop.position;
        let following = offset + 1;
        match stop.kind {
            TabKind::Left => target,
            TabKind::Right => (target - measure.following_width(following, false)).max(x),
            TabKind::Center => {
                (target - measure.following_width(following, false) * 0.5).max(x)
            }
            TabKind::Decimal => (target - measure.following_width(following, true)).max(x),
        }
    }

    /// Finds the rightmost hyphenation point in the word starting at
    /// `word_start` that lets the characters from `start` up to it, plus a
    /// hyphen, fit before `limit`.
    ///
    /// Returns the split offset and the hyphen's width.
    fn hyphen_split<B: Brush>(
        &self,
        measure: &Measure<'_, B, M>,
        word_start: usize,
        start: usize,
        x: f64,
        widths: &[f64],
        limit: f64,
    ) -> Option<(usize, f64)>
    where
        M: FontMetrics<B>,
    {
        if !self.config.wrap() {
            return None;
        }
        let hyphenator = self.hyphenator?;
        let word_end = start + widths.len();
        let word: String = measure.line.chars()[word_start..word_end].iter().collect();
        let dash = self.metrics.advance(measure.style(start), '-');
        for hyphen in hyphenator.hyphens(&word).into_iter().rev() {
            let split = word_start + hyphen;
            if split <= start {
                break;
            }
            if split + MIN_FRAGMENT > word_end {
                continue;
            }
            if hyphen < MIN_FRAGMENT {
                break;
            }
            let width: f64 = widths[..split - start].iter().sum();
            if x + width + dash <= limit + EPSILON {
                return Some((split, dash));
            }
        }
        None
    }

    /// The largest metrics among the runs covering `offset..end`.
    fn line_metrics<B: Brush>(
        &self,
        measure: &Measure<'_, B, M>,
        offset: usize,
        end: usize,
    ) -> LineMetrics
    where
        M: FontMetrics<B>,
    {
        let line = measure.line;
        let first = line.run_index_at(offset);
        let mut metrics = LineMetrics::default();
        for (index, run) in line.runs().iter().enumerate().skip(first) {
            if index > first && run.start() >= end {
                break;
            }
            let style = &measure.styles[index];
            let shift = style.scripting().baseline_offset(style.font().size());
            metrics.ascent = metrics.ascent.max(self.metrics.ascent(style) - shift.min(0.0));
            metrics.descent = metrics
                .descent
                .max(self.metrics.descent(style) + shift.max(0.0));
            metrics.leading = metrics.leading.max(self.metrics.leading(style));
        }
        metrics.advance = line
            .style()
            .advance(metrics.ascent, metrics.descent, metrics.leading);
        metrics
    }
}
