// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word-wrapped layout of a document inside a box or shape.

mod align;
mod bounds;
mod config;
mod fit;
mod line;
mod wrap;

use core::fmt;
use core::ops::Range;
use std::sync::Arc;

use peniko::kurbo::{Point, Rect};
use quire_hyphen::Hyphenator;

pub use bounds::WrapBounds;
pub use config::{Overflow, VerticalAlignment, WrapConfig};
pub use fit::FitOutcome;
pub use line::{BoxLine, BoxToken, LineMetrics};

use crate::document::{Change, Document, Editable, ListenerId};
use crate::metrics::FontMetrics;
use crate::style::{Brush, CharacterStyle, LineStyle};
use crate::Error;
use wrap::Breaker;

/// Minimum width of a selection rectangle covering only a terminator.
const MIN_RECT_WIDTH: f64 = 4.0;

/// Tolerance used when comparing sizes against the layout box.
const EPSILON: f64 = 1e-6;

/// A document broken into lines that fit a width, and optionally a height or
/// an arbitrary shape.
///
/// The layout owns its document. Edits made through the layout rewrap only
/// the lines they affect and reuse the rest.
pub struct BoundedLayout<B: Brush, M: FontMetrics<B>> {
    document: Document<B>,
    metrics: M,
    config: WrapConfig,
    bounds: Option<Arc<dyn WrapBounds>>,
    hyphenator: Option<Arc<Hyphenator>>,
    lines: Vec<BoxLine>,
    /// Vertical offset applied to every line by vertical alignment.
    block_offset: f64,
    /// Number of document lines at the last layout.
    source_lines: usize,
}

impl<B: Brush, M: FontMetrics<B>> BoundedLayout<B, M> {
    /// Lays out `document` with `metrics` according to `config`.
    pub fn new(document: Document<B>, metrics: M, config: WrapConfig) -> Self {
        let mut layout = Self {
            document,
            metrics,
            config,
            bounds: None,
            hyphenator: None,
            lines: Vec::new(),
            block_offset: 0.0,
            source_lines: 0,
        };
        layout.relayout();
        layout
    }

    /// The laid out document.
    pub fn document(&self) -> &Document<B> {
        &self.document
    }

    /// Consumes the layout, returning its document.
    pub fn into_document(self) -> Document<B> {
        self.document
    }

    /// The metrics characters are measured with.
    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// The current configuration.
    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    /// The shape lines are wrapped into, if any.
    pub fn bounds(&self) -> Option<&dyn WrapBounds> {
        self.bounds.as_deref()
    }

    /// The hyphenator set with [`set_hyphenator`](Self::set_hyphenator).
    pub fn hyphenator(&self) -> Option<&Arc<Hyphenator>> {
        self.hyphenator.as_ref()
    }

    /// The laid out lines, top to bottom.
    pub fn lines(&self) -> &[BoxLine] {
        &self.lines
    }

    /// Number of laid out lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `index`.
    pub fn line(&self, index: usize) -> Option<&BoxLine> {
        self.lines.get(index)
    }

    /// The characters of the line at `index`, including any terminator.
    pub fn line_text(&self, index: usize) -> Option<String> {
        let line = self.lines.get(index)?;
        self.document.substring(line.range()).ok()
    }

    /// Document index past the last laid out character.
    ///
    /// This is less than the document length when lines were clipped.
    pub fn len(&self) -> usize {
        self.lines.last().map_or(self.start(), BoxLine::end)
    }

    /// Whether no characters are laid out.
    pub fn is_empty(&self) -> bool {
        self.len() == self.start()
    }

    /// Document index of the first laid out character.
    pub fn start(&self) -> usize {
        self.config.start().min(self.document.len())
    }

    /// Replaces the configuration, laying out again if it changed.
    pub fn set_config(&mut self, config: WrapConfig) {
        if config != self.config {
            self.config = config;
            self.relayout();
        }
    }

    /// Sets the width lines wrap at.
    pub fn set_width(&mut self, width: f64) {
        self.set_config(self.config.with_width(width));
    }

    /// Sets the height lines are fitted into.
    pub fn set_height(&mut self, height: f64) {
        self.set_config(self.config.with_height(height));
    }

    /// Enables or disables wrapping.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.set_config(self.config.with_wrap(wrap));
    }

    /// Enables or disables hyphenation.
    pub fn set_hyphenate(&mut self, hyphenate: bool) {
        self.set_config(self.config.with_hyphenate(hyphenate));
    }

    /// Sets the factor applied to every font size.
    pub fn set_font_scale(&mut self, font_scale: f64) {
        self.set_config(self.config.with_font_scale(font_scale));
    }

    /// Sets the handling of lines below the height.
    pub fn set_overflow(&mut self, overflow: Overflow) {
        self.set_config(self.config.with_overflow(overflow));
    }

    /// Sets the placement of the lines within the height.
    pub fn set_vertical_alignment(&mut self, vertical_alignment: VerticalAlignment) {
        self.set_config(self.config.with_vertical_alignment(vertical_alignment));
    }

    /// Sets the document index of the first laid out character.
    pub fn set_start(&mut self, start: usize) {
        self.set_config(self.config.with_start(start));
    }

    /// Wraps lines into `bounds` instead of the configured rectangle.
    ///
    /// Each line gets the widest span at its height that lies inside the
    /// shape.
    pub fn set_bounds(&mut self, bounds: Option<Arc<dyn WrapBounds>>) {
        self.bounds = bounds;
        self.relayout();
    }

    /// Sets the hyphenator used when hyphenation is enabled.
    ///
    /// Without one, the bundled US English dictionary is used.
    pub fn set_hyphenator(&mut self, hyphenator: Option<Arc<Hyphenator>>) {
        self.hyphenator = hyphenator;
        if self.config.hyphenate() {
            self.relayout();
        }
    }

    /// Discards all lines and lays out the document from scratch.
    pub fn relayout(&mut self) {
        self.lines.clear();
        let start = self.start();
        if let Ok(source) = self.document.line_for_index(start) {
            let offset = start - self.document.lines()[source].start();
            self.fill(source, offset);
        }
        self.source_lines = self.document.line_count();
        self.settle();
        log::debug!(
            "laid out {} lines for {} characters",
            self.lines.len(),
            self.document.len()
        );
    }

    /// Index of the line containing document index `index`.
    ///
    /// An index at a wrap point belongs to the following line; the index past
    /// the last laid out character belongs to the last line.
    pub fn line_for_index(&self, index: usize) -> Option<usize> {
        let first = self.lines.first()?;
        if index < first.start() {
            return None;
        }
        let line = self.lines.partition_point(|line| line.start() <= index) - 1;
        (index <= self.lines[line].end()).then_some(line)
    }

    /// Index of the line at vertical position `y`, clamped to the first and
    /// last lines.
    pub fn line_for_y(&self, y: f64) -> Option<usize> {
        let last = self.lines.len().checked_sub(1)?;
        if y < self.lines[0].y() {
            return Some(0);
        }
        Some(
            self.lines
                .partition_point(|line| line.y() <= y)
                .saturating_sub(1)
                .min(last),
        )
    }

    /// Horizontal position of the caret before the character at `index`.
    pub fn x_for_index(&self, index: usize) -> Option<f64> {
        let line = &self.lines[self.line_for_index(index)?];
        line.x_for_offset(index - line.start())
    }

    /// Document index of the caret position closest to `point`.
    pub fn index_for_point(&self, point: Point) -> usize {
        let Some(line) = self.line_for_y(point.y) else {
            return self.start();
        };
        let line = &self.lines[line];
        line.start() + line.offset_for_x(point.x, line.caret_max())
    }

    /// Rectangle of the caret before the character at `index`, `width` wide.
    pub fn caret_rect(&self, index: usize, width: f64) -> Option<Rect> {
        let line = &self.lines[self.line_for_index(index)?];
        let x = line.x_for_offset(index - line.start())?;
        Some(Rect::new(x, line.y(), x + width, line.bottom()))
    }

    /// Rectangles covering the characters in `range`, one per line.
    pub fn range_rects(&self, range: Range<usize>) -> Vec<Rect> {
        let mut rects = Vec::new();
        self.range_rects_with(range, |rect| rects.push(rect));
        rects
    }

    /// Invokes `f` with a rectangle covering the characters in `range` on
    /// each line.
    pub fn range_rects_with(&self, range: Range<usize>, mut f: impl FnMut(Rect)) {
        if range.is_empty() {
            return;
        }
        let first = self.lines.partition_point(|line| line.end() <= range.start);
        for line in &self.lines[first..] {
            if line.start() >= range.end {
                break;
            }
            let start = range.start.max(line.start()) - line.start();
            let end = range.end.min(line.end()) - line.start();
            if start >= end {
                continue;
            }
            let x0 = line.positions[start];
            let x1 = line.positions[end];
            f(Rect::new(
                x0,
                line.y(),
                x0 + (x1 - x0).max(MIN_RECT_WIDTH),
                line.bottom(),
            ));
        }
    }

    /// Width the laid out paragraphs need to avoid wrapping, including
    /// indents.
    pub fn pref_width(&self) -> f64 {
        let config = self.config.with_wrap(false).with_width(f64::INFINITY);
        let breaker = Breaker {
            metrics: &self.metrics,
            config: &config,
            bounds: None,
            hyphenator: None,
        };
        let first = self.lines.first().map_or(0, BoxLine::source_line);
        let last = self.lines.last().map_or(0, BoxLine::source_line);
        self.document.lines()[first..=last.min(self.document.line_count() - 1)]
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let boxed = breaker.break_line(first + index, line, 0, 0.0);
                boxed.left + boxed.content_width + line.style().right_indent()
            })
            .fold(0.0, f64::max)
    }

    /// Height of the laid out lines, from the top of the first to the bottom
    /// of the last.
    pub fn pref_height(&self) -> f64 {
        match (self.lines.first(), self.lines.last()) {
            (Some(first), Some(last)) => last.bottom() - first.y(),
            _ => 0.0,
        }
    }

    /// Whether the text does not fit the layout box.
    ///
    /// This is the case when the lines are taller than the height, when
    /// clipping dropped text, or when a word had to be cut to fit the width.
    pub fn is_out_of_bounds(&self) -> bool {
        if self.pref_height() > self.config.height() + EPSILON {
            return true;
        }
        if self.len() < self.document.len() {
            return true;
        }
        self.config.wrap()
            && self
                .lines
                .iter()
                .any(|line| line.content_width() > line.available_width() + EPSILON)
    }

    /// Registers `listener` with the document.
    pub fn subscribe(&mut self, listener: impl FnMut(&Change<B>) + 'static) -> ListenerId {
        self.document.subscribe(listener)
    }

    /// Removes a listener from the document.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.document.unsubscribe(id)
    }

    /// Inserts `text` at `index` and rewraps.
    pub fn insert(
        &mut self,
        index: usize,
        text: &str,
        style: Option<&CharacterStyle<B>>,
    ) -> Result<Vec<Change<B>>, Error> {
        let changes = self.document.insert(index, text, style)?;
        self.sync_changes(&changes);
        Ok(changes)
    }

    /// Removes the characters in `range` and rewraps.
    pub fn remove(&mut self, range: Range<usize>) -> Result<Vec<Change<B>>, Error> {
        let changes = self.document.remove(range)?;
        self.sync_changes(&changes);
        Ok(changes)
    }

    /// Replaces the characters in `range` with `text` and rewraps.
    ///
    /// Without an explicit style the text takes the style of the first
    /// replaced character.
    pub fn replace(
        &mut self,
        range: Range<usize>,
        text: &str,
        style: Option<&CharacterStyle<B>>,
    ) -> Result<Vec<Change<B>>, Error> {
        if range.is_empty() {
            return self.insert(range.start, text, style);
        }
        let style = match style {
            Some(style) => style.clone(),
            None => self.document.style_at(range.start)?.clone(),
        };
        let mut changes = self.remove(range.clone())?;
        changes.extend(self.insert(range.start, text, Some(&style))?);
        Ok(changes)
    }

    /// Sets the style of the characters in `range` and rewraps.
    pub fn set_style(
        &mut self,
        range: Range<usize>,
        style: &CharacterStyle<B>,
    ) -> Result<Vec<Change<B>>, Error> {
        let changes = self.document.set_style(range, style)?;
        self.sync_changes(&changes);
        Ok(changes)
    }

    /// Restyles the characters in `range` with `f` and rewraps.
    pub fn update_style(
        &mut self,
        range: Range<usize>,
        f: impl FnMut(&CharacterStyle<B>) -> CharacterStyle<B>,
    ) -> Result<Vec<Change<B>>, Error> {
        let changes = self.document.update_style(range, f)?;
        self.sync_changes(&changes);
        Ok(changes)
    }

    /// Sets the paragraph style of every line touched by `range` and rewraps.
    pub fn set_line_style(
        &mut self,
        range: Range<usize>,
        style: &LineStyle,
    ) -> Result<Vec<Change<B>>, Error> {
        let changes = self.document.set_line_style(range, style)?;
        self.sync_changes(&changes);
        Ok(changes)
    }

    /// Applies `f` to the paragraph style of every line touched by `range`
    /// and rewraps.
    pub fn update_line_style(
        &mut self,
        range: Range<usize>,
        f: impl FnMut(&LineStyle) -> LineStyle,
    ) -> Result<Vec<Change<B>>, Error> {
        let changes = self.document.update_line_style(range, f)?;
        self.sync_changes(&changes);
        Ok(changes)
    }

    fn breaker(&self) -> Breaker<'_, M> {
        Breaker {
            metrics: &self.metrics,
            config: &self.config,
            bounds: self.bounds.as_deref(),
            hyphenator: match (self.config.hyphenate(), self.hyphenator.as_deref()) {
                (false, _) => None,
                (true, Some(hyphenator)) => Some(hyphenator),
                (true, None) => quire_hyphen::shared(),
            },
        }
    }

    /// Appends lines starting at `offset` in source line `source` until the
    /// document ends or, when clipping, the height is reached.
    fn fill(&mut self, source: usize, offset: usize) {
        let mut y = self.lines.last().map_or(0.0, next_top);
        let mut lines = Vec::new();
        let clip = self.config.overflow() == Overflow::Clip;
        let breaker = self.breaker();
        let (mut source, mut offset) = (source, offset);
        while let Some(line) = self.document.line(source) {
            if clip && y >= self.config.height() {
                break;
            }
            let boxed = breaker.break_line(source, line, offset, y);
            y = next_top(&boxed);
            (source, offset) = continuation(&boxed);
            let stalled = boxed.is_empty() && !boxed.is_paragraph_end();
            lines.push(boxed);
            if stalled {
                break;
            }
        }
        self.lines.extend(lines);
    }

    /// Brings the lines up to date after the characters from `start` to
    /// `old_end` were replaced by ones ending at `new_end`.
    fn sync(&mut self, start: usize, old_end: usize, new_end: usize) {
        let source_count = self.document.line_count();
        if self.bounds.is_some() || start < self.config.start() || self.lines.is_empty() {
            self.relayout();
            return;
        }
        // Changes can pull the start of the word they touch back onto the
        // previous line, so rewrapping starts a line before that word.
        let Ok(source) = self.document.line_for_index(start) else {
            self.relayout();
            return;
        };
        let line = &self.document.lines()[source];
        let mut word = start - line.start();
        while word > 0 && !line.chars()[word - 1].is_whitespace() {
            word -= 1;
        }
        let word = line.start() + word;
        // Past a clipped end only a word starting on the last line can change
        // where that line breaks.
        let laid_out = self.lines.last().map_or(0, BoxLine::end);
        if word > laid_out {
            self.source_lines = source_count;
            return;
        }
        let index_delta = new_end as isize - old_end as isize;
        let source_delta = source_count as isize - self.source_lines as isize;
        let mut first = self
            .lines
            .partition_point(|line| line.start() <= word)
            .saturating_sub(1);
        if first > 0 && self.lines[first - 1].source == self.lines[first].source {
            first -= 1;
        }

        let reusable_from = self
            .lines
            .partition_point(|line| line.start() < old_end)
            .max(first + 1)
            .min(self.lines.len());
        let mut tail = self.lines.split_off(reusable_from);
        // An old line can only be reused if it was laid out from the start of
        // a word, since hyphenation looks at the whole word.
        let mut word_starts = Vec::with_capacity(tail.len());
        let mut previous = self.lines.last();
        for line in &tail {
            word_starts.push(!previous.is_some_and(BoxLine::ends_mid_word));
            previous = Some(line);
        }
        let resume = &self.lines[first];
        let (mut source, mut offset) = (resume.source, resume.offset);
        let mut y = resume.y - self.block_offset;
        self.lines.truncate(first);
        // Only lines sharing a paragraph with the change have moved within
        // their source line, or may refer to runs that were split or merged.
        let touched = self.document.line_for_index(new_end).unwrap_or(0);
        // A line in that paragraph may also have been laid out with another
        // paragraph's style or first line indent.
        let mut restyled = vec![false; tail.len()];
        for (line, restyled) in tail.iter_mut().zip(&mut restyled) {
            let paragraph_start = line.offset == 0;
            line.shift(index_delta, source_delta);
            if line.source > touched {
                continue;
            }
            if let Some(source) = self.document.line(line.source) {
                line.offset = line.start - source.start();
                for token in &mut line.tokens {
                    token.run = source.run_index_at(line.offset + token.start);
                }
            }
            *restyled = source_delta != 0 || paragraph_start != (line.offset == 0);
        }

        let clip = self.config.overflow() == Overflow::Clip;
        let breaker = self.breaker();
        let mut rewrapped = Vec::new();
        let mut reuse = None;
        let mut candidate = 0;
        while let Some(line) = self.document.line(source) {
            if clip && y >= self.config.height() {
                break;
            }
            let boxed = breaker.break_line(source, line, offset, y);
            let end = boxed.end();
            y = next_top(&boxed);
            (source, offset) = continuation(&boxed);
            let stalled = boxed.is_empty() && !boxed.is_paragraph_end();
            rewrapped.push(boxed);
            if stalled {
                break;
            }
            if end < new_end {
                continue;
            }
            while candidate < tail.len() && tail[candidate].start < end {
                candidate += 1;
            }
            let at_word_boundary = offset == 0 || line.chars()[offset - 1].is_whitespace();
            if at_word_boundary
                && word_starts.get(candidate) == Some(&true)
                && restyled.get(candidate) == Some(&false)
                && tail.get(candidate).is_some_and(|old| {
                    old.start == end && old.source == source && old.offset == offset
                })
            {
                reuse = Some(candidate);
                break;
            }
        }
        log::trace!(
            "rewrapped {} lines from line {first}, reusing {}",
            rewrapped.len(),
            reuse.map_or(0, |candidate| tail.len() - candidate)
        );
        self.lines.extend(rewrapped);
        if let Some(candidate) = reuse {
            self.lines.extend(tail.drain(candidate..));
        }
        self.source_lines = source_count;
        self.settle();
    }

    /// Rewraps after `changes`, which were just applied to the document.
    fn sync_changes(&mut self, changes: &[Change<B>]) {
        let mut restyled: Option<Range<usize>> = None;
        for change in changes {
            let range = match change {
                Change::CharsInserted { index, text } => {
                    self.sync(*index, *index, index + text.len());
                    continue;
                }
                Change::CharsRemoved { index, text } => {
                    self.sync(*index, index + text.len(), *index);
                    continue;
                }
                Change::StyleChanged { range, .. } => range.clone(),
                Change::LineStyleChanged { line, .. } => match self.document.line(*line) {
                    Some(line) => line.range(),
                    None => continue,
                },
            };
            restyled = Some(match restyled {
                Some(restyled) => restyled.start.min(range.start)..restyled.end.max(range.end),
                None => range,
            });
        }
        if let Some(range) = restyled {
            self.sync(range.start, range.end, range.end);
        }
    }

    /// Stacks the lines from the top, applies clipping and vertical
    /// alignment.
    fn settle(&mut self) {
        self.stack();
        if self.config.overflow() == Overflow::Clip {
            let height = self.config.height();
            let keep = self
                .lines
                .iter()
                .position(|line| line.y >= height)
                .unwrap_or(self.lines.len());
            self.lines.truncate(keep);
            if let Some(last) = self.lines.last() {
                let (source, offset) = continuation(last);
                self.fill(source, offset);
            }
        }
        let content = self.lines.last().map_or(0.0, BoxLine::bottom);
        let height = self.config.height();
        if self.bounds.is_none() && height.is_finite() && height > content {
            self.block_offset = (height - content) * self.config.vertical_alignment().factor();
            for line in &mut self.lines {
                line.y += self.block_offset;
            }
        }
    }

    /// Places every line directly below the previous one, from zero.
    fn stack(&mut self) {
        self.block_offset = 0.0;
        let mut y = 0.0;
        for line in &mut self.lines {
            line.y = y;
            y = next_top(line);
        }
    }
}

/// Top of the line following `line`.
fn next_top(line: &BoxLine) -> f64 {
    line.y + line.metrics.advance + line.paragraph_spacing
}

/// The source line and offset where the line after `line` starts.
fn continuation(line: &BoxLine) -> (usize, usize) {
    if line.paragraph_end {
        (line.source + 1, 0)
    } else {
        (line.source, line.offset + line.len)
    }
}

impl<B: Brush, M: FontMetrics<B>> Editable<B> for BoundedLayout<B, M> {
    fn apply(&mut self, change: &Change<B>) -> Result<Vec<Change<B>>, Error> {
        let changes = self.document.apply(change)?;
        self.sync_changes(&changes);
        Ok(changes)
    }
}

impl<B: Brush, M: FontMetrics<B>> fmt::Debug for BoundedLayout<B, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedLayout")
            .field("document", &self.document)
            .field("config", &self.config)
            .field("bounds", &self.bounds.is_some())
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}
