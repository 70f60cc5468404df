// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cell::OnceCell;
use core::ops::Range;

use super::token::{tokenize, Token};
use super::Run;
use crate::style::{Brush, CharacterStyle, LineStyle};

/// One paragraph of a document: a character buffer, the runs styling it and
/// a paragraph style.
///
/// Every line but the last ends with a `'\n'` terminator. The runs cover the
/// characters exactly, in order and without gaps. An empty line still has a
/// single, empty run which provides the style for text typed into it.
#[derive(Clone, Debug)]
pub struct Line<B: Brush> {
    chars: Vec<char>,
    runs: Vec<Run<B>>,
    style: LineStyle,
    pub(crate) start: usize,
    tokens: OnceCell<Box<[Token]>>,
}

impl<B: Brush> Line<B> {
    pub(crate) fn new(style: LineStyle, char_style: CharacterStyle<B>) -> Self {
        Self {
            chars: Vec::new(),
            runs: vec![Run::new(0, 0, char_style)],
            style,
            start: 0,
            tokens: OnceCell::new(),
        }
    }

    /// Index of the first character in the document.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index past the last character, including the terminator.
    pub fn end(&self) -> usize {
        self.start + self.chars.len()
    }

    /// The document range covered by the line, including the terminator.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Number of characters, including the terminator.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the line has no characters at all.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters of the line.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The characters of the line as a string.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// The character at `offset`, if any.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// The runs styling the line.
    pub fn runs(&self) -> &[Run<B>] {
        &self.runs
    }

    /// The paragraph style.
    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Whether the line ends with a `'\n'`.
    pub fn is_terminated(&self) -> bool {
        self.chars.last() == Some(&'\n')
    }

    /// Length of the terminator: 2 for `"\r\n"`, 1 for `'\n'` and 0 for the
    /// last line.
    pub fn terminator_len(&self) -> usize {
        match self.chars.as_slice() {
            [.., '\r', '\n'] => 2,
            [.., '\n'] => 1,
            _ => 0,
        }
    }

    /// Number of characters before the terminator.
    pub fn content_len(&self) -> usize {
        self.len() - self.terminator_len()
    }

    /// The tokens of the line, computed on first use after a change.
    pub fn tokens(&self) -> &[Token] {
        self.tokens.get_or_init(|| tokenize(&self.chars, &self.runs))
    }

    /// Index of the token containing the character at `offset`.
    pub fn token_index_at(&self, offset: usize) -> Option<usize> {
        let tokens = self.tokens();
        let index = tokens.partition_point(|token| token.end() <= offset);
        tokens
            .get(index)
            .is_some_and(|token| token.start() <= offset)
            .then_some(index)
    }

    /// Index of the run containing the character at `offset`.
    ///
    /// An offset at the end of the line maps to the last run.
    pub fn run_index_at(&self, offset: usize) -> usize {
        self.runs
            .partition_point(|run| run.end() <= offset)
            .min(self.runs.len() - 1)
    }

    /// The style of the character at `offset`.
    pub fn style_at(&self, offset: usize) -> &CharacterStyle<B> {
        &self.runs[self.run_index_at(offset)].style
    }

    /// Index of the run that text inserted at `offset` joins by default.
    ///
    /// At a boundary between two runs this is the earlier one.
    pub(crate) fn insertion_run(&self, offset: usize) -> usize {
        self.runs
            .partition_point(|run| run.end() < offset)
            .min(self.runs.len() - 1)
    }

    /// The style text inserted at `offset` takes by default.
    pub(crate) fn insertion_style(&self, offset: usize) -> &CharacterStyle<B> {
        &self.runs[self.insertion_run(offset)].style
    }

    /// Inserts `chars` with `style` at `offset`.
    ///
    /// The characters join an adjacent run of the same style when there is
    /// one; otherwise the covering run is split around a new run.
    pub(crate) fn insert(&mut self, offset: usize, chars: &[char], style: &CharacterStyle<B>) {
        let count = chars.len();
        let index = self.insertion_run(offset);
        let (run_start, run_end) = (self.runs[index].start, self.runs[index].end());
        if count == 0 {
            if self.is_empty() {
                self.runs[index].style = style.clone();
            }
            return;
        }

        if self.runs[index].is_empty() {
            self.runs[index].style = style.clone();
            self.runs[index].len += count;
        } else if self.runs[index].style == *style {
            self.runs[index].len += count;
        } else if offset == run_end
            && self
                .runs
                .get(index + 1)
                .is_some_and(|next| next.style == *style)
        {
            self.runs[index + 1].len += count;
        } else if offset == run_start {
            self.runs.insert(index, Run::new(offset, count, style.clone()));
        } else if offset == run_end {
            self.runs
                .insert(index + 1, Run::new(offset, count, style.clone()));
        } else {
            let tail = Run::new(offset, run_end - offset, self.runs[index].style.clone());
            self.runs[index].len = offset - run_start;
            self.runs
                .insert(index + 1, Run::new(offset, count, style.clone()));
            self.runs.insert(index + 2, tail);
        }

        self.chars.splice(offset..offset, chars.iter().copied());
        self.renumber_runs();
        self.invalidate();
    }

    /// Appends `chars` with `style`.
    pub(crate) fn push(&mut self, chars: &[char], style: &CharacterStyle<B>) {
        self.insert(self.len(), chars, style);
    }

    /// Removes the characters in `range`.
    ///
    /// Runs left empty are dropped, except that an emptied line keeps its
    /// first run.
    pub(crate) fn remove(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        for run in &mut self.runs {
            let end = run.end();
            let covered = range.end.min(end).saturating_sub(range.start.max(run.start));
            run.len -= covered;
        }
        if self.runs.iter().all(Run::is_empty) {
            self.runs.truncate(1);
        } else {
            self.runs.retain(|run| !run.is_empty());
        }
        self.chars.drain(range);
        self.renumber_runs();
        self.merge_runs();
        self.invalidate();
    }

    /// Restyles the characters in `range` with `f`, returning the
    /// `(range, old, new)` of every run whose style changed.
    pub(crate) fn update_style(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(&CharacterStyle<B>) -> CharacterStyle<B>,
    ) -> Vec<(Range<usize>, CharacterStyle<B>, CharacterStyle<B>)> {
        if range.is_empty() {
            return Vec::new();
        }
        self.split_run_at(range.start);
        self.split_run_at(range.end);
        let mut changed = Vec::new();
        for run in &mut self.runs {
            if run.is_empty() || run.start < range.start || run.end() > range.end {
                continue;
            }
            let new = f(&run.style);
            if new != run.style {
                let old = core::mem::replace(&mut run.style, new.clone());
                changed.push((run.range(), old, new));
            }
        }
        self.merge_runs();
        self.invalidate();
        changed
    }

    /// Replaces the paragraph style, returning the previous one.
    pub(crate) fn set_line_style(&mut self, style: LineStyle) -> LineStyle {
        core::mem::replace(&mut self.style, style)
    }

    /// Splits the line at `offset`, returning the characters after it as a
    /// new line with the same paragraph style.
    ///
    /// Whichever side ends up empty takes the style of the run at the split.
    pub(crate) fn split_off(&mut self, offset: usize) -> Self {
        let fallback = self.insertion_style(offset).clone();
        let tail_chars = self.chars.split_off(offset);
        let mut head = Vec::new();
        let mut tail = Vec::new();
        for run in self.runs.drain(..) {
            if run.end() <= offset {
                head.push(run);
            } else if run.start >= offset {
                tail.push(Run::new(run.start - offset, run.len, run.style));
            } else {
                head.push(Run::new(run.start, offset - run.start, run.style.clone()));
                tail.push(Run::new(0, run.end() - offset, run.style));
            }
        }
        if head.is_empty() {
            head.push(Run::new(0, 0, fallback.clone()));
        }
        if tail.is_empty() {
            tail.push(Run::new(0, 0, fallback));
        }
        self.runs = head;
        self.invalidate();
        Self {
            chars: tail_chars,
            runs: tail,
            style: self.style.clone(),
            start: self.start + offset,
            tokens: OnceCell::new(),
        }
    }

    /// Appends the characters and runs of `other`, keeping this line's
    /// paragraph style.
    pub(crate) fn append(&mut self, other: Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.runs.clear();
        }
        let offset = self.len();
        self.chars.extend(other.chars);
        self.runs.extend(
            other
                .runs
                .into_iter()
                .map(|run| Run::new(run.start + offset, run.len, run.style)),
        );
        self.merge_runs();
        self.invalidate();
    }

    fn split_run_at(&mut self, offset: usize) {
        let Some(index) = self
            .runs
            .iter()
            .position(|run| run.start < offset && offset < run.end())
        else {
            return;
        };
        let run = &mut self.runs[index];
        let tail = Run::new(offset, run.end() - offset, run.style.clone());
        run.len = offset - run.start;
        self.runs.insert(index + 1, tail);
    }

    fn merge_runs(&mut self) {
        self.runs.dedup_by(|next, prev| {
            if next.style == prev.style {
                prev.len += next.len;
                true
            } else {
                false
            }
        });
    }

    fn renumber_runs(&mut self) {
        let mut start = 0;
        for run in &mut self.runs {
            run.start = start;
            start += run.len;
        }
    }

    fn invalidate(&mut self) {
        self.tokens.take();
    }
}

#[cfg(test)]
mod tests {
    use super::Line;
    use crate::style::{CharacterStyle, LineStyle};

    type Style = CharacterStyle<u32>;

    fn style(brush: u32) -> Style {
        Style::default().with_brush(brush)
    }

    fn line(text: &str) -> Line<u32> {
        let mut line = Line::new(LineStyle::default(), style(0));
        line.push(&text.chars().collect::<Vec<_>>(), &style(0));
        line
    }

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn brushes(line: &Line<u32>) -> Vec<(usize, usize, u32)> {
        line.runs()
            .iter()
            .map(|run| (run.start(), run.len(), *run.style().brush()))
            .collect()
    }

    #[test]
    fn insert_same_style_grows_run() {
        let mut line = line("hello");
        line.insert(2, &chars("XY"), &style(0));
        assert_eq!(line.text(), "heXYllo");
        assert_eq!(brushes(&line), [(0, 7, 0)]);
    }

    #[test]
    fn insert_mid_run_splits() {
        let mut line = line("hello");
        line.insert(2, &chars("XY"), &style(1));
        assert_eq!(brushes(&line), [(0, 2, 0), (2, 2, 1), (4, 3, 0)]);
    }

    #[test]
    fn insert_at_boundary_joins_matching_neighbor() {
        let mut line = line("hello");
        line.insert(5, &chars("!"), &style(1));
        assert_eq!(brushes(&line), [(0, 5, 0), (5, 1, 1)]);
        line.insert(5, &chars("?"), &style(1));
        assert_eq!(brushes(&line), [(0, 5, 0), (5, 2, 1)]);
        line.insert(0, &chars(">"), &style(2));
        assert_eq!(brushes(&line), [(0, 1, 2), (1, 5, 0), (6, 2, 1)]);
    }

    #[test]
    fn empty_line_adopts_inserted_style() {
        let mut line = Line::new(LineStyle::default(), style(0));
        line.insert(0, &chars("a"), &style(3));
        assert_eq!(brushes(&line), [(0, 1, 3)]);
    }

    #[test]
    fn remove_drops_covered_runs() {
        let mut line = line("hello");
        line.insert(2, &chars("XY"), &style(1));
        line.remove(2..4);
        assert_eq!(line.text(), "hello");
        assert_eq!(brushes(&line), [(0, 5, 0)]);
    }

    #[test]
    fn removing_everything_keeps_first_run() {
        let mut line = line("ab");
        line.insert(2, &chars("cd"), &style(1));
        line.remove(0..4);
        assert!(line.is_empty(), "no characters");
        assert_eq!(brushes(&line), [(0, 0, 0)]);
    }

    #[test]
    fn update_style_splits_at_range() {
        let mut line = line("abcdef");
        let changed = line.update_style(2..4, |s| s.with_brush(5));
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].0, 2..4);
        assert_eq!(brushes(&line), [(0, 2, 0), (2, 2, 5), (4, 2, 0)]);
        let changed = line.update_style(0..6, |s| s.with_brush(0));
        assert_eq!(changed.len(), 1);
        assert_eq!(brushes(&line), [(0, 6, 0)]);
    }

    #[test]
    fn unchanged_style_reports_nothing() {
        let mut line = line("abcdef");
        assert!(
            line.update_style(1..3, Clone::clone).is_empty(),
            "an unchanged style records nothing"
        );
        assert_eq!(brushes(&line), [(0, 6, 0)]);
    }

    #[test]
    fn split_and_append() {
        let mut line = line("ab\n");
        line.insert(3, &chars("cd"), &style(1));
        let tail = line.split_off(3);
        assert_eq!(line.text(), "ab\n");
        assert_eq!(tail.text(), "cd");
        assert_eq!(brushes(&tail), [(0, 2, 1)]);
        line.remove(2..3);
        line.append(tail);
        assert_eq!(line.text(), "abcd");
        assert_eq!(brushes(&line), [(0, 2, 0), (2, 2, 1)]);
    }

    #[test]
    fn split_at_end_keeps_style() {
        let mut line = line("ab");
        line.insert(2, &chars("\n"), &style(4));
        let tail = line.split_off(3);
        assert!(tail.is_empty(), "split at the end");
        assert_eq!(brushes(&tail), [(0, 0, 4)]);
    }

    #[test]
    fn terminators() {
        assert_eq!(line("ab\r\n").terminator_len(), 2);
        assert_eq!(line("ab\n").terminator_len(), 1);
        assert_eq!(line("ab").terminator_len(), 0);
        assert_eq!(line("ab\r\n").content_len(), 2);
    }

    #[test]
    fn tokens_are_recomputed_after_edits() {
        let mut line = line("one two");
        assert_eq!(line.tokens().len(), 2);
        assert_eq!(line.token_index_at(5), Some(1));
        assert_eq!(line.token_index_at(3), None);
        line.insert(3, &chars("x"), &style(0));
        assert_eq!(line.tokens().len(), 2);
        line.remove(3..5);
        assert_eq!(line.text(), "onetwo");
        assert_eq!(line.tokens().len(), 1);
    }
}
