// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutable rich text document.

mod change;
mod line;
mod run;
mod stream;
mod token;

use core::fmt;
use core::ops::Range;

pub use change::{Change, Editable, History, StyledString};
pub use line::Line;
pub use run::Run;
pub use stream::StreamEvent;
pub use token::Token;

use crate::style::{Brush, CharacterStyle, LineStyle};
use crate::Error;

/// Identifies a change listener registered with [`Document::subscribe`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(u64);

type Listener<B> = Box<dyn FnMut(&Change<B>)>;

/// A styled text made of lines, each made of runs.
///
/// Characters are addressed by a single index across the whole document. The
/// lines partition the characters: each line starts where the previous one
/// ends and every line except the last ends with `'\n'`. The last line is
/// never terminated, so an empty document, or one ending with `'\n'`, has an
/// empty last line.
///
/// Every mutation returns the [`Change`] records describing it and passes
/// them to the subscribed listeners.
pub struct Document<B: Brush> {
    lines: Vec<Line<B>>,
    len: usize,
    style: CharacterStyle<B>,
    line_style: LineStyle,
    listeners: Vec<(ListenerId, Listener<B>)>,
    next_listener: u64,
}

impl<B: Brush> Document<B> {
    /// Creates an empty document whose text defaults to `style` and whose
    /// paragraphs default to `line_style`.
    pub fn new(style: CharacterStyle<B>, line_style: LineStyle) -> Self {
        Self {
            lines: vec![Line::new(line_style.clone(), style.clone())],
            len: 0,
            style,
            line_style,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Creates a document holding `text` in the default styles.
    pub fn from_text(text: &str) -> Self {
        Self::with_text(text, CharacterStyle::default(), LineStyle::default())
    }

    /// Creates a document holding `text` in `style`, with `line_style` for
    /// every paragraph.
    pub fn with_text(text: &str, style: CharacterStyle<B>, line_style: LineStyle) -> Self {
        let mut document = Self::new(style, line_style);
        let text = StyledString::from_text(text, document.style.clone());
        document.splice(0, &text);
        document
    }

    /// Creates a document from serialized events.
    pub fn from_stream(events: impl IntoIterator<Item = StreamEvent<B>>) -> Self {
        Self::from_stream_with(events, CharacterStyle::default(), LineStyle::default())
    }

    fn from_stream_with(
        events: impl IntoIterator<Item = StreamEvent<B>>,
        style: CharacterStyle<B>,
        line_style: LineStyle,
    ) -> Self {
        let mut document = Self::new(style, line_style);
        document.lines = stream::read(events, &document.style, &document.line_style);
        document.renumber(0);
        document
    }

    /// Serializes the document as events.
    pub fn to_stream(&self) -> Vec<StreamEvent<B>> {
        stream::write(&self.lines, 0..self.len)
    }

    /// The style of text in a new document.
    pub fn default_style(&self) -> &CharacterStyle<B> {
        &self.style
    }

    /// The paragraph style of a new document.
    pub fn default_line_style(&self) -> &LineStyle {
        &self.line_style
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the document has no characters.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of lines, at least one.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `index`.
    pub fn line(&self, index: usize) -> Option<&Line<B>> {
        self.lines.get(index)
    }

    /// All lines in order.
    pub fn lines(&self) -> &[Line<B>] {
        &self.lines
    }

    /// Iterates over every character.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.lines.iter().flat_map(|line| line.chars().iter().copied())
    }

    /// The whole text.
    pub fn text(&self) -> String {
        self.chars().collect()
    }

    /// The character at `index`.
    pub fn char_at(&self, index: usize) -> Result<char, Error> {
        if index >= self.len {
            return Err(Error::index_out_of_bounds(index, self.len));
        }
        let line = &self.lines[self.line_index(index)];
        line.char_at(index - line.start())
            .ok_or(Error::index_out_of_bounds(index, self.len))
    }

    /// The text in `range`.
    pub fn substring(&self, range: Range<usize>) -> Result<String, Error> {
        Error::check_range(&range, self.len)?;
        Ok(self.chars().skip(range.start).take(range.len()).collect())
    }

    /// Index of the line containing `index`.
    ///
    /// The end of the document belongs to the last line.
    pub fn line_for_index(&self, index: usize) -> Result<usize, Error> {
        Error::check_boundary(index, self.len)?;
        Ok(self.line_index(index))
    }

    /// The `(line, run)` indices of the run containing `index`.
    pub fn run_for_index(&self, index: usize) -> Result<(usize, usize), Error> {
        let line = self.line_for_index(index)?;
        let offset = index - self.lines[line].start();
        Ok((line, self.lines[line].run_index_at(offset)))
    }

    /// The line index and token containing `index`, if it is not whitespace.
    pub fn token_for_index(&self, index: usize) -> Result<Option<(usize, Token)>, Error> {
        let line_index = self.line_for_index(index)?;
        let line = &self.lines[line_index];
        Ok(line
            .token_index_at(index - line.start())
            .map(|token| (line_index, line.tokens()[token])))
    }

    /// The style of the character at `index`, or of the last character at the
    /// end of the document.
    pub fn style_at(&self, index: usize) -> Result<&CharacterStyle<B>, Error> {
        let line = &self.lines[self.line_for_index(index)?];
        Ok(line.style_at(index - line.start()))
    }

    /// The paragraph style of the line containing `index`.
    pub fn line_style_at(&self, index: usize) -> Result<&LineStyle, Error> {
        Ok(self.lines[self.line_for_index(index)?].style())
    }

    /// Finds the first occurrence of `pattern` at or after `from`.
    pub fn index_of(&self, pattern: &str, from: usize) -> Option<usize> {
        if from > self.len {
            return None;
        }
        let pattern: Vec<char> = pattern.chars().collect();
        if pattern.is_empty() {
            return Some(from);
        }
        let text: Vec<char> = self.chars().skip(from).collect();
        text.windows(pattern.len())
            .position(|window| window == pattern.as_slice())
            .map(|at| from + at)
    }

    /// The text in `range` with its styles.
    pub fn styled_string(&self, range: Range<usize>) -> Result<StyledString<B>, Error> {
        Error::check_range(&range, self.len)?;
        let mut string = StyledString::new();
        if range.is_empty() {
            return Ok(string);
        }
        let first = self.line_index(range.start);
        for line in &self.lines[first..] {
            if line.start() >= range.end {
                break;
            }
            for run in line.runs() {
                let start = (line.start() + run.start()).max(range.start);
                let end = (line.start() + run.end()).min(range.end);
                if start < end {
                    let text: String = line.chars()[start - line.start()..end - line.start()]
                        .iter()
                        .collect();
                    string.push(&text, run.style());
                }
            }
        }
        Ok(string)
    }

    /// Copies `range` into a new document, keeping character and paragraph
    /// styles.
    pub fn copy_range(&self, range: Range<usize>) -> Result<Self, Error> {
        Error::check_range(&range, self.len)?;
        Ok(Self::from_stream_with(
            stream::write(&self.lines, range),
            self.style.clone(),
            self.line_style.clone(),
        ))
    }

    /// Inserts `text` at `index`.
    ///
    /// Without an explicit style the text takes the style of the run it is
    /// inserted into, preferring the preceding run at a boundary.
    pub fn insert(
        &mut self,
        index: usize,
        text: &str,
        style: Option<&CharacterStyle<B>>,
    ) -> Result<Vec<Change<B>>, Error> {
        Error::check_boundary(index, self.len)?;
        let style = match style {
            Some(style) => style.clone(),
            None => self.insertion_style(index).clone(),
        };
        self.insert_styled(index, &StyledString::from_text(text, style))
    }

    /// Inserts styled `text` at `index`.
    pub fn insert_styled(
        &mut self,
        index: usize,
        text: &StyledString<B>,
    ) -> Result<Vec<Change<B>>, Error> {
        Error::check_boundary(index, self.len)?;
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.splice(index, text);
        Ok(self.emit(vec![Change::CharsInserted {
            index,
            text: text.clone(),
        }]))
    }

    /// Removes the characters in `range`.
    ///
    /// Removing a terminator joins its line with the next one.
    pub fn remove(&mut self, range: Range<usize>) -> Result<Vec<Change<B>>, Error> {
        Error::check_range(&range, self.len)?;
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let text = self.styled_string(range.clone())?;
        self.delete(range.clone());
        Ok(self.emit(vec![Change::CharsRemoved {
            index: range.start,
            text,
        }]))
    }

    /// Replaces the characters in `range` with `text`.
    ///
    /// Without an explicit style the text takes the style of the first
    /// replaced character.
    pub fn replace(
        &mut self,
        range: Range<usize>,
        text: &str,
        style: Option<&CharacterStyle<B>>,
    ) -> Result<Vec<Change<B>>, Error> {
        Error::check_range(&range, self.len)?;
        let style = match style {
            Some(style) => style.clone(),
            None if range.is_empty() => self.insertion_style(range.start).clone(),
            None => self.style_at(range.start)?.clone(),
        };
        let mut changes = self.remove(range.clone())?;
        changes.extend(self.insert(range.start, text, Some(&style))?);
        Ok(changes)
    }

    /// Sets the style of the characters in `range`.
    ///
    /// Emits one record per run whose style changed.
    pub fn set_style(
        &mut self,
        range: Range<usize>,
        style: &CharacterStyle<B>,
    ) -> Result<Vec<Change<B>>, Error> {
        self.update_style(range, |_| style.clone())
    }

    /// Restyles the characters in `range` by applying `f` to each run's style.
    pub fn update_style(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(&CharacterStyle<B>) -> CharacterStyle<B>,
    ) -> Result<Vec<Change<B>>, Error> {
        Error::check_range(&range, self.len)?;
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let first = self.line_index(range.start);
        let last = self.line_index(range.end - 1);
        let mut changes = Vec::new();
        for line in &mut self.lines[first..=last] {
            let start = line.start();
            let local = range.start.max(start) - start..range.end.min(line.end()) - start;
            for (run, old, new) in line.update_style(local, &mut f) {
                changes.push(Change::StyleChanged {
                    range: run.start + start..run.end + start,
                    old,
                    new,
                });
            }
        }
        Ok(self.emit(changes))
    }

    /// Sets the paragraph style of every line touched by `range`.
    pub fn set_line_style(
        &mut self,
        range: Range<usize>,
        style: &LineStyle,
    ) -> Result<Vec<Change<B>>, Error> {
        self.update_line_style(range, |_| style.clone())
    }

    /// Applies `f` to the paragraph style of every line touched by `range`.
    ///
    /// An empty range touches the line containing it.
    pub fn update_line_style(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(&LineStyle) -> LineStyle,
    ) -> Result<Vec<Change<B>>, Error> {
        Error::check_range(&range, self.len)?;
        let first = self.line_index(range.start);
        let last = if range.is_empty() {
            first
        } else {
            self.line_index(range.end - 1)
        };
        let mut changes = Vec::new();
        for (index, line) in self.lines.iter_mut().enumerate().take(last + 1).skip(first) {
            let new = f(line.style());
            if new != *line.style() {
                let old = line.set_line_style(new.clone());
                changes.push(Change::LineStyleChanged {
                    line: index,
                    old,
                    new,
                });
            }
        }
        Ok(self.emit(changes))
    }

    /// Sets the paragraph style of the line at `line`.
    pub fn set_line_style_at(
        &mut self,
        line: usize,
        style: LineStyle,
    ) -> Result<Vec<Change<B>>, Error> {
        let count = self.lines.len();
        let target = self
            .lines
            .get_mut(line)
            .ok_or(Error::line_out_of_bounds(line, count))?;
        if *target.style() == style {
            return Ok(Vec::new());
        }
        let old = target.set_line_style(style.clone());
        Ok(self.emit(vec![Change::LineStyleChanged {
            line,
            old,
            new: style,
        }]))
    }

    /// Registers `listener` to be called with every change record.
    pub fn subscribe(&mut self, listener: impl FnMut(&Change<B>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let count = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != count
    }

    /// Index of the line containing `index`, which must be in bounds.
    fn line_index(&self, index: usize) -> usize {
        self.lines
            .partition_point(|line| line.start() <= index)
            .saturating_sub(1)
    }

    fn insertion_style(&self, index: usize) -> &CharacterStyle<B> {
        let line = &self.lines[self.line_index(index)];
        line.insertion_style(index - line.start())
    }

    /// Inserts without checks or notification.
    fn splice(&mut self, index: usize, text: &StyledString<B>) {
        let first = self.line_index(index);
        let mut line = first;
        let mut offset = index - self.lines[line].start();
        for (segment, style) in text.segments() {
            let chars: Vec<char> = segment.chars().collect();
            for piece in chars.split_inclusive(|ch| *ch == '\n') {
                self.lines[line].insert(offset, piece, style);
                offset += piece.len();
                if piece.last() == Some(&'\n') {
                    let tail = self.lines[line].split_off(offset);
                    line += 1;
                    self.lines.insert(line, tail);
                    offset = 0;
                }
            }
        }
        self.renumber(first);
    }

    /// Removes without checks or notification.
    fn delete(&mut self, range: Range<usize>) {
        let first = self.line_index(range.start);
        let last = self.line_index(range.end - 1);
        for i in (first..=last).rev() {
            let start = self.lines[i].start();
            let len = self.lines[i].len();
            let local = range.start.max(start) - start..range.end.min(start + len) - start;
            let has_next = i + 1 < self.lines.len();
            if local.start == 0 && local.end == len && has_next {
                self.lines.remove(i);
                continue;
            }
            let joins_next = has_next && self.lines[i].is_terminated() && local.end == len;
            self.lines[i].remove(local);
            if joins_next {
                let next = self.lines.remove(i + 1);
                self.lines[i].append(next);
            }
        }
        self.renumber(first);
    }

    /// Recomputes line starts from line `from` on, and the length.
    fn renumber(&mut self, from: usize) {
        let mut start = from
            .checked_sub(1)
            .and_then(|previous| self.lines.get(previous))
            .map_or(0, Line::end);
        for line in self.lines.iter_mut().skip(from) {
            line.start = start;
            start += line.len();
        }
        self.len = start;
    }

    fn emit(&mut self, changes: Vec<Change<B>>) -> Vec<Change<B>> {
        for change in &changes {
            log::trace!("document change: {change:?}");
            for (_, listener) in &mut self.listeners {
                listener(change);
            }
        }
        changes
    }
}

impl<B: Brush> Editable<B> for Document<B> {
    fn apply(&mut self, change: &Change<B>) -> Result<Vec<Change<B>>, Error> {
        match change {
            Change::CharsInserted { index, text } => self.insert_styled(*index, text),
            Change::CharsRemoved { index, text } => self.remove(*index..*index + text.len()),
            Change::StyleChanged { range, new, .. } => self.set_style(range.clone(), new),
            Change::LineStyleChanged { line, new, .. } => {
                self.set_line_style_at(*line, new.clone())
            }
        }
    }
}

impl<B: Brush> Default for Document<B> {
    fn default() -> Self {
        Self::new(CharacterStyle::default(), LineStyle::default())
    }
}

impl<B: Brush> Clone for Document<B> {
    /// Clones the content; listeners are not carried over.
    fn clone(&self) -> Self {
        Self {
            lines: self.lines.clone(),
            len: self.len,
            style: self.style.clone(),
            line_style: self.line_style.clone(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }
}

impl<B: Brush> fmt::Debug for Document<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("lines", &self.lines)
            .field("len", &self.len)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Change, Document};
    use crate::style::CharacterStyle;

    type Style = CharacterStyle<u32>;

    fn line_texts(document: &Document<u32>) -> Vec<String> {
        document.lines().iter().map(|line| line.text()).collect()
    }

    #[test]
    fn lines_split_on_terminators() {
        let document = Document::<u32>::from_text("Hello\nWorld");
        assert_eq!(document.len(), 11);
        assert_eq!(line_texts(&document), ["Hello\n", "World"]);
        assert_eq!(document.lines()[1].start(), 6);
    }

    #[test]
    fn trailing_terminator_makes_empty_line() {
        let document = Document::<u32>::from_text("a\n");
        assert_eq!(line_texts(&document), ["a\n", ""]);
        let empty = Document::<u32>::default();
        assert_eq!(empty.line_count(), 1);
        assert!(empty.is_empty(), "an empty range copies nothing");
    }

    #[test]
    fn insert_with_terminators_in_middle() {
        let mut document = Document::<u32>::from_text("ac");
        document.insert(1, "b\nx\ny", None).unwrap();
        assert_eq!(line_texts(&document), ["ab\n", "x\n", "yc"]);
        assert_eq!(document.line_for_index(3).unwrap(), 1);
        assert_eq!(document.line_for_index(document.len()).unwrap(), 2);
    }

    #[test]
    fn remove_across_lines() {
        let mut document = Document::<u32>::from_text("one\ntwo\nthree");
        document.remove(2..10).unwrap();
        assert_eq!(document.text(), "onree");
        assert_eq!(document.line_count(), 1);
        let mut document = Document::<u32>::from_text("one\ntwo\nthree");
        document.remove(4..8).unwrap();
        assert_eq!(line_texts(&document), ["one\n", "three"]);
    }

    #[test]
    fn removal_records_styles() {
        let red = Style::default().with_brush(1);
        let mut document = Document::<u32>::from_text("abcd");
        document.set_style(1..3, &red).unwrap();
        let changes = document.remove(0..4).unwrap();
        let [Change::CharsRemoved { index: 0, text }] = changes.as_slice() else {
            panic!("expected a single removal, got {changes:?}");
        };
        assert_eq!(text.segments().count(), 3);
        assert_eq!(text.text(), "abcd");
    }

    #[test]
    fn index_of_finds_across_lines() {
        let document = Document::<u32>::from_text("ab\ncd\nab");
        assert_eq!(document.index_of("b\nc", 0), Some(1));
        assert_eq!(document.index_of("ab", 1), Some(6));
        assert_eq!(document.index_of("zz", 0), None);
        assert_eq!(document.index_of("", 3), Some(3));
    }

    #[test]
    fn listeners_see_every_change() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut document = Document::<u32>::from_text("abc");
        let sink = Rc::clone(&seen);
        let id = document.subscribe(move |change| sink.borrow_mut().push(change.clone()));
        document.insert(3, "d", None).unwrap();
        document.remove(0..1).unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert!(document.unsubscribe(id), "registered");
        document.insert(0, "z", None).unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert!(!document.unsubscribe(id), "already removed");
    }
}
