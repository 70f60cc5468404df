// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::style::{Brush, CharacterStyle, LineStyle};
use crate::Error;

/// Text with styles: an ordered list of `(text, style)` segments.
///
/// Adjacent segments always have different styles.
#[derive(Clone, PartialEq, Debug)]
pub struct StyledString<B: Brush> {
    segments: Vec<(String, CharacterStyle<B>)>,
    len: usize,
}

impl<B: Brush> Default for StyledString<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Brush> StyledString<B> {
    /// Creates an empty string.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            len: 0,
        }
    }

    /// Creates a string with a single style.
    pub fn from_text(text: &str, style: CharacterStyle<B>) -> Self {
        let mut string = Self::new();
        string.push(text, &style);
        string
    }

    /// Appends `text` in `style`.
    pub fn push(&mut self, text: &str, style: &CharacterStyle<B>) {
        if text.is_empty() {
            return;
        }
        self.len += text.chars().count();
        match self.segments.last_mut() {
            Some((last, last_style)) if last_style == style => last.push_str(text),
            _ => self.segments.push((text.to_string(), style.clone())),
        }
    }

    /// Appends every segment of `other`.
    pub fn append(&mut self, other: &Self) {
        for (text, style) in other.segments() {
            self.push(text, style);
        }
    }

    /// The segments in order.
    pub fn segments(&self) -> impl Iterator<Item = (&str, &CharacterStyle<B>)> + '_ {
        self.segments
            .iter()
            .map(|(text, style)| (text.as_str(), style))
    }

    /// The unstyled text.
    pub fn text(&self) -> String {
        self.segments.iter().map(|(text, _)| text.as_str()).collect()
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the string has no characters.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A record of one document mutation.
///
/// Records carry enough to be undone: removals keep the removed text with
/// its styles and style changes keep the previous style.
#[derive(Clone, PartialEq, Debug)]
pub enum Change<B: Brush> {
    /// `text` was inserted at `index`.
    CharsInserted {
        /// Index of the first inserted character.
        index: usize,
        /// The inserted text.
        text: StyledString<B>,
    },
    /// `text` was removed from `index`.
    CharsRemoved {
        /// Index of the first removed character.
        index: usize,
        /// The removed text.
        text: StyledString<B>,
    },
    /// The characters in `range` changed from `old` to `new`.
    StyleChanged {
        /// The restyled characters.
        range: Range<usize>,
        /// Style before the change.
        old: CharacterStyle<B>,
        /// Style after the change.
        new: CharacterStyle<B>,
    },
    /// The paragraph style of `line` changed from `old` to `new`.
    LineStyleChanged {
        /// Index of the line.
        line: usize,
        /// Style before the change.
        old: LineStyle,
        /// Style after the change.
        new: LineStyle,
    },
}

impl<B: Brush> Change<B> {
    /// Combines this record with the one that immediately followed it.
    ///
    /// Only insertions merge, and only when `later` starts where this one
    /// ends, as when typing character by character.
    pub fn merge(&self, later: &Self) -> Option<Self> {
        match (self, later) {
            (
                Self::CharsInserted { index, text },
                Self::CharsInserted {
                    index: later_index,
                    text: later_text,
                },
            ) if index + text.len() == *later_index => {
                let mut text = text.clone();
                text.append(later_text);
                Some(Self::CharsInserted {
                    index: *index,
                    text,
                })
            }
            _ => None,
        }
    }

    /// Returns the record that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Self::CharsInserted { index, text } => Self::CharsRemoved {
                index: *index,
                text: text.clone(),
            },
            Self::CharsRemoved { index, text } => Self::CharsInserted {
                index: *index,
                text: text.clone(),
            },
            Self::StyleChanged { range, old, new } => Self::StyleChanged {
                range: range.clone(),
                old: new.clone(),
                new: old.clone(),
            },
            Self::LineStyleChanged { line, old, new } => Self::LineStyleChanged {
                line: *line,
                old: new.clone(),
                new: old.clone(),
            },
        }
    }
}

/// Something change records can be replayed against.
pub trait Editable<B: Brush> {
    /// Performs the mutation `change` describes, returning the records of
    /// what was actually done.
    fn apply(&mut self, change: &Change<B>) -> Result<Vec<Change<B>>, Error>;
}

/// Undo and redo stacks of change groups.
///
/// Each call to [`record`](Self::record) adds one group, normally the records
/// returned by a single mutation. A single insertion that continues the
/// previous single insertion is folded into it, so typing a word undoes in
/// one step.
#[derive(Clone, Debug)]
pub struct History<B: Brush> {
    undo: Vec<Vec<Change<B>>>,
    redo: Vec<Vec<Change<B>>>,
    sealed: bool,
}

impl<B: Brush> Default for History<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Brush> History<B> {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            sealed: false,
        }
    }

    /// Records a group of changes, clearing the redo stack.
    pub fn record(&mut self, changes: Vec<Change<B>>) {
        if changes.is_empty() {
            return;
        }
        self.redo.clear();
        if !self.sealed {
            if let ([change], Some(last)) = (changes.as_slice(), self.undo.last_mut()) {
                if let [previous] = last.as_mut_slice() {
                    if let Some(merged) = previous.merge(change) {
                        *previous = merged;
                        return;
                    }
                }
            }
        }
        self.sealed = false;
        self.undo.push(changes);
    }

    /// Prevents the next recorded group from merging into the last one.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether there is a group to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is a group to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undoable groups.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.sealed = false;
    }

    /// Reverts the most recent group on `target`.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, target: &mut impl Editable<B>) -> Result<bool, Error> {
        let Some(group) = self.undo.pop() else {
            return Ok(false);
        };
        for change in group.iter().rev() {
            target.apply(&change.inverse())?;
        }
        self.redo.push(group);
        self.sealed = true;
        Ok(true)
    }

    /// Reapplies the most recently undone group on `target`.
    ///
    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, target: &mut impl Editable<B>) -> Result<bool, Error> {
        let Some(group) = self.redo.pop() else {
            return Ok(false);
        };
        for change in &group {
            target.apply(change)?;
        }
        self.undo.push(group);
        self.sealed = true;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{Change, StyledString};
    use crate::style::CharacterStyle;

    type Style = CharacterStyle<u32>;

    fn inserted(index: usize, text: &str) -> Change<u32> {
        Change::CharsInserted {
            index,
            text: StyledString::from_text(text, Style::default()),
        }
    }

    #[test]
    fn consecutive_inserts_merge() {
        let merged = inserted(4, "a").merge(&inserted(5, "b"));
        assert_eq!(merged, Some(inserted(4, "ab")));
    }

    #[test]
    fn gaps_do_not_merge() {
        assert_eq!(inserted(4, "a").merge(&inserted(6, "b")), None);
        assert_eq!(inserted(4, "a").merge(&inserted(4, "b")), None);
        let removed = inserted(5, "b").inverse();
        assert_eq!(inserted(4, "a").merge(&removed), None);
    }

    #[test]
    fn inverse_round_trips() {
        let change = Change::StyleChanged {
            range: 1..3,
            old: Style::default(),
            new: Style::default().with_brush(7),
        };
        assert_eq!(change.inverse().inverse(), change);
        let insert = inserted(2, "xy");
        assert!(
            matches!(insert.inverse(), Change::CharsRemoved { index: 2, .. }),
            "inserting inverts to removing"
        );
    }

    #[test]
    fn styled_string_merges_equal_segments() {
        let red = Style::default().with_brush(1);
        let mut string = StyledString::new();
        string.push("ab", &red);
        string.push("", &Style::default());
        string.push("c", &red);
        string.push("d", &Style::default());
        assert_eq!(string.len(), 4);
        assert_eq!(string.text(), "abcd");
        assert_eq!(string.segments().count(), 2);
    }
}
