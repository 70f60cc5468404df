// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use super::Line;
use crate::style::{Brush, CharacterStyle, LineStyle};

/// One step of a document's serialized form.
///
/// A document is written as, for every line, its paragraph style, then one
/// run event per run with the terminator left out, then a line break if the
/// line is terminated. Any wire format that preserves this sequence
/// preserves the document.
#[derive(Clone, PartialEq, Debug)]
pub enum StreamEvent<B: Brush> {
    /// Starts a paragraph with this style.
    LineStyle(LineStyle),
    /// Text in a single style. May be empty to carry the style of an empty
    /// line or of a terminator.
    Run {
        /// Style of the text.
        style: CharacterStyle<B>,
        /// The text, without line terminators.
        text: String,
    },
    /// Ends the current line with a `'\n'` in the style of the last run.
    LineBreak,
}

/// Writes the lines overlapping `range` as events.
pub(crate) fn write<B: Brush>(lines: &[Line<B>], range: Range<usize>) -> Vec<StreamEvent<B>> {
    let mut events = Vec::new();
    let first = lines
        .partition_point(|line| line.start() <= range.start)
        .saturating_sub(1);
    for (i, line) in lines.iter().enumerate().skip(first) {
        let included = i == first
            || line.start() < range.end
            || (line.is_empty() && line.start() == range.end);
        if !included {
            break;
        }
        events.push(StreamEvent::LineStyle(line.style().clone()));
        let local = range.start.saturating_sub(line.start())
            ..(range.end - line.start()).min(line.len());
        let content_end = if line.is_terminated() {
            line.len() - 1
        } else {
            line.len()
        };
        for run in line.runs() {
            let start = run.start().max(local.start);
            let end = run.end().min(local.end);
            if start < end || line.is_empty() {
                let text_end = end.min(content_end);
                let text = line
                    .chars()
                    .get(start..text_end)
                    .map(|chars| chars.iter().collect())
                    .unwrap_or_default();
                events.push(StreamEvent::Run {
                    style: run.style().clone(),
                    text,
                });
            }
        }
        if line.is_terminated() && local.start < line.len() && local.end == line.len() {
            events.push(StreamEvent::LineBreak);
        }
    }
    events
}

/// Rebuilds lines from events. Starts are left for the caller to number.
pub(crate) fn read<B: Brush>(
    events: impl IntoIterator<Item = StreamEvent<B>>,
    style: &CharacterStyle<B>,
    line_style: &LineStyle,
) -> Vec<Line<B>> {
    let mut lines = vec![Line::new(line_style.clone(), style.clone())];
    let mut current = style.clone();
    for event in events {
        match event {
            StreamEvent::LineStyle(line_style) => {
                if let Some(line) = lines.last_mut() {
                    line.set_line_style(line_style);
                }
            }
            StreamEvent::Run { style, text } => {
                current = style;
                if text.is_empty() {
                    if let Some(line) = lines.last_mut() {
                        line.push(&[], &current);
                    }
                }
                let chars: Vec<char> = text.chars().collect();
                for piece in chars.split_inclusive(|ch| *ch == '\n') {
                    push_piece(&mut lines, piece, &current);
                }
            }
            StreamEvent::LineBreak => push_piece(&mut lines, &['\n'], &current),
        }
    }
    lines
}

fn push_piece<B: Brush>(lines: &mut Vec<Line<B>>, piece: &[char], style: &CharacterStyle<B>) {
    let Some(line) = lines.last_mut() else {
        return;
    };
    line.push(piece, style);
    if piece.last() == Some(&'\n') {
        let next = Line::new(line.style().clone(), style.clone());
        lines.push(next);
    }
}
