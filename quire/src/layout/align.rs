// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::BoxLine;
use crate::style::Alignment;

/// Moves the tokens of a freshly broken line into place.
///
/// `hyphen_width` is the width of a hyphen drawn after the last token.
pub(crate) fn align(line: &mut BoxLine, alignment: Alignment, hyphen_width: f64) {
    if !line.right.is_finite() {
        return;
    }
    let free_space = line.right - line.left - line.content_width - hyphen_width;
    if free_space <= 0.0 {
        return;
    }

    match alignment {
        Alignment::Justify if !line.paragraph_end && line.tokens.len() > 1 => {
            // Justification spreads the free space evenly between tokens, so
            // the last token ends at the right edge.
            let step = free_space / (line.tokens.len() - 1) as f64;
            for (index, token) in line.tokens.iter_mut().enumerate() {
                token.shift = step * index as f64;
                token.x += token.shift;
            }
            let first = line.tokens[0].start;
            let mut current = 0;
            for (offset, position) in line.positions.iter_mut().enumerate() {
                while current + 1 < line.tokens.len() && line.tokens[current + 1].start <= offset {
                    current += 1;
                }
                if offset >= first {
                    *position += line.tokens[current].shift;
                }
            }
        }
        _ => {
            let offset = (alignment.factor() * free_space).round().max(0.0);
            if offset == 0.0 {
                return;
            }
            line.align_offset = offset;
            for token in &mut line.tokens {
                token.x += offset;
            }
            for position in &mut line.positions {
                *position += offset;
            }
        }
    }
}
