// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::style::{Brush, CharacterStyle};

/// A maximal span of equally styled characters within a line.
///
/// Offsets are relative to the start of the owning line.
#[derive(Clone, PartialEq, Debug)]
pub struct Run<B: Brush> {
    pub(crate) start: usize,
    pub(crate) len: usize,
    pub(crate) style: CharacterStyle<B>,
}

impl<B: Brush> Run<B> {
    pub(crate) fn new(start: usize, len: usize, style: CharacterStyle<B>) -> Self {
        Self { start, len, style }
    }

    /// Offset of the first character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset past the last character.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the run has no characters.
    ///
    /// Only the single run of an empty line is ever empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The character range covered by the run.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The style of every character in the run.
    pub fn style(&self) -> &CharacterStyle<B> {
        &self.style
    }
}
