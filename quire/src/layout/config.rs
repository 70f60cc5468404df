// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// What happens to lines that do not fit the height of a layout.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Overflow {
    /// Lines are kept and the layout reports itself out of bounds.
    #[default]
    Grow,
    /// Lines whose top is at or below the height are dropped, as for a box
    /// whose text continues elsewhere.
    Clip,
}

/// Placement of the whole block of lines within the layout height.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum VerticalAlignment {
    /// Lines start at the top.
    #[default]
    Top,
    /// Lines are centered vertically.
    Middle,
    /// The last line ends at the bottom.
    Bottom,
}

impl VerticalAlignment {
    /// The fraction of the free height placed above the lines.
    pub fn factor(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Middle => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

/// Parameters of a [`BoundedLayout`](super::BoundedLayout).
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct WrapConfig {
    width: f64,
    height: f64,
    wrap: bool,
    hyphenate: bool,
    font_scale: f64,
    overflow: Overflow,
    vertical_alignment: VerticalAlignment,
    start: usize,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            width: f64::INFINITY,
            height: f64::INFINITY,
            wrap: true,
            hyphenate: false,
            font_scale: 1.0,
            overflow: Overflow::Grow,
            vertical_alignment: VerticalAlignment::Top,
            start: 0,
        }
    }
}

impl WrapConfig {
    /// Width available to lines. Infinite by default.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height available to lines. Infinite by default.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether lines wrap at the width.
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Whether words may be hyphenated to fill lines.
    pub fn hyphenate(&self) -> bool {
        self.hyphenate
    }

    /// Factor applied to every font size and character spacing.
    pub fn font_scale(&self) -> f64 {
        self.font_scale
    }

    /// Handling of lines below the height.
    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Placement of the block within the height.
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Document index of the first laid out character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns a copy with the given width.
    #[must_use]
    pub fn with_width(self, width: f64) -> Self {
        Self { width, ..self }
    }

    /// Returns a copy with the given height.
    #[must_use]
    pub fn with_height(self, height: f64) -> Self {
        Self { height, ..self }
    }

    /// Returns a copy with wrapping enabled or disabled.
    #[must_use]
    pub fn with_wrap(self, wrap: bool) -> Self {
        Self { wrap, ..self }
    }

    /// Returns a copy with hyphenation enabled or disabled.
    #[must_use]
    pub fn with_hyphenate(self, hyphenate: bool) -> Self {
        Self { hyphenate, ..self }
    }

    /// Returns a copy with the given font scale.
    #[must_use]
    pub fn with_font_scale(self, font_scale: f64) -> Self {
        Self { font_scale, ..self }
    }

    /// Returns a copy with the given overflow handling.
    #[must_use]
    pub fn with_overflow(self, overflow: Overflow) -> Self {
        Self { overflow, ..self }
    }

    /// Returns a copy with the given vertical alignment.
    #[must_use]
    pub fn with_vertical_alignment(self, vertical_alignment: VerticalAlignment) -> Self {
        Self {
            vertical_alignment,
            ..self
        }
    }

    /// Returns a copy starting at the given document index.
    #[must_use]
    pub fn with_start(self, start: usize) -> Self {
        Self { start, ..self }
    }
}
