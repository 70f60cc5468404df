// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

/// Horizontal placement of the lines of a paragraph.
///
/// Justification is an alignment of its own so that it cannot be combined
/// with centering or right alignment.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Alignment {
    /// Lines start at the left indent.
    #[default]
    Left,
    /// Lines are centered in the free space.
    Center,
    /// Lines end at the right indent.
    Right,
    /// Interior lines are stretched to fill the available width.
    ///
    /// The last line of a paragraph is left aligned.
    Justify,
}

impl Alignment {
    /// The fraction of the free space placed before a line.
    pub fn factor(self) -> f64 {
        match self {
            Self::Left | Self::Justify => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// How text following a tab is placed against its stop.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TabKind {
    /// Text starts at the stop.
    #[default]
    Left,
    /// Text ends at the stop.
    Right,
    /// Text is centered on the stop.
    Center,
    /// The first `.` in the text is placed at the stop.
    Decimal,
}

/// A tab stop, measured from the left edge of the line box.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TabStop {
    /// Position of the stop.
    pub position: f64,
    /// Placement of the text after the tab.
    pub kind: TabKind,
}

impl TabStop {
    /// Creates a tab stop.
    pub fn new(position: f64, kind: TabKind) -> Self {
        Self { position, kind }
    }
}

/// Distance between the default tab stops.
const DEFAULT_TAB_INTERVAL: f64 = 36.0;

fn default_tabs() -> Arc<[TabStop]> {
    (1..=12_u32)
        .map(|i| TabStop::new(f64::from(i) * DEFAULT_TAB_INTERVAL, TabKind::Left))
        .collect()
}

/// The style of a paragraph.
///
/// Every line of a document carries one; the lines of a paragraph that wraps
/// share it.
#[derive(Clone, PartialEq, Debug)]
pub struct LineStyle {
    alignment: Alignment,
    first_indent: f64,
    left_indent: f64,
    right_indent: f64,
    spacing: f64,
    spacing_factor: f64,
    paragraph_spacing: f64,
    min_height: f64,
    max_height: f64,
    tabs: Arc<[TabStop]>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            first_indent: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
            spacing: 0.0,
            spacing_factor: 1.0,
            paragraph_spacing: 0.0,
            min_height: 0.0,
            max_height: f64::INFINITY,
            tabs: default_tabs(),
        }
    }
}

impl LineStyle {
    /// Horizontal alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Indent of the first line of the paragraph.
    pub fn first_indent(&self) -> f64 {
        self.first_indent
    }

    /// Indent of the remaining lines of the paragraph.
    pub fn left_indent(&self) -> f64 {
        self.left_indent
    }

    /// Space kept free at the right of every line.
    pub fn right_indent(&self) -> f64 {
        self.right_indent
    }

    /// Constant added to every line advance.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Multiplier applied to the natural line height.
    pub fn spacing_factor(&self) -> f64 {
        self.spacing_factor
    }

    /// Extra space after the last line of the paragraph.
    pub fn paragraph_spacing(&self) -> f64 {
        self.paragraph_spacing
    }

    /// Lower bound of the natural line height.
    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    /// Upper bound of the natural line height.
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Tab stops, ordered by position.
    pub fn tabs(&self) -> &[TabStop] {
        &self.tabs
    }

    /// Indent of a line, depending on whether it starts the paragraph.
    pub fn indent(&self, first: bool) -> f64 {
        if first {
            self.first_indent
        } else {
            self.left_indent
        }
    }

    /// Returns the first tab stop strictly after `x`.
    pub fn tab_stop_after(&self, x: f64) -> Option<&TabStop> {
        self.tabs.iter().find(|tab| tab.position > x)
    }

    /// Computes the distance from one baseline to the next.
    pub fn advance(&self, ascent: f64, descent: f64, leading: f64) -> f64 {
        let natural = (ascent + descent + leading)
            .max(self.min_height)
            .min(self.max_height);
        natural * self.spacing_factor + self.spacing
    }

    /// Returns a copy with the given alignment.
    #[must_use]
    pub fn with_alignment(&self, alignment: Alignment) -> Self {
        Self {
            alignment,
            ..self.clone()
        }
    }

    /// Returns a copy with the given first line indent.
    #[must_use]
    pub fn with_first_indent(&self, first_indent: f64) -> Self {
        Self {
            first_indent,
            ..self.clone()
        }
    }

    /// Returns a copy with the given indent for lines after the first.
    #[must_use]
    pub fn with_left_indent(&self, left_indent: f64) -> Self {
        Self {
            left_indent,
            ..self.clone()
        }
    }

    /// Returns a copy with both left indents set to `indent`.
    #[must_use]
    pub fn with_indent(&self, indent: f64) -> Self {
        Self {
            first_indent: indent,
            left_indent: indent,
            ..self.clone()
        }
    }

    /// Returns a copy with the given right indent.
    #[must_use]
    pub fn with_right_indent(&self, right_indent: f64) -> Self {
        Self {
            right_indent,
            ..self.clone()
        }
    }

    /// Returns a copy with the given spacing constant.
    #[must_use]
    pub fn with_spacing(&self, spacing: f64) -> Self {
        Self {
            spacing,
            ..self.clone()
        }
    }

    /// Returns a copy with the given spacing factor.
    #[must_use]
    pub fn with_spacing_factor(&self, spacing_factor: f64) -> Self {
        Self {
            spacing_factor,
            ..self.clone()
        }
    }

    /// Returns a copy with the given paragraph spacing.
    #[must_use]
    pub fn with_paragraph_spacing(&self, paragraph_spacing: f64) -> Self {
        Self {
            paragraph_spacing,
            ..self.clone()
        }
    }

    /// Returns a copy with the given minimum line height.
    #[must_use]
    pub fn with_min_height(&self, min_height: f64) -> Self {
        Self {
            min_height,
            ..self.clone()
        }
    }

    /// Returns a copy with the given maximum line height.
    #[must_use]
    pub fn with_max_height(&self, max_height: f64) -> Self {
        Self {
            max_height,
            ..self.clone()
        }
    }

    /// Returns a copy with the given tab stops, sorted by position.
    #[must_use]
    pub fn with_tabs(&self, tabs: impl IntoIterator<Item = TabStop>) -> Self {
        let mut tabs: Vec<TabStop> = tabs.into_iter().collect();
        tabs.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self {
            tabs: tabs.into(),
            ..self.clone()
        }
    }
}
