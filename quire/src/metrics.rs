// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font measurement capability.

use peniko::kurbo::Rect;

use crate::style::{Brush, CharacterStyle};

/// Supplies glyph measurements to layout.
///
/// Quire never loads fonts itself. A host provides measurements for a style
/// through this trait, usually backed by a real font stack.
pub trait FontMetrics<B: Brush> {
    /// Horizontal advance of `ch` in `style`, not including character spacing.
    fn char_advance(&self, style: &CharacterStyle<B>, ch: char) -> f64;

    /// Distance from the baseline to the top of the tallest glyph.
    fn ascent(&self, style: &CharacterStyle<B>) -> f64;

    /// Distance from the baseline to the bottom of the lowest glyph.
    fn descent(&self, style: &CharacterStyle<B>) -> f64;

    /// Recommended extra space between lines.
    fn leading(&self, style: &CharacterStyle<B>) -> f64;

    /// Bounds of `text` set on a baseline at `y = 0`, starting at `x = 0`.
    fn glyph_bounds(&self, style: &CharacterStyle<B>, text: &str) -> Rect {
        let width: f64 = text.chars().map(|ch| self.advance(style, ch)).sum();
        Rect::new(0.0, -self.ascent(style), width, self.descent(style))
    }

    /// Advance of `ch` including the style's character spacing.
    fn advance(&self, style: &CharacterStyle<B>, ch: char) -> f64 {
        self.char_advance(style, ch) + style.char_spacing()
    }
}

impl<B: Brush, M: FontMetrics<B> + ?Sized> FontMetrics<B> for &M {
    fn char_advance(&self, style: &CharacterStyle<B>, ch: char) -> f64 {
        (**self).char_advance(style, ch)
    }

    fn ascent(&self, style: &CharacterStyle<B>) -> f64 {
        (**self).ascent(style)
    }

    fn descent(&self, style: &CharacterStyle<B>) -> f64 {
        (**self).descent(style)
    }

    fn leading(&self, style: &CharacterStyle<B>) -> f64 {
        (**self).leading(style)
    }

    fn glyph_bounds(&self, style: &CharacterStyle<B>, text: &str) -> Rect {
        (**self).glyph_bounds(style, text)
    }
}

/// Metrics proportional to the font size, with the same advance for every
/// character.
///
/// Useful for tests and for monospaced text where no font stack is available.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FixedMetrics {
    /// Advance of every character, as a fraction of the font size.
    pub advance: f64,
    /// Ascent as a fraction of the font size.
    pub ascent: f64,
    /// Descent as a fraction of the font size.
    pub descent: f64,
    /// Leading as a fraction of the font size.
    pub leading: f64,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance: 0.5,
            ascent: 0.8,
            descent: 0.2,
            leading: 0.0,
        }
    }
}

impl<B: Brush> FontMetrics<B> for FixedMetrics {
    fn char_advance(&self, style: &CharacterStyle<B>, _ch: char) -> f64 {
        self.advance * style.font().size()
    }

    fn ascent(&self, style: &CharacterStyle<B>) -> f64 {
        self.ascent * style.font().size()
    }

    fn descent(&self, style: &CharacterStyle<B>) -> f64 {
        self.descent * style.font().size()
    }

    fn leading(&self, style: &CharacterStyle<B>) -> f64 {
        self.leading * style.font().size()
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedMetrics, FontMetrics};
    use crate::style::{CharacterStyle, Font};

    #[test]
    fn fixed_metrics_scale_with_size() {
        let metrics = FixedMetrics::default();
        let style = CharacterStyle::<u32>::new(Font::new("mono", 10.0));
        assert_eq!(metrics.char_advance(&style, 'x'), 5.0);
        assert_eq!(metrics.ascent(&style), 8.0);
        assert_eq!(metrics.descent(&style), 2.0);
        let spaced = style.with_char_spacing(1.0);
        assert_eq!(metrics.advance(&spaced, 'x'), 6.0);
    }

    #[test]
    fn default_glyph_bounds() {
        let metrics = FixedMetrics::default();
        let style = CharacterStyle::<u32>::new(Font::new("mono", 10.0));
        let bounds = metrics.glyph_bounds(&style, "abc");
        assert_eq!(bounds.width(), 15.0);
        assert_eq!(bounds.y0, -8.0);
        assert_eq!(bounds.y1, 2.0);
    }
}
