// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use super::{Brush, NumberFormat};

/// A font request: family name, size and the synthetic variants.
#[derive(Clone, PartialEq, Debug)]
pub struct Font {
    family: Arc<str>,
    size: f64,
    bold: bool,
    italic: bool,
}

impl Font {
    /// Creates a regular (non-bold, non-italic) font request.
    pub fn new(family: impl Into<Arc<str>>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// The family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Point size.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Whether a bold face is requested.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Whether an italic face is requested.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Returns a copy with the given size.
    #[must_use]
    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// Returns a copy with the bold flag set.
    #[must_use]
    pub fn with_bold(&self, bold: bool) -> Self {
        Self {
            bold,
            ..self.clone()
        }
    }

    /// Returns a copy with the italic flag set.
    #[must_use]
    pub fn with_italic(&self, italic: bool) -> Self {
        Self {
            italic,
            ..self.clone()
        }
    }

    /// Returns a copy with the size multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        self.with_size(self.size * factor)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans-serif", 12.0)
    }
}

/// Underline decoration.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Underline {
    /// No underline.
    #[default]
    None,
    /// A single line.
    Single,
    /// Two lines.
    Double,
}

/// Vertical script position.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Scripting {
    /// On the baseline.
    #[default]
    Normal,
    /// Raised above the baseline.
    Superscript,
    /// Lowered below the baseline.
    Subscript,
}

impl Scripting {
    /// `+1` for superscript, `-1` for subscript and `0` otherwise.
    pub fn level(self) -> i8 {
        match self {
            Self::Normal => 0,
            Self::Superscript => 1,
            Self::Subscript => -1,
        }
    }

    /// Vertical offset from the baseline for a font of `size`, positive down.
    pub fn baseline_offset(self, size: f64) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::Superscript => -0.6 * size,
            Self::Subscript => 0.4 * size,
        }
    }
}

/// An outline drawn around glyphs.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Border<B: Brush> {
    /// Outline paint.
    pub brush: B,
    /// Stroke width.
    pub width: f64,
}

/// A hyperlink target attached to a range of text.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Link {
    target: Arc<str>,
}

impl Link {
    /// Creates a link to `target`.
    pub fn new(target: impl Into<Arc<str>>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The link target.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// The style of a run of characters.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CharacterStyle<B: Brush> {
    font: Font,
    brush: B,
    underline: Underline,
    scripting: Scripting,
    char_spacing: f64,
    border: Option<Border<B>>,
    link: Option<Link>,
    format: Option<NumberFormat>,
}

impl<B: Brush> CharacterStyle<B> {
    /// Creates a style with the given font and default attributes.
    pub fn new(font: Font) -> Self {
        Self {
            font,
            ..Self::default()
        }
    }

    /// The font.
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Glyph paint.
    pub fn brush(&self) -> &B {
        &self.brush
    }

    /// Underline decoration.
    pub fn underline(&self) -> Underline {
        self.underline
    }

    /// Vertical script position.
    pub fn scripting(&self) -> Scripting {
        self.scripting
    }

    /// Extra space added after every character.
    pub fn char_spacing(&self) -> f64 {
        self.char_spacing
    }

    /// Glyph outline, if any.
    pub fn border(&self) -> Option<&Border<B>> {
        self.border.as_ref()
    }

    /// Hyperlink target, if any.
    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    /// Numeric format, if any.
    pub fn format(&self) -> Option<&NumberFormat> {
        self.format.as_ref()
    }

    /// Returns a copy with the given font.
    #[must_use]
    pub fn with_font(&self, font: Font) -> Self {
        Self {
            font,
            ..self.clone()
        }
    }

    /// Returns a copy with the given brush.
    #[must_use]
    pub fn with_brush(&self, brush: B) -> Self {
        Self {
            brush,
            ..self.clone()
        }
    }

    /// Returns a copy with the given underline.
    #[must_use]
    pub fn with_underline(&self, underline: Underline) -> Self {
        Self {
            underline,
            ..self.clone()
        }
    }

    /// Returns a copy with the given script position.
    #[must_use]
    pub fn with_scripting(&self, scripting: Scripting) -> Self {
        Self {
            scripting,
            ..self.clone()
        }
    }

    /// Returns a copy with the given extra character spacing.
    #[must_use]
    pub fn with_char_spacing(&self, char_spacing: f64) -> Self {
        Self {
            char_spacing,
            ..self.clone()
        }
    }

    /// Returns a copy with the given outline.
    #[must_use]
    pub fn with_border(&self, border: Option<Border<B>>) -> Self {
        Self {
            border,
            ..self.clone()
        }
    }

    /// Returns a copy linking to `link`.
    ///
    /// Linked text is underlined; removing the link leaves the underline as is.
    #[must_use]
    pub fn with_link(&self, link: Option<Link>) -> Self {
        let underline = if link.is_some() {
            Underline::Single
        } else {
            self.underline
        };
        Self {
            link,
            underline,
            ..self.clone()
        }
    }

    /// Returns a copy with the given numeric format.
    #[must_use]
    pub fn with_format(&self, format: Option<NumberFormat>) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }

    /// Returns a copy with the font size and character spacing multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        if factor == 1.0 {
            return self.clone();
        }
        Self {
            font: self.font.scaled(factor),
            char_spacing: self.char_spacing * factor,
            ..self.clone()
        }
    }
}
