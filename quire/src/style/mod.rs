// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character and paragraph style values.
//!
//! Styles are plain values: every `with_*` method returns a modified copy and
//! equality is structural. Two runs share a style exactly when their styles
//! compare equal.

mod character;
mod format;
mod line;

pub use character::{Border, CharacterStyle, Font, Link, Scripting, Underline};
pub use format::NumberFormat;
pub use line::{Alignment, LineStyle, TabKind, TabStop};

/// Paint used for text, underlines and borders.
///
/// The engine never draws, so a brush is opaque here; it only needs to be
/// comparable so that equal styles can share a run.
pub trait Brush: Clone + PartialEq + Default + core::fmt::Debug {}

impl<T: Clone + PartialEq + Default + core::fmt::Debug> Brush for T {}
