// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutable rich text documents with bounded word-wrap layout.
//!
//! A [`Document`] stores styled characters as lines of runs and keeps that
//! structure consistent under edits. Every edit produces [`Change`] records,
//! which can be coalesced into an undo [`History`] and are used by a
//! [`BoundedLayout`] to rewrap only what changed.
//!
//! ```
//! use quire::{BoundedLayout, Document, FixedMetrics, WrapConfig};
//!
//! let document: Document<()> = Document::from_text("Hello\nWorld");
//! let mut layout = BoundedLayout::new(document, FixedMetrics::default(), WrapConfig::default());
//! layout.insert(0, "X", None).unwrap();
//! assert_eq!(layout.document().text(), "XHello\nWorld");
//! assert_eq!(layout.line_count(), 2);
//! ```
//!
//! Measuring text is left to a [`FontMetrics`] implementation, and drawing
//! is left to the caller: layouts only compute positions.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use peniko::kurbo;
pub use quire_hyphen;

mod error;
mod metrics;

pub mod document;
pub mod editing;
pub mod layout;
pub mod style;

pub use document::{
    Change, Document, Editable, History, Line, ListenerId, Run, StreamEvent, StyledString, Token,
};
pub use editing::{Selection, TextLines};
pub use error::{Error, ErrorKind};
pub use layout::{
    BoundedLayout, BoxLine, BoxToken, FitOutcome, LineMetrics, Overflow, VerticalAlignment,
    WrapBounds, WrapConfig,
};
pub use metrics::{FixedMetrics, FontMetrics};
pub use style::{
    Alignment, Border, Brush, CharacterStyle, Font, LineStyle, Link, NumberFormat, Scripting,
    TabKind, TabStop, Underline,
};
