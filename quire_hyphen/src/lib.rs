// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pattern based hyphenation for the Quire rich text engine.
//!
//! Dictionaries use the OpenOffice/TeX pattern format introduced by Frank
//! Liang: letters interleaved with digit weights, with `.` marking a word edge.
//! Patterns are compiled into a small state machine which is then used to
//! weigh every gap in a word.
//!
//! ```
//! use quire_hyphen::Hyphenator;
//!
//! let hyphenator = Hyphenator::from_patterns("UTF-8\nn1n\n").unwrap();
//! assert_eq!(hyphenator.hyphen_before("runner", 6), Some(3));
//! ```
//!
//! A US English dictionary is bundled and available through [`shared`],
//! which loads it once per process.

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

mod automaton;
mod dictionary;
mod error;
mod hyphenator;

pub use crate::error::Error;
pub use crate::hyphenator::{shared, Hyphenator};
