// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `quire`.
//!
//! - The `util` module contains shared helpers: a fixed-width test style,
//!   document and layout constructors, and invariant checks.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, which makes the shared helpers easy to reach.
//! - Put new tests into the module matching their topic. Name tests with the topic first,
//!   e.g. `selection_move_down` rather than `move_down_selection`.
//! - `properties` holds the `proptest` suites over random edit sequences.

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod properties;
mod selection;
mod util;
