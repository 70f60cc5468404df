// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{layout_with, Color, TestLayout};
use quire::Document;

/// Checks the structural invariants every document maintains between edits.
pub(crate) fn assert_document_invariants(document: &Document<Color>) {
    let lines = document.lines();
    assert!(!lines.is_empty(), "a document always has a line");
    let mut start = 0;
    for (index, line) in lines.iter().enumerate() {
        assert_eq!(line.start(), start, "line {index} is not contiguous");
        let is_last = index + 1 == lines.len();
        assert_eq!(
            line.is_terminated(),
            !is_last,
            "only the last line may lack a terminator (line {index})"
        );
        assert_eq!(
            line.chars().iter().filter(|ch| **ch == '\n').count(),
            usize::from(!is_last),
            "line {index} holds a stray terminator"
        );

        let runs = line.runs();
        assert!(!runs.is_empty(), "line {index} has no runs");
        let mut run_start = 0;
        for run in runs {
            assert_eq!(run.start(), run_start, "runs of line {index} have a gap");
            assert!(
                !run.is_empty() || line.is_empty(),
                "line {index} keeps an empty run"
            );
            run_start = run.end();
        }
        assert_eq!(run_start, line.len(), "runs of line {index} do not cover it");
        for pair in runs.windows(2) {
            assert_ne!(
                pair[0].style(),
                pair[1].style(),
                "adjacent runs of line {index} share a style"
            );
        }
        start += line.len();
    }
    assert_eq!(start, document.len(), "line lengths do not sum to the length");
}

/// Checks that incrementally maintained lines equal a layout built from
/// scratch.
pub(crate) fn assert_layout_matches_fresh(layout: &TestLayout) {
    let mut fresh = layout_with(layout.document().clone(), *layout.config());
    fresh.set_hyphenator(layout.hyphenator().cloned());
    assert_eq!(
        layout.lines(),
        fresh.lines(),
        "incremental layout diverged for {:?}",
        layout.document().text()
    );
}
