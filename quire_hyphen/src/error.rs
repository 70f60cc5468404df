// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors produced while loading a hyphenation dictionary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The dictionary did not start with an encoding line.
    #[error("hyphenation dictionary is empty")]
    Empty,
    /// The encoding line named a character set this crate cannot decode.
    #[error("unsupported hyphenation dictionary encoding `{0}`")]
    UnsupportedEncoding(String),
    /// The dictionary claimed to be UTF-8 but was not.
    #[error("hyphenation dictionary is not valid UTF-8 (at byte {valid_up_to})")]
    InvalidUtf8 {
        /// Length of the valid prefix.
        valid_up_to: usize,
    },
    /// A pattern could not be parsed.
    #[error("malformed hyphenation pattern `{pattern}` on line {line}")]
    MalformedPattern {
        /// One-based line number in the dictionary text.
        line: usize,
        /// The offending pattern.
        pattern: String,
    },
    /// The dictionary parsed but contained no patterns.
    #[error("hyphenation dictionary contains no patterns")]
    NoPatterns,
}
