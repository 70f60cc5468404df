// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

/// Rich error type for document operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the caller-provided range and
/// the length of whatever was being indexed at the time of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The start of the caller-provided range, or the lone index.
    start: usize,

    /// The end (exclusive) of the caller-provided range.
    end: usize,

    /// Number of characters (or lines) being indexed.
    len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports source text length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start of the range provided by the caller.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end of the range provided by the caller.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length of the indexed sequence at the time of the error.
    pub fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::IndexOutOfBounds,
            start: index,
            end: index,
            len,
        }
    }

    pub(crate) fn range_out_of_bounds(range: &Range<usize>, len: usize) -> Self {
        Self {
            kind: ErrorKind::IndexOutOfBounds,
            start: range.start,
            end: range.end,
            len,
        }
    }

    pub(crate) fn invalid_range(range: &Range<usize>, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            start: range.start,
            end: range.end,
            len,
        }
    }

    pub(crate) fn line_out_of_bounds(line: usize, count: usize) -> Self {
        Self {
            kind: ErrorKind::LineOutOfBounds,
            start: line,
            end: line,
            len: count,
        }
    }

    /// Checks that `index` is a valid boundary in a sequence of `len` items.
    ///
    /// `index == len` is valid and denotes the end.
    pub(crate) fn check_boundary(index: usize, len: usize) -> Result<(), Self> {
        if index > len {
            Err(Self::index_out_of_bounds(index, len))
        } else {
            Ok(())
        }
    }

    /// Checks that `range` is ordered and lies within a sequence of `len` items.
    pub(crate) fn check_range(range: &Range<usize>, len: usize) -> Result<(), Self> {
        if range.start > range.end {
            Err(Self::invalid_range(range, len))
        } else if range.end > len {
            Err(Self::range_out_of_bounds(range, len))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::IndexOutOfBounds if self.start == self.end => {
                write!(f, "index {} out of bounds for len {}", self.start, self.len)
            }
            ErrorKind::IndexOutOfBounds => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::InvalidRange => {
                write!(f, "invalid range {}..{}: start > end", self.start, self.end)
            }
            ErrorKind::LineOutOfBounds => write!(
                f,
                "line {} out of bounds for line count {}",
                self.start, self.len
            ),
        }
    }
}

impl core::error::Error for Error {}

/// Non-exhaustive categories of [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An index or range end lies past the end of the document.
    IndexOutOfBounds,
    /// A range whose start is after its end.
    InvalidRange,
    /// A line index at or past the line count.
    LineOutOfBounds,
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn boundary_at_len_is_valid() {
        assert!(Error::check_boundary(5, 5).is_ok(), "the end is a boundary");
        let err = Error::check_boundary(6, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
        assert_eq!(err.to_string(), "index 6 out of bounds for len 5");
    }

    #[test]
    fn ranges_are_checked() {
        assert!(Error::check_range(&(0..5), 5).is_ok(), "the whole text");
        let err = Error::check_range(&(3..1), 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(err.to_string(), "invalid range 3..1: start > end");
        let err = Error::check_range(&(2..9), 5).unwrap_err();
        assert_eq!((err.start(), err.end(), err.len()), (2, 9, 5));
        assert_eq!(err.to_string(), "range 2..9 out of bounds for len 5");
    }
}
