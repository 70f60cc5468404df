// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use super::Run;
use crate::style::Brush;

/// A maximal span of non-whitespace characters within a line.
///
/// Tokens are the units that line wrapping moves between lines. A token may
/// cross run boundaries; it records the run active at its first character.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Token {
    start: usize,
    end: usize,
    run: usize,
}

impl Token {
    /// Offset of the first character within the line.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset past the last character within the line.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the token covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The character range covered by the token.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Index of the run containing the first character.
    pub fn run(&self) -> usize {
        self.run
    }
}

/// Splits `chars` into tokens at whitespace.
pub(crate) fn tokenize<B: Brush>(chars: &[char], runs: &[Run<B>]) -> Box<[Token]> {
    let mut tokens = Vec::new();
    let mut run = 0;
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        while run + 1 < runs.len() && runs[run].end() <= start {
            run += 1;
        }
        tokens.push(Token {
            start,
            end: i,
            run,
        });
    }
    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::{tokenize, Run};
    use crate::style::CharacterStyle;

    fn runs(lens: &[usize]) -> Vec<Run<u32>> {
        let mut start = 0;
        lens.iter()
            .enumerate()
            .map(|(i, len)| {
                let brush = u32::try_from(i).unwrap();
                let run = Run::new(start, *len, CharacterStyle::default().with_brush(brush));
                start += len;
                run
            })
            .collect()
    }

    #[test]
    fn splits_at_whitespace() {
        let chars: Vec<char> = "  one two\tthree\n".chars().collect();
        let tokens = tokenize(&chars, &runs(&[chars.len()]));
        let ranges: Vec<_> = tokens.iter().map(|t| t.range()).collect();
        assert_eq!(ranges, [2..5, 6..9, 10..15]);
    }

    #[test]
    fn tokens_cross_runs() {
        let chars: Vec<char> = "abc def".chars().collect();
        // "ab" | "c de" | "f"
        let tokens = tokenize(&chars, &runs(&[2, 4, 1]));
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].range(), 0..3);
        assert_eq!(tokens[0].run(), 0);
        assert_eq!(tokens[1].range(), 4..7);
        assert_eq!(tokens[1].run(), 1);
    }

    #[test]
    fn whitespace_only_has_no_tokens() {
        let chars: Vec<char> = " \t \n".chars().collect();
        assert!(tokenize(&chars, &runs(&[4])).is_empty(), "only whitespace");
    }
}
