// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::OnceLock;

use crate::automaton::Automaton;
use crate::{dictionary, Error};

/// The US English patterns compiled into the crate.
const BUNDLED_US: &str = include_str!("../data/hyph_en_US.dic");

/// Finds legal hyphenation points in words using Liang's algorithm.
///
/// A word of `n` characters has `n - 1` interior gaps. A gap is a legal break
/// when the highest pattern weight covering it is odd. Breaks are never
/// proposed within two characters of either end of a word.
#[derive(Clone, Debug)]
pub struct Hyphenator {
    automaton: Automaton,
}

impl Hyphenator {
    /// Builds a hyphenator from dictionary text.
    ///
    /// The first line of `text` names the dictionary encoding; text passed here
    /// has already been decoded, so only the name is checked.
    pub fn from_patterns(text: &str) -> Result<Self, Error> {
        let patterns = dictionary::parse(text)?;
        Ok(Self {
            automaton: Automaton::build(&patterns),
        })
    }

    /// Builds a hyphenator from raw dictionary bytes, decoding them according
    /// to the encoding line.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_patterns(&dictionary::decode(bytes)?)
    }

    /// Builds a hyphenator from the bundled US English dictionary.
    pub fn bundled() -> Result<Self, Error> {
        Self::from_patterns(BUNDLED_US)
    }

    /// The number of automaton states, one per distinct pattern prefix.
    pub fn state_count(&self) -> usize {
        self.automaton.state_count()
    }

    /// Returns the gap weight after each character of `word`.
    ///
    /// Matching is case-insensitive.
    pub fn weights(&self, word: &str) -> Vec<u8> {
        let lower: Vec<char> = word.chars().map(lowercase).collect();
        self.automaton.weights(&lower)
    }

    /// Returns every legal break in `word`, as the number of characters that
    /// precede the break, in ascending order.
    pub fn hyphens(&self, word: &str) -> Vec<usize> {
        self.weights(word)
            .iter()
            .enumerate()
            .filter(|(_, weight)| *weight & 1 == 1)
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Returns the rightmost legal break in `word` that leaves at least one
    /// character of the first `line_end` characters after it.
    ///
    /// The result counts the characters before the break.
    pub fn hyphen_before(&self, word: &str, line_end: usize) -> Option<usize> {
        let weights = self.weights(word);
        let last = line_end.saturating_sub(2).min(weights.len().saturating_sub(1));
        (1..=last)
            .rev()
            .find(|i| weights[*i] & 1 == 1)
            .map(|i| i + 1)
    }

    /// Finds a break in the word starting at `start` in `chars`, limited to
    /// the characters before `end`.
    ///
    /// The word ends at the first whitespace character. The result is an index
    /// into `chars`.
    pub fn hyphen_in(&self, chars: &[char], start: usize, end: usize) -> Option<usize> {
        let end = end.min(chars.len());
        if end < start + 3 {
            return None;
        }
        let word_end = chars[start..end]
            .iter()
            .position(|ch| ch.is_whitespace())
            .map_or(end, |at| start + at);
        let word_len = word_end - start;
        if word_len <= 2 {
            return None;
        }
        let word: String = chars[start..word_end].iter().collect();
        self.hyphen_before(&word, word_len)
            .map(|hyphen| start + hyphen)
    }
}

/// Lowercases without changing the character count.
fn lowercase(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Returns the process-wide hyphenator built from the bundled dictionary.
///
/// The dictionary is parsed on first use. If it fails to load, the failure is
/// logged once and `None` is returned from then on.
pub fn shared() -> Option<&'static Hyphenator> {
    static SHARED: OnceLock<Option<Hyphenator>> = OnceLock::new();
    SHARED
        .get_or_init(|| match Hyphenator::bundled() {
            Ok(hyphenator) => {
                log::debug!(
                    "loaded bundled hyphenation dictionary ({} states)",
                    hyphenator.state_count()
                );
                Some(hyphenator)
            }
            Err(err) => {
                log::warn!("hyphenation disabled: {err}");
                None
            }
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::{shared, Hyphenator};

    fn runner_dictionary() -> Hyphenator {
        Hyphenator::from_patterns("UTF-8\nn1n\n").unwrap()
    }

    #[test]
    fn runner_fixture() {
        let hyphenator = runner_dictionary();
        assert_eq!(hyphenator.hyphen_before("runner", 6), Some(3));
        assert_eq!(hyphenator.hyphens("runner"), [3]);
    }

    #[test]
    fn matching_ignores_case() {
        let hyphenator = runner_dictionary();
        assert_eq!(hyphenator.hyphen_before("RUNNER", 6), Some(3));
    }

    #[test]
    fn line_end_limits_the_break() {
        let hyphenator = runner_dictionary();
        // The break after "run" needs at least one character of room after it.
        assert_eq!(hyphenator.hyphen_before("runner", 4), Some(3));
        assert_eq!(hyphenator.hyphen_before("runner", 3), None);
        assert_eq!(hyphenator.hyphen_before("runner", 0), None);
    }

    #[test]
    fn rightmost_break_wins() {
        let hyphenator = Hyphenator::from_patterns("UTF-8\nn1n\nu1n\n").unwrap();
        assert_eq!(hyphenator.hyphens("runner"), [2, 3]);
        assert_eq!(hyphenator.hyphen_before("runner", 6), Some(3));
        assert_eq!(hyphenator.hyphen_before("runner", 3), Some(2));
    }

    #[test]
    fn hyphen_in_stops_at_whitespace() {
        let hyphenator = runner_dictionary();
        let chars: Vec<char> = "a runner goes".chars().collect();
        assert_eq!(hyphenator.hyphen_in(&chars, 2, chars.len()), Some(5));
        assert_eq!(hyphenator.hyphen_in(&chars, 9, chars.len()), None);
    }

    #[test]
    fn hyphen_in_rejects_short_spans() {
        let hyphenator = runner_dictionary();
        let chars: Vec<char> = "runner".chars().collect();
        assert_eq!(hyphenator.hyphen_in(&chars, 0, 2), None);
        assert_eq!(hyphenator.hyphen_in(&chars, 4, 6), None);
    }

    #[test]
    fn latin1_dictionary() {
        let hyphenator = Hyphenator::from_bytes(b"ISO8859-1\n\xe91t\n").unwrap();
        assert_eq!(hyphenator.hyphens("caf\u{e9}tier"), [4]);
    }

    #[test]
    fn bundled_dictionary_loads() {
        let hyphenator = shared().expect("bundled dictionary should load");
        assert!(hyphenator.state_count() > 1000, "full dictionary");
        for word in ["hyphenation", "dictionary", "typography", "algorithm"] {
            let len = word.chars().count();
            for hyphen in hyphenator.hyphens(word) {
                assert!(
                    (2..=len - 2).contains(&hyphen),
                    "{word}: break {hyphen} too close to an edge"
                );
            }
        }
        assert!(
            !hyphenator.hyphens("hyphenation").is_empty(),
            "hyphenation should hyphenate"
        );
    }
}
