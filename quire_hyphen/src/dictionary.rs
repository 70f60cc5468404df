// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of OpenOffice-style pattern dictionaries.

use std::borrow::Cow;

use crate::Error;

/// The character set named by the first line of a dictionary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Encoding {
    Utf8,
    Latin1,
}

impl Encoding {
    fn parse(line: &str) -> Result<Self, Error> {
        let name = line.trim();
        // Some dictionaries prefix the name with "charset ".
        let name = name.strip_prefix("charset ").unwrap_or(name).trim();
        match name.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Self::Utf8),
            "ISO8859-1" | "ISO-8859-1" | "LATIN1" => Ok(Self::Latin1),
            _ => Err(Error::UnsupportedEncoding(name.to_string())),
        }
    }
}

/// A single Liang pattern split into its letters and inter-letter weights.
///
/// `weights` has one more entry than `letters`: entry `k` is the weight of the
/// gap before letter `k`, and the final entry the gap after the last letter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Pattern {
    pub(crate) letters: String,
    pub(crate) weights: Box<[u8]>,
}

impl Pattern {
    fn parse(text: &str, line: usize) -> Result<Self, Error> {
        let malformed = || Error::MalformedPattern {
            line,
            pattern: text.to_string(),
        };
        let mut letters = String::with_capacity(text.len());
        let mut weights = Vec::with_capacity(text.len() + 1);
        weights.push(0_u8);
        let mut pending_digit = false;
        for ch in text.chars() {
            if let Some(digit) = ch.to_digit(10) {
                let Ok(digit) = u8::try_from(digit) else {
                    return Err(malformed());
                };
                if pending_digit {
                    return Err(malformed());
                }
                let last = weights.len() - 1;
                weights[last] = digit;
                pending_digit = true;
            } else if ch.is_control() || ch.is_whitespace() {
                return Err(malformed());
            } else {
                letters.push(ch);
                weights.push(0);
                pending_digit = false;
            }
        }
        if letters.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            letters,
            weights: weights.into_boxed_slice(),
        })
    }

    /// The weights with leading zero gaps removed, aligned to the end of the pattern.
    pub(crate) fn trimmed_weights(&self) -> &[u8] {
        let leading = self.weights.iter().take_while(|w| **w == 0).count();
        &self.weights[leading..]
    }
}

/// Decodes raw dictionary bytes according to the encoding line they start with.
pub(crate) fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, Error> {
    let first_line_end = bytes
        .iter()
        .position(|b| *b == b'\n')
        .unwrap_or(bytes.len());
    if first_line_end == 0 {
        return Err(Error::Empty);
    }
    let header = String::from_utf8_lossy(&bytes[..first_line_end]);
    match Encoding::parse(&header)? {
        Encoding::Utf8 => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|err| Error::InvalidUtf8 {
                valid_up_to: err.valid_up_to(),
            }),
        Encoding::Latin1 => Ok(Cow::Owned(bytes.iter().map(|b| char::from(*b)).collect())),
    }
}

/// Parses dictionary text into patterns.
///
/// The first line names the encoding and is otherwise ignored. Lines starting
/// with `%` or `#` are comments and lines starting with an uppercase letter are
/// directives (such as `LEFTHYPHENMIN`) that this engine does not use. Every
/// other whitespace separated item is a pattern.
pub(crate) fn parse(text: &str) -> Result<Vec<Pattern>, Error> {
    let mut lines = text.lines().enumerate();
    match lines.next() {
        Some((_, header)) if !header.trim().is_empty() => {
            Encoding::parse(header)?;
        }
        _ => return Err(Error::Empty),
    }
    let mut patterns = Vec::new();
    for (number, line) in lines {
        let line = line.trim();
        let Some(first) = line.chars().next() else {
            continue;
        };
        if first == '%' || first == '#' || first.is_uppercase() {
            continue;
        }
        for item in line.split_whitespace() {
            patterns.push(Pattern::parse(item, number + 1)?);
        }
    }
    if patterns.is_empty() {
        return Err(Error::NoPatterns);
    }
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::{decode, parse, Encoding, Pattern};
    use crate::Error;

    #[test]
    fn pattern_digits_between_letters() {
        let pattern = Pattern::parse("n1n", 2).unwrap();
        assert_eq!(pattern.letters, "nn");
        assert_eq!(&*pattern.weights, &[0, 1, 0]);
        assert_eq!(pattern.trimmed_weights(), &[1, 0]);
    }

    #[test]
    fn pattern_with_boundary_marker() {
        let pattern = Pattern::parse(".ach4", 1).unwrap();
        assert_eq!(pattern.letters, ".ach");
        assert_eq!(&*pattern.weights, &[0, 0, 0, 0, 4]);
        assert_eq!(pattern.trimmed_weights(), &[4]);
    }

    #[test]
    fn pattern_rejects_double_digits() {
        assert_eq!(
            Pattern::parse("a12b", 7),
            Err(Error::MalformedPattern {
                line: 7,
                pattern: "a12b".into()
            })
        );
    }

    #[test]
    fn pattern_rejects_digits_only() {
        assert!(Pattern::parse("3", 1).is_err(), "weights need letters");
    }

    #[test]
    fn encoding_names() {
        assert_eq!(Encoding::parse("UTF-8"), Ok(Encoding::Utf8));
        assert_eq!(Encoding::parse("charset ISO8859-1"), Ok(Encoding::Latin1));
        assert!(
            matches!(
                Encoding::parse("KOI8-R"),
                Err(Error::UnsupportedEncoding(name)) if name == "KOI8-R"
            ),
            "only UTF-8 and Latin-1 are supported"
        );
    }

    #[test]
    fn parse_skips_header_comments_and_directives() {
        let patterns = parse("UTF-8\n% comment\nLEFTHYPHENMIN 2\n\nn1n 1ba\n").unwrap();
        let letters: Vec<_> = patterns.iter().map(|p| p.letters.as_str()).collect();
        assert_eq!(letters, ["nn", "ba"]);
    }

    #[test]
    fn parse_reports_line_numbers() {
        let err = parse("UTF-8\nn1n\na12b\n").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedPattern {
                line: 3,
                pattern: "a12b".into()
            }
        );
    }

    #[test]
    fn parse_empty_inputs() {
        assert_eq!(parse(""), Err(Error::Empty));
        assert_eq!(parse("UTF-8\n% nothing here\n"), Err(Error::NoPatterns));
    }

    #[test]
    fn decode_latin1() {
        let bytes = b"ISO8859-1\n\xe91t\n";
        let text = decode(bytes).unwrap();
        assert!(text.ends_with("\u{e9}1t\n"), "{text:?}");
    }

    #[test]
    fn decode_rejects_bad_utf8() {
        let bytes = b"UTF-8\n\xff1t\n";
        assert_eq!(decode(bytes), Err(Error::InvalidUtf8 { valid_up_to: 6 }));
    }
}
