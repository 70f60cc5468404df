// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

/// A decimal number format described by a pattern such as `"$#,##0.00"`.
///
/// The pattern is made of an optional literal prefix, a number part built
/// from `#`, `0`, `,` and `.`, and an optional literal suffix:
///
/// - `0` is a required digit and `#` an optional one.
/// - `,` in the integer part enables grouping; the group size is the number of
///   digits after the last comma.
/// - `.` separates the fraction digits. Required fraction digits are always
///   printed, optional ones only when non-zero.
/// - A `%` anywhere in the prefix or suffix multiplies the value by 100.
///
/// A pattern without a number part prints the value in its shortest form.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NumberFormat {
    pattern: Arc<str>,
}

impl NumberFormat {
    /// Creates a format from `pattern`.
    pub fn new(pattern: impl Into<Arc<str>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The pattern this format was created from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Formats `value`.
    pub fn format(&self, value: f64) -> String {
        let parts = Parts::parse(&self.pattern);
        let Some(number) = parts.number else {
            return format!("{}{value}{}", parts.prefix, parts.suffix);
        };
        if !value.is_finite() {
            return format!("{}{value}{}", parts.prefix, parts.suffix);
        }
        let value = if parts.percent { value * 100.0 } else { value };

        let rounded = format!("{:.*}", number.max_fraction, value.abs());
        let (int_digits, frac_digits) = rounded.split_once('.').unwrap_or((&rounded, ""));

        let mut fraction = frac_digits.to_string();
        while fraction.len() > number.min_fraction && fraction.ends_with('0') {
            fraction.pop();
        }

        let mut integer = int_digits.trim_start_matches('0').to_string();
        while integer.len() < number.min_integer {
            integer.insert(0, '0');
        }
        if integer.is_empty() && fraction.is_empty() {
            integer.push('0');
        }
        if let Some(size) = number.grouping {
            integer = group(&integer, size);
        }

        let negative = value < 0.0 && rounded.bytes().any(|b| b.is_ascii_digit() && b != b'0');
        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(parts.prefix);
        out.push_str(&integer);
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(&fraction);
        }
        out.push_str(parts.suffix);
        out
    }
}

struct Parts<'a> {
    prefix: &'a str,
    number: Option<NumberPart>,
    suffix: &'a str,
    percent: bool,
}

struct NumberPart {
    min_integer: usize,
    grouping: Option<usize>,
    min_fraction: usize,
    max_fraction: usize,
}

impl<'a> Parts<'a> {
    fn parse(pattern: &'a str) -> Self {
        let is_number = |ch: char| matches!(ch, '#' | '0' | ',' | '.');
        let start = pattern.find(is_number).unwrap_or(pattern.len());
        let end = pattern[start..]
            .find(|ch: char| !is_number(ch))
            .map_or(pattern.len(), |at| start + at);
        let prefix = &pattern[..start];
        let suffix = &pattern[end..];
        let percent = prefix.contains('%') || suffix.contains('%');
        let body = &pattern[start..end];
        let number = (!body.is_empty()).then(|| {
            let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));
            let grouping = integer.rfind(',').and_then(|at| {
                let size = integer[at + 1..].chars().filter(|ch| *ch != ',').count();
                (size > 0).then_some(size)
            });
            NumberPart {
                min_integer: integer.chars().filter(|ch| *ch == '0').count(),
                grouping,
                min_fraction: fraction.chars().filter(|ch| *ch == '0').count(),
                max_fraction: fraction.chars().filter(|ch| matches!(ch, '0' | '#')).count(),
            }
        });
        Self {
            prefix,
            number,
            suffix,
            percent,
        }
    }
}

fn group(digits: &str, size: usize) -> String {
    let count = digits.len();
    let mut out = String::with_capacity(count + count / size);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (count - i) % size == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::NumberFormat;

    fn fmt(pattern: &str, value: f64) -> String {
        NumberFormat::new(pattern).format(value)
    }

    #[test]
    fn currency() {
        assert_eq!(fmt("$#,##0.00", 1234.5), "$1,234.50");
        assert_eq!(fmt("$#,##0.00", 0.0), "$0.00");
        assert_eq!(fmt("$#,##0.00", -1234567.891), "-$1,234,567.89");
    }

    #[test]
    fn optional_fraction_digits() {
        assert_eq!(fmt("0.##", 2.5), "2.5");
        assert_eq!(fmt("0.##", 2.0), "2");
        assert_eq!(fmt("0.##", 2.005_1), "2.01");
        assert_eq!(fmt("#.##", 0.5), ".5");
        assert_eq!(fmt("#.##", 0.0), "0");
    }

    #[test]
    fn percent_and_suffix() {
        assert_eq!(fmt("0%", 0.25), "25%");
        assert_eq!(fmt("0.0 kg", 3.0), "3.0 kg");
    }

    #[test]
    fn padding_integer_digits() {
        assert_eq!(fmt("000", 7.0), "007");
        assert_eq!(fmt("#,###", 1_000_000.0), "1,000,000");
    }

    #[test]
    fn negative_zero_is_unsigned() {
        assert_eq!(fmt("0", -0.2), "0");
    }

    #[test]
    fn pattern_without_digits() {
        assert_eq!(fmt("", 1.5), "1.5");
        assert_eq!(fmt("x=", 3.0), "x=3");
    }
}
