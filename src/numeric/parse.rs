use std::collections::BTreeSet;

use itertools::Itertools;

use crate::prelude::*;

/// Stripped before the spaces, so `R p` is not a marker.
const CURRENCY_MARKER: &str = "Rp";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Anything outside of digits, `.`, `,` and `-`.
    #[error("illegal characters: {}", characters.iter().join(" "))]
    IllegalCharacter { characters: BTreeSet<char> },

    #[error("`{input}` is not a number")]
    ParseFailure { input: String },
}

/// Parse a free-form number.
///
/// Returns `Ok(None)` when nothing was provided: an empty or blank string, a bare `Rp`,
/// or `nan` in any case. Only spaces are removed, other whitespace inside the number is illegal.
///
/// Separator resolution, in order:
///
/// 1. Both `.` and `,`: the right-most one is the decimal point, the other one groups thousands.
/// 2. Only one kind of separator:
///    - `0` or `-0` before it: decimal point;
///    - more than one occurrence: thousands grouping;
///    - at most two digits after it: decimal point;
///    - otherwise: thousands grouping.
/// 3. No separators: plain number.
///
/// Runs of the same separator (`1..5`) are collapsed into one beforehand.
pub fn parse(raw: &str) -> Result<Option<f64>, ParseError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let cleaned = raw.replace(CURRENCY_MARKER, "").replace(' ', "");
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    let characters: BTreeSet<char> =
        cleaned.chars().filter(|c| !matches!(*c, '0'..='9' | '.' | ',' | '-')).collect();
    if !characters.is_empty() {
        return Err(ParseError::IllegalCharacter { characters });
    }

    let collapsed: String =
        cleaned.chars().dedup_by(|lhs, rhs| lhs == rhs && matches!(*lhs, '.' | ',')).collect();
    resolve_separators(&collapsed)
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ParseError::ParseFailure { input: raw.to_owned() })
}

/// Same as [`parse`], but «not provided» reads as zero.
pub fn parse_or_zero(raw: &str) -> Result<f64, ParseError> {
    parse(raw).map(Option::unwrap_or_default)
}

/// Rewrite the string so that `.` is the only separator left and it is the decimal point.
fn resolve_separators(s: &str) -> String {
    match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) if dot > comma => {
            warn_if_malformed(&s[..dot], ',');
            s.replace(',', "")
        }
        (Some(_), Some(comma)) => {
            warn_if_malformed(&s[..comma], '.');
            s.replace('.', "").replace(',', ".")
        }
        (Some(_), None) => resolve_single_separator(s, '.'),
        (None, Some(_)) => resolve_single_separator(s, ','),
        (None, None) => s.to_owned(),
    }
}

/// Thousands groups after the first one must have exactly three digits.
fn warn_if_malformed(integer: &str, separator: char) {
    let is_malformed = integer.split(separator).skip(1).any(|group| group.len() != 3);
    if is_malformed {
        warn!(integer, %separator, "malformed thousands grouping, trusting the last separator");
    }
}

fn resolve_single_separator(s: &str, separator: char) -> String {
    let Some((integer, fraction)) = s.split_once(separator) else {
        return s.to_owned();
    };
    let is_decimal = if integer == "0" || integer == "-0" {
        true
    } else if s.matches(separator).count() > 1 {
        false
    } else {
        fraction.len() <= 2
    };
    if is_decimal { s.replace(separator, ".") } else { s.replace(separator, "") }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0.5", 0.5)]
    #[case("100.000.245", 100_000_245.0)]
    #[case("2.915", 2_915.0)]
    #[case("12.50", 12.50)]
    #[case("1.234,56", 1_234.56)]
    #[case("1,234.56", 1_234.56)]
    #[case("0,0442", 0.0442)]
    #[case("Rp 1.023,82", 1_023.82)]
    #[case("-0.25", -0.25)]
    #[case("-0,25", -0.25)]
    #[case("-1.234", -1_234.0)]
    #[case("1,5", 1.5)]
    #[case("1,500", 1_500.0)]
    #[case("1,500,000", 1_500_000.0)]
    #[case("1..5", 1.5)]
    #[case("1,,234..56", 1_234.56)]
    #[case("625000", 625_000.0)]
    #[case("0", 0.0)]
    #[case(" 1 234 567 ", 1_234_567.0)]
    #[case("1.", 1.0)]
    fn test_parse_ok(#[case] raw: &str, #[case] expected: f64) {
        let value = parse(raw).unwrap().unwrap();
        assert_abs_diff_eq!(value, expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("nan")]
    #[case("NaN")]
    #[case("Rp")]
    #[case("Rp  ")]
    fn test_not_provided(#[case] raw: &str) {
        assert_eq!(parse(raw), Ok(None));
        assert_eq!(parse_or_zero(raw), Ok(0.0));
    }

    #[test]
    fn test_illegal_character() {
        assert_eq!(
            parse("12a3"),
            Err(ParseError::IllegalCharacter { characters: BTreeSet::from(['a']) }),
        );
    }

    #[rstest]
    #[case("RP5", &['P', 'R'])]
    #[case("R p 5", &['R', 'p'])]
    #[case("Rp\t5", &['\t'])]
    fn test_only_exact_marker_is_stripped(#[case] raw: &str, #[case] characters: &[char]) {
        assert_eq!(
            parse(raw),
            Err(ParseError::IllegalCharacter { characters: characters.iter().copied().collect() }),
        );
    }

    #[test]
    fn test_illegal_characters_are_listed_once() {
        let error = parse("1e5e$").unwrap_err();
        assert_eq!(error.to_string(), "illegal characters: $ e");
    }

    #[rstest]
    #[case("-")]
    #[case(".")]
    #[case("1-2")]
    #[case("--5")]
    #[case("0.5.3")]
    #[case("0,5,3")]
    fn test_parse_failure(#[case] raw: &str) {
        assert_eq!(parse(raw), Err(ParseError::ParseFailure { input: raw.to_owned() }));
    }

    #[test]
    fn test_zero_is_not_absence() {
        assert_eq!(parse("0"), Ok(Some(0.0)));
        assert_eq!(parse(""), Ok(None));
    }

    #[test]
    fn test_idempotent() {
        for raw in ["1.234,56", "2.915", "12a3", "", "0,0442", "1-2"] {
            assert_eq!(parse(raw), parse(raw));
        }
    }

    /// The right-most separator is trusted even when the grouping before it is malformed.
    #[test]
    fn test_malformed_grouping_is_not_rejected() {
        assert_abs_diff_eq!(parse("1.234.5,6").unwrap().unwrap(), 12_345.6);
        assert_eq!(
            parse("1,234.56.78"),
            Err(ParseError::ParseFailure { input: "1,234.56.78".to_owned() }),
        );
    }
}
