use std::iter;

use crate::{numeric::parse, prelude::*};

/// Most fractional digits written into a sheet cell.
const MAX_CELL_DECIMALS: usize = 6;

/// Format the number in the Indonesian convention: `.` groups thousands, `,` is the decimal point.
///
/// `1234567.891, 2` → `1.234.567,89`.
#[must_use]
pub fn format_id(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

    let mut formatted = String::with_capacity(rendered.len() + integer.len() / 3 + 1);
    if value.is_sign_negative() && rendered.bytes().any(|byte| matches!(byte, b'1'..=b'9')) {
        formatted.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i != 0 && (integer.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(digit);
    }
    if !fraction.is_empty() {
        formatted.push(',');
        formatted.push_str(fraction);
    }
    formatted
}

/// Render the value for a sheet cell so that [`parse`] reads the same value back.
///
/// Picks the shortest Indonesian rendering that survives the round trip. A small integer part with
/// three or more fractional digits (`2,915`) would read as thousands, so it gets an explicit zero
/// thousands group instead: `0.002,915`. Values that need more than six fractional digits are
/// stored rounded, with a warning.
#[must_use]
pub fn encode_cell(value: f64) -> String {
    let candidates = (0..=MAX_CELL_DECIMALS).flat_map(|decimals| {
        let cell = format_id(value, decimals);
        let grouped = with_zero_group(&cell);
        iter::once(cell).chain(grouped)
    });
    let candidates = candidates.map(|cell| {
        let error = parse(&cell).ok().flatten().map_or(f64::INFINITY, |read| (read - value).abs());
        (cell, error)
    });
    let mut best: Option<(String, f64)> = None;
    for (cell, error) in candidates {
        if error <= f64::EPSILON * value.abs().max(1.0) {
            return cell;
        }
        if best.as_ref().is_none_or(|(_, best_error)| error < *best_error) {
            best = Some((cell, error));
        }
    }
    let (cell, error) = best.unwrap_or_else(|| (format_id(value, 2), f64::NAN));
    warn!(value, %cell, error, "the value cannot be stored exactly, storing the closest one");
    cell
}

/// `2,915` → `0.002,915`, `-12,5` → `-0.012,5`. Only applies to an ungrouped non-zero integer part.
fn with_zero_group(cell: &str) -> Option<String> {
    let (sign, unsigned) = cell.strip_prefix('-').map_or(("", cell), |unsigned| ("-", unsigned));
    let (integer, fraction) = unsigned.split_once(',')?;
    (integer.len() <= 3 && integer != "0").then(|| format!("{sign}0.{integer:0>3},{fraction}"))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_format_id() {
        assert_eq!(format_id(1_234_567.891, 2), "1.234.567,89");
        assert_eq!(format_id(1_234.6, 0), "1.235");
        assert_eq!(format_id(999.0, 0), "999");
        assert_eq!(format_id(1_000.0, 0), "1.000");
        assert_eq!(format_id(0.5, 3), "0,500");
        assert_eq!(format_id(-1_234.5, 2), "-1.234,50");
        assert_eq!(format_id(0.0, 0), "0");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_id(-0.0, 2), "0,00");
        assert_eq!(format_id(-0.001, 2), "0,00");
    }

    #[test]
    fn test_round_trip_whole_numbers() {
        for value in [0.0, 7.0, 12.0, 999.0, 1_000.0, 2_915.0, 100_000_245.0, -1_234.0] {
            assert_eq!(parse(&format_id(value, 0)), Ok(Some(value)), "{value}");
        }
    }

    #[test]
    fn test_round_trip_cents() {
        for value in [0.5, 1.25, 12.5, 999.99, 1_023.82, 1_234_567.89, -42.1] {
            let read = parse(&format_id(value, 2)).unwrap().unwrap();
            assert_abs_diff_eq!(read, value, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_round_trip_fractions() {
        for value in [0.99558, 0.00442, 0.875, -0.125] {
            let read = parse(&format_id(value, 5)).unwrap().unwrap();
            assert_abs_diff_eq!(read, value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_encode_cell_exact() {
        assert_eq!(encode_cell(1_234_567.0), "1.234.567");
        assert_eq!(encode_cell(1_023.82), "1.023,82");
        assert_eq!(encode_cell(0.99558), "0,99558");
        assert_eq!(encode_cell(12.5), "12,5");
        assert_eq!(encode_cell(1_234.567), "1.234,567");
        assert_eq!(encode_cell(0.0), "0");
    }

    #[test]
    fn test_encode_cell_small_integer_with_thousandths() {
        for (value, expected) in [(2.915, "0.002,915"), (12.345, "0.012,345"), (-2.915, "-0.002,915")] {
            let cell = encode_cell(value);
            assert_eq!(cell, expected);
            assert_eq!(parse(&cell), Ok(Some(value)));
        }
    }

    #[test]
    fn test_encode_cell_rounds_beyond_max_decimals() {
        assert_eq!(encode_cell(1_234.123_456_789), "1.234,123457");
    }
}
