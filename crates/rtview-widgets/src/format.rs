//! Numeric text for side fields.
//!
//! Output follows the `###.##` decimal pattern: at most two fraction digits,
//! trailing fraction zeros dropped, no grouping separators and no forced
//! leading zero (`0.5` renders as `.5`).
//!
//! Input parsing never fails outward: [`commit_value`] substitutes half of the
//! maximum side for anything [`parse_side`] rejects.

use std::fmt;

/// The display pattern, also used to size text fields.
pub const FORMAT_PATTERN: &str = "###.##";

/// Why a field's text is not a usable side length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Empty or whitespace-only text.
    Empty,
    /// Text that is not a decimal number (including trailing garbage).
    Malformed(String),
    /// `NaN` or an infinity.
    NonFinite(String),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no number entered"),
            Self::Malformed(text) => write!(f, "'{text}' is not a number"),
            Self::NonFinite(text) => write!(f, "'{text}' is not a finite number"),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Render a side length with the `###.##` pattern.
#[must_use]
pub fn format_side(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    let mut text = format!("{value:.2}");
    let trimmed_len = text.trim_end_matches('0').trim_end_matches('.').len();
    text.truncate(trimmed_len);

    match text.as_str() {
        "-0" => "0".to_owned(),
        _ => {
            if let Some(fraction) = text.strip_prefix("0.") {
                format!(".{fraction}")
            } else if let Some(fraction) = text.strip_prefix("-0.") {
                format!("-.{fraction}")
            } else {
                text
            }
        }
    }
}

/// Parse field text as a finite decimal. Surrounding whitespace is ignored.
///
/// `NaN` and infinities are rejected, so they take the midpoint fallback in
/// [`commit_value`] instead of being clamped to the maximum side.
pub fn parse_side(text: &str) -> Result<f64, ParseFailure> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::Empty);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ParseFailure::Malformed(trimmed.to_owned()))?;
    if !value.is_finite() {
        return Err(ParseFailure::NonFinite(trimmed.to_owned()));
    }
    Ok(value)
}

/// The value a field commits on focus loss: the parsed text, or
/// `max_side / 2` when the text does not parse.
#[must_use]
pub fn commit_value(text: &str, max_side: f64) -> f64 {
    parse_side(text).unwrap_or(max_side / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn whole_numbers_drop_fraction() {
        assert_eq!(format_side(5.0), "5");
        assert_eq!(format_side(50.0), "50");
        assert_eq!(format_side(100.0), "100");
    }

    #[test]
    fn fractions_round_to_two_places() {
        assert_eq!(format_side(52.0_f64.sqrt()), "7.21");
        assert_eq!(format_side(2.5), "2.5");
        assert_eq!(format_side(3.14159), "3.14");
        assert_eq!(format_side(9.999), "10");
    }

    #[test]
    fn no_forced_leading_zero() {
        assert_eq!(format_side(0.5), ".5");
        assert_eq!(format_side(0.01), ".01");
        assert_eq!(format_side(-0.75), "-.75");
    }

    #[test]
    fn zero_and_negative_zero() {
        assert_eq!(format_side(0.0), "0");
        assert_eq!(format_side(-0.001), "0");
    }

    #[test]
    fn no_grouping_separators() {
        assert_eq!(format_side(12345.678), "12345.68");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_side(f64::NAN), "NaN");
        assert_eq!(format_side(f64::INFINITY), "∞");
    }

    #[test]
    fn parse_accepts_numbers() {
        assert_eq!(parse_side("6"), Ok(6.0));
        assert_eq!(parse_side(" 7.25 "), Ok(7.25));
        assert_eq!(parse_side(".5"), Ok(0.5));
        assert_eq!(parse_side("-3"), Ok(-3.0));
        assert_eq!(parse_side("1e2"), Ok(100.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_side(""), Err(ParseFailure::Empty));
        assert_eq!(parse_side("   "), Err(ParseFailure::Empty));
        assert_eq!(
            parse_side("12.3x"),
            Err(ParseFailure::Malformed("12.3x".into()))
        );
        assert!(matches!(parse_side("abc"), Err(ParseFailure::Malformed(_))));
        assert!(matches!(parse_side("NaN"), Err(ParseFailure::NonFinite(_))));
        assert!(matches!(parse_side("inf"), Err(ParseFailure::NonFinite(_))));
    }

    #[test]
    fn commit_falls_back_to_midpoint() {
        assert_eq!(commit_value("abc", 100.0), 50.0);
        assert_eq!(commit_value("", 100.0), 50.0);
        assert_eq!(commit_value("Infinity", 100.0), 50.0);
        assert_eq!(commit_value("-inf", 100.0), 50.0);
        assert_eq!(commit_value("12.3x", 100.0), 50.0);
        assert_eq!(commit_value("12.3", 100.0), 12.3);
        assert_eq!(commit_value("-4", 100.0), -4.0);
    }

    proptest! {
        #[test]
        fn formatted_text_reparses_within_rounding(value in 0.01f64..=100.0) {
            let text = format_side(value);
            let reparsed = parse_side(&text).expect("formatted text parses");
            prop_assert!((reparsed - value).abs() <= 0.005 + 1e-9, "{value} -> {text}");
        }

        #[test]
        fn formatted_text_has_at_most_two_fraction_digits(value in -1.0e4f64..1.0e4) {
            let text = format_side(value);
            if let Some((_, fraction)) = text.split_once('.') {
                prop_assert!(!fraction.is_empty() && fraction.len() <= 2);
                prop_assert!(!fraction.ends_with('0'));
            }
            prop_assert!(!text.contains(','));
        }
    }
}
