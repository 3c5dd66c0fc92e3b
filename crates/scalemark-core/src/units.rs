//! Unit conversion utilities
//!
//! Converts between real-world length strings and meters, and picks the
//! best display unit for a length in meters. Supported units are meters,
//! centimeters and millimeters.

use crate::error::LengthParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length unit accepted in user input and used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Meters (m)
    #[serde(rename = "m")]
    Meter,
    /// Centimeters (cm)
    #[serde(rename = "cm")]
    Centimeter,
    /// Millimeters (mm)
    #[serde(rename = "mm")]
    Millimeter,
}

impl LengthUnit {
    /// Number of meters in one of this unit
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meter => 1.0,
            Self::Centimeter => 0.01,
            Self::Millimeter => 0.001,
        }
    }

    /// Decimal places shown when formatting in this unit
    pub fn display_precision(self) -> usize {
        match self {
            Self::Meter => 3,
            Self::Centimeter => 2,
            Self::Millimeter => 1,
        }
    }

    /// Largest unit in which `meters` has a magnitude of at least one
    pub fn best_for(meters: f64) -> Self {
        if meters >= 1.0 {
            Self::Meter
        } else if meters >= 0.01 {
            Self::Centimeter
        } else {
            Self::Millimeter
        }
    }
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Meter
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meter => write!(f, "m"),
            Self::Centimeter => write!(f, "cm"),
            Self::Millimeter => write!(f, "mm"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m" => Ok(Self::Meter),
            "cm" => Ok(Self::Centimeter),
            "mm" => Ok(Self::Millimeter),
            other => Err(LengthParseError::UnknownUnit {
                unit: other.to_string(),
            }),
        }
    }
}

/// Parse a real-world length such as `"1.5m"`, `"150 cm"` or `".5"` into meters.
///
/// The number is an unsigned decimal (digits with at most one point, ending
/// in a digit). The unit is optional and defaults to meters.
/// Surrounding whitespace and whitespace between number and unit are ignored.
pub fn parse_length(input: &str) -> Result<f64, LengthParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(LengthParseError::Empty);
    }

    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (number, rest) = input.split_at(split);

    if !is_unsigned_decimal(number) {
        return Err(LengthParseError::InvalidNumber {
            input: input.to_string(),
        });
    }

    let value: f64 = number
        .parse()
        .map_err(|_| LengthParseError::InvalidNumber {
            input: input.to_string(),
        })?;

    let unit = match rest.trim_start() {
        "" => LengthUnit::Meter,
        suffix => suffix.parse::<LengthUnit>()?,
    };

    Ok(value * unit.meters_per_unit())
}

/// Like [`parse_length`] but additionally rejects zero.
pub fn parse_positive_length(input: &str) -> Result<f64, LengthParseError> {
    let meters = parse_length(input)?;
    if meters > 0.0 {
        Ok(meters)
    } else {
        Err(LengthParseError::NotPositive)
    }
}

fn is_unsigned_decimal(text: &str) -> bool {
    let mut points = 0;
    for c in text.chars() {
        if c == '.' {
            points += 1;
        } else if !c.is_ascii_digit() {
            return false;
        }
    }
    points <= 1 && text.ends_with(|c: char| c.is_ascii_digit())
}

/// Format a length in meters using the best unit, e.g. `"1.5 m"`, `"15 cm"`.
///
/// Precision is 3 decimals for m, 2 for cm and 1 for mm, with trailing
/// zeros trimmed. This is lossy and meant for display only.
pub fn format_meters(meters: f64) -> String {
    let unit = LengthUnit::best_for(meters);
    let scaled = meters / unit.meters_per_unit();
    let fixed = format!("{:.*}", unit.display_precision(), scaled);
    format!("{} {}", trim_fraction(&fixed), unit)
}

fn trim_fraction(fixed: &str) -> &str {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_parse_units() {
        assert_close(parse_length("150cm").unwrap(), 1.5);
        assert_close(parse_length("2m").unwrap(), 2.0);
        assert_close(parse_length("1000mm").unwrap(), 1.0);
        assert_close(parse_length("3").unwrap(), 3.0);
    }

    #[test]
    fn test_parse_case_and_whitespace() {
        assert_close(parse_length("  25 CM ").unwrap(), 0.25);
        assert_close(parse_length("1.5M").unwrap(), 1.5);
        assert_close(parse_length("\t12\tmm").unwrap(), 0.012);
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_close(parse_length(".5").unwrap(), 0.5);
        assert_close(parse_length("0.25m").unwrap(), 0.25);
        assert!(parse_length("1.").is_err());
        assert!(parse_length("1.2.3").is_err());
    }

    #[test]
    fn test_parse_invalid_inputs() {
        assert_eq!(parse_length(""), Err(LengthParseError::Empty));
        assert_eq!(parse_length("   "), Err(LengthParseError::Empty));
        assert!(matches!(
            parse_length("abc"),
            Err(LengthParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_length("-1m"),
            Err(LengthParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_length("3ft"),
            Err(LengthParseError::UnknownUnit { .. })
        ));
        assert!(parse_length("1e3").is_err());
        assert!(parse_length("m").is_err());
    }

    #[test]
    fn test_parse_positive_length() {
        assert_eq!(parse_positive_length("0m"), Err(LengthParseError::NotPositive));
        assert_close(parse_positive_length("1cm").unwrap(), 0.01);
    }

    #[test]
    fn test_format_best_unit() {
        assert_eq!(format_meters(1.5), "1.5 m");
        assert_eq!(format_meters(0.15), "15 cm");
        assert_eq!(format_meters(0.0012), "1.2 mm");
    }

    #[test]
    fn test_format_trims_zeros() {
        assert_eq!(format_meters(2.0), "2 m");
        assert_eq!(format_meters(1.2344), "1.234 m");
        assert_eq!(format_meters(0.01), "1 cm");
        assert_eq!(format_meters(0.0), "0 mm");
        assert_eq!(format_meters(100.0), "100 m");
    }

    #[test]
    fn test_round_trip_within_precision() {
        for meters in [1.5, 0.15, 0.0012, 3.25, 0.042] {
            let back = parse_length(&format_meters(meters)).unwrap();
            assert!((back - meters).abs() < 1e-3);
        }
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(LengthUnit::Meter.to_string(), "m");
        assert_eq!("CM".parse::<LengthUnit>().unwrap(), LengthUnit::Centimeter);
    }
}
