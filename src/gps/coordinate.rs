// src/gps/coordinate.rs
//! Degree-minute to decimal-degree conversion

use super::fields;
use crate::error::FixError;

/// Convert an NMEA `DDDMM.mmmm` value and hemisphere letter to signed decimal degrees.
///
/// The last two integer digits are minutes, everything before them is degrees.
/// `S` and `W` negate the result, any other letter leaves it positive.
pub fn to_decimal_degrees(raw: &str, hemisphere: &str) -> Result<f64, FixError> {
    convert_field("coordinate", raw, hemisphere)
}

pub(crate) fn convert_field(field: &'static str, raw: &str, hemisphere: &str) -> Result<f64, FixError> {
    if raw.is_empty() {
        return Err(FixError::malformed(field, raw));
    }
    let value = fields::parse_float(raw, field)?;

    let degrees = (value / 100.0).floor();
    let minutes = value.rem_euclid(100.0);
    let decimal = degrees + minutes / 60.0;

    match hemisphere {
        "S" | "W" => Ok(-decimal),
        _ => Ok(decimal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-7,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_latitude_north() {
        assert_close(to_decimal_degrees("4916.45", "N").unwrap(), 49.0 + 16.45 / 60.0);
    }

    #[test]
    fn test_longitude_west_is_negative() {
        assert_close(
            to_decimal_degrees("12311.12", "W").unwrap(),
            -(123.0 + 11.12 / 60.0),
        );
        assert_close(to_decimal_degrees("14507.036", "W").unwrap(), -145.11726666666667);
    }

    #[test]
    fn test_south_is_negative() {
        assert_close(to_decimal_degrees("3754.587", "S").unwrap(), -37.90978333333333);
    }

    #[test]
    fn test_other_letters_stay_positive() {
        assert!(to_decimal_degrees("3754.587", "E").unwrap() > 0.0);
        assert!(to_decimal_degrees("3754.587", "").unwrap() > 0.0);
        assert!(to_decimal_degrees("3754.587", "s").unwrap() > 0.0);
    }

    #[test]
    fn test_zero() {
        assert_eq!(to_decimal_degrees("0000.0000", "N").unwrap(), 0.0);
        assert_eq!(to_decimal_degrees("00000.0000", "W").unwrap(), 0.0);
    }

    #[test]
    fn test_minutes_only() {
        assert_close(to_decimal_degrees("0030.0", "N").unwrap(), 0.5);
    }

    #[test]
    fn test_malformed_input() {
        let err = to_decimal_degrees("", "N").unwrap_err();
        assert_eq!(err, FixError::malformed("coordinate", ""));
        assert!(to_decimal_degrees("49x16", "N").is_err());
        assert!(to_decimal_degrees("nan", "N").is_err());
    }

    #[test]
    fn test_field_name_in_error() {
        let err = convert_field("latitude", "abc", "N").unwrap_err();
        assert_eq!(err, FixError::malformed("latitude", "abc"));
    }
}
