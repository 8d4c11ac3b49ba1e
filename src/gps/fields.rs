// src/gps/fields.rs
//! Positional field access shared by the sentence parsers

use super::data::SentenceKind;
use crate::error::FixError;

/// Fetch field `index`, failing when the sentence is too short to have it
pub fn get<'a>(parts: &[&'a str], index: usize, sentence: SentenceKind) -> Result<&'a str, FixError> {
    parts
        .get(index)
        .copied()
        .ok_or_else(|| FixError::InsufficientFields {
            sentence,
            expected: index + 1,
            found: parts.len(),
        })
}

pub fn require_len(parts: &[&str], expected: usize, sentence: SentenceKind) -> Result<(), FixError> {
    if parts.len() < expected {
        return Err(FixError::InsufficientFields {
            sentence,
            expected,
            found: parts.len(),
        });
    }
    Ok(())
}

/// Fail on the first named field that is missing or empty
pub fn require_present(
    parts: &[&str],
    required: &[(usize, &'static str)],
    sentence: SentenceKind,
) -> Result<(), FixError> {
    for &(index, name) in required {
        let value = get(parts, index, sentence)?;
        if value.is_empty() {
            return Err(FixError::malformed(name, value));
        }
    }
    Ok(())
}

/// Parse a finite float, naming the field in the error
pub fn parse_float(value: &str, field: &'static str) -> Result<f64, FixError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FixError::malformed(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_past_end() {
        let parts = ["$GPRMC", "123519"];
        assert_eq!(get(&parts, 1, SentenceKind::Rmc), Ok("123519"));
        assert_eq!(
            get(&parts, 5, SentenceKind::Rmc),
            Err(FixError::InsufficientFields {
                sentence: SentenceKind::Rmc,
                expected: 6,
                found: 2,
            })
        );
    }

    #[test]
    fn test_require_present_names_empty_field() {
        let parts = ["$GPGGA", "123519", "", "N"];
        let err = require_present(&parts, &[(1, "time"), (2, "latitude")], SentenceKind::Gga)
            .unwrap_err();
        assert_eq!(err, FixError::malformed("latitude", ""));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("545.4", "altitude"), Ok(545.4));
        assert_eq!(parse_float(" 30.0", "altitude"), Ok(30.0));
        assert!(parse_float("", "altitude").is_err());
        assert!(parse_float("M", "altitude").is_err());
        assert!(parse_float("NaN", "altitude").is_err());
        assert!(parse_float("inf", "altitude").is_err());
    }
}
