// src/error.rs
//! Error types for the fix parser and the tooling around it

use crate::gps::SentenceKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single sentence did not produce a fix record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixError {
    /// A required field is empty or not parseable as the expected number
    #[error("malformed {field} field: {value:?}")]
    MalformedField { field: &'static str, value: String },

    #[error("{sentence} sentence needs at least {expected} fields, found {found}")]
    InsufficientFields {
        sentence: SentenceKind,
        expected: usize,
        found: usize,
    },

    #[error("unknown sentence type: {0:?}")]
    UnknownSentenceType(String),

    /// The time-of-day and reference date did not combine into a valid timestamp
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),
}

/// Fieldless category of a [`FixError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixErrorKind {
    MalformedField,
    InsufficientFields,
    UnknownSentenceType,
    MalformedTimestamp,
}

impl FixError {
    pub(crate) fn malformed(field: &'static str, value: &str) -> Self {
        FixError::MalformedField {
            field,
            value: value.to_string(),
        }
    }

    pub fn kind(&self) -> FixErrorKind {
        match self {
            FixError::MalformedField { .. } => FixErrorKind::MalformedField,
            FixError::InsufficientFields { .. } => FixErrorKind::InsufficientFields,
            FixError::UnknownSentenceType(_) => FixErrorKind::UnknownSentenceType,
            FixError::MalformedTimestamp(_) => FixErrorKind::MalformedTimestamp,
        }
    }
}

/// Errors from the streaming, serial and configuration layers
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial error: {0}")]
    Serial(#[from] tokio_serial::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Fix(#[from] FixError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = FixError::malformed("latitude", "");
        assert_eq!(err.kind(), FixErrorKind::MalformedField);

        let err = FixError::UnknownSentenceType("$GPZZZ".to_string());
        assert_eq!(err.kind(), FixErrorKind::UnknownSentenceType);
    }

    #[test]
    fn test_display_messages() {
        let err = FixError::InsufficientFields {
            sentence: SentenceKind::Rmc,
            expected: 10,
            found: 4,
        };
        assert_eq!(err.to_string(), "RMC sentence needs at least 10 fields, found 4");

        let err = FixError::malformed("altitude", "abc");
        assert_eq!(err.to_string(), "malformed altitude field: \"abc\"");
    }

    #[test]
    fn test_fix_error_converts_into_crate_error() {
        let err: Error = FixError::MalformedTimestamp("99".to_string()).into();
        assert!(matches!(err, Error::Fix(FixError::MalformedTimestamp(_))));
    }
}
