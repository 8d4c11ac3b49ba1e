// src/lib.rs
//! NMEA Fix Library
//!
//! Decodes NMEA 0183 GGA and RMC sentences into normalized fix records,
//! with a small streaming layer for files, stdin and serial ports.

pub mod config;
pub mod error;
pub mod gps;
pub mod logging;
pub mod output;
pub mod stream;

// Re-export main types for convenience
pub use error::{Error, FixError, FixErrorKind, Result};
pub use gps::{parse_fix, parse_sentence, FixParser, FixRecord, ReferenceDate, SentenceKind, Strictness};
pub use stream::{FixStream, StreamStats};
