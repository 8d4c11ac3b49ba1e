// src/gps/mod.rs
//! GGA/RMC sentence decoding into fix records

pub mod coordinate;
pub mod data;
pub mod fields;
pub mod nmea;
pub mod timestamp;

pub use coordinate::to_decimal_degrees;
pub use data::{FixRecord, SentenceKind};
pub use nmea::{parse_fix, parse_sentence, FixParser, Strictness, KNOTS_TO_METERS_PER_SECOND};
pub use timestamp::{compose_timestamp, ReferenceDate};
