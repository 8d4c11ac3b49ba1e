// src/gps/nmea.rs
//! NMEA sentence parsing

use super::{
    coordinate,
    data::{FixRecord, SentenceKind},
    fields,
    timestamp::{self, ReferenceDate},
};
use crate::error::FixError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Knots to meters per second
pub const KNOTS_TO_METERS_PER_SECOND: f64 = 0.514444;

/// How much validation happens before fields are converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Check field count and required fields up front; an empty RMC speed reads as 0.0
    #[default]
    Strict,
    /// Only the fields actually read must exist and parse
    Lenient,
}

/// Positional layout of a supported sentence
struct Layout {
    sentence: SentenceKind,
    min_fields: usize,
    time: usize,
    latitude: (usize, usize),
    longitude: (usize, usize),
    required: &'static [(usize, &'static str)],
}

const GGA: Layout = Layout {
    sentence: SentenceKind::Gga,
    min_fields: 10,
    time: 1,
    latitude: (2, 3),
    longitude: (4, 5),
    required: &[(1, "time"), (2, "latitude"), (4, "longitude"), (9, "altitude")],
};

const GGA_ALTITUDE: usize = 9;

const RMC: Layout = Layout {
    sentence: SentenceKind::Rmc,
    min_fields: 10,
    time: 1,
    latitude: (3, 4),
    longitude: (5, 6),
    required: &[(1, "time"), (3, "latitude"), (5, "longitude")],
};

const RMC_SPEED: usize = 7;

/// Stateless GGA/RMC parser.
///
/// Apart from reading the clock for [`ReferenceDate::SystemClock`] it has no
/// side effects, so one parser can be shared freely between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixParser {
    strictness: Strictness,
    reference_date: ReferenceDate,
}

impl FixParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn with_reference_date(mut self, reference_date: ReferenceDate) -> Self {
        self.reference_date = reference_date;
        self
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    pub fn reference_date(&self) -> ReferenceDate {
        self.reference_date
    }

    /// Parse one sentence into a complete fix record
    pub fn parse(&self, sentence: &str) -> Result<FixRecord, FixError> {
        let parts: Vec<&str> = sentence.split(',').collect();
        let tag = parts.first().copied().unwrap_or_default();

        let record = match SentenceKind::from_tag(tag) {
            Some(SentenceKind::Gga) => self.parse_gga(&parts)?,
            Some(SentenceKind::Rmc) => self.parse_rmc(&parts)?,
            None => return Err(FixError::UnknownSentenceType(tag.to_string())),
        };

        debug!(
            sentence = %record.sentence(),
            latitude = record.latitude(),
            longitude = record.longitude(),
            "parsed fix"
        );
        Ok(record)
    }

    /// Parse one sentence, logging and discarding any error
    pub fn parse_or_none(&self, sentence: &str) -> Option<FixRecord> {
        match self.parse(sentence) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), sentence, "rejected NMEA sentence");
                None
            }
        }
    }

    /// Parse GPGGA (Global Positioning System Fix Data) sentence
    fn parse_gga(&self, parts: &[&str]) -> Result<FixRecord, FixError> {
        self.validate(parts, &GGA)?;

        let (latitude, longitude) = position(parts, &GGA)?;
        let altitude = fields::parse_float(fields::get(parts, GGA_ALTITUDE, GGA.sentence)?, "altitude")?;
        let timestamp = self.timestamp(parts, &GGA)?;

        Ok(FixRecord::from_gga(latitude, longitude, altitude, timestamp))
    }

    /// Parse GPRMC (Recommended Minimum Course) sentence
    fn parse_rmc(&self, parts: &[&str]) -> Result<FixRecord, FixError> {
        self.validate(parts, &RMC)?;

        let (latitude, longitude) = position(parts, &RMC)?;
        let raw_speed = fields::get(parts, RMC_SPEED, RMC.sentence)?;
        let speed = match self.strictness {
            Strictness::Strict if raw_speed.is_empty() => 0.0,
            _ => fields::parse_float(raw_speed, "speed")? * KNOTS_TO_METERS_PER_SECOND,
        };
        let timestamp = self.timestamp(parts, &RMC)?;

        Ok(FixRecord::from_rmc(latitude, longitude, speed, timestamp))
    }

    fn validate(&self, parts: &[&str], layout: &Layout) -> Result<(), FixError> {
        if self.strictness == Strictness::Lenient {
            return Ok(());
        }
        fields::require_len(parts, layout.min_fields, layout.sentence)?;
        fields::require_present(parts, layout.required, layout.sentence)
    }

    fn timestamp(&self, parts: &[&str], layout: &Layout) -> Result<chrono::DateTime<chrono::Utc>, FixError> {
        let time_of_day = fields::get(parts, layout.time, layout.sentence)?;
        timestamp::compose_timestamp(time_of_day, self.reference_date.resolve())
    }
}

fn position(parts: &[&str], layout: &Layout) -> Result<(f64, f64), FixError> {
    let (lat_index, lat_hemisphere) = layout.latitude;
    let (lon_index, lon_hemisphere) = layout.longitude;

    let latitude = coordinate::convert_field(
        "latitude",
        fields::get(parts, lat_index, layout.sentence)?,
        fields::get(parts, lat_hemisphere, layout.sentence)?,
    )?;
    let longitude = coordinate::convert_field(
        "longitude",
        fields::get(parts, lon_index, layout.sentence)?,
        fields::get(parts, lon_hemisphere, layout.sentence)?,
    )?;

    Ok((latitude, longitude))
}

/// Parse with the default strict parser and today's date
pub fn parse_sentence(sentence: &str) -> Result<FixRecord, FixError> {
    FixParser::default().parse(sentence)
}

/// Parse with the default parser, collapsing every failure to `None`
pub fn parse_fix(sentence: &str) -> Option<FixRecord> {
    FixParser::default().parse_or_none(sentence)
}
