// src/gps/data.rs
//! Fix record produced from a single NMEA sentence

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Sentence types the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentenceKind {
    /// Global Positioning System Fix Data
    Gga,
    /// Recommended Minimum Specific GNSS Data
    Rmc,
}

impl SentenceKind {
    /// Identify a sentence by its type tag (field 0)
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub const ALL: [SentenceKind; 2] = [SentenceKind::Gga, SentenceKind::Rmc];

    pub fn tag(&self) -> &'static str {
        match self {
            SentenceKind::Gga => "$GPGGA",
            SentenceKind::Rmc => "$GPRMC",
        }
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceKind::Gga => write!(f, "GGA"),
            SentenceKind::Rmc => write!(f, "RMC"),
        }
    }
}

/// A normalized position fix.
///
/// GGA records carry an altitude and never a speed, RMC records carry a speed
/// and never an altitude. The constructors are the only way to build one, so a
/// record is always complete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FixRecord {
    sentence: SentenceKind,
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
    speed: Option<f64>,
    timestamp: DateTime<Utc>,
}

impl FixRecord {
    pub fn from_gga(latitude: f64, longitude: f64, altitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            sentence: SentenceKind::Gga,
            latitude,
            longitude,
            altitude: Some(altitude),
            speed: None,
            timestamp,
        }
    }

    pub fn from_rmc(latitude: f64, longitude: f64, speed: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            sentence: SentenceKind::Rmc,
            latitude,
            longitude,
            altitude: None,
            speed: Some(speed),
            timestamp,
        }
    }

    pub fn sentence(&self) -> SentenceKind {
        self.sentence
    }

    /// Decimal degrees, negative south of the equator
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Decimal degrees, negative west of Greenwich
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Meters, GGA only
    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    /// Ground speed in m/s, RMC only
    pub fn speed(&self) -> Option<f64> {
        self.speed
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Seconds since the Unix epoch, including the sub-second part
    pub fn unix_timestamp(&self) -> f64 {
        self.timestamp.timestamp() as f64 + f64::from(self.timestamp.timestamp_subsec_nanos()) / 1e9
    }
}
