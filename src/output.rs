// src/output.rs
//! Rendering fix records for the command line

use crate::gps::FixRecord;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Aligned human-readable columns
    Text,
}

/// Render a record as a single output line (no trailing newline)
pub fn render(record: &FixRecord, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(record),
        OutputFormat::Text => Ok(render_text(record)),
    }
}

fn render_text(record: &FixRecord) -> String {
    let detail = match (record.altitude(), record.speed()) {
        (Some(altitude), _) => format!("alt {:.1} m", altitude),
        (_, Some(speed)) => format!("spd {:.2} m/s", speed),
        (None, None) => String::new(),
    };

    format!(
        "{}  {}  {}  {}  {}",
        record.sentence(),
        format_coordinate(record.latitude()),
        format_coordinate(record.longitude()),
        detail,
        record.timestamp().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Format coordinate for display
pub fn format_coordinate(coord: f64) -> String {
    format!("{:>12.6}", coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record() -> FixRecord {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 34, 56).unwrap();
        FixRecord::from_gga(49.27425, -123.185333, 30.0, ts)
    }

    #[test]
    fn test_text_line() {
        let line = render(&record(), OutputFormat::Text).unwrap();
        assert_eq!(
            line,
            "GGA     49.274250   -123.185333  alt 30.0 m  2024-06-01T12:34:56.000Z"
        );
    }

    #[test]
    fn test_json_line() {
        let line = render(&record(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["sentence"], "GGA");
        assert_eq!(value["altitude"], 30.0);
        assert!(value["speed"].is_null());
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_rmc_text_shows_speed() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let fix = FixRecord::from_rmc(0.0, 0.0, 1.5, ts);
        let line = render(&fix, OutputFormat::Text).unwrap();
        assert!(line.contains("spd 1.50 m/s"));
    }
}
