// src/config.rs
//! Configuration stored as JSON in the user's config directory

use crate::{
    error::{Error, Result},
    gps::{FixParser, ReferenceDate, Strictness},
    output::OutputFormat,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixConfig {
    pub strictness: Strictness,
    /// Date stamped onto every fix; today's UTC date when unset
    pub reference_date: Option<NaiveDate>,
    pub output: OutputFormat,
    pub serial_port: Option<String>,
    pub serial_baudrate: u32,
    pub log_level: String,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::Strict,
            reference_date: None,
            output: OutputFormat::Json,
            serial_port: None,
            serial_baudrate: 9600,
            log_level: "info".to_string(),
        }
    }
}

impl FixConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {}: {}", path.display(), e)))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// `$HOME/.config/nmea-fix/config.json`
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| Error::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("nmea-fix").join("config.json"))
    }

    /// Build the parser described by this configuration
    pub fn parser(&self) -> FixParser {
        FixParser::new()
            .with_strictness(self.strictness)
            .with_reference_date(ReferenceDate::from(self.reference_date))
    }

    /// Update serial port settings
    pub fn update_serial(&mut self, port: String, baudrate: u32) {
        self.serial_port = Some(port);
        self.serial_baudrate = baudrate;
    }
}
