// src/cli.rs
//! Command line arguments

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use nmea_fix::{logging::LogFormat, output::OutputFormat, Strictness};
use std::path::PathBuf;

/// Decode NMEA 0183 GGA/RMC sentences into fix records
#[derive(Parser, Debug)]
#[command(name = "nmea-fix", author, version, about)]
pub struct Cli {
    /// Configuration file (defaults to ~/.config/nmea-fix/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Validation policy for incoming sentences
    #[arg(long, value_enum, global = true)]
    pub strictness: Option<Strictness>,

    /// Date to attach to sentence times instead of today's UTC date
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Output format for fix records
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse sentences given as arguments
    Parse {
        #[arg(required = true, value_name = "SENTENCE")]
        sentences: Vec<String>,
    },

    /// Parse one sentence per line from a file or stdin
    Read {
        /// Input file; stdin when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Parse sentences from a GPS on a serial port until EOF or Ctrl+C
    Serial {
        /// Serial port, e.g. /dev/ttyUSB0 or COM3
        #[arg(short, long)]
        port: Option<String>,

        #[arg(short, long)]
        baudrate: Option<u32>,

        /// Remember the port and baud rate in the configuration file
        #[arg(long)]
        save: bool,
    },

    /// List available serial ports
    ListPorts,
}
