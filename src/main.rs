// src/main.rs
//! nmea-fix - decode NMEA GGA/RMC sentences from arguments, files, stdin or a serial port

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use nmea_fix::{
    config::FixConfig,
    logging::{self, LogSettings},
    output::{self, OutputFormat},
    stream::{self, FixStream},
    FixParser, ReferenceDate,
};
use std::{
    io::{self, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    logging::init(&LogSettings::from_verbosity(
        &config.log_level,
        cli.verbose,
        cli.quiet,
        cli.log_format,
    ))?;

    let parser = build_parser(&cli, &config);
    let format = cli.format.unwrap_or(config.output);

    let result = match &cli.command {
        Commands::Parse { sentences } => parse_sentences(&parser, format, sentences),
        Commands::Read { file } => match file {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                stream_lines(parser, format, BufReader::new(file)).await
            }
            None => stream_lines(parser, format, BufReader::new(tokio::io::stdin())).await,
        },
        Commands::Serial { port, baudrate, save } => {
            let port = match port.clone().or_else(|| config.serial_port.clone()) {
                Some(port) => port,
                None => bail!("No serial port given; pass --port or set serial_port in the config"),
            };
            let baudrate = baudrate.unwrap_or(config.serial_baudrate);

            if *save {
                config.update_serial(port.clone(), baudrate);
                save_config(&cli, &config)?;
            }

            let reader = stream::open_serial(&port, baudrate)?;
            stream_lines(parser, format, reader).await
        }
        Commands::ListPorts => list_ports(),
    };

    if let Err(ref e) = result {
        error!(error = %e, "command failed");
    }

    result
}

fn load_config(cli: &Cli) -> Result<FixConfig> {
    match &cli.config {
        Some(path) => FixConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(FixConfig::load().unwrap_or_default()),
    }
}

fn save_config(cli: &Cli, config: &FixConfig) -> Result<()> {
    match &cli.config {
        Some(path) => config.save_to(path),
        None => config.save(),
    }
    .context("Failed to save config")
}

/// Command line flags override the configuration file
fn build_parser(cli: &Cli, config: &FixConfig) -> FixParser {
    let mut parser = config.parser();
    if let Some(strictness) = cli.strictness {
        parser = parser.with_strictness(strictness);
    }
    if let Some(date) = cli.date {
        parser = parser.with_reference_date(ReferenceDate::Fixed(date));
    }
    parser
}

fn parse_sentences(parser: &FixParser, format: OutputFormat, sentences: &[String]) -> Result<()> {
    let mut out = io::stdout().lock();
    let mut accepted = 0usize;

    for sentence in sentences {
        if let Some(record) = parser.parse_or_none(sentence.trim()) {
            writeln!(out, "{}", output::render(&record, format)?)?;
            accepted += 1;
        }
    }

    if accepted == 0 {
        bail!("No sentence produced a fix");
    }
    Ok(())
}

/// Stream until EOF; Ctrl+C clears the running flag and the stream winds down
async fn stream_lines<R>(parser: FixParser, format: OutputFormat, reader: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let running = Arc::new(AtomicBool::new(true));
    let fix_stream = FixStream::new_with_shared(parser, format, Arc::clone(&running));

    // Set up Ctrl+C handler
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted, shutting down");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    let mut out = io::stdout();
    fix_stream.run(reader, &mut out).await?;
    Ok(())
}

fn list_ports() -> Result<()> {
    let ports = stream::list_serial_ports().context("Failed to list serial ports")?;

    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {} - {:?}", port.port_name, port.port_type);
        }
    }

    Ok(())
}
