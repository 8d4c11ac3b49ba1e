// src/stream.rs
//! Line-oriented sentence streaming from readers and serial ports

use crate::{
    error::{Error, Result},
    gps::FixParser,
    output::{self, OutputFormat},
};
use serde::Serialize;
use std::{
    io::{ErrorKind, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_serial::{SerialPortBuilderExt, SerialPortInfo, SerialStream};
use tracing::{info, warn};

const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Counters for one streaming run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    pub lines: u64,
    pub accepted: u64,
    pub rejected: u64,
}

/// Feeds sentences from a reader through a [`FixParser`] and writes the records out
pub struct FixStream {
    parser: FixParser,
    format: OutputFormat,
    running: Arc<AtomicBool>,
}

impl FixStream {
    pub fn new(parser: FixParser, format: OutputFormat) -> Self {
        Self::new_with_shared(parser, format, Arc::new(AtomicBool::new(true)))
    }

    /// Create a stream that stops when `running` is cleared elsewhere
    pub fn new_with_shared(parser: FixParser, format: OutputFormat, running: Arc<AtomicBool>) -> Self {
        Self {
            parser,
            format,
            running,
        }
    }

    /// Read until EOF or until the stream is stopped
    pub async fn run<R, W>(&self, mut reader: R, out: &mut W) -> Result<StreamStats>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut stats = StreamStats::default();
        let mut line = String::new();

        while self.running.load(Ordering::Relaxed) {
            line.clear();
            let read = tokio::select! {
                read = reader.read_line(&mut line) => read,
                _ = self.stopped() => break,
            };
            match read {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let sentence = line.trim();
                    if sentence.is_empty() {
                        continue;
                    }
                    stats.lines += 1;

                    match self.parser.parse_or_none(sentence) {
                        Some(record) => {
                            stats.accepted += 1;
                            writeln!(out, "{}", output::render(&record, self.format)?)?;
                            out.flush()?;
                        }
                        None => stats.rejected += 1,
                    }
                }
                // Line noise on a serial link is not fatal
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    stats.lines += 1;
                    stats.rejected += 1;
                    warn!(error = %e, "skipping undecodable line");
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }

        info!(
            lines = stats.lines,
            accepted = stats.accepted,
            rejected = stats.rejected,
            "stream finished"
        );
        Ok(stats)
    }

    /// Resolves once the running flag is cleared
    async fn stopped(&self) {
        while self.is_running() {
            tokio::time::sleep(STOP_POLL_INTERVAL).await;
        }
    }

    /// Stop the stream, abandoning any partially read line
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

/// Open a GPS device on a serial port as a line reader
pub fn open_serial(port: &str, baudrate: u32) -> Result<BufReader<SerialStream>> {
    info!(port, baudrate, "connecting to GPS");

    let serial = tokio_serial::new(port, baudrate)
        .timeout(Duration::from_millis(1000))
        .open_native_async()
        .map_err(|e| Error::Connection(format!("Failed to open serial port {}: {}", port, e)))?;

    info!(port, "connected");
    Ok(BufReader::new(serial))
}

/// List available serial ports
pub fn list_serial_ports() -> Result<Vec<SerialPortInfo>> {
    Ok(tokio_serial::available_ports()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::ReferenceDate;
    use chrono::NaiveDate;

    fn parser() -> FixParser {
        FixParser::new().with_reference_date(ReferenceDate::Fixed(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_counts_and_output() {
        let input = "$GPGGA,123456.78,4916.45,N,12311.12,W,1,12,0.5,30.0,M,0.0,M,,*47\r\n\
                     \r\n\
                     $GPZZZ,1,2,3\n\
                     $GPRMC,123519.487,A,3754.587,N,14507.036,W,000.0,360.0,120419,,,D\n";
        let stream = FixStream::new(parser(), OutputFormat::Json);
        let mut out = Vec::new();

        let stats = stream.run(input.as_bytes(), &mut out).await.unwrap();

        assert_eq!(
            stats,
            StreamStats {
                lines: 3,
                accepted: 2,
                rejected: 1,
            }
        );
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"sentence\":\"GGA\""));
        assert!(lines[1].contains("\"sentence\":\"RMC\""));
    }

    #[tokio::test]
    async fn test_invalid_utf8_skipped() {
        let mut input = b"\xff\xfe garbage\n".to_vec();
        input.extend_from_slice(b"$GPRMC,000000.000,V,0000.0000,N,00000.0000,W,000.0,000.0,010101,,,D\n");
        let stream = FixStream::new(parser(), OutputFormat::Text);
        let mut out = Vec::new();

        let stats = stream.run(input.as_slice(), &mut out).await.unwrap();

        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 1);
    }

    #[tokio::test]
    async fn test_stopped_stream_reads_nothing() {
        let running = Arc::new(AtomicBool::new(true));
        let stream = FixStream::new_with_shared(parser(), OutputFormat::Json, Arc::clone(&running));
        stream.stop();
        assert!(!running.load(Ordering::Relaxed));
        assert!(!stream.is_running());

        let mut out = Vec::new();
        let stats = stream
            .run("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394\n".as_bytes(), &mut out)
            .await
            .unwrap();
        assert_eq!(stats, StreamStats::default());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_stop_interrupts_blocked_read() {
        // Writer half stays open and silent, so the read never completes on its own
        let (client, _writer) = tokio::io::duplex(64);
        let running = Arc::new(AtomicBool::new(true));
        let stream = FixStream::new_with_shared(parser(), OutputFormat::Json, Arc::clone(&running));

        let flag = Arc::clone(&running);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(false, Ordering::Relaxed);
        });

        let mut out = Vec::new();
        let stats = tokio::time::timeout(Duration::from_secs(5), stream.run(BufReader::new(client), &mut out))
            .await
            .expect("stream should stop once the flag is cleared")
            .unwrap();
        assert_eq!(stats, StreamStats::default());
    }
}
