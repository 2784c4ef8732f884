//! Benchmark record and probe outcome data models

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Transport protocol under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Protocol {
    #[serde(rename = "HTTP/2")]
    Http2,
    #[serde(rename = "HTTP/3")]
    Http3,
}

impl Protocol {
    /// Both protocols, in the order the reports list them
    pub const ALL: [Protocol; 2] = [Protocol::Http2, Protocol::Http3];

    /// Wire label as it appears in the results CSV
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Http2 => "HTTP/2",
            Protocol::Http3 => "HTTP/3",
        }
    }

    /// The other protocol
    pub fn other(&self) -> Protocol {
        match self {
            Protocol::Http2 => Protocol::Http3,
            Protocol::Http3 => Protocol::Http2,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Protocol {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http/2" | "http2" | "h2" => Ok(Protocol::Http2),
            "http/3" | "http3" | "h3" => Ok(Protocol::Http3),
            _ => Err(AppError::parse(format!("Unknown protocol: {}", s))),
        }
    }
}

/// One row of the benchmark results table.
///
/// The table is produced by the external benchmark harness and never
/// mutated here; this type only mirrors its columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Protocol label ("HTTP/2" or "HTTP/3")
    pub protocol: Protocol,

    /// Simulated latency label, e.g. "50ms"
    pub latency: String,

    /// Wall-clock duration of the request in seconds
    pub time_total: f64,

    /// Transfer rate in KB/s
    pub speed_kbps: f64,

    /// 1 when the request completed, 0 otherwise
    pub success: u8,

    /// Negotiated HTTP version as reported by the harness, if recorded
    #[serde(default)]
    pub http_version: Option<String>,
}

impl BenchmarkRecord {
    /// Parse the latency label ("50ms") into milliseconds
    pub fn latency_ms(&self) -> Result<u32> {
        parse_latency_label(&self.latency)
    }

    /// Whether this row represents a completed request
    pub fn is_successful(&self) -> bool {
        self.success == 1
    }

    /// Transferred size implied by time and rate, in KB
    pub fn transferred_kb(&self) -> f64 {
        self.time_total * self.speed_kbps
    }
}

/// Parse a latency label like "50ms" (or a bare "50") into milliseconds
pub fn parse_latency_label(label: &str) -> Result<u32> {
    let trimmed = label.trim();
    let digits = trimmed.strip_suffix("ms").unwrap_or(trimmed);
    digits
        .parse::<u32>()
        .map_err(|_| AppError::parse(format!("Invalid latency label: {}", label)))
}

/// Outcome of a single probe request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Protocol that was probed
    pub protocol: Protocol,

    /// Wall-clock duration of the request
    pub elapsed: Duration,

    /// Whether the request completed
    pub success: bool,

    /// HTTP status code, 0 when the request failed
    pub http_status: u16,

    /// Response body size in bytes
    pub bytes_read: u64,

    /// Negotiated HTTP version, if the request completed
    pub http_version: Option<String>,

    /// When the probe was executed
    pub timestamp: DateTime<Utc>,

    /// Error message if the probe failed
    pub error_message: Option<String>,
}

impl ProbeOutcome {
    /// Create a successful probe outcome
    pub fn success(
        protocol: Protocol,
        elapsed: Duration,
        http_status: u16,
        bytes_read: u64,
        http_version: String,
    ) -> Self {
        Self {
            protocol,
            elapsed,
            success: true,
            http_status,
            bytes_read,
            http_version: Some(http_version),
            timestamp: Utc::now(),
            error_message: None,
        }
    }

    /// Create a failed probe outcome (sentinel zero elapsed time)
    pub fn failed(protocol: Protocol, error_message: String) -> Self {
        Self {
            protocol,
            elapsed: Duration::ZERO,
            success: false,
            http_status: 0,
            bytes_read: 0,
            http_version: None,
            timestamp: Utc::now(),
            error_message: Some(error_message),
        }
    }

    /// Create a timed-out probe outcome (sentinel zero elapsed time)
    pub fn timed_out(protocol: Protocol, timeout: Duration) -> Self {
        Self {
            protocol,
            elapsed: Duration::ZERO,
            success: false,
            http_status: 0,
            bytes_read: 0,
            http_version: None,
            timestamp: Utc::now(),
            error_message: Some(format!(
                "Request timed out after {}s",
                timeout.as_secs()
            )),
        }
    }

    /// Elapsed time in seconds; 0.0 is the sentinel failure value
    pub fn time_total(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Transfer rate in KB/s, 0.0 when nothing was transferred
    pub fn speed_kbps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.bytes_read as f64 / 1024.0) / secs
        } else {
            0.0
        }
    }

    /// Format for `--output time`: elapsed seconds, sentinel 0.000000 on failure
    pub fn format_time(&self) -> String {
        format!("{:.6}", self.time_total())
    }

    /// Format for `--output json`
    pub fn format_json(&self) -> String {
        serde_json::json!({
            "time_total": self.time_total(),
            "success": self.success,
        })
        .to_string()
    }
}
