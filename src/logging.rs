//! Structured logging for the benchmark toolkit
//!
//! A small logger with leveled console output and an optional JSON format.
//! Probe diagnostics go to stderr so `--output time` stays machine-readable
//! on stdout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::error::{AppError, Result};

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug level - detailed information for debugging
    Debug = 0,
    /// Info level - general application information
    Info = 1,
    /// Warning level - potentially harmful situations
    Warn = 2,
    /// Error level - error events but application can continue
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Warn => "\x1b[33m",
            LogLevel::Error => "\x1b[31m",
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
    /// Single-line format without timestamps
    Compact,
}

/// One structured log record
#[derive(Debug, Clone, Serialize)]
struct LogEntry {
    timestamp: DateTime<Utc>,
    level: LogLevel,
    message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<String, serde_json::Value>,
}

/// Logger writing leveled records to stderr
#[derive(Debug, Clone)]
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
}

impl Logger {
    /// Create a logger from the global CLI flags
    pub fn new(verbose: bool, debug: bool, use_color: bool) -> Self {
        let min_level = if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        Self {
            min_level,
            use_color,
            format: LogFormat::Console,
        }
    }

    /// Switch the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Whether a record at this level would be written
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    /// Log with additional structured fields
    pub fn log_with_fields(
        &self,
        level: LogLevel,
        message: &str,
        fields: BTreeMap<String, serde_json::Value>,
    ) {
        self.log(level, message, fields);
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if !self.would_log(level) {
            return;
        }

        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
            fields,
        };

        let line = match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => {
                serde_json::to_string(&entry).unwrap_or_else(|_| entry.message.clone())
            }
            LogFormat::Compact => format!("{} {}", entry.level.as_str(), entry.message),
        };

        // Logging must never abort the run; a closed stderr is ignored.
        let _ = writeln!(io::stderr(), "{}", line);
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let level = if self.use_color {
            format!(
                "{}{:5}{}",
                entry.level.color_code(),
                entry.level.as_str(),
                LogLevel::reset_code()
            )
        } else {
            format!("{:5}", entry.level.as_str())
        };

        let mut line = format!(
            "{} {} {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            level,
            entry.message
        );

        for (key, value) in &entry.fields {
            line.push_str(&format!(" {}={}", key, value));
        }

        line
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering_and_parsing() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_would_log_thresholds() {
        let quiet = Logger::new(false, false, false);
        assert!(!quiet.would_log(LogLevel::Info));
        assert!(quiet.would_log(LogLevel::Warn));

        let verbose = Logger::new(true, false, false);
        assert!(verbose.would_log(LogLevel::Info));
        assert!(!verbose.would_log(LogLevel::Debug));

        let debug = Logger::new(false, true, false);
        assert!(debug.would_log(LogLevel::Debug));
    }

    #[test]
    fn test_compact_format_builder() {
        let logger = Logger::new(true, false, false).with_format(LogFormat::Compact);
        assert!(logger.would_log(LogLevel::Info));
    }

    #[test]
    fn test_console_format() {
        let logger = Logger::new(true, false, false);
        let mut fields = BTreeMap::new();
        fields.insert("status".to_string(), serde_json::json!(200));
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Info,
            message: "request complete".to_string(),
            fields,
        };
        let line = logger.format_console(&entry);
        assert!(line.contains("INFO"));
        assert!(line.contains("request complete"));
        assert!(line.contains("status=200"));
    }

    #[test]
    fn test_json_entry_serializes() {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Error,
            message: "boom".to_string(),
            fields: BTreeMap::new(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"level\":\"Error\""));
        assert!(json.contains("boom"));
    }
}
