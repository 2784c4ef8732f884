//! Configuration management module

pub mod env;

pub use env::{EnvManager, ENV_CSV, ENV_OUTPUT_DIR};

use crate::error::{AppError, Result};
use crate::models::Protocol;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default results CSV consumed by the analysis subcommands
pub const DEFAULT_CSV: &str = "benchmark_results.csv";

/// Probe output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutputFormat {
    /// Bare elapsed seconds, one line
    Time,
    /// JSON object with time and success flag
    Json,
}

/// Resolved configuration for a single probe request
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Target URL
    pub url: Url,
    /// Protocol to force for the request
    pub protocol: Protocol,
    /// Overall request deadline
    pub timeout: Duration,
    /// Skip TLS certificate verification
    pub insecure: bool,
    /// What to print on stdout
    pub output: ProbeOutputFormat,
}

impl ProbeConfig {
    /// Validate the probe target.
    ///
    /// HTTP/3 runs over QUIC with mandatory TLS, so an `http://` target
    /// is rejected for that protocol.
    pub fn validate(&self) -> Result<()> {
        match self.url.scheme() {
            "https" => {}
            "http" => {
                if self.protocol == Protocol::Http3 {
                    return Err(AppError::validation(
                        "HTTP/3 requires an https:// URL",
                    ));
                }
            }
            other => {
                return Err(AppError::validation(format!(
                    "Unsupported URL scheme '{}', expected http or https",
                    other
                )));
            }
        }

        if self.url.host_str().is_none() {
            return Err(AppError::validation("Probe URL has no host"));
        }

        let secs = self.timeout.as_secs();
        if secs == 0 || secs > 300 {
            return Err(AppError::validation(format!(
                "Timeout must be between 1 and 300 seconds, got {}",
                secs
            )));
        }

        Ok(())
    }

    /// Port to dial, falling back to the scheme default
    pub fn port(&self) -> u16 {
        self.url
            .port()
            .unwrap_or(if self.url.scheme() == "http" { 80 } else { 443 })
    }
}

/// Resolved configuration shared by the analysis subcommands
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Results CSV to read
    pub csv_path: PathBuf,
    /// Directory where reports and charts are written
    pub output_dir: PathBuf,
}

impl AnalysisConfig {
    /// Resolve CLI arguments against environment defaults.
    ///
    /// Precedence: explicit argument, then environment variable, then the
    /// built-in default.
    pub fn resolve(csv: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        let csv_path = csv
            .or_else(|| EnvManager::get(ENV_CSV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV));
        let output_dir = output_dir
            .or_else(|| EnvManager::get(ENV_OUTPUT_DIR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            csv_path,
            output_dir,
        }
    }

    /// Check the input exists and the output directory is usable
    pub fn validate(&self) -> Result<()> {
        if !self.csv_path.exists() {
            return Err(AppError::config(format!(
                "CSV file not found: {}",
                self.csv_path.display()
            )));
        }
        ensure_output_dir(&self.output_dir)
    }

    /// Path of a file inside the output directory
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

/// Create the output directory if it does not exist yet
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(AppError::config(format!(
                "Output path is not a directory: {}",
                dir.display()
            )));
        }
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::config(format!(
            "Failed to create output directory {}: {}",
            dir.display(),
            e
        ))
    })
}
