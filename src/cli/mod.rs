//! Command-line interface module

use crate::config::{ProbeConfig, ProbeOutputFormat};
use crate::error::{AppError, Result};
use crate::models::Protocol;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// HTTP Transport Benchmark - probe and analyze HTTP/2 vs HTTP/3 performance
#[derive(Parser, Debug, Clone)]
#[command(name = "htb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Force colored output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Issue one timed GET request over the chosen protocol
    Probe {
        /// Target URL
        url: String,

        /// Protocol to force (http2, http3)
        #[arg(short, long, default_value = "http3")]
        protocol: String,

        /// Request timeout in seconds
        #[arg(short, long, value_parser = parse_duration, default_value = "10")]
        timeout: u64,

        /// Skip TLS certificate verification (for self-signed test servers)
        #[arg(short = 'k', long)]
        insecure: bool,

        /// Output format on stdout
        #[arg(short, long, value_enum, default_value = "time")]
        output: ProbeOutput,
    },

    /// Check a results CSV for plausibility before analysis
    Validate {
        /// Results CSV to check
        #[arg(short, long, env = "BENCHMARK_CSV")]
        csv: Option<PathBuf>,
    },

    /// Write the detailed comparison report
    Report {
        /// Results CSV to analyze
        #[arg(short, long, env = "BENCHMARK_CSV")]
        csv: Option<PathBuf>,

        /// Directory for the report file
        #[arg(short, long, env = "BENCHMARK_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Render charts from a results CSV
    Chart {
        /// Results CSV to analyze
        #[arg(short, long, env = "BENCHMARK_CSV")]
        csv: Option<PathBuf>,

        /// Directory for the chart files
        #[arg(short, long, env = "BENCHMARK_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Chart kinds to render (default: all)
        #[arg(short = 'k', long = "kind", value_enum)]
        kinds: Vec<ChartKindArg>,
    },

    /// Compare percentile spreads between two benchmark runs
    Compare {
        /// Baseline results CSV
        baseline: PathBuf,

        /// Current results CSV
        current: PathBuf,

        /// Label for the baseline run
        #[arg(long, default_value = "baseline")]
        baseline_label: String,

        /// Label for the current run
        #[arg(long, default_value = "current")]
        current_label: String,

        /// Directory for the comparison chart
        #[arg(short, long, env = "BENCHMARK_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },
}

/// Probe stdout format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutput {
    /// Bare elapsed seconds
    Time,
    /// JSON object with time and success flag
    Json,
}

impl From<ProbeOutput> for ProbeOutputFormat {
    fn from(value: ProbeOutput) -> Self {
        match value {
            ProbeOutput::Time => ProbeOutputFormat::Time,
            ProbeOutput::Json => ProbeOutputFormat::Json,
        }
    }
}

/// Chart kinds the `chart` subcommand can render
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKindArg {
    /// Mean response time with a one-standard-deviation band
    ResponseTime,
    /// Standard deviation per latency condition
    StdDev,
    /// P5 to P95 percentile range
    PercentileRange,
    /// Box-and-whisker distribution per condition
    Boxplot,
    /// Raw sample scatter with distribution histograms
    RawData,
    /// Speed, relative difference and degradation overview
    Overview,
}

impl ChartKindArg {
    /// Every chart kind, the default set for `chart`
    pub const ALL: [ChartKindArg; 6] = [
        ChartKindArg::ResponseTime,
        ChartKindArg::StdDev,
        ChartKindArg::PercentileRange,
        ChartKindArg::Boxplot,
        ChartKindArg::RawData,
        ChartKindArg::Overview,
    ];
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<()> {
        if self.color && self.no_color {
            return Err(AppError::config(
                "Cannot specify both --color and --no-color",
            ));
        }
        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

/// Build a probe configuration from the `probe` subcommand arguments
pub fn build_probe_config(
    url: &str,
    protocol: &str,
    timeout_secs: u64,
    insecure: bool,
    output: ProbeOutput,
) -> Result<ProbeConfig> {
    let url = Url::parse(url)
        .map_err(|e| AppError::validation(format!("Invalid URL '{}': {}", url, e)))?;
    let protocol: Protocol = protocol.parse()?;

    let config = ProbeConfig {
        url,
        protocol,
        timeout: Duration::from_secs(timeout_secs),
        insecure,
        output: output.into(),
    };
    config.validate()?;
    Ok(config)
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> std::result::Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > 300 {
                Err("Duration cannot exceed 300 seconds".to_string())
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    std::env::var("TERM").is_ok() || std::env::var("COLORTERM").is_ok()
}
