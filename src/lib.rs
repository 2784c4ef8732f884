//! HTTP Transport Benchmark
//!
//! A research-support toolkit for comparing HTTP/2 and HTTP/3 transport
//! performance under simulated network latency. One binary carries the
//! single-shot probe clients and the CSV analysis subcommands (validation,
//! reporting, chart rendering, run comparison).

pub mod chart;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod report;
pub mod stats;
pub mod validate;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{BenchmarkRecord, Dataset, ProbeOutcome, Protocol};
pub use stats::SummaryStats;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_CSV: &str = crate::config::DEFAULT_CSV;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
