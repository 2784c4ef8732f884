//! Data models for the transport benchmark toolkit

pub mod dataset;
pub mod record;

// Re-export main model types
pub use dataset::Dataset;
pub use record::{parse_latency_label, BenchmarkRecord, ProbeOutcome, Protocol};
