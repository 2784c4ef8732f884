//! Benchmark results table loading and grouping

use crate::error::{AppError, Result};
use crate::models::record::{BenchmarkRecord, Protocol};
use std::collections::BTreeMap;
use std::path::Path;

/// An in-memory benchmark results table.
///
/// Rows are grouped by `(protocol, latency_ms)` at load time; latency
/// conditions are kept in numeric order (a lexical sort would put "100ms"
/// before "50ms").
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<BenchmarkRecord>,
    groups: BTreeMap<(u32, Protocol), Vec<f64>>,
    speed_groups: BTreeMap<(u32, Protocol), Vec<f64>>,
    latencies: Vec<u32>,
    failed_rows: usize,
}

impl Dataset {
    /// Load a results CSV from disk, keeping only successful rows.
    ///
    /// Fails when the file is missing, a row cannot be parsed, or no
    /// successful rows remain.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::config(format!(
                "CSV file not found: {}",
                path.display()
            )));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: BenchmarkRecord = row?;
            records.push(record);
        }

        Self::from_records(records)
    }

    /// Build a dataset from already-parsed rows
    pub fn from_records(records: Vec<BenchmarkRecord>) -> Result<Self> {
        let total = records.len();
        let successful: Vec<BenchmarkRecord> = records
            .into_iter()
            .filter(|r| r.is_successful())
            .collect();
        let failed_rows = total - successful.len();

        if successful.is_empty() {
            return Err(AppError::validation(
                "No successful rows in benchmark results",
            ));
        }

        let mut groups: BTreeMap<(u32, Protocol), Vec<f64>> = BTreeMap::new();
        let mut speed_groups: BTreeMap<(u32, Protocol), Vec<f64>> = BTreeMap::new();
        for record in &successful {
            let latency_ms = record.latency_ms()?;
            groups
                .entry((latency_ms, record.protocol))
                .or_default()
                .push(record.time_total);
            speed_groups
                .entry((latency_ms, record.protocol))
                .or_default()
                .push(record.speed_kbps);
        }

        let mut latencies: Vec<u32> = groups.keys().map(|&(lat, _)| lat).collect();
        latencies.dedup();

        Ok(Self {
            records: successful,
            groups,
            speed_groups,
            latencies,
            failed_rows,
        })
    }

    /// Successful rows, in file order
    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    /// Number of successful rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows dropped by the success filter
    pub fn failed_rows(&self) -> usize {
        self.failed_rows
    }

    /// Latency conditions present, sorted numerically
    pub fn latencies(&self) -> &[u32] {
        &self.latencies
    }

    /// `time_total` samples for one protocol at one latency condition
    pub fn samples(&self, protocol: Protocol, latency_ms: u32) -> &[f64] {
        self.groups
            .get(&(latency_ms, protocol))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// `speed_kbps` samples for one protocol at one latency condition
    pub fn speed_samples(&self, protocol: Protocol, latency_ms: u32) -> &[f64] {
        self.speed_groups
            .get(&(latency_ms, protocol))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of successful rows for one protocol across all conditions
    pub fn protocol_count(&self, protocol: Protocol) -> usize {
        self.records
            .iter()
            .filter(|r| r.protocol == protocol)
            .count()
    }

    /// Distinct negotiated HTTP versions recorded for one protocol
    pub fn http_versions(&self, protocol: Protocol) -> Vec<String> {
        let mut versions: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.protocol == protocol)
            .filter_map(|r| r.http_version.clone())
            .collect();
        versions.sort();
        versions.dedup();
        versions
    }
}

/// Synthetic results table shared by unit tests
#[cfg(test)]
pub(crate) fn synthetic_csv() -> String {
    let mut out = String::from("protocol,latency,time_total,speed_kbps,success,http_version\n");
    // Latencies deliberately out of lexical order to exercise numeric sort.
    for (lat, h2_base, h3_base) in [(100u32, 2.0, 1.9), (0, 1.2, 1.3), (50, 1.6, 1.6)] {
        for i in 0..5 {
            let jitter = i as f64 * 0.01;
            out.push_str(&format!(
                "HTTP/2,{}ms,{:.3},{:.1},1,HTTP/2.0\n",
                lat,
                h2_base + jitter,
                1024.0 / (h2_base + jitter),
            ));
            out.push_str(&format!(
                "HTTP/3,{}ms,{:.3},{:.1},1,HTTP/3\n",
                lat,
                h3_base + jitter,
                1024.0 / (h3_base + jitter),
            ));
        }
    }
    // One failed row that the loader must drop.
    out.push_str("HTTP/3,0ms,0.000,0.0,0,\n");
    out
}
