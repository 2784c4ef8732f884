//! Plausibility checks for a benchmark results table
//!
//! Guards against analyzing a table produced by a misconfigured harness
//! run, for example a truncated download or a latency condition that never
//! completed.

use crate::models::{Dataset, Protocol};
use crate::output::{CheckStatus, ConsoleOutput};
use crate::stats;
use std::fmt::Write as _;

/// Expected payload size implied by each row, in KB
pub const EXPECTED_TRANSFER_KB: f64 = 1024.0;
/// Tolerance around the expected payload size
pub const TRANSFER_TOLERANCE_KB: f64 = 100.0;
/// Plausible mean request duration bounds in seconds
pub const TIME_BOUNDS: (f64, f64) = (0.5, 5.0);
/// Plausible mean transfer rate bounds in KB/s
pub const SPEED_BOUNDS: (f64, f64) = (50.0, 2000.0);
/// Distinct latency condition counts for the coverage tiers
pub const COMPREHENSIVE_CONDITIONS: usize = 100;
pub const ACCEPTABLE_CONDITIONS: usize = 30;

/// Coverage tier derived from the number of distinct latency conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageTier {
    Comprehensive,
    Acceptable,
    Limited,
}

impl CoverageTier {
    pub fn from_count(conditions: usize) -> Self {
        if conditions >= COMPREHENSIVE_CONDITIONS {
            CoverageTier::Comprehensive
        } else if conditions >= ACCEPTABLE_CONDITIONS {
            CoverageTier::Acceptable
        } else {
            CoverageTier::Limited
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoverageTier::Comprehensive => "comprehensive",
            CoverageTier::Acceptable => "acceptable",
            CoverageTier::Limited => "limited",
        }
    }
}

/// One plausibility check outcome
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
}

/// Full validation report for one results table
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub successful_rows: usize,
    pub failed_rows: usize,
    pub checks: Vec<CheckResult>,
    /// Coverage tier over the distinct latency conditions
    pub coverage_tier: CoverageTier,
    /// Per latency condition: samples across both protocols (informational)
    pub condition_counts: Vec<(u32, usize)>,
    /// Distinct negotiated versions per protocol
    pub versions: Vec<(Protocol, Vec<String>)>,
}

impl ValidationReport {
    /// Whether every check passed (warnings do not fail the run)
    pub fn passed(&self) -> bool {
        self.checks
            .iter()
            .all(|check| check.status != CheckStatus::Fail)
    }
}

/// Run all plausibility checks against a loaded dataset
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let mut checks = Vec::new();

    let transfers: Vec<f64> = dataset
        .records()
        .iter()
        .map(|r| r.transferred_kb())
        .collect();
    let mean_transfer = stats::mean(&transfers);
    let transfer_ok =
        (mean_transfer - EXPECTED_TRANSFER_KB).abs() <= TRANSFER_TOLERANCE_KB;
    checks.push(CheckResult {
        status: if transfer_ok {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        },
        message: format!(
            "mean transferred size {:.1} KB (expected {:.0} +/- {:.0})",
            mean_transfer, EXPECTED_TRANSFER_KB, TRANSFER_TOLERANCE_KB
        ),
    });

    let times: Vec<f64> = dataset.records().iter().map(|r| r.time_total).collect();
    let mean_time = stats::mean(&times);
    let time_ok = mean_time >= TIME_BOUNDS.0 && mean_time <= TIME_BOUNDS.1;
    checks.push(CheckResult {
        status: if time_ok {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        },
        message: format!(
            "mean request time {:.3} s (expected {:.1} to {:.1})",
            mean_time, TIME_BOUNDS.0, TIME_BOUNDS.1
        ),
    });

    let speeds: Vec<f64> = dataset.records().iter().map(|r| r.speed_kbps).collect();
    let mean_speed = stats::mean(&speeds);
    let speed_ok = mean_speed >= SPEED_BOUNDS.0 && mean_speed <= SPEED_BOUNDS.1;
    checks.push(CheckResult {
        status: if speed_ok {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        },
        message: format!(
            "mean transfer rate {:.1} KB/s (expected {:.0} to {:.0})",
            mean_speed, SPEED_BOUNDS.0, SPEED_BOUNDS.1
        ),
    });

    // Coverage is judged on how many distinct latency conditions were
    // measured, not on how many samples each condition collected.
    let conditions = dataset.latencies().len();
    let coverage_tier = CoverageTier::from_count(conditions);
    checks.push(match coverage_tier {
        CoverageTier::Comprehensive => CheckResult {
            status: CheckStatus::Pass,
            message: format!("{} latency conditions (comprehensive coverage)", conditions),
        },
        CoverageTier::Acceptable => CheckResult {
            status: CheckStatus::Warn,
            message: format!(
                "{} latency conditions (acceptable, {} for comprehensive coverage)",
                conditions, COMPREHENSIVE_CONDITIONS
            ),
        },
        CoverageTier::Limited => CheckResult {
            status: CheckStatus::Fail,
            message: format!(
                "only {} latency conditions (limited coverage, {} needed)",
                conditions, ACCEPTABLE_CONDITIONS
            ),
        },
    });

    let condition_counts = dataset
        .latencies()
        .iter()
        .map(|&latency| {
            let count: usize = Protocol::ALL
                .iter()
                .map(|&p| dataset.samples(p, latency).len())
                .sum();
            (latency, count)
        })
        .collect();

    let versions = Protocol::ALL
        .iter()
        .map(|&p| (p, dataset.http_versions(p)))
        .collect();

    ValidationReport {
        successful_rows: dataset.len(),
        failed_rows: dataset.failed_rows(),
        checks,
        coverage_tier,
        condition_counts,
        versions,
    }
}

/// Render the report for the console
pub fn render_report(report: &ValidationReport, console: &ConsoleOutput) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", console.header("Benchmark Data Validation"));
    let _ = writeln!(out);
    out.push_str(&console.key_values(&[
        ("Successful rows", report.successful_rows.to_string()),
        ("Failed rows", report.failed_rows.to_string()),
        (
            "Latency conditions",
            format!(
                "{} ({})",
                report.condition_counts.len(),
                report.coverage_tier.label()
            ),
        ),
    ]));
    let _ = writeln!(out);

    for check in &report.checks {
        let _ = writeln!(out, "{}", console.check_line(check.status, &check.message));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", console.subheader("Samples per latency condition"));
    let rows: Vec<Vec<String>> = report
        .condition_counts
        .iter()
        .map(|&(latency, count)| vec![format!("{}ms", latency), count.to_string()])
        .collect();
    out.push_str(&console.table(&["Latency", "Samples"], &rows));
    let _ = writeln!(out);

    for (protocol, versions) in &report.versions {
        let listed = if versions.is_empty() {
            "(not recorded)".to_string()
        } else {
            versions.join(", ")
        };
        let _ = writeln!(out, "{} negotiated versions: {}", protocol, listed);
    }
    let _ = writeln!(out);

    let verdict = if report.passed() {
        console.check_line(CheckStatus::Pass, "data looks plausible for analysis")
    } else {
        console.check_line(CheckStatus::Fail, "data failed plausibility checks")
    };
    let _ = writeln!(out, "{}", verdict);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BenchmarkRecord;

    fn record(protocol: Protocol, latency: &str, time: f64, speed: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            protocol,
            latency: latency.to_string(),
            time_total: time,
            speed_kbps: speed,
            success: 1,
            http_version: Some(protocol.label().to_string()),
        }
    }

    fn plausible_dataset(conditions: usize, rows_per_group: usize) -> Dataset {
        let mut records = Vec::new();
        for i in 0..conditions {
            let latency = format!("{}ms", i * 10);
            for _ in 0..rows_per_group {
                // 1.6 s at 640 KB/s transfers exactly 1024 KB
                records.push(record(Protocol::Http2, &latency, 1.6, 640.0));
                records.push(record(Protocol::Http3, &latency, 1.6, 640.0));
            }
        }
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn test_comprehensive_coverage_passes() {
        let report = validate_dataset(&plausible_dataset(100, 2));
        assert!(report.passed());
        assert_eq!(report.coverage_tier, CoverageTier::Comprehensive);
        assert_eq!(report.condition_counts.len(), 100);
    }

    #[test]
    fn test_acceptable_coverage_warns_but_passes() {
        let report = validate_dataset(&plausible_dataset(30, 2));
        assert!(report.passed());
        assert_eq!(report.coverage_tier, CoverageTier::Acceptable);
        assert!(report
            .checks
            .iter()
            .any(|c| c.status == CheckStatus::Warn && c.message.contains("acceptable")));
    }

    #[test]
    fn test_few_latency_conditions_fail_even_with_many_samples() {
        // Three conditions with hundreds of clean samples each is still a
        // limited run and must be rejected.
        let report = validate_dataset(&plausible_dataset(3, 200));
        assert!(!report.passed());
        assert_eq!(report.coverage_tier, CoverageTier::Limited);
        assert!(report
            .checks
            .iter()
            .any(|c| c.status == CheckStatus::Fail && c.message.contains("latency conditions")));
    }

    #[test]
    fn test_wrong_transfer_size_fails() {
        let records = (0..40)
            .map(|_| record(Protocol::Http2, "0ms", 1.0, 100.0))
            .collect();
        let report = validate_dataset(&Dataset::from_records(records).unwrap());
        assert!(!report.passed());
        assert!(report
            .checks
            .iter()
            .any(|c| c.status == CheckStatus::Fail && c.message.contains("transferred")));
    }

    #[test]
    fn test_slow_mean_time_fails() {
        // 8 s at 128 KB/s keeps the transfer size right but the time absurd.
        let records = (0..40)
            .map(|_| record(Protocol::Http3, "150ms", 8.0, 128.0))
            .collect();
        let report = validate_dataset(&Dataset::from_records(records).unwrap());
        assert!(!report.passed());
    }

    #[test]
    fn test_coverage_tiers() {
        assert_eq!(CoverageTier::from_count(100), CoverageTier::Comprehensive);
        assert_eq!(CoverageTier::from_count(99), CoverageTier::Acceptable);
        assert_eq!(CoverageTier::from_count(30), CoverageTier::Acceptable);
        assert_eq!(CoverageTier::from_count(29), CoverageTier::Limited);
    }

    #[test]
    fn test_render_report_contains_verdict() {
        let console = ConsoleOutput::new(false);
        let report = validate_dataset(&plausible_dataset(30, 2));
        let text = render_report(&report, &console);
        assert!(text.contains("Benchmark Data Validation"));
        assert!(text.contains("30 (acceptable)"));
        assert!(text.contains("[PASS] data looks plausible"));
        assert!(text.contains("HTTP/3 negotiated versions"));
    }

    #[test]
    fn test_render_report_limited_verdict() {
        let console = ConsoleOutput::new(false);
        let report = validate_dataset(&plausible_dataset(2, 5));
        let text = render_report(&report, &console);
        assert!(text.contains("[FAIL] data failed plausibility checks"));
    }
}
