//! Detailed comparison report between the two protocol curves

use crate::error::Result;
use crate::models::{Dataset, Protocol};
use crate::stats::{self, SummaryStats};
use std::fmt::Write as _;

/// File written into the output directory
pub const REPORT_FILE_NAME: &str = "detailed_analysis_report.txt";

/// Two protocols considered tied below this mean-time difference in seconds
const TIE_EPSILON: f64 = 1e-6;

/// Statistics for both protocols at one latency condition
#[derive(Debug, Clone)]
pub struct LatencyRow {
    pub latency_ms: u32,
    pub http2: SummaryStats,
    pub http3: SummaryStats,
}

impl LatencyRow {
    /// Mean-time difference relative to the HTTP/2 baseline, in percent
    pub fn relative_difference(&self) -> f64 {
        stats::percent_change(self.http2.mean, self.http3.mean)
    }

    /// Protocol with the lower mean time, None on a tie
    pub fn winner(&self) -> Option<Protocol> {
        let diff = self.http2.mean - self.http3.mean;
        if diff.abs() < TIE_EPSILON {
            None
        } else if diff > 0.0 {
            Some(Protocol::Http3)
        } else {
            Some(Protocol::Http2)
        }
    }
}

/// A latency where the protocol mean curves cross
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossover {
    /// Interpolated latency of the crossing in milliseconds
    pub latency_ms: f64,
    /// Protocol that was faster below the crossing
    pub from: Protocol,
    /// Protocol that is faster above the crossing
    pub to: Protocol,
}

/// Full analysis of one results table
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub rows: Vec<LatencyRow>,
    pub crossovers: Vec<Crossover>,
    /// Mean-time growth from the lowest to the highest latency, in percent
    pub degradation: Vec<(Protocol, f64)>,
    /// Conditions won per protocol, plus ties
    pub http2_wins: usize,
    pub http3_wins: usize,
    pub ties: usize,
    /// Average of the per-condition relative differences (HTTP/2 baseline)
    pub avg_relative_difference: f64,
    /// Average standard deviation per protocol across conditions
    pub avg_std: Vec<(Protocol, f64)>,
}

/// Compute the full comparison analysis
pub fn analyze(dataset: &Dataset) -> Result<AnalysisReport> {
    let mut rows = Vec::new();
    for &latency in dataset.latencies() {
        rows.push(LatencyRow {
            latency_ms: latency,
            http2: SummaryStats::from_sample(dataset.samples(Protocol::Http2, latency)),
            http3: SummaryStats::from_sample(dataset.samples(Protocol::Http3, latency)),
        });
    }

    let crossovers = find_crossovers(&rows);

    let mut degradation = Vec::new();
    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        degradation.push((
            Protocol::Http2,
            stats::percent_change(first.http2.mean, last.http2.mean),
        ));
        degradation.push((
            Protocol::Http3,
            stats::percent_change(first.http3.mean, last.http3.mean),
        ));
    }

    let mut http2_wins = 0;
    let mut http3_wins = 0;
    let mut ties = 0;
    for row in &rows {
        match row.winner() {
            Some(Protocol::Http2) => http2_wins += 1,
            Some(Protocol::Http3) => http3_wins += 1,
            None => ties += 1,
        }
    }

    let diffs: Vec<f64> = rows.iter().map(|r| r.relative_difference()).collect();
    let avg_relative_difference = stats::mean(&diffs);

    let h2_stds: Vec<f64> = rows.iter().map(|r| r.http2.std_dev).collect();
    let h3_stds: Vec<f64> = rows.iter().map(|r| r.http3.std_dev).collect();
    let avg_std = vec![
        (Protocol::Http2, stats::mean(&h2_stds)),
        (Protocol::Http3, stats::mean(&h3_stds)),
    ];

    Ok(AnalysisReport {
        rows,
        crossovers,
        degradation,
        http2_wins,
        http3_wins,
        ties,
        avg_relative_difference,
        avg_std,
    })
}

/// Locate crossings of the two mean curves between adjacent conditions.
///
/// The crossing latency is found by linear interpolation on the difference
/// of the two means between the bracketing conditions.
pub fn find_crossovers(rows: &[LatencyRow]) -> Vec<Crossover> {
    let mut crossovers = Vec::new();
    for pair in rows.windows(2) {
        let before = pair[0].http2.mean - pair[0].http3.mean;
        let after = pair[1].http2.mean - pair[1].http3.mean;
        if before == 0.0 || after == 0.0 || before.signum() == after.signum() {
            continue;
        }

        let span = (pair[1].latency_ms - pair[0].latency_ms) as f64;
        let weight = before.abs() / (before.abs() + after.abs());
        let latency_ms = pair[0].latency_ms as f64 + weight * span;

        // Positive difference means HTTP/3 has the lower mean time.
        let (from, to) = if before < 0.0 {
            (Protocol::Http2, Protocol::Http3)
        } else {
            (Protocol::Http3, Protocol::Http2)
        };
        crossovers.push(Crossover {
            latency_ms,
            from,
            to,
        });
    }
    crossovers
}

/// Render the report as the plain text written to disk and stdout
pub fn render(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let title = "HTTP/2 vs HTTP/3 Detailed Analysis Report";
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.len()));
    let _ = writeln!(out);

    if let (Some(first), Some(last)) = (report.rows.first(), report.rows.last()) {
        let _ = writeln!(out, "Baseline condition ({}ms):", first.latency_ms);
        let _ = writeln!(
            out,
            "  HTTP/2: mean {:.3} s, std {:.3} s",
            first.http2.mean, first.http2.std_dev
        );
        let _ = writeln!(
            out,
            "  HTTP/3: mean {:.3} s, std {:.3} s",
            first.http3.mean, first.http3.std_dev
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Highest latency condition ({}ms):", last.latency_ms);
        let _ = writeln!(
            out,
            "  HTTP/2: mean {:.3} s, std {:.3} s",
            last.http2.mean, last.http2.std_dev
        );
        let _ = writeln!(
            out,
            "  HTTP/3: mean {:.3} s, std {:.3} s",
            last.http3.mean, last.http3.std_dev
        );
        let _ = writeln!(out);
    }

    for &(protocol, pct) in &report.degradation {
        let _ = writeln!(
            out,
            "{} degradation from lowest to highest latency: {:+.1}%",
            protocol, pct
        );
    }
    let _ = writeln!(out);

    if report.crossovers.is_empty() {
        let _ = writeln!(out, "No crossover points: the faster protocol never changes.");
    } else {
        let _ = writeln!(out, "Crossover points:");
        for crossover in &report.crossovers {
            let _ = writeln!(
                out,
                "  ~{:.0}ms: advantage shifts {} -> {}",
                crossover.latency_ms, crossover.from, crossover.to
            );
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Per-latency detail:");
    let _ = writeln!(
        out,
        "{:>8}  {:>12}  {:>12}  {:>12}  {:>12}  {:>10}",
        "Latency", "H2 mean", "H2 std", "H3 mean", "H3 std", "Advantage"
    );
    for row in &report.rows {
        let advantage = match row.winner() {
            Some(protocol) => format!("{}", protocol),
            None => "tie".to_string(),
        };
        let _ = writeln!(
            out,
            "{:>8}  {:>10.3} s  {:>10.3} s  {:>10.3} s  {:>10.3} s  {:>10}",
            format!("{}ms", row.latency_ms),
            row.http2.mean,
            row.http2.std_dev,
            row.http3.mean,
            row.http3.std_dev,
            advantage
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Conditions won: HTTP/2 {}, HTTP/3 {}, ties {}",
        report.http2_wins, report.http3_wins, report.ties
    );
    let _ = writeln!(
        out,
        "Average HTTP/3 difference vs HTTP/2 baseline: {:+.1}%",
        report.avg_relative_difference
    );
    for &(protocol, std) in &report.avg_std {
        let _ = writeln!(out, "Average {} standard deviation: {:.3} s", protocol, std);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BenchmarkRecord;

    fn dataset_from_means(groups: &[(u32, f64, f64)]) -> Dataset {
        // Five identical samples per group keep the means exact.
        let mut records = Vec::new();
        for &(latency, h2_mean, h3_mean) in groups {
            for _ in 0..5 {
                for (protocol, mean) in
                    [(Protocol::Http2, h2_mean), (Protocol::Http3, h3_mean)]
                {
                    records.push(BenchmarkRecord {
                        protocol,
                        latency: format!("{}ms", latency),
                        time_total: mean,
                        speed_kbps: 1024.0 / mean,
                        success: 1,
                        http_version: None,
                    });
                }
            }
        }
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn test_no_crossover_for_parallel_curves() {
        let dataset =
            dataset_from_means(&[(0, 1.0, 1.2), (50, 1.5, 1.7), (100, 2.0, 2.2)]);
        let report = analyze(&dataset).unwrap();
        assert!(report.crossovers.is_empty());
        assert_eq!(report.http2_wins, 3);
        assert_eq!(report.http3_wins, 0);
    }

    #[test]
    fn test_crossover_interpolation() {
        // H2 faster at 0ms by 0.2, H3 faster at 100ms by 0.2: crossing at 50ms.
        let dataset = dataset_from_means(&[(0, 1.0, 1.2), (100, 2.2, 2.0)]);
        let report = analyze(&dataset).unwrap();
        assert_eq!(report.crossovers.len(), 1);
        let crossover = report.crossovers[0];
        assert!((crossover.latency_ms - 50.0).abs() < 1e-9);
        assert_eq!(crossover.from, Protocol::Http2);
        assert_eq!(crossover.to, Protocol::Http3);
    }

    #[test]
    fn test_asymmetric_crossover_position() {
        // Differences -0.1 then +0.3 put the crossing a quarter of the way.
        let dataset = dataset_from_means(&[(0, 1.0, 1.1), (100, 2.3, 2.0)]);
        let report = analyze(&dataset).unwrap();
        assert_eq!(report.crossovers.len(), 1);
        assert!((report.crossovers[0].latency_ms - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_degradation_percentages() {
        let dataset = dataset_from_means(&[(0, 1.0, 2.0), (150, 3.0, 3.0)]);
        let report = analyze(&dataset).unwrap();
        assert_eq!(report.degradation[0], (Protocol::Http2, 200.0));
        assert_eq!(report.degradation[1], (Protocol::Http3, 50.0));
    }

    #[test]
    fn test_ties_counted() {
        let dataset = dataset_from_means(&[(0, 1.0, 1.0), (50, 1.5, 1.4)]);
        let report = analyze(&dataset).unwrap();
        assert_eq!(report.ties, 1);
        assert_eq!(report.http3_wins, 1);
    }

    #[test]
    fn test_render_contains_sections() {
        let dataset = dataset_from_means(&[(0, 1.0, 1.2), (100, 2.2, 2.0)]);
        let report = analyze(&dataset).unwrap();
        let text = render(&report);
        assert!(text.contains("Detailed Analysis Report"));
        assert!(text.contains("Crossover points:"));
        assert!(text.contains("advantage shifts HTTP/2 -> HTTP/3"));
        assert!(text.contains("Conditions won:"));
    }

    #[test]
    fn test_render_no_crossover_message() {
        let dataset = dataset_from_means(&[(0, 1.0, 1.2), (50, 1.5, 1.7)]);
        let report = analyze(&dataset).unwrap();
        let text = render(&report);
        assert!(text.contains("No crossover points"));
    }
}
