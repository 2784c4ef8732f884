//! End-to-end analysis pipeline tests through the library API

use http_transport_bench::chart::{self, ChartKind};
use http_transport_bench::models::{BenchmarkRecord, Dataset, Protocol};
use http_transport_bench::report;
use http_transport_bench::validate;
use std::fs;

/// Build records where HTTP/2 wins at low latency and loses at high latency
fn crossover_records() -> Vec<BenchmarkRecord> {
    let mut records = Vec::new();
    // (latency, h2 mean, h3 mean): curves cross between 50ms and 100ms.
    for (latency, h2, h3) in [(0u32, 1.2, 1.4), (50, 1.6, 1.7), (100, 2.4, 2.0)] {
        for i in 0..20 {
            let jitter = (i % 5) as f64 * 0.01;
            for (protocol, base) in [(Protocol::Http2, h2), (Protocol::Http3, h3)] {
                let time = base + jitter;
                records.push(BenchmarkRecord {
                    protocol,
                    latency: format!("{}ms", latency),
                    time_total: time,
                    speed_kbps: 1024.0 / time,
                    success: 1,
                    http_version: Some(protocol.label().to_string()),
                });
            }
        }
    }
    records
}

#[test]
fn test_pipeline_from_records_to_report() {
    let dataset = Dataset::from_records(crossover_records()).unwrap();

    // Three conditions are plausible per row but far below the coverage bar.
    let validation = validate::validate_dataset(&dataset);
    assert_eq!(validation.coverage_tier, validate::CoverageTier::Limited);
    assert!(!validation.passed(), "three conditions must be rejected");

    let analysis = report::analyze(&dataset).unwrap();
    assert_eq!(analysis.rows.len(), 3);
    assert_eq!(analysis.crossovers.len(), 1);
    let crossover = analysis.crossovers[0];
    assert_eq!(crossover.from, Protocol::Http2);
    assert_eq!(crossover.to, Protocol::Http3);
    assert!(crossover.latency_ms > 50.0 && crossover.latency_ms < 100.0);

    // Two wins for HTTP/2 (0ms, 50ms), one for HTTP/3 (100ms).
    assert_eq!(analysis.http2_wins, 2);
    assert_eq!(analysis.http3_wins, 1);
    assert_eq!(analysis.ties, 0);

    let text = report::render(&analysis);
    assert!(text.contains("advantage shifts HTTP/2 -> HTTP/3"));
}

#[test]
fn test_pipeline_csv_roundtrip_to_charts() {
    let records = crossover_records();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("results.csv");
    let mut writer = csv::Writer::from_path(&csv_path).unwrap();
    for record in &records {
        writer.serialize(record).unwrap();
    }
    writer.flush().unwrap();

    let dataset = Dataset::load(&csv_path).unwrap();
    assert_eq!(dataset.len(), records.len());
    assert_eq!(dataset.latencies(), &[0, 50, 100]);

    for kind in [ChartKind::ResponseTime, ChartKind::Boxplot, ChartKind::Overview] {
        let path = dir.path().join(kind.file_name());
        chart::render(kind, &dataset, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }
}

#[test]
fn test_degradation_is_monotone_for_growing_curves() {
    let dataset = Dataset::from_records(crossover_records()).unwrap();
    let analysis = report::analyze(&dataset).unwrap();
    for &(_, pct) in &analysis.degradation {
        assert!(pct > 0.0, "both curves slow down with latency");
    }
}

#[test]
fn test_comparison_table_shows_improvement() {
    let baseline = Dataset::from_records(crossover_records()).unwrap();

    // Current run with the jitter removed, so the P5-P95 range shrinks to 0.
    let mut tighter = crossover_records();
    for record in &mut tighter {
        record.time_total = (record.time_total * 10.0).floor() / 10.0;
        record.speed_kbps = 1024.0 / record.time_total;
    }
    let current = Dataset::from_records(tighter).unwrap();

    let table = chart::comparison_table(&baseline, &current, "before", "after");
    assert!(table.contains("before"));
    assert!(table.contains("after"));
    assert!(table.contains("0ms"));
    assert!(table.contains("100ms"));
    // Every group had a positive spread before and none after.
    assert!(table.contains("-100.0%"));
}
