//! Chart rendering for benchmark analysis
//!
//! All charts are written as SVG so rendering does not depend on system
//! fonts. Colors are fixed per protocol so every chart in a report set
//! reads the same way.

use crate::error::{AppError, Result};
use crate::models::{Dataset, Protocol};
use crate::stats::{self, SummaryStats};
use plotters::prelude::*;
use std::fmt::Write as _;
use std::path::Path;

/// HTTP/2 series color
pub const HTTP2_COLOR: RGBColor = RGBColor(0x2E, 0x86, 0xAB);
/// HTTP/3 series color
pub const HTTP3_COLOR: RGBColor = RGBColor(0xA2, 0x3B, 0x72);

fn protocol_color(protocol: Protocol) -> RGBColor {
    match protocol {
        Protocol::Http2 => HTTP2_COLOR,
        Protocol::Http3 => HTTP3_COLOR,
    }
}

/// Chart kinds the toolkit can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    ResponseTime,
    StdDev,
    PercentileRange,
    Boxplot,
    RawData,
    Overview,
}

impl ChartKind {
    /// Output file name inside the output directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::ResponseTime => "response_time_comparison.svg",
            ChartKind::StdDev => "stability_std_dev.svg",
            ChartKind::PercentileRange => "stability_percentile_range.svg",
            ChartKind::Boxplot => "boxplot_comparison.svg",
            ChartKind::RawData => "raw_data_distribution.svg",
            ChartKind::Overview => "benchmark_overview.svg",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::ResponseTime => "Response Time vs Network Latency",
            ChartKind::StdDev => "Response Time Stability (Standard Deviation)",
            ChartKind::PercentileRange => "Response Time Spread (P5-P95 Range)",
            ChartKind::Boxplot => "Response Time Distribution per Condition",
            ChartKind::RawData => "Raw Samples and Distributions",
            ChartKind::Overview => "Benchmark Overview",
        }
    }
}

/// File name of the two-run comparison chart
pub const COMPARISON_FILE_NAME: &str = "percentile_range_comparison.svg";

/// Render one chart kind into `path`
pub fn render(kind: ChartKind, dataset: &Dataset, path: &Path) -> Result<()> {
    let result = match kind {
        ChartKind::ResponseTime => draw_response_time(dataset, path),
        ChartKind::StdDev => draw_metric_lines(dataset, path, kind, |s| s.std_dev, "Std dev (s)"),
        ChartKind::PercentileRange => draw_metric_lines(
            dataset,
            path,
            kind,
            |s| s.percentile_range(),
            "P5-P95 range (s)",
        ),
        ChartKind::Boxplot => draw_boxplot(dataset, path),
        ChartKind::RawData => draw_raw_data(dataset, path),
        ChartKind::Overview => draw_overview(dataset, path),
    };
    result.map_err(|e| {
        AppError::chart(format!(
            "failed to render {}: {}",
            kind.file_name(),
            e
        ))
    })
}

/// Render the percentile-range comparison of two benchmark runs
pub fn render_comparison(
    baseline: &Dataset,
    current: &Dataset,
    baseline_label: &str,
    current_label: &str,
    path: &Path,
) -> Result<()> {
    draw_comparison(baseline, current, baseline_label, current_label, path).map_err(|e| {
        AppError::chart(format!(
            "failed to render {}: {}",
            COMPARISON_FILE_NAME, e
        ))
    })
}

/// Per-latency textual summary printed after a chart is saved
pub fn summary(dataset: &Dataset) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>8}  {:>10}  {:>18}  {:>18}",
        "Latency", "Protocol", "Mean +/- Std (s)", "P5-P95 range (s)"
    );
    for &latency in dataset.latencies() {
        for protocol in Protocol::ALL {
            let s = SummaryStats::from_sample(dataset.samples(protocol, latency));
            let _ = writeln!(
                out,
                "{:>8}  {:>10}  {:>8.3} +/- {:>5.3}  {:>18.3}",
                format!("{}ms", latency),
                protocol.label(),
                s.mean,
                s.std_dev,
                s.percentile_range()
            );
        }
    }
    out
}

type Series = Vec<(f64, f64)>;

fn stats_series<F>(dataset: &Dataset, protocol: Protocol, metric: F) -> Series
where
    F: Fn(&SummaryStats) -> f64,
{
    dataset
        .latencies()
        .iter()
        .map(|&latency| {
            let s = SummaryStats::from_sample(dataset.samples(protocol, latency));
            (latency as f64, metric(&s))
        })
        .collect()
}

fn max_value(series_list: &[&Series]) -> f64 {
    let max = series_list
        .iter()
        .flat_map(|s| s.iter().map(|&(_, y)| y))
        .fold(0.0f64, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

fn max_latency(dataset: &Dataset) -> f64 {
    dataset
        .latencies()
        .last()
        .copied()
        .map(|l| l as f64)
        .unwrap_or(1.0)
        .max(1.0)
}

fn draw_response_time(dataset: &Dataset, path: &Path) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let means: Vec<(Protocol, Series, Series, Series)> = Protocol::ALL
        .iter()
        .map(|&p| {
            let mean = stats_series(dataset, p, |s| s.mean);
            let upper = stats_series(dataset, p, |s| s.mean + s.std_dev);
            let lower = stats_series(dataset, p, |s| (s.mean - s.std_dev).max(0.0));
            (p, mean, upper, lower)
        })
        .collect();

    let y_max = means
        .iter()
        .map(|(_, _, upper, _)| max_value(&[upper]))
        .fold(0.0f64, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::ResponseTime.title(), ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..max_latency(dataset) * 1.05, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Simulated latency (ms)")
        .y_desc("Response time (s)")
        .draw()?;

    for (protocol, mean, upper, lower) in &means {
        let color = protocol_color(*protocol);

        // One-standard-deviation band around the mean curve.
        let mut band: Series = upper.clone();
        band.extend(lower.iter().rev().copied());
        chart.draw_series(std::iter::once(Polygon::new(band, color.mix(0.15).filled())))?;

        chart
            .draw_series(LineSeries::new(mean.iter().copied(), color.stroke_width(2)))?
            .label(protocol.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
        chart.draw_series(
            mean.iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(WHITE.mix(0.8).filled())
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_metric_lines<F>(
    dataset: &Dataset,
    path: &Path,
    kind: ChartKind,
    metric: F,
    y_desc: &str,
) -> anyhow::Result<()>
where
    F: Fn(&SummaryStats) -> f64 + Copy,
{
    let root = SVGBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let h2 = stats_series(dataset, Protocol::Http2, metric);
    let h3 = stats_series(dataset, Protocol::Http3, metric);
    let y_max = max_value(&[&h2, &h3]) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(kind.title(), ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..max_latency(dataset) * 1.05, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Simulated latency (ms)")
        .y_desc(y_desc)
        .draw()?;

    for (protocol, series) in [(Protocol::Http2, &h2), (Protocol::Http3, &h3)] {
        let color = protocol_color(protocol);
        chart
            .draw_series(LineSeries::new(
                series.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(protocol.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
        chart.draw_series(
            series
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(WHITE.mix(0.8).filled())
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_boxplot(dataset: &Dataset, path: &Path) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = dataset
        .latencies()
        .iter()
        .map(|l| format!("{}ms", l))
        .collect();

    let y_max = dataset
        .records()
        .iter()
        .map(|r| r.time_total)
        .fold(0.0f64, f64::max)
        .max(1e-9)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Boxplot.title(), ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        // Quartiles yields f32, so the y-axis has to be f32 as well.
        .build_cartesian_2d(labels[..].into_segmented(), 0f32..y_max as f32)?;

    chart
        .configure_mesh()
        .x_desc("Simulated latency")
        .y_desc("Response time (s)")
        .draw()?;

    for (protocol, offset) in [(Protocol::Http2, -14.0), (Protocol::Http3, 14.0)] {
        let color = protocol_color(protocol);
        for (label, &latency) in labels.iter().zip(dataset.latencies()) {
            let samples = dataset.samples(protocol, latency);
            if samples.is_empty() {
                continue;
            }
            let quartiles = Quartiles::new(samples);
            chart.draw_series(std::iter::once(
                Boxplot::new_vertical(SegmentValue::CenterOf(label), &quartiles)
                    .width(20)
                    .whisker_width(0.5)
                    .style(&color)
                    .offset(offset),
            ))?;
            // Mean marker beside the box.
            let mean = stats::mean(samples);
            chart.draw_series(std::iter::once(Circle::new(
                (SegmentValue::CenterOf(label), mean as f32),
                3,
                color.filled(),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}

fn histogram_bins(values: &[f64], bin_count: usize) -> Vec<(f64, f64, usize)> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = ((max - min) / bin_count as f64).max(1e-9);

    let mut bins = vec![0usize; bin_count];
    for &value in values {
        let index = (((value - min) / width) as usize).min(bin_count - 1);
        bins[index] += 1;
    }
    bins.into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = min + i as f64 * width;
            (start, start + width, count)
        })
        .collect()
}

fn draw_raw_data(dataset: &Dataset, path: &Path) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let (top, bottom) = root.split_vertically(440);

    // Top panel: every sample, with the mean trend line per protocol.
    let y_max = dataset
        .records()
        .iter()
        .map(|r| r.time_total)
        .fold(0.0f64, f64::max)
        .max(1e-9)
        * 1.1;

    let mut scatter = ChartBuilder::on(&top)
        .caption(ChartKind::RawData.title(), ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-5f64..max_latency(dataset) * 1.05, 0f64..y_max)?;

    scatter
        .configure_mesh()
        .x_desc("Simulated latency (ms)")
        .y_desc("Response time (s)")
        .draw()?;

    for protocol in Protocol::ALL {
        let color = protocol_color(protocol);
        // Nudge the two protocols apart so the point clouds stay readable.
        let jitter = match protocol {
            Protocol::Http2 => -1.5,
            Protocol::Http3 => 1.5,
        };
        let points: Series = dataset
            .latencies()
            .iter()
            .flat_map(|&latency| {
                dataset
                    .samples(protocol, latency)
                    .iter()
                    .map(move |&t| (latency as f64 + jitter, t))
            })
            .collect();
        scatter
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 2, color.mix(0.45).filled())),
            )?
            .label(protocol.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });

        let means = stats_series(dataset, protocol, |s| s.mean);
        scatter.draw_series(LineSeries::new(
            means.iter().copied(),
            color.stroke_width(2),
        ))?;
    }

    scatter
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(WHITE.mix(0.8).filled())
        .draw()?;

    // Bottom row: one small histogram per latency condition.
    let latencies: Vec<u32> = dataset.latencies().to_vec();
    if !latencies.is_empty() {
        let panels = bottom.split_evenly((1, latencies.len()));
        for (panel, &latency) in panels.iter().zip(&latencies) {
            let all_bins: Vec<(Protocol, Vec<(f64, f64, usize)>)> = Protocol::ALL
                .iter()
                .map(|&p| (p, histogram_bins(dataset.samples(p, latency), 10)))
                .collect();

            let count_max = all_bins
                .iter()
                .flat_map(|(_, bins)| bins.iter().map(|&(_, _, c)| c))
                .max()
                .unwrap_or(1)
                .max(1) as f64;
            let x_min = all_bins
                .iter()
                .flat_map(|(_, bins)| bins.first().map(|&(s, _, _)| s))
                .fold(f64::INFINITY, f64::min);
            let x_max = all_bins
                .iter()
                .flat_map(|(_, bins)| bins.last().map(|&(_, e, _)| e))
                .fold(f64::NEG_INFINITY, f64::max);
            if !x_min.is_finite() || !x_max.is_finite() {
                continue;
            }

            let mut hist = ChartBuilder::on(panel)
                .caption(format!("{}ms", latency), ("sans-serif", 16))
                .margin(8)
                .x_label_area_size(25)
                .y_label_area_size(30)
                .build_cartesian_2d(x_min..x_max.max(x_min + 1e-9), 0f64..count_max * 1.1)?;
            hist.configure_mesh().disable_mesh().draw()?;

            for (protocol, bins) in &all_bins {
                let color = protocol_color(*protocol);
                hist.draw_series(bins.iter().filter(|&&(_, _, c)| c > 0).map(
                    |&(start, end, count)| {
                        Rectangle::new(
                            [(start, 0.0), (end, count as f64)],
                            color.mix(0.4).filled(),
                        )
                    },
                ))?;
            }
        }
    }

    root.present()?;
    Ok(())
}

fn draw_overview(dataset: &Dataset, path: &Path) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (900, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 1));

    let x_max = max_latency(dataset) * 1.05;

    // Panel 1: transfer speed per latency condition.
    {
        let h2 = speed_series(dataset, Protocol::Http2);
        let h3 = speed_series(dataset, Protocol::Http3);
        let y_max = max_value(&[&h2, &h3]) * 1.1;

        let mut chart = ChartBuilder::on(&panels[0])
            .caption("Transfer speed", ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Latency (ms)")
            .y_desc("Speed (KB/s)")
            .draw()?;

        for (protocol, series) in [(Protocol::Http2, &h2), (Protocol::Http3, &h3)] {
            let color = protocol_color(protocol);
            chart
                .draw_series(LineSeries::new(
                    series.iter().copied(),
                    color.stroke_width(2),
                ))?
                .label(protocol.label())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(WHITE.mix(0.8).filled())
            .draw()?;
    }

    // Panel 2: HTTP/3 mean-time difference vs HTTP/2, bars per condition.
    {
        let diffs: Series = dataset
            .latencies()
            .iter()
            .map(|&latency| {
                let h2 = stats::mean(dataset.samples(Protocol::Http2, latency));
                let h3 = stats::mean(dataset.samples(Protocol::Http3, latency));
                (latency as f64, stats::percent_change(h2, h3))
            })
            .collect();
        let extent = diffs
            .iter()
            .map(|&(_, y)| y.abs())
            .fold(1.0f64, f64::max)
            * 1.2;

        let mut chart = ChartBuilder::on(&panels[1])
            .caption("HTTP/3 vs HTTP/2 mean time difference", ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d(-5f64..x_max, -extent..extent)?;
        chart
            .configure_mesh()
            .x_desc("Latency (ms)")
            .y_desc("Difference (%)")
            .draw()?;

        let bar_width = (x_max / (dataset.latencies().len().max(1) as f64 * 4.0)).max(2.0);
        chart.draw_series(diffs.iter().map(|&(x, y)| {
            // Positive bars mean HTTP/3 is slower at that condition.
            let color = if y > 0.0 { HTTP3_COLOR } else { HTTP2_COLOR };
            Rectangle::new(
                [(x - bar_width / 2.0, 0.0), (x + bar_width / 2.0, y)],
                color.mix(0.7).filled(),
            )
        }))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(-5.0, 0.0), (x_max, 0.0)],
            BLACK.stroke_width(1),
        )))?;
    }

    // Panel 3: degradation relative to each protocol's own baseline.
    {
        let degradation = |protocol: Protocol| -> Series {
            let base = dataset
                .latencies()
                .first()
                .map(|&l| stats::mean(dataset.samples(protocol, l)))
                .unwrap_or(0.0);
            dataset
                .latencies()
                .iter()
                .map(|&latency| {
                    let mean = stats::mean(dataset.samples(protocol, latency));
                    (latency as f64, stats::percent_change(base, mean))
                })
                .collect()
        };
        let h2 = degradation(Protocol::Http2);
        let h3 = degradation(Protocol::Http3);
        let y_max = max_value(&[&h2, &h3]) * 1.1;

        let mut chart = ChartBuilder::on(&panels[2])
            .caption("Degradation from own baseline", ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Latency (ms)")
            .y_desc("Slowdown (%)")
            .draw()?;

        for (protocol, series) in [(Protocol::Http2, &h2), (Protocol::Http3, &h3)] {
            let color = protocol_color(protocol);
            chart
                .draw_series(LineSeries::new(
                    series.iter().copied(),
                    color.stroke_width(2),
                ))?
                .label(protocol.label())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
            chart.draw_series(
                series
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?;
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(WHITE.mix(0.8).filled())
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn speed_series(dataset: &Dataset, protocol: Protocol) -> Series {
    dataset
        .latencies()
        .iter()
        .map(|&latency| {
            (
                latency as f64,
                stats::mean(dataset.speed_samples(protocol, latency)),
            )
        })
        .collect()
}

fn draw_comparison(
    baseline: &Dataset,
    current: &Dataset,
    baseline_label: &str,
    current_label: &str,
    path: &Path,
) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let range = |ds: &Dataset, p: Protocol| stats_series(ds, p, |s| s.percentile_range());
    let series = [
        (baseline, Protocol::Http2, true),
        (baseline, Protocol::Http3, true),
        (current, Protocol::Http2, false),
        (current, Protocol::Http3, false),
    ];
    let all: Vec<Series> = series
        .iter()
        .map(|&(ds, p, _)| range(ds, p))
        .collect();
    let y_max = max_value(&all.iter().collect::<Vec<_>>()) * 1.1;
    let x_max = max_latency(baseline).max(max_latency(current)) * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption("P5-P95 Range: Run Comparison", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Simulated latency (ms)")
        .y_desc("P5-P95 range (s)")
        .draw()?;

    for ((_, protocol, is_baseline), data) in series.iter().zip(&all) {
        let base_color = protocol_color(*protocol);
        // Baseline run drawn faded so the current run stands out.
        let color = if *is_baseline {
            base_color.mix(0.35)
        } else {
            base_color.mix(1.0)
        };
        let label = format!(
            "{} ({})",
            protocol.label(),
            if *is_baseline {
                baseline_label
            } else {
                current_label
            }
        );
        chart
            .draw_series(LineSeries::new(
                data.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(WHITE.mix(0.8).filled())
        .draw()?;
    root.present()?;
    Ok(())
}

/// Side-by-side P5-P95 table for two runs with improvement percentages
pub fn comparison_table(
    baseline: &Dataset,
    current: &Dataset,
    baseline_label: &str,
    current_label: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>8}  {:>10}  {:>14}  {:>14}  {:>10}",
        "Latency", "Protocol", baseline_label, current_label, "Change"
    );
    let mut latencies: Vec<u32> = baseline
        .latencies()
        .iter()
        .chain(current.latencies())
        .copied()
        .collect();
    latencies.sort_unstable();
    latencies.dedup();

    for latency in latencies {
        for protocol in Protocol::ALL {
            let before =
                SummaryStats::from_sample(baseline.samples(protocol, latency)).percentile_range();
            let after =
                SummaryStats::from_sample(current.samples(protocol, latency)).percentile_range();
            let change = if before > 0.0 {
                format!("{:+.1}%", stats::percent_change(before, after))
            } else {
                "n/a".to_string()
            };
            let _ = writeln!(
                out,
                "{:>8}  {:>10}  {:>12.3} s  {:>12.3} s  {:>10}",
                format!("{}ms", latency),
                protocol.label(),
                before,
                after,
                change
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dataset::synthetic_csv;
    use std::io::Write;

    fn synthetic_dataset() -> Dataset {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(synthetic_csv().as_bytes()).unwrap();
        Dataset::load(file.path()).unwrap()
    }

    fn assert_svg(path: &Path) {
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("<svg"), "not an SVG file: {:?}", path);
        assert!(content.len() > 500, "suspiciously small SVG: {:?}", path);
    }

    #[test]
    fn test_every_kind_renders_svg() {
        let dataset = synthetic_dataset();
        let dir = tempfile::tempdir().unwrap();
        for kind in [
            ChartKind::ResponseTime,
            ChartKind::StdDev,
            ChartKind::PercentileRange,
            ChartKind::Boxplot,
            ChartKind::RawData,
            ChartKind::Overview,
        ] {
            let path = dir.path().join(kind.file_name());
            render(kind, &dataset, &path).unwrap();
            assert_svg(&path);
        }
    }

    #[test]
    fn test_boxplot_draws_boxes_and_mean_markers() {
        let dataset = synthetic_dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ChartKind::Boxplot.file_name());
        render(ChartKind::Boxplot, &dataset, &path).unwrap();
        assert_svg(&path);
        let content = std::fs::read_to_string(&path).unwrap();
        // One mean marker circle per protocol and latency condition.
        let circles = content.matches("<circle").count();
        assert!(circles >= 6, "expected mean markers, found {}", circles);
    }

    #[test]
    fn test_comparison_renders_svg() {
        let dataset = synthetic_dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(COMPARISON_FILE_NAME);
        render_comparison(&dataset, &dataset, "before", "after", &path).unwrap();
        assert_svg(&path);
    }

    #[test]
    fn test_summary_lists_all_conditions() {
        let dataset = synthetic_dataset();
        let text = summary(&dataset);
        for latency in ["0ms", "50ms", "100ms"] {
            assert!(text.contains(latency));
        }
        assert!(text.contains("HTTP/2"));
        assert!(text.contains("HTTP/3"));
    }

    #[test]
    fn test_comparison_table_identical_runs() {
        let dataset = synthetic_dataset();
        let table = comparison_table(&dataset, &dataset, "before", "after");
        assert!(table.contains("before"));
        assert!(table.contains("+0.0%"));
    }

    #[test]
    fn test_histogram_bins_cover_all_samples() {
        let values = [1.0, 1.1, 1.2, 2.0, 2.5, 3.0];
        let bins = histogram_bins(&values, 4);
        let total: usize = bins.iter().map(|&(_, _, c)| c).sum();
        assert_eq!(total, values.len());
        assert_eq!(bins.len(), 4);
    }

    #[test]
    fn test_chart_file_names() {
        assert_eq!(
            ChartKind::PercentileRange.file_name(),
            "stability_percentile_range.svg"
        );
        assert_eq!(ChartKind::Overview.file_name(), "benchmark_overview.svg");
    }
}
