//! HTTP Transport Benchmark - Main CLI Application

use clap::Parser;
use http_transport_bench::{
    chart,
    cli::{build_probe_config, ChartKindArg, Cli, Command},
    client,
    config::{ensure_output_dir, AnalysisConfig, EnvManager, ProbeOutputFormat},
    error::{AppError, Result},
    logging::Logger,
    models::Dataset,
    output::ConsoleOutput,
    report,
    validate,
    PKG_NAME, VERSION,
};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // .env must be loaded before clap reads env-var defaults.
    if let Err(e) = EnvManager::load_env_file(false) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }

    let cli = Cli::parse();
    let use_colors = cli.use_colors();

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_colors));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    cli.validate()?;
    let console = ConsoleOutput::new(cli.use_colors());
    let logger = Logger::new(cli.verbose, cli.debug, cli.use_colors());

    if cli.debug {
        logger.debug(&format!("{} v{}", PKG_NAME, VERSION));
    }

    match cli.command {
        Command::Probe {
            url,
            protocol,
            timeout,
            insecure,
            output,
        } => {
            let config = build_probe_config(&url, &protocol, timeout, insecure, output)?;
            let outcome = client::run_probe(&config, &logger).await;
            match config.output {
                ProbeOutputFormat::Time => println!("{}", outcome.format_time()),
                ProbeOutputFormat::Json => println!("{}", outcome.format_json()),
            }
            // Probe failures are recorded in the output, not the exit code.
            Ok(())
        }

        Command::Validate { csv } => {
            let config = AnalysisConfig::resolve(csv, None);
            let dataset = Dataset::load(&config.csv_path)?;
            logger.info(&format!(
                "loaded {} rows from {}",
                dataset.len(),
                config.csv_path.display()
            ));

            let report = validate::validate_dataset(&dataset);
            print!("{}", validate::render_report(&report, &console));

            if report.passed() {
                Ok(())
            } else {
                Err(AppError::validation(
                    "benchmark data failed plausibility checks",
                ))
            }
        }

        Command::Report { csv, output_dir } => {
            let config = AnalysisConfig::resolve(csv, output_dir);
            config.validate()?;
            let dataset = Dataset::load(&config.csv_path)?;

            let analysis = report::analyze(&dataset)?;
            let text = report::render(&analysis);
            let path = config.output_path(report::REPORT_FILE_NAME);
            std::fs::write(&path, &text)?;

            print!("{}", text);
            logger.info(&format!("report written to {}", path.display()));
            Ok(())
        }

        Command::Chart {
            csv,
            output_dir,
            kinds,
        } => {
            let config = AnalysisConfig::resolve(csv, output_dir);
            config.validate()?;
            let dataset = Dataset::load(&config.csv_path)?;

            let kinds = if kinds.is_empty() {
                ChartKindArg::ALL.to_vec()
            } else {
                kinds
            };
            for kind in kinds {
                let kind = chart_kind(kind);
                let path = config.output_path(kind.file_name());
                chart::render(kind, &dataset, &path)?;
                println!("saved {}", path.display());
            }

            println!();
            print!("{}", chart::summary(&dataset));
            Ok(())
        }

        Command::Compare {
            baseline,
            current,
            baseline_label,
            current_label,
            output_dir,
        } => {
            let config = AnalysisConfig::resolve(None, output_dir);
            ensure_output_dir(&config.output_dir)?;
            let baseline_data = Dataset::load(&baseline)?;
            let current_data = Dataset::load(&current)?;

            let path = config.output_path(chart::COMPARISON_FILE_NAME);
            chart::render_comparison(
                &baseline_data,
                &current_data,
                &baseline_label,
                &current_label,
                &path,
            )?;
            println!("saved {}", path.display());
            println!();
            print!(
                "{}",
                chart::comparison_table(
                    &baseline_data,
                    &current_data,
                    &baseline_label,
                    &current_label
                )
            );
            Ok(())
        }
    }
}

fn chart_kind(arg: ChartKindArg) -> chart::ChartKind {
    match arg {
        ChartKindArg::ResponseTime => chart::ChartKind::ResponseTime,
        ChartKindArg::StdDev => chart::ChartKind::StdDev,
        ChartKindArg::PercentileRange => chart::ChartKind::PercentileRange,
        ChartKindArg::Boxplot => chart::ChartKind::Boxplot,
        ChartKindArg::RawData => chart::ChartKind::RawData,
        ChartKindArg::Overview => chart::ChartKind::Overview,
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Pass --csv or set BENCHMARK_CSV to the results table");
            eprintln!("  - Set BENCHMARK_OUTPUT_DIR or --output-dir for chart output");
            eprintln!("  - Check your .env file format");
        }
        AppError::Network(_) | AppError::Timeout(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check that the benchmark server is running");
            eprintln!("  - For self-signed test certificates, pass --insecure");
            eprintln!("  - Increase the deadline with --timeout");
        }
        AppError::Validation(_) => {
            eprintln!();
            eprintln!("Validation help:");
            eprintln!("  - Re-run the benchmark harness to regenerate the CSV");
            eprintln!("  - Check the harness payload size (1 MB expected)");
        }
        _ => {}
    }
}
