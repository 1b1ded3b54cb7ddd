//! RamlQL CLI entry point.

use std::{process, str::FromStr};

use clap::{CommandFactory, Parser};
use log::{LevelFilter, debug, error, info, warn};

use ramlql::RamlqlError;
use ramlql_cli::{Args, BatchReport, RootOutcome, error_adapter::to_reportables};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    if args.split().is_none() {
        // Usage only; nothing is converted
        let _ = Args::command().print_help();
        return;
    }

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting RamlQL");
    debug!(args:?; "Parsed arguments");

    match ramlql_cli::run(&args) {
        Ok(report) => {
            if report_batch(&report) {
                process::exit(1);
            }
        }
        Err(err) => {
            report_error(&err);
            process::exit(1);
        }
    }

    info!("Completed successfully");
}

/// Reports every skipped item and failed root; returns `true` on any failure.
fn report_batch(report: &BatchReport) -> bool {
    for root in report.roots() {
        for skipped in root.skipped_files() {
            warn!(root = root.root().display().to_string(); "{skipped}");
        }
        match root.outcome() {
            RootOutcome::Written(path) => {
                info!(output_file = path.display().to_string(); "Schema exported")
            }
            RootOutcome::Skipped(reason) => warn!("{reason}"),
            RootOutcome::Failed(err) => {
                error!(root = root.root().display().to_string(); "Input root failed");
                report_error(err);
            }
        }
    }
    report.has_failures()
}

fn report_error(err: &RamlqlError) {
    let reporter = miette::GraphicalReportHandler::new();

    // Render each diagnostic independently
    for reportable in to_reportables(err) {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }
}
