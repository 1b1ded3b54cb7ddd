//! CLI logic for the RamlQL schema translator.
//!
//! This module contains the core CLI logic: configuration loading and the
//! batch driver that turns every input root into one GraphQL schema.

pub mod batch;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use batch::{BatchReport, RootOutcome, RootReport, SkipReason};

use std::path::Path;

use log::info;

use ramlql::{RamlqlError, SchemaBuilder};

/// Run the RamlQL CLI application
///
/// This function converts every input root named by `args` and writes one
/// schema per root into the output directory.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `RamlqlError` for:
/// - Fewer than two positional arguments
/// - Configuration loading errors
///
/// Failures of individual roots are not errors of the run; they are
/// recorded in the returned [`BatchReport`].
pub fn run(args: &Args) -> Result<BatchReport, RamlqlError> {
    let Some((output_dir, inputs)) = args.split() else {
        return Err(RamlqlError::Config(
            "expected an output directory followed by at least one input".to_string(),
        ));
    };

    info!(
        output_dir,
        inputs_len = inputs.len();
        "Processing input roots"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    let builder = SchemaBuilder::new(app_config);
    let report = batch::run_batch(&builder, Path::new(output_dir), inputs);

    info!(
        written_len = report.written().count(),
        roots_len = report.roots().len();
        "Batch finished"
    );

    Ok(report)
}
