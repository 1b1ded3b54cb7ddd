//! Command-line argument definitions for the RamlQL CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. The positional arguments are the output directory followed
//! by one or more input roots; options control configuration file selection
//! and logging verbosity.

use clap::Parser;

/// Command-line arguments for the RamlQL schema translator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output directory followed by the input files or directories
    #[arg(value_name = "OUTPUT_DIR> <INPUT")]
    pub paths: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Splits the positional arguments into the output directory and the
    /// input roots.
    ///
    /// Returns `None` when fewer than two positional arguments were given.
    pub fn split(&self) -> Option<(&str, &[String])> {
        match self.paths.as_slice() {
            [output, inputs @ ..] if !inputs.is_empty() => Some((output.as_str(), inputs)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_output_and_inputs() {
        let args = Args::parse_from(["ramlql", "out", "models", "extra.raml"]);
        let (output, inputs) = args.split().unwrap();
        assert_eq!(output, "out");
        assert_eq!(inputs, ["models", "extra.raml"]);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_split_requires_two_paths() {
        assert!(Args::parse_from(["ramlql"]).split().is_none());
        assert!(Args::parse_from(["ramlql", "out"]).split().is_none());
    }

    #[test]
    fn test_options() {
        let args = Args::parse_from([
            "ramlql",
            "--config",
            "ramlql.toml",
            "--log-level",
            "debug",
            "out",
            "in",
        ]);
        assert_eq!(args.config.as_deref(), Some("ramlql.toml"));
        assert_eq!(args.log_level, "debug");
        assert!(args.split().is_some());
    }
}
