//! Batch driver: one schema per input root.
//!
//! Each input root (a file or a directory walked recursively) is converted
//! in its own run. Problems with one root or one file never stop the others;
//! every outcome is collected into a [`BatchReport`] for the caller to
//! report.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use thiserror::Error;
use walkdir::WalkDir;

use ramlql::{RamlqlError, SchemaBuilder};

/// Why an input root or a file below it was skipped.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("`{0}` does not exist on the file-system")]
    Missing(PathBuf),

    #[error("file or folder `{path}` cannot be read: {source}")]
    Unreadable { path: PathBuf, source: io::Error },

    #[error("`{0}` is not a file or directory")]
    NotFileOrDirectory(PathBuf),
}

/// What happened to one input root.
#[derive(Debug)]
pub enum RootOutcome {
    /// The schema was written to this path.
    Written(PathBuf),
    /// The root itself could not be used.
    Skipped(SkipReason),
    /// Parsing, conversion, rendering or writing failed.
    Failed(RamlqlError),
}

/// The outcome of one input root together with the files skipped below it.
#[derive(Debug)]
pub struct RootReport {
    root: PathBuf,
    outcome: RootOutcome,
    skipped_files: Vec<SkipReason>,
}

impl RootReport {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn outcome(&self) -> &RootOutcome {
        &self.outcome
    }

    /// Files below the root that could not be read.
    pub fn skipped_files(&self) -> &[SkipReason] {
        &self.skipped_files
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, RootOutcome::Failed(_))
    }
}

/// Per-root outcomes of one batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    roots: Vec<RootReport>,
}

impl BatchReport {
    pub fn roots(&self) -> &[RootReport] {
        &self.roots
    }

    /// Returns `true` if any root failed to produce a schema.
    ///
    /// Skipped roots and skipped files do not count as failures.
    pub fn has_failures(&self) -> bool {
        self.roots.iter().any(RootReport::is_failed)
    }

    /// Paths of every schema written by the batch.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().filter_map(|report| match &report.outcome {
            RootOutcome::Written(path) => Some(path.as_path()),
            _ => None,
        })
    }
}

/// Converts every input root and writes one schema per root below `output_dir`.
///
/// With a single root the schema is written directly into `output_dir`;
/// with several, each root gets its own subdirectory named after the root.
pub fn run_batch(builder: &SchemaBuilder, output_dir: &Path, inputs: &[String]) -> BatchReport {
    let targets = target_dirs(output_dir, inputs);
    let roots = inputs
        .iter()
        .zip(targets)
        .map(|(input, target)| convert_root(builder, Path::new(input), &target))
        .collect();

    BatchReport { roots }
}

/// Output directory of each root; subdirectory names never collide.
fn target_dirs(output_dir: &Path, inputs: &[String]) -> Vec<PathBuf> {
    if inputs.len() == 1 {
        return vec![output_dir.to_path_buf()];
    }

    let mut used = HashSet::new();
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let stem = Path::new(input)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("root{index}"));

            let mut name = stem.clone();
            let mut suffix = 1;
            while !used.insert(name.clone()) {
                suffix += 1;
                name = format!("{stem}-{suffix}");
            }
            output_dir.join(name)
        })
        .collect()
}

/// Checks that a root exists, is a file or directory and can be read.
fn check_root(root: &Path) -> Result<(), SkipReason> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(SkipReason::Missing(root.to_path_buf()));
        }
        Err(source) => {
            return Err(SkipReason::Unreadable {
                path: root.to_path_buf(),
                source,
            });
        }
    };

    let readable = if metadata.is_dir() {
        fs::read_dir(root).map(|_| ())
    } else if metadata.is_file() {
        fs::File::open(root).map(|_| ())
    } else {
        return Err(SkipReason::NotFileOrDirectory(root.to_path_buf()));
    };

    readable.map_err(|source| SkipReason::Unreadable {
        path: root.to_path_buf(),
        source,
    })
}

fn convert_root(builder: &SchemaBuilder, root: &Path, target: &Path) -> RootReport {
    info!(root = root.display().to_string(); "Converting input root");

    let mut skipped_files = Vec::new();
    let outcome = match check_root(root) {
        Err(reason) => {
            warn!(root = root.display().to_string(); "Skipping input root");
            RootOutcome::Skipped(reason)
        }
        Ok(()) => match translate_root(builder, root, target, &mut skipped_files) {
            Ok(path) => RootOutcome::Written(path),
            Err(err) => RootOutcome::Failed(err),
        },
    };

    RootReport {
        root: root.to_path_buf(),
        outcome,
        skipped_files,
    }
}

/// Parses every readable file below `root`, converts the pooled declarations
/// and writes the schema into `target`.
fn translate_root(
    builder: &SchemaBuilder,
    root: &Path,
    target: &Path,
    skipped_files: &mut Vec<SkipReason>,
) -> Result<PathBuf, RamlqlError> {
    let mut declarations = Vec::new();
    let mut files_len = 0usize;

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                skipped_files.push(SkipReason::Unreadable {
                    path,
                    source: err.into(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(source) => {
                debug!(path = path.display().to_string(); "Skipping unreadable file");
                skipped_files.push(SkipReason::Unreadable {
                    path: path.to_path_buf(),
                    source,
                });
                continue;
            }
        };

        let origin = path.display().to_string();
        declarations.extend(builder.parse(&source, &origin)?.into_declarations());
        files_len += 1;
    }

    info!(
        root = root.display().to_string(),
        files_len,
        declarations_len = declarations.len();
        "Input root parsed"
    );

    let graph = builder.convert(&declarations)?;
    let schema = builder.render(&graph)?;

    fs::create_dir_all(target)?;
    let path = target.join(builder.config().output().file_name());
    fs::write(&path, schema)?;

    info!(output_file = path.display().to_string(); "Schema written");

    Ok(path)
}
