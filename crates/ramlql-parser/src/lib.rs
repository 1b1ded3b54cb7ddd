//! # RAML Library Parser
//!
//! Parser for RAML 1.0 type libraries. This crate provides the pipeline
//! from source text to the [`Declaration`](ramlql_core::declaration::Declaration)
//! model consumed by the GraphQL converter.
//!
//! ## Usage
//!
//! ```
//! # use ramlql_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "#%RAML 1.0 Library\ntypes:\n  Person:\n    properties:\n      name: string\n";
//!
//!     let library = parse(source, "person.raml")?;
//!     assert_eq!(library.declarations().len(), 1);
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod lexer;
mod parser;
mod parser_types;
mod span;
mod tokens;
mod type_expr;

pub use elaborate::{Library, LibraryUse};
pub use error::{Diagnostic, ErrorCode, ParseError};
pub use span::Span;

use log::{debug, info};

use elaborate::Builder;

/// First-line marker of a RAML 1.0 library.
pub const LIBRARY_HEADER: &str = "#%RAML 1.0 Library";

/// Returns `true` if `source` starts with the RAML 1.0 library header.
pub fn is_library_source(source: &str) -> bool {
    source
        .trim_start_matches('\u{feff}')
        .lines()
        .next()
        .is_some_and(|line| line.starts_with(LIBRARY_HEADER))
}

/// Parse one source file into a [`Library`].
///
/// Only RAML 1.0 libraries carry type declarations; any other input (other
/// RAML fragments, unrelated files found next to the libraries) yields an
/// empty library.
///
/// The pipeline is:
///
/// 1. **Tokenize** - Convert source text to tokens
/// 2. **Parse** - Build the YAML syntax tree from tokens
/// 3. **Elaborate** - Read the `uses` and `types` sections into declarations
///
/// # Arguments
///
/// * `source` - The file content
/// * `origin` - Identifier of the source (usually its path), recorded on
///   every declaration
///
/// # Errors
///
/// Returns a [`ParseError`] carrying one or more diagnostics when the file
/// is a library but is malformed.
pub fn parse(source: &str, origin: &str) -> Result<Library, ParseError> {
    if !is_library_source(source) {
        debug!(origin; "Not a RAML library, skipping");
        return Ok(Library::default());
    }
    let source = source.trim_start_matches('\u{feff}');

    info!(origin; "Parsing RAML library");

    // Step 1: Tokenize
    let tokens = lexer::tokenize(source)?;

    // Step 2: Parse
    let document = parser::build_document(&tokens)?;

    // Step 3: Elaborate
    let library = Builder::new(origin).build(&document)?;

    Ok(library)
}
