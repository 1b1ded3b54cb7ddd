//! Error and diagnostic system for the RAML parser.
//!
//! The error system is built around [`Diagnostic`]: one error or warning
//! with an optional [`ErrorCode`], labelled source spans and help text.
//! Every phase (lexing, parsing, elaboration) reports through diagnostics,
//! and one or more of them are returned together as a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use ramlql_parser::error::{Diagnostic, ErrorCode};
//! # use ramlql_parser::Span;
//!
//! let diag = Diagnostic::error("property `name` is defined multiple times")
//!     .with_code(ErrorCode::E301)
//!     .with_label(Span::new(100..104), "duplicate key")
//!     .with_secondary_label(Span::new(50..54), "first defined here")
//!     .with_help("remove the duplicate or use a different name");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
