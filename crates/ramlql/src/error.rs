//! Error types for RamlQL operations.
//!
//! This module provides the main error type [`RamlqlError`] which wraps the
//! failures of every stage, and [`ConversionError`] for the translation
//! engine itself.

use std::io;

use thiserror::Error;

use ramlql_core::identifier::Id;
use ramlql_parser::ParseError;

/// Formats an optional source origin as ` (in <origin>)`.
fn located(origin: &Option<String>) -> String {
    origin
        .as_ref()
        .map(|origin| format!(" (in {origin})"))
        .unwrap_or_default()
}

fn both_located(first: &Option<String>, second: &Option<String>) -> String {
    match (first, second) {
        (Some(first), Some(second)) => format!(" (in {first} and {second})"),
        (Some(origin), None) | (None, Some(origin)) => format!(" (in {origin})"),
        (None, None) => String::new(),
    }
}

/// Failures of one conversion run.
///
/// Every variant aborts the run; no partial schema is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A field, array item or parent names a type absent from the run.
    #[error("type `{name}` referenced by `{referenced_by}` is not declared{}", located(.origin))]
    UnresolvedTypeReference {
        name: Id,
        referenced_by: Id,
        origin: Option<String>,
    },

    /// A declaration extends a type that is not an interface.
    #[error("`{name}` extends `{parent}`, which is not an object type{}", located(.origin))]
    InvalidParentType {
        name: Id,
        parent: Id,
        origin: Option<String>,
    },

    /// Two declarations would produce the same target type name.
    #[error("type `{name}` is declared more than once{}", both_located(.first_origin, .second_origin))]
    DuplicateNameConflict {
        name: Id,
        first_origin: Option<String>,
        second_origin: Option<String>,
    },

    /// A chain of references or aliases leads back to where it started.
    #[error("type `{name}` is defined in terms of itself{}", located(.origin))]
    CyclicTypeAlias { name: Id, origin: Option<String> },

    /// A registry slot was reserved but never filled.
    #[error("type `{name}` was reserved but never converted")]
    IncompleteType { name: Id },
}

/// The main error type for RamlQL operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text and its origin next to the
/// structured [`ParseError`], so callers can render the diagnostics with
/// their labelled spans.
#[derive(Debug, Error)]
pub enum RamlqlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse {
        err: ParseError,
        src: String,
        origin: String,
    },

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for RamlqlError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl RamlqlError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(
        err: ParseError,
        src: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self::Parse {
            err,
            src: src.into(),
            origin: origin.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_reference_message() {
        let err = ConversionError::UnresolvedTypeReference {
            name: Id::new("Address"),
            referenced_by: Id::new("Person"),
            origin: Some("people.raml".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "type `Address` referenced by `Person` is not declared (in people.raml)"
        );
    }

    #[test]
    fn test_duplicate_name_message_lists_both_origins() {
        let err = ConversionError::DuplicateNameConflict {
            name: Id::new("Person"),
            first_origin: Some("a.raml".to_string()),
            second_origin: Some("b.raml".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "type `Person` is declared more than once (in a.raml and b.raml)"
        );

        let err = ConversionError::DuplicateNameConflict {
            name: Id::new("Person"),
            first_origin: None,
            second_origin: None,
        };
        assert_eq!(err.to_string(), "type `Person` is declared more than once");
    }

    #[test]
    fn test_conversion_error_converts_into_ramlql_error() {
        let err: RamlqlError = ConversionError::IncompleteType {
            name: Id::new("Person"),
        }
        .into();
        assert!(matches!(err, RamlqlError::Conversion(_)));
        assert_eq!(
            err.to_string(),
            "Conversion error: type `Person` was reserved but never converted"
        );
    }
}
