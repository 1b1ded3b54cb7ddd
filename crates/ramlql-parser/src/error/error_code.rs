//! Error codes for the diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Parser errors
//! - `E3xx` - Elaboration errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unterminated quoted scalar.
    E001,

    /// Unexpected character.
    E002,

    /// Invalid escape sequence in a double quoted scalar.
    ///
    /// Valid escapes are: `\n`, `\r`, `\t`, `\b`, `\f`, `\\`, `\/`, `\"`, `\0`, `\uXXXX`.
    E003,

    /// Tab character used for indentation.
    ///
    /// YAML only allows spaces for indentation.
    E004,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before a flow collection or mapping entry was closed.
    E101,

    // =========================================================================
    // Elaboration Errors (E3xx)
    // =========================================================================
    /// Unknown library alias.
    ///
    /// A qualified type `lib.Type` names a library that is not declared
    /// under `uses`.
    E300,

    /// Duplicate key.
    E301,

    /// Invalid facet value.
    ///
    /// A facet holds a value of the wrong shape (e.g. a sequence where a
    /// mapping is expected).
    E302,

    /// Invalid name.
    ///
    /// Type and property names must be valid GraphQL names.
    E303,

    /// Invalid type expression.
    E304,

    /// Unsupported union type.
    E305,

    /// Facet not applicable to this type.
    ///
    /// For example `properties` on a scalar or `items` on an object.
    E306,

    /// Conflicting inline type name.
    ///
    /// Two properties of one type (e.g. `home_address` and `homeAddress`)
    /// would give their inline objects the same name.
    E307,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
            ErrorCode::E304 => "E304",
            ErrorCode::E305 => "E305",
            ErrorCode::E306 => "E306",
            ErrorCode::E307 => "E307",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E003 => "invalid escape sequence",
            ErrorCode::E004 => "tab in indentation",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E300 => "unknown library",
            ErrorCode::E301 => "duplicate key",
            ErrorCode::E302 => "invalid facet value",
            ErrorCode::E303 => "invalid name",
            ErrorCode::E304 => "invalid type expression",
            ErrorCode::E305 => "unsupported union type",
            ErrorCode::E306 => "facet not applicable",
            ErrorCode::E307 => "conflicting inline type name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
