//! Source declaration model.
//!
//! A [`Declaration`] is one named entry of a RAML type library after parsing
//! and elaboration. Declarations are produced once per input file and are
//! read-only for the rest of a conversion run.
//!
//! ```text
//! Person:                        Declaration { name: Person, kind: Object([..]) }
//!   properties:
//!     name: string                 Field { name, Scalar(String) }
//!     address: Address             Field { address, Reference(Address) }
//!     home:                        Field { home, Object([..]) named PersonHome }
//!       properties:
//!         street: string
//! Dog:                           Declaration { name: Dog, parents: [Animal] }
//!   type: Animal
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::identifier::Id;

/// Primitive kinds a scalar declaration can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Number,
    Boolean,
    Date,
    DateTime,
    Time,
    File,
    Any,
    Nil,
}

impl ScalarKind {
    /// Every primitive kind, in declaration order.
    pub const ALL: [ScalarKind; 10] = [
        ScalarKind::String,
        ScalarKind::Integer,
        ScalarKind::Number,
        ScalarKind::Boolean,
        ScalarKind::Date,
        ScalarKind::DateTime,
        ScalarKind::Time,
        ScalarKind::File,
        ScalarKind::Any,
        ScalarKind::Nil,
    ];

    /// Returns the RAML spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Number => "number",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Date => "date-only",
            ScalarKind::DateTime => "datetime",
            ScalarKind::Time => "time-only",
            ScalarKind::File => "file",
            ScalarKind::Any => "any",
            ScalarKind::Nil => "nil",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name is not a RAML built-in scalar type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a built-in scalar type")]
pub struct UnknownScalarKind(pub String);

impl FromStr for ScalarKind {
    type Err = UnknownScalarKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ScalarKind::String),
            "integer" => Ok(ScalarKind::Integer),
            "number" => Ok(ScalarKind::Number),
            "boolean" => Ok(ScalarKind::Boolean),
            "date-only" => Ok(ScalarKind::Date),
            "datetime" | "datetime-only" => Ok(ScalarKind::DateTime),
            "time-only" => Ok(ScalarKind::Time),
            "file" => Ok(ScalarKind::File),
            "any" => Ok(ScalarKind::Any),
            "nil" => Ok(ScalarKind::Nil),
            _ => Err(UnknownScalarKind(s.to_string())),
        }
    }
}

/// The shape of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationKind {
    /// An object type with its own fields in declaration order.
    Object(Vec<Field>),
    /// An array whose items are described by the inner declaration.
    ArrayOf(Box<Declaration>),
    /// A primitive scalar.
    Scalar(ScalarKind),
    /// A reference by name to another declaration of the same run.
    Reference(Id),
}

/// A named field of an object declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: Id,
    declaration: Declaration,
    description: Option<String>,
}

impl Field {
    /// Creates a field whose type is described by `declaration`.
    pub fn new(name: Id, declaration: Declaration) -> Self {
        Self {
            name,
            declaration,
            description: None,
        }
    }

    /// Attaches a human readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// One named entry of the source type tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    name: Id,
    kind: DeclarationKind,
    parents: Vec<Id>,
    description: Option<String>,
    origin: Option<String>,
}

impl Declaration {
    fn new(name: Id, kind: DeclarationKind) -> Self {
        Self {
            name,
            kind,
            parents: Vec::new(),
            description: None,
            origin: None,
        }
    }

    /// Creates an object declaration with the given fields.
    pub fn object(name: Id, fields: Vec<Field>) -> Self {
        Self::new(name, DeclarationKind::Object(fields))
    }

    /// Creates an array declaration of `items`.
    pub fn array_of(name: Id, items: Declaration) -> Self {
        Self::new(name, DeclarationKind::ArrayOf(Box::new(items)))
    }

    /// Creates a scalar declaration.
    pub fn scalar(name: Id, kind: ScalarKind) -> Self {
        Self::new(name, DeclarationKind::Scalar(kind))
    }

    /// Creates a declaration that refers to `target` by name.
    pub fn reference(name: Id, target: Id) -> Self {
        Self::new(name, DeclarationKind::Reference(target))
    }

    /// Sets the parent types this declaration inherits from.
    pub fn with_parents(mut self, parents: Vec<Id>) -> Self {
        self.parents = parents;
        self
    }

    /// Attaches a human readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Records the source this declaration was read from, recursively for
    /// every nested declaration.
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.set_origin(origin);
        self
    }

    fn set_origin(&mut self, origin: &str) {
        self.origin = Some(origin.to_string());
        match &mut self.kind {
            DeclarationKind::Object(fields) => {
                for field in fields {
                    field.declaration.set_origin(origin);
                }
            }
            DeclarationKind::ArrayOf(items) => items.set_origin(origin),
            DeclarationKind::Scalar(_) | DeclarationKind::Reference(_) => {}
        }
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn kind(&self) -> &DeclarationKind {
        &self.kind
    }

    /// Names of the types this declaration extends, in declaration order.
    pub fn parents(&self) -> &[Id] {
        &self.parents
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The source identifier (usually a file path) this declaration came from.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Returns `true` if this declaration is an object type.
    pub fn is_object(&self) -> bool {
        matches!(self.kind, DeclarationKind::Object(_))
    }

    /// Returns the object fields, or an empty slice for non-object kinds.
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            DeclarationKind::Object(fields) => fields,
            _ => &[],
        }
    }
}
