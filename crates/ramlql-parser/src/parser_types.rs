//! Syntax tree produced by the [`parser`](crate::parser).
//!
//! The tree mirrors the YAML structure of a RAML file. Scalars borrow their
//! text from the token stream; RAML meaning is assigned later by
//! [`elaborate`](crate::elaborate).

use crate::span::{Span, Spanned};

/// A parsed RAML file.
#[derive(Debug, Clone)]
pub struct Document<'src> {
    pub root: Mapping<'src>,
}

/// A block or flow mapping.
#[derive(Debug, Clone, Default)]
pub struct Mapping<'src> {
    pub entries: Vec<Entry<'src>>,
    pub span: Span,
}

impl<'src> Mapping<'src> {
    /// Find the first entry with the given key.
    pub fn get(&self, key: &str) -> Option<&Entry<'src>> {
        self.entries.iter().find(|entry| *entry.key.inner() == key)
    }
}

/// A `key: value` pair.
#[derive(Debug, Clone)]
pub struct Entry<'src> {
    pub key: Spanned<&'src str>,
    pub value: Node<'src>,
}

impl Entry<'_> {
    /// Span covering the key and its value.
    pub fn span(&self) -> Span {
        self.key.span().union(self.value.span())
    }
}

/// A YAML node.
#[derive(Debug, Clone)]
pub enum Node<'src> {
    Scalar(Spanned<&'src str>),
    Sequence(Spanned<Vec<Node<'src>>>),
    Mapping(Mapping<'src>),
    /// A key without a value; the span points at the key's `:`.
    Null(Span),
}

impl<'src> Node<'src> {
    pub fn span(&self) -> Span {
        match self {
            Node::Scalar(scalar) => scalar.span(),
            Node::Sequence(items) => items.span(),
            Node::Mapping(mapping) => mapping.span,
            Node::Null(span) => *span,
        }
    }

    pub fn as_scalar(&self) -> Option<&Spanned<&'src str>> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping<'src>> {
        match self {
            Node::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Short name of the node shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "scalar",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
            Node::Null(_) => "empty value",
        }
    }
}
