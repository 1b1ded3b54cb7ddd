//! RAML type expressions.
//!
//! The value of a `type` facet (or the short form `name: <expr>`) is a small
//! expression language of its own:
//!
//! ```text
//! expr    := alt ('|' alt)*
//! alt     := primary ('[]')*
//! primary := '(' expr ')' | name ('.' name)?
//! ```
//!
//! Expressions are parsed here into a [`TypeExpr`]; deciding what a name
//! means is left to elaboration.

use thiserror::Error;
use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, cut_err, delimited, opt, preceded, repeat, separated},
    error::{ContextError, ErrMode, StrContext, StrContextValue},
    token::{one_of, take_while},
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr<'a> {
    /// A type name, optionally qualified by a library alias (`lib.Name`).
    Named {
        library: Option<&'a str>,
        name: &'a str,
    },
    /// `Expr[]`
    Array(Box<TypeExpr<'a>>),
    /// `A | B`
    Union(Vec<TypeExpr<'a>>),
}

/// Error returned for a malformed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeExprError {
    #[error("{0}")]
    Syntax(String),

    #[error("unexpected `{0}` after type expression")]
    Trailing(String),
}

fn identifier<'a>(input: &mut &'a str) -> IResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '-'
        }),
    )
        .take()
        .parse_next(input)
}

fn type_name<'a>(input: &mut &'a str) -> IResult<TypeExpr<'a>> {
    (identifier, opt(preceded('.', identifier)))
        .map(|(first, second)| match second {
            Some(name) => TypeExpr::Named {
                library: Some(first),
                name,
            },
            None => TypeExpr::Named {
                library: None,
                name: first,
            },
        })
        .context(StrContext::Label("type name"))
        .parse_next(input)
}

fn group<'a>(input: &mut &'a str) -> IResult<TypeExpr<'a>> {
    delimited(
        ('(', space0),
        cut_err(expression),
        cut_err((space0, ')'))
            .context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
    )
    .parse_next(input)
}

fn array_suffixed<'a>(input: &mut &'a str) -> IResult<TypeExpr<'a>> {
    let base = alt((group, type_name)).parse_next(input)?;
    let dimensions: usize = repeat(0.., "[]").parse_next(input)?;

    Ok((0..dimensions).fold(base, |inner, _| TypeExpr::Array(Box::new(inner))))
}

fn expression<'a>(input: &mut &'a str) -> IResult<TypeExpr<'a>> {
    let mut alternatives: Vec<TypeExpr<'a>> =
        separated(1.., delimited(space0, array_suffixed, space0), '|').parse_next(input)?;

    if alternatives.len() == 1 {
        Ok(alternatives.remove(0))
    } else {
        Ok(TypeExpr::Union(alternatives))
    }
}

/// Parse a complete type expression.
pub fn parse_type_expr(text: &str) -> Result<TypeExpr<'_>, TypeExprError> {
    let mut input = text;

    let expr = expression.parse_next(&mut input).map_err(|err| match err {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => {
            let message = e.to_string().replace('\n', "; ");
            if message.is_empty() {
                TypeExprError::Syntax("invalid type expression".to_string())
            } else {
                TypeExprError::Syntax(message)
            }
        }
        ErrMode::Incomplete(_) => TypeExprError::Syntax("incomplete type expression".to_string()),
    })?;

    let rest = input.trim();
    if rest.is_empty() {
        Ok(expr)
    } else {
        Err(TypeExprError::Trailing(rest.to_string()))
    }
}
