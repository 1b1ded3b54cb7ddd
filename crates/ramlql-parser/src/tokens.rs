//! Token definitions produced by the [`lexer`](crate::lexer).

use std::fmt;

use winnow::stream::Location;

use crate::span::Span;

/// Tokens of the YAML subset used by RAML libraries.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    /// `#%RAML 1.0 Library` on the first line
    Header(&'src str),
    /// `# comment` (text after the `#`)
    Comment(&'src str),

    /// Unquoted scalar text, trailing whitespace excluded
    Plain(&'src str),
    /// Single or double quoted scalar with escapes resolved
    Quoted(String),
    /// Literal (`|`) or folded (`>`) block scalar content
    BlockScalar(String),

    Colon, // `:` followed by a separator
    Dash,  // `- ` block sequence entry

    LeftBracket,  // [
    RightBracket, // ]
    LeftBrace,    // {
    RightBrace,   // }
    Comma,        // ,

    /// Spaces or tabs; the width of indentation is the span length
    Whitespace,
    Newline,
}

impl Token<'_> {
    /// Returns `true` for tokens that carry no structure inside a line.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Whitespace | Token::Comment(_))
    }
}

/// A token with position information for winnow integration
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl Location for PositionedToken<'_> {
    fn previous_token_end(&self) -> usize {
        self.span.start()
    }

    fn current_token_start(&self) -> usize {
        self.span.start()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Header(text) => write!(f, "#{text}"),
            Token::Comment(text) => write!(f, "#{text}"),
            Token::Plain(text) => write!(f, "{text}"),
            Token::Quoted(text) => write!(f, "\"{text}\""),
            Token::BlockScalar(_) => write!(f, "block scalar"),
            Token::Colon => write!(f, ":"),
            Token::Dash => write!(f, "-"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Whitespace => write!(f, " "),
            Token::Newline => write!(f, "\\n"),
        }
    }
}
