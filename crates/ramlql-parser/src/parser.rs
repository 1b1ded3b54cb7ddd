//! Parser for RAML library tokens.
//!
//! This module transforms a token stream from the [`lexer`](super::lexer)
//! into the syntax tree defined in [`parser_types`](super::parser_types).
//! Block structure is recovered from the indentation width of each line;
//! flow collections (`[a, b]`, `{k: v}`) ignore line structure. The public
//! entry point is [`build_document`].

use winnow::{
    Parser as _,
    combinator::{opt, repeat},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types as types,
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) at error start position
    ///
    /// Used to calculate start_offset as: `tokens.len() - start_offset_value`
    StartOffset(usize),
}

type Input<'src> = RamlTokenSlice<'src>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;
/// Type alias for winnow TokenSlice with our positioned tokens
type RamlTokenSlice<'src> = TokenSlice<'src, PositionedToken<'src>>;

fn cut_err<'src, O, F>(input: &mut Input<'src>, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    let start_remaining = input.eof_offset();

    match f(input) {
        Ok(o) => Ok(o),
        Err(ErrMode::Backtrack(mut e)) | Err(ErrMode::Cut(mut e)) => {
            e.push(Context::StartOffset(start_remaining));
            Err(ErrMode::Cut(e))
        }
        Err(e) => Err(e),
    }
}

/// Helper to create a Cut error at the current token
fn cut_error_expected(input: &Input<'_>, label: &'static str) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Label(label));
    e.push(Context::StartOffset(input.eof_offset()));
    ErrMode::Cut(e)
}

/// Look at the next token without consuming it.
fn peek_token<'src>(input: &mut Input<'src>) -> Option<&'src PositionedToken<'src>> {
    let checkpoint = input.checkpoint();
    let token: IResult<&'src PositionedToken<'src>> = any.parse_next(input);
    input.reset(&checkpoint);
    token.ok()
}

/// Returns `true` if the next token is a line break or the input ended.
fn at_line_end(input: &mut Input<'_>) -> bool {
    peek_token(input).is_none_or(|token| matches!(token.token, Token::Newline))
}

fn at_dash(input: &mut Input<'_>) -> bool {
    peek_token(input).is_some_and(|token| matches!(token.token, Token::Dash))
}

/// Parse indentation or inline spacing, returning its width
fn whitespace<'src>(input: &mut Input<'src>) -> IResult<usize> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::Whitespace).then_some(token.span.len())
    })
    .parse_next(input)
}

fn comment<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Comment(_)))
        .void()
        .parse_next(input)
}

/// Parse whitespace and comments within a line
fn trivia<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(
        0..,
        any.verify(|token: &PositionedToken<'_>| token.is_trivia())
            .void(),
    )
    .parse_next(input)
}

/// Parse whitespace, comments and line breaks inside flow collections
fn flow_trivia<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(
        0..,
        any.verify(|token: &PositionedToken<'_>| {
            token.is_trivia() || matches!(token.token, Token::Newline)
        })
        .void(),
    )
    .parse_next(input)
}

fn newline<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Newline))
        .void()
        .parse_next(input)
}

fn colon<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::Colon).then_some(token.span)
    })
    .context(Context::Label("`:`"))
    .parse_next(input)
}

fn dash<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::Dash).then_some(token.span)
    })
    .context(Context::Label("`-`"))
    .parse_next(input)
}

fn comma<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::Comma).then_some(token.span)
    })
    .parse_next(input)
}

fn left_bracket<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::LeftBracket).then_some(token.span)
    })
    .parse_next(input)
}

fn right_bracket<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::RightBracket).then_some(token.span)
    })
    .context(Context::Label("`]`"))
    .parse_next(input)
}

fn left_brace<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::LeftBrace).then_some(token.span)
    })
    .parse_next(input)
}

fn right_brace<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::RightBrace).then_some(token.span)
    })
    .context(Context::Label("`}`"))
    .parse_next(input)
}

/// The `#%RAML ...` line; library detection happens before tokenizing.
fn header<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &'src PositionedToken<'src>| match &token.token {
        Token::Header(_) => Some(token.span),
        _ => None,
    })
    .parse_next(input)
}

/// Parse a plain or quoted scalar usable as a mapping key
fn key_scalar<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    any.verify_map(|token: &'src PositionedToken<'src>| match &token.token {
        Token::Plain(text) => Some(Spanned::new(*text, token.span)),
        Token::Quoted(text) => Some(Spanned::new(text.as_str(), token.span)),
        _ => None,
    })
    .context(Context::Label("mapping key"))
    .parse_next(input)
}

/// Parse any scalar value, including block scalars
fn scalar<'src>(input: &mut Input<'src>) -> IResult<types::Node<'src>> {
    any.verify_map(|token: &'src PositionedToken<'src>| match &token.token {
        Token::Plain(text) => Some(Spanned::new(*text, token.span)),
        Token::Quoted(text) | Token::BlockScalar(text) => {
            Some(Spanned::new(text.as_str(), token.span))
        }
        _ => None,
    })
    .map(types::Node::Scalar)
    .context(Context::Label("scalar"))
    .parse_next(input)
}

/// Returns `true` if the input starts with `key:`.
fn at_mapping_key(input: &mut Input<'_>) -> bool {
    let checkpoint = input.checkpoint();
    let found = (key_scalar, opt(whitespace), colon).parse_next(input).is_ok();
    input.reset(&checkpoint);
    found
}

/// Skip blank and comment-only lines starting at the beginning of a line.
///
/// Returns the indentation of the next content line, leaving the input at
/// its first token, or `None` at the end of input.
fn content_line<'src>(input: &mut Input<'src>) -> IResult<Option<usize>> {
    loop {
        let indent = opt(whitespace).parse_next(input)?.unwrap_or(0);
        opt(comment).parse_next(input)?;

        match peek_token(input) {
            None => return Ok(None),
            Some(token) if matches!(token.token, Token::Newline) => newline(input)?,
            Some(_) => return Ok(Some(indent)),
        }
    }
}

/// Move from the end of a line to the next content line.
fn next_line<'src>(input: &mut Input<'src>) -> IResult<Option<usize>> {
    if peek_token(input).is_none() {
        return Ok(None);
    }
    newline(input)?;
    content_line(input)
}

/// Require the rest of the line to be empty apart from trivia.
fn end_of_line<'src>(input: &mut Input<'src>) -> IResult<()> {
    trivia(input)?;
    if at_line_end(input) {
        Ok(())
    } else {
        Err(cut_error_expected(input, "end of line"))
    }
}

/// Parse a flow sequence: `[a, b, c]`
fn flow_sequence<'src>(input: &mut Input<'src>) -> IResult<types::Node<'src>> {
    let open = left_bracket.parse_next(input)?;

    cut_err(input, |input| {
        let mut items = Vec::new();
        flow_trivia(input)?;
        loop {
            if let Some(close) = opt(right_bracket).parse_next(input)? {
                return Ok(types::Node::Sequence(Spanned::new(items, open.union(close))));
            }
            items.push(flow_node(input)?);
            flow_trivia(input)?;
            if opt(comma).parse_next(input)?.is_none() {
                let close = right_bracket(input)?;
                return Ok(types::Node::Sequence(Spanned::new(items, open.union(close))));
            }
            flow_trivia(input)?;
        }
    })
}

/// Parse one `key: value` entry of a flow mapping.
///
/// A key without `:` has an empty value.
fn flow_entry<'src>(input: &mut Input<'src>) -> IResult<types::Entry<'src>> {
    let key = key_scalar(input)?;
    flow_trivia(input)?;

    let Some(colon_span) = opt(colon).parse_next(input)? else {
        return Ok(types::Entry {
            value: types::Node::Null(key.span()),
            key,
        });
    };
    flow_trivia(input)?;

    let ends_entry = peek_token(input).is_some_and(|token| {
        matches!(token.token, Token::Comma | Token::RightBrace)
    });
    let value = if ends_entry {
        types::Node::Null(colon_span)
    } else {
        flow_node(input)?
    };

    Ok(types::Entry { key, value })
}

/// Parse a flow mapping: `{type: string, required: false}`
fn flow_mapping<'src>(input: &mut Input<'src>) -> IResult<types::Node<'src>> {
    let open = left_brace.parse_next(input)?;

    cut_err(input, |input| {
        let mut entries = Vec::new();
        flow_trivia(input)?;
        loop {
            if let Some(close) = opt(right_brace).parse_next(input)? {
                let span = open.union(close);
                return Ok(types::Node::Mapping(types::Mapping { entries, span }));
            }
            entries.push(flow_entry(input)?);
            flow_trivia(input)?;
            if opt(comma).parse_next(input)?.is_none() {
                let close = right_brace(input)?;
                let span = open.union(close);
                return Ok(types::Node::Mapping(types::Mapping { entries, span }));
            }
            flow_trivia(input)?;
        }
    })
}

/// Parse a value in flow style: a scalar or a flow collection
fn flow_node<'src>(input: &mut Input<'src>) -> IResult<types::Node<'src>> {
    match peek_token(input).map(|token| &token.token) {
        Some(Token::LeftBracket) => flow_sequence(input),
        Some(Token::LeftBrace) => flow_mapping(input),
        _ => scalar(input),
    }
}

/// Parse a value that occupies the rest of the current line.
fn inline_value<'src>(input: &mut Input<'src>) -> IResult<types::Node<'src>> {
    let value = flow_node(input)?;
    end_of_line(input)?;
    Ok(value)
}

/// Parse a node at the start of a content line indented by `indent`.
fn block_node<'src>(input: &mut Input<'src>, indent: usize) -> IResult<types::Node<'src>> {
    if at_dash(input) {
        block_sequence(input, indent)
    } else if at_mapping_key(input) {
        block_mapping(input, indent).map(types::Node::Mapping)
    } else {
        inline_value(input)
    }
}

/// Parse a value that starts on the line after its key or dash.
///
/// Lines deeper than `parent_indent` belong to the value. A sequence may
/// also sit at the same indentation as its key when `sequence_at_parent`
/// is set. Without such lines the value is empty.
fn nested_value<'src>(
    input: &mut Input<'src>,
    parent_indent: usize,
    sequence_at_parent: bool,
    anchor: Span,
) -> IResult<types::Node<'src>> {
    let checkpoint = input.checkpoint();
    let next = next_line(input)?;
    let dash = at_dash(input);

    match next {
        Some(indent) if indent > parent_indent => block_node(input, indent),
        Some(indent) if indent == parent_indent && sequence_at_parent && dash => {
            block_sequence(input, indent)
        }
        _ => {
            input.reset(&checkpoint);
            Ok(types::Node::Null(anchor))
        }
    }
}

/// Parse a `key: value` entry of a block mapping indented by `indent`.
fn mapping_entry<'src>(input: &mut Input<'src>, indent: usize) -> IResult<types::Entry<'src>> {
    let key = key_scalar(input)?;

    cut_err(input, |input| {
        opt(whitespace).parse_next(input)?;
        let colon_span = colon(input)?;
        trivia(input)?;

        let value = if at_line_end(input) {
            nested_value(input, indent, true, colon_span)?
        } else {
            inline_value(input)?
        };

        Ok(types::Entry { key, value })
    })
}

/// Parse a block mapping whose first key is at the current position.
fn block_mapping<'src>(input: &mut Input<'src>, indent: usize) -> IResult<types::Mapping<'src>> {
    let first = mapping_entry(input, indent)?;
    let mut span = first.span();
    let mut entries = vec![first];

    loop {
        let checkpoint = input.checkpoint();
        let next = next_line(input)?;
        let dash = at_dash(input);

        match next {
            Some(line_indent) if line_indent == indent && !dash => {
                let entry = mapping_entry(input, indent)?;
                span = span.union(entry.span());
                entries.push(entry);
            }
            Some(line_indent) if line_indent > indent => {
                return Err(cut_error_expected(input, "consistent indentation"));
            }
            _ => {
                input.reset(&checkpoint);
                break;
            }
        }
    }

    Ok(types::Mapping { entries, span })
}

/// Parse the item after a `-` of a block sequence indented by `indent`.
fn sequence_item<'src>(
    input: &mut Input<'src>,
    indent: usize,
    dash_span: Span,
) -> IResult<types::Node<'src>> {
    let width = opt(whitespace).parse_next(input)?.unwrap_or(0);
    // Compact nested collections start at the column after `- `.
    let column = indent + 1 + width;
    opt(comment).parse_next(input)?;

    if at_line_end(input) {
        nested_value(input, indent, false, dash_span)
    } else if at_dash(input) {
        block_sequence(input, column)
    } else if at_mapping_key(input) {
        block_mapping(input, column).map(types::Node::Mapping)
    } else {
        inline_value(input)
    }
}

/// Parse a block sequence whose first `-` is at the current position.
fn block_sequence<'src>(input: &mut Input<'src>, indent: usize) -> IResult<types::Node<'src>> {
    let mut items = Vec::new();
    let mut span: Option<Span> = None;

    loop {
        let dash_span = dash(input)?;
        let item = cut_err(input, |input| sequence_item(input, indent, dash_span))?;
        let item_span = dash_span.union(item.span());
        span = Some(span.map_or(item_span, |span| span.union(item_span)));
        items.push(item);

        let checkpoint = input.checkpoint();
        let next = next_line(input)?;
        let dash = at_dash(input);

        match next {
            Some(line_indent) if line_indent == indent && dash => {}
            Some(line_indent) if line_indent > indent => {
                return Err(cut_error_expected(input, "consistent indentation"));
            }
            _ => {
                input.reset(&checkpoint);
                break;
            }
        }
    }

    Ok(types::Node::Sequence(Spanned::new(
        items,
        span.unwrap_or_default(),
    )))
}

/// Parse a whole document: optional header, then a root block mapping.
fn document<'src>(input: &mut Input<'src>) -> IResult<types::Document<'src>> {
    let header = opt(header).parse_next(input)?;
    let first = if header.is_some() {
        next_line(input)?
    } else {
        content_line(input)?
    };

    let Some(indent) = first else {
        return Ok(types::Document {
            root: types::Mapping::default(),
        });
    };

    let root = block_mapping(input, indent)?;
    if next_line(input)?.is_some() {
        return Err(cut_error_expected(input, "end of input"));
    }

    Ok(types::Document { root })
}

/// Convert a winnow error to a diagnostic
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken],
    current_remaining: usize,
) -> Diagnostic {
    let Some(last_token) = tokens.last() else {
        return Diagnostic::error("unexpected end of input")
            .with_code(ErrorCode::E101)
            .with_help("ensure input is complete");
    };

    let start_remaining = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().find_map(|ctx| match ctx {
            Context::StartOffset(n) => Some(*n),
            _ => None,
        }),
        _ => None,
    };

    let end_offset = tokens.len() - current_remaining;
    let start_offset = start_remaining.map(|r| tokens.len() - r).unwrap_or(0);

    let is_layout = |t: &PositionedToken| matches!(t.token, Token::Whitespace | Token::Newline);

    match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => {
            let contexts: Vec<String> = e
                .context()
                .filter_map(|ctx| match ctx {
                    Context::Label(label) => Some(format!("expected {label}")),
                    _ => None,
                })
                .collect();

            let message = if contexts.is_empty() {
                "unexpected token or end of input".to_string()
            } else {
                contexts.join(" → ")
            };

            if end_offset >= tokens.len() {
                let span = tokens
                    .iter()
                    .rev()
                    .find(|t| !is_layout(*t))
                    .map(|t| t.span)
                    .unwrap_or(last_token.span);
                return Diagnostic::error(format!("unexpected end of input: {message}"))
                    .with_code(ErrorCode::E101)
                    .with_label(span, "input ends here")
                    .with_help("close every open `[` or `{`");
            }

            let examine_range = if start_offset < end_offset {
                start_offset..end_offset + 1
            } else {
                end_offset..end_offset + 1
            };
            let slice = &tokens[examine_range];
            let first = slice
                .iter()
                .find(|t| !is_layout(*t))
                .map(|t| t.span)
                .unwrap_or(slice[0].span);
            let last = slice
                .iter()
                .rev()
                .find(|t| !is_layout(*t))
                .map(|t| t.span)
                .unwrap_or(slice[slice.len() - 1].span);

            Diagnostic::error(format!("unexpected token: {message}"))
                .with_code(ErrorCode::E100)
                .with_label(first.union(last), "unexpected token")
                .with_help("check indentation and `key: value` structure")
        }
        ErrMode::Incomplete(_) => {
            // Streaming input is not supported.
            Diagnostic::error("incomplete input, more tokens expected")
                .with_code(ErrorCode::E101)
                .with_label(last_token.span, "incomplete")
                .with_help("ensure input is complete")
        }
    }
}

/// Build a document from tokens
pub fn build_document<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<types::Document<'src>, Diagnostic> {
    let mut token_slice = TokenSlice::new(tokens);

    match document.parse_next(&mut token_slice) {
        Ok(document) => Ok(document),
        Err(e) => {
            let current_remaining = token_slice.eof_offset();
            Err(convert_error(e, tokens, current_remaining))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_tokens(input: &str) -> Vec<PositionedToken<'_>> {
        tokenize(input).expect("Failed to tokenize input")
    }

    fn scalar_text<'a>(node: &'a types::Node<'_>) -> &'a str {
        node.as_scalar().expect("expected scalar").inner()
    }

    fn keys<'a>(mapping: &'a types::Mapping<'_>) -> Vec<&'a str> {
        mapping.entries.iter().map(|e| *e.key.inner()).collect()
    }

    #[test]
    fn test_empty_document() {
        let tokens = parse_tokens("#%RAML 1.0 Library\n\n# nothing here\n");
        let doc = build_document(&tokens).unwrap();

        assert!(doc.root.entries.is_empty());
    }

    #[test]
    fn test_nested_block_mappings() {
        let input = "#%RAML 1.0 Library\ntypes:\n  Person:\n    type: object\n    properties:\n      name: string\nusage: test\n";
        let tokens = parse_tokens(input);
        let doc = build_document(&tokens).unwrap();

        assert_eq!(keys(&doc.root), vec!["types", "usage"]);
        let types = doc.root.get("types").unwrap().value.as_mapping().unwrap();
        let person = types.get("Person").unwrap().value.as_mapping().unwrap();
        assert_eq!(keys(person), vec!["type", "properties"]);
        let properties = person.get("properties").unwrap().value.as_mapping().unwrap();
        assert_eq!(scalar_text(&properties.get("name").unwrap().value), "string");
    }

    #[test]
    fn test_empty_value_is_null() {
        let tokens = parse_tokens("a:\nb: c\n");
        let doc = build_document(&tokens).unwrap();

        assert!(matches!(doc.root.get("a").unwrap().value, types::Node::Null(_)));
        assert_eq!(scalar_text(&doc.root.get("b").unwrap().value), "c");
    }

    #[test]
    fn test_block_sequence_at_key_indent() {
        let tokens = parse_tokens("type:\n- A\n- B\nnext: x\n");
        let doc = build_document(&tokens).unwrap();

        let types::Node::Sequence(items) = &doc.root.get("type").unwrap().value else {
            panic!("expected sequence");
        };
        let names: Vec<&str> = items.iter().map(scalar_text).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(doc.root.get("next").is_some());
    }

    #[test]
    fn test_sequence_of_compact_mappings() {
        let input = "items:\n  - name: a\n    kind: x\n  - name: b\n";
        let tokens = parse_tokens(input);
        let doc = build_document(&tokens).unwrap();

        let types::Node::Sequence(items) = &doc.root.get("items").unwrap().value else {
            panic!("expected sequence");
        };
        assert_eq!(items.len(), 2);
        let first = items[0].as_mapping().unwrap();
        assert_eq!(keys(first), vec!["name", "kind"]);
        let second = items[1].as_mapping().unwrap();
        assert_eq!(keys(second), vec!["name"]);
    }

    #[test]
    fn test_flow_collections() {
        let input = "type: [A, B]\nmeta: {required: false, note}\nempty: []\n";
        let tokens = parse_tokens(input);
        let doc = build_document(&tokens).unwrap();

        let types::Node::Sequence(items) = &doc.root.get("type").unwrap().value else {
            panic!("expected sequence");
        };
        assert_eq!(items.iter().map(scalar_text).collect::<Vec<_>>(), vec!["A", "B"]);

        let meta = doc.root.get("meta").unwrap().value.as_mapping().unwrap();
        assert_eq!(keys(meta), vec!["required", "note"]);
        assert!(matches!(meta.get("note").unwrap().value, types::Node::Null(_)));

        let types::Node::Sequence(empty) = &doc.root.get("empty").unwrap().value else {
            panic!("expected sequence");
        };
        assert!(empty.is_empty());
    }

    #[test]
    fn test_multiline_flow_sequence() {
        let input = "type: [\n  A,\n  B,\n]\n";
        let tokens = parse_tokens(input);
        let doc = build_document(&tokens).unwrap();

        let types::Node::Sequence(items) = &doc.root.get("type").unwrap().value else {
            panic!("expected sequence");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_block_scalar_value() {
        let input = "description: |\n  Two\n  lines\nnext: x\n";
        let tokens = parse_tokens(input);
        let doc = build_document(&tokens).unwrap();

        assert_eq!(
            scalar_text(&doc.root.get("description").unwrap().value),
            "Two\nlines\n"
        );
        assert!(doc.root.get("next").is_some());
    }

    #[test]
    fn test_comments_and_blank_lines_between_entries() {
        let input = "a: 1 # one\n\n   # indented comment\nb: 2\n";
        let tokens = parse_tokens(input);
        let doc = build_document(&tokens).unwrap();

        assert_eq!(keys(&doc.root), vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_keys() {
        let tokens = parse_tokens("\"quoted key\": v\n");
        let doc = build_document(&tokens).unwrap();

        assert_eq!(keys(&doc.root), vec!["quoted key"]);
    }

    #[test]
    fn test_over_indented_entry_is_error() {
        let input = "a: 1\n   b: 2\n";
        let tokens = parse_tokens(input);
        let err = build_document(&tokens).unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::E100));
        assert!(err.message().contains("consistent indentation"));
    }

    #[test]
    fn test_missing_colon_is_error() {
        let tokens = parse_tokens("types\n");
        let err = build_document(&tokens).unwrap_err();

        assert!(err.code().is_some());
    }

    #[test]
    fn test_trailing_content_on_line_is_error() {
        let tokens = parse_tokens("a: [x] y\n");
        let err = build_document(&tokens).unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::E100));
        assert!(err.message().contains("end of line"));
    }

    #[test]
    fn test_unclosed_flow_sequence_is_incomplete() {
        let tokens = parse_tokens("type: [A, B\n");
        let err = build_document(&tokens).unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::E101));
    }

    #[test]
    fn test_root_sequence_is_error() {
        let tokens = parse_tokens("- a\n- b\n");
        assert!(build_document(&tokens).is_err());
    }
}
