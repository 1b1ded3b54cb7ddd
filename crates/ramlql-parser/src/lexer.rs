//! Lexical analyzer for RAML library source text.
//!
//! The lexer converts the YAML subset used by RAML libraries into a stream
//! of [`Token`]s. YAML tokenization depends on context (a `-` only starts a
//! sequence entry at the start of a line, `,` only separates entries inside
//! a flow collection, a block scalar swallows every following line that is
//! indented deeper than its key), so the [`Lexer`] carries a little state
//! between tokens.
//!
//! The public entry point is [`tokenize`], which performs error-recovering
//! lexical analysis and collects all diagnostics in a single pass.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, preceded, repeat, terminated},
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location, Stream},
    token::{none_of, one_of, take, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Rich diagnostic information for lexer errors.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<LexerDiagnostic>>>;

/// What the last structural token on the current line was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Nothing but indentation so far.
    LineStart,
    /// After a `:` mapping indicator.
    AfterColon,
    /// After a `-` sequence indicator.
    AfterDash,
    /// After any other token.
    Content,
}

fn error(diagnostic: LexerDiagnostic) -> ErrMode<ContextError<LexerDiagnostic>> {
    let mut e = ContextError::new();
    e.push(diagnostic);
    ErrMode::Cut(e)
}

fn is_separator(c: Option<char>) -> bool {
    matches!(c, None | Some(' ' | '\t' | '\n' | '\r'))
}

fn is_flow_terminator(c: Option<char>) -> bool {
    matches!(c, Some(',' | ']' | '}'))
}

/// Returns `true` if a `:` followed by `after` is a mapping indicator.
fn is_colon_indicator(after: &str, in_flow: bool) -> bool {
    let next = after.chars().next();
    is_separator(next) || (in_flow && is_flow_terminator(next))
}

/// Consume `len` bytes from the input.
fn advance<'a>(input: &mut Input<'a>, len: usize) -> IResult<&'a str> {
    let rest: &'a str = **input;
    let count = rest[..len].chars().count();
    take(count).parse_next(input)
}

/// Parse an escape sequence in a double quoted scalar.
///
/// Handles `\n`, `\r`, `\t`, `\b`, `\f`, `\\`, `\/`, `\"`, `\0`, `\ ` and
/// `\uXXXX`.
fn escape(input: &mut Input<'_>) -> IResult<char> {
    let escape_start = input.current_token_start();

    let unicode = ('u', take_while(4..=4, |c: char| c.is_ascii_hexdigit())).verify_map(
        |(_, hex): (char, &str)| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32),
    );
    let simple = one_of(['n', 'r', 't', 'b', 'f', '\\', '/', '"', '0', ' ']).map(|c| match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        '0' => '\0',
        other => other,
    });

    preceded(
        '\\',
        cut_err(alt((unicode, simple))).context(LexerDiagnostic {
            code: ErrorCode::E003,
            message: "invalid escape sequence",
            help: Some(
                "valid escapes: `\\n`, `\\r`, `\\t`, `\\b`, `\\f`, `\\\\`, `\\/`, `\\\"`, `\\0`, `\\uXXXX`",
            ),
            start: escape_start,
        }),
    )
    .parse_next(input)
}

/// Parse a double quoted scalar: `"text with \"escapes\""`.
fn double_quoted<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start_pos = input.current_token_start();

    let content =
        repeat(0.., alt((escape, none_of(['"', '\\', '\n', '\r'])))).fold(String::new, |mut acc, ch| {
            acc.push(ch);
            acc
        });

    preceded(
        '"',
        cut_err(terminated(content, '"')).context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated double quoted scalar",
            help: Some("add closing `\"` on the same line"),
            start: start_pos,
        }),
    )
    .map(Token::Quoted)
    .parse_next(input)
}

/// Parse a single quoted scalar: `'it''s'`.
fn single_quoted<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start_pos = input.current_token_start();

    let content = repeat(0.., alt(("''".value('\''), none_of(['\'', '\n', '\r'])))).fold(
        String::new,
        |mut acc, ch| {
            acc.push(ch);
            acc
        },
    );

    preceded(
        '\'',
        cut_err(terminated(content, '\'')).context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated single quoted scalar",
            help: Some("add closing `'` on the same line"),
            start: start_pos,
        }),
    )
    .map(Token::Quoted)
    .parse_next(input)
}

/// Parse a `# comment` up to the end of the line.
fn comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    ('#', take_while(0.., |c: char| c != '\n' && c != '\r'))
        .map(|(_, text): (char, &str)| Token::Comment(text))
        .parse_next(input)
}

/// Parse the `#%RAML ...` header line.
fn header<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    ('#', take_while(0.., |c: char| c != '\n' && c != '\r'))
        .map(|(_, text): (char, &str)| Token::Header(text.trim_end()))
        .parse_next(input)
}

fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt(("\r\n", "\n")).value(Token::Newline).parse_next(input)
}

fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., [' ', '\t'])
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Length in bytes of the plain scalar at the start of `rest`.
///
/// A plain scalar ends at a line break, at a `:` mapping indicator, at a
/// ` #` comment and, inside flow collections, at a flow indicator. Trailing
/// whitespace is not part of the scalar.
fn plain_scalar_len(rest: &str, in_flow: bool) -> usize {
    let mut end = 0;
    let mut after_space = false;

    for (i, c) in rest.char_indices() {
        match c {
            '\n' | '\r' => break,
            '#' if after_space => break,
            ':' if is_colon_indicator(&rest[i + 1..], in_flow) => break,
            ',' | '[' | ']' | '{' | '}' if in_flow => break,
            ' ' | '\t' => {
                after_space = true;
                continue;
            }
            _ => {}
        }
        after_space = false;
        end = i + c.len_utf8();
    }

    end
}

/// Chomping indicator of a block scalar header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping {
    Clip,
    Strip,
    Keep,
}

/// Lines making up the body of a block scalar.
struct BlockBody<'a> {
    lines: Vec<&'a str>,
    /// Byte length of the body, ending with the last content line.
    len: usize,
    trailing_blank: usize,
}

/// Collect the body lines of a block scalar starting at `body`.
///
/// `body` begins with the line break that ends the header. Lines belong to
/// the scalar while they are blank or indented deeper than `parent_indent`.
fn block_body(body: &str, parent_indent: usize) -> BlockBody<'_> {
    let mut lines = Vec::new();
    let mut content_indent = None;
    let mut pending_blank = Vec::new();
    let mut len = 0;
    let mut offset = 0;

    while offset < body.len() {
        let remaining = &body[offset..];
        let break_len = if remaining.starts_with("\r\n") {
            2
        } else if remaining.starts_with('\n') {
            1
        } else {
            break;
        };
        let line_start = offset + break_len;
        let line_end = body[line_start..]
            .find(['\n', '\r'])
            .map_or(body.len(), |i| line_start + i);
        let line = &body[line_start..line_end];
        offset = line_end;

        let indent = line.len() - line.trim_start_matches(' ').len();
        if line.trim().is_empty() {
            pending_blank.push("");
            continue;
        }

        let required = *content_indent.get_or_insert(indent);
        if indent <= parent_indent || indent < required {
            break;
        }

        lines.append(&mut pending_blank);
        lines.push(&line[required..]);
        len = line_end;
    }

    BlockBody {
        lines,
        len,
        trailing_blank: pending_blank.len(),
    }
}

/// Join literal (`|`) block lines.
fn literal_content(lines: &[&str]) -> String {
    lines.join("\n")
}

/// Fold (`>`) block lines: single line breaks become spaces, blank lines
/// become line breaks and more-indented lines keep their breaks.
fn folded_content(lines: &[&str]) -> String {
    let mut out = String::new();
    let mut pending_breaks = 0;
    let mut previous_more_indented = false;

    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            pending_breaks += 1;
            continue;
        }
        let more_indented = line.starts_with([' ', '\t']);
        if i > 0 {
            if pending_breaks > 0 {
                out.extend(std::iter::repeat_n('\n', pending_breaks));
            } else if more_indented || previous_more_indented {
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
        out.push_str(line);
        pending_breaks = 0;
        previous_more_indented = more_indented;
    }

    out
}

/// Parse a literal (`|`) or folded (`>`) block scalar.
///
/// The token ends with the last content line; the line break after it is
/// lexed as a regular [`Token::Newline`].
fn block_scalar<'a>(input: &mut Input<'a>, parent_indent: usize) -> IResult<Token<'a>> {
    let start_pos = input.current_token_start();
    let rest: &'a str = **input;

    let mut chars = rest.chars();
    let folded = chars.next() == Some('>');
    let (chomping, header_len) = match chars.next() {
        Some('-') => (Chomping::Strip, 2),
        Some('+') => (Chomping::Keep, 2),
        _ => (Chomping::Clip, 1),
    };

    let line_end = rest.find(['\n', '\r']).unwrap_or(rest.len());
    let trailer = rest[header_len..line_end].trim_start_matches([' ', '\t']);
    if !trailer.is_empty() && !trailer.starts_with('#') {
        advance(input, header_len)?;
        return Err(error(LexerDiagnostic {
            code: ErrorCode::E002,
            message: "invalid block scalar header",
            help: Some("only a chomping indicator (`-` or `+`) may follow `|` or `>`"),
            start: start_pos,
        }));
    }

    let body = block_body(&rest[line_end..], parent_indent);
    let mut content = if folded {
        folded_content(&body.lines)
    } else {
        literal_content(&body.lines)
    };
    if !content.is_empty() {
        match chomping {
            Chomping::Strip => {}
            Chomping::Clip => content.push('\n'),
            Chomping::Keep => content.extend(std::iter::repeat_n('\n', 1 + body.trailing_blank)),
        }
    }

    advance(input, line_end + body.len)?;
    Ok(Token::BlockScalar(content))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
    position: Position,
    line_indent: usize,
    flow_depth: usize,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
            position: Position::LineStart,
            line_indent: 0,
            flow_depth: 0,
        }
    }

    fn in_flow(&self) -> bool {
        self.flow_depth > 0
    }

    /// Lex one token, choosing the rule from the next character and the
    /// current context.
    fn lex_token(&self, input: &mut Input<'a>) -> IResult<Token<'a>> {
        let start_pos = input.current_token_start();
        let rest: &'a str = **input;
        let mut chars = rest.chars();
        let first = chars.next();
        let second = chars.next();

        match first {
            Some('\n' | '\r') => newline(input),
            Some(' ' | '\t') => {
                let token = whitespace(input)?;
                let width = input.current_token_start() - start_pos;
                let next = rest[width..].chars().next();
                let blank = matches!(next, None | Some('\n' | '\r' | '#'));
                if self.position == Position::LineStart
                    && !self.in_flow()
                    && !blank
                    && rest[..width].contains('\t')
                {
                    return Err(error(LexerDiagnostic {
                        code: ErrorCode::E004,
                        message: "tab character used for indentation",
                        help: Some("indent with spaces"),
                        start: start_pos,
                    }));
                }
                Ok(token)
            }
            Some('#') if start_pos == 0 && second == Some('%') => header(input),
            Some('#') => comment(input),
            Some('"') => double_quoted(input),
            Some('\'') => single_quoted(input),
            Some('[') => '['.value(Token::LeftBracket).parse_next(input),
            Some('{') => '{'.value(Token::LeftBrace).parse_next(input),
            Some(']') if self.in_flow() => ']'.value(Token::RightBracket).parse_next(input),
            Some('}') if self.in_flow() => '}'.value(Token::RightBrace).parse_next(input),
            Some(',') if self.in_flow() => ','.value(Token::Comma).parse_next(input),
            Some(']' | '}' | ',') => Err(error(LexerDiagnostic {
                code: ErrorCode::E002,
                message: "flow indicator outside of a flow collection",
                help: Some("quote the value if the character is part of the text"),
                start: start_pos,
            })),
            Some(':') if is_colon_indicator(&rest[1..], self.in_flow()) => {
                ':'.value(Token::Colon).parse_next(input)
            }
            Some('-')
                if !self.in_flow()
                    && is_separator(second)
                    && matches!(self.position, Position::LineStart | Position::AfterDash) =>
            {
                '-'.value(Token::Dash).parse_next(input)
            }
            Some('|' | '>')
                if !self.in_flow()
                    && matches!(self.position, Position::AfterColon | Position::AfterDash) =>
            {
                block_scalar(input, self.line_indent)
            }
            Some('|' | '>') => Err(error(LexerDiagnostic {
                code: ErrorCode::E002,
                message: "block scalar indicator outside of a value",
                help: Some("quote the value if the character is part of the text"),
                start: start_pos,
            })),
            _ => {
                let len = plain_scalar_len(rest, self.in_flow());
                if len == 0 {
                    return Err(error(LexerDiagnostic {
                        code: ErrorCode::E002,
                        message: "unexpected character",
                        help: None,
                        start: start_pos,
                    }));
                }
                advance(input, len).map(Token::Plain)
            }
        }
    }

    /// Update the context after a token was produced.
    fn track(&mut self, token: &Token<'a>, span: Span) {
        match token {
            Token::Newline => {
                self.position = Position::LineStart;
                self.line_indent = 0;
            }
            Token::Whitespace => {
                if self.position == Position::LineStart {
                    self.line_indent = span.len();
                }
            }
            Token::Comment(_) | Token::Header(_) => {}
            Token::Colon => self.position = Position::AfterColon,
            Token::Dash => self.position = Position::AfterDash,
            Token::LeftBracket | Token::LeftBrace => {
                self.flow_depth += 1;
                self.position = Position::Content;
            }
            Token::RightBracket | Token::RightBrace => {
                self.flow_depth = self.flow_depth.saturating_sub(1);
                self.position = Position::Content;
            }
            Token::Plain(_) | Token::Quoted(_) | Token::BlockScalar(_) | Token::Comma => {
                self.position = Position::Content;
            }
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            let start_pos = input.current_token_start();
            match self.lex_token(&mut input) {
                Ok(token) => {
                    let span = Span::new(start_pos..input.current_token_start());
                    self.track(&token, span);
                    self.tokens.push(PositionedToken::new(token, span));
                }
                Err(e) => {
                    let error_pos = input.current_token_start();

                    let diagnostic = Self::convert_err_mode(e, error_pos);
                    self.diagnostics.emit(diagnostic);

                    // Line breaks are left for the next round so the line
                    // context stays intact.
                    if !input.is_empty() && !input.starts_with(['\n', '\r']) {
                        input.next_token();
                    }
                    self.position = Position::Content;
                }
            }
        }
    }

    /// Finish lexing and return tokens or collected errors.
    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Falls back to E002 (unexpected character) if no diagnostic context
    /// is found.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let end = if error_pos > *start {
                error_pos
            } else {
                error_pos.saturating_add(1)
            };
            let span = Span::new(*start..end);

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
    }
}

/// Tokenize RAML library source, collecting multiple errors.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens successfully lexed
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(located_input);
    lexer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .expect("input should tokenize")
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    fn significant(input: &str) -> Vec<Token<'_>> {
        tokens(input)
            .into_iter()
            .filter(|t| !t.is_trivia())
            .collect()
    }

    fn first_error_code(input: &str) -> ErrorCode {
        let err = tokenize(input).expect_err("input should fail to tokenize");
        err.diagnostics()[0].code().expect("diagnostic should have a code")
    }

    #[test]
    fn test_header_only_at_start() {
        assert_eq!(
            tokens("#%RAML 1.0 Library\n"),
            vec![Token::Header("%RAML 1.0 Library"), Token::Newline]
        );
        assert_eq!(
            tokens("a: b #%not a header"),
            vec![
                Token::Plain("a"),
                Token::Colon,
                Token::Whitespace,
                Token::Plain("b"),
                Token::Whitespace,
                Token::Comment("%not a header"),
            ]
        );
    }

    #[test]
    fn test_mapping_entry() {
        assert_eq!(
            tokens("key: value"),
            vec![
                Token::Plain("key"),
                Token::Colon,
                Token::Whitespace,
                Token::Plain("value"),
            ]
        );
    }

    #[test]
    fn test_plain_scalar_keeps_inner_colons_and_hashes() {
        assert_eq!(
            significant("url: http://example.com/a#b"),
            vec![
                Token::Plain("url"),
                Token::Colon,
                Token::Plain("http://example.com/a#b"),
            ]
        );
    }

    #[test]
    fn test_plain_scalar_excludes_trailing_space_and_comment() {
        assert_eq!(
            tokens("type: string   # the name"),
            vec![
                Token::Plain("type"),
                Token::Colon,
                Token::Whitespace,
                Token::Plain("string"),
                Token::Whitespace,
                Token::Comment(" the name"),
            ]
        );
    }

    #[test]
    fn test_plain_scalar_with_spaces() {
        assert_eq!(
            significant("description: A person in the system"),
            vec![
                Token::Plain("description"),
                Token::Colon,
                Token::Plain("A person in the system"),
            ]
        );
    }

    #[test]
    fn test_dash_only_at_line_start() {
        assert_eq!(
            significant("- a\n- - b"),
            vec![
                Token::Dash,
                Token::Plain("a"),
                Token::Newline,
                Token::Dash,
                Token::Dash,
                Token::Plain("b"),
            ]
        );
        assert_eq!(significant("-1"), vec![Token::Plain("-1")]);
        assert_eq!(
            significant("a: x - y"),
            vec![Token::Plain("a"), Token::Colon, Token::Plain("x - y")]
        );
    }

    #[test]
    fn test_flow_sequence() {
        assert_eq!(
            significant("type: [Person, lib.Named]"),
            vec![
                Token::Plain("type"),
                Token::Colon,
                Token::LeftBracket,
                Token::Plain("Person"),
                Token::Comma,
                Token::Plain("lib.Named"),
                Token::RightBracket,
            ]
        );
    }

    #[test]
    fn test_flow_mapping() {
        assert_eq!(
            significant("{type: string, required: false}"),
            vec![
                Token::LeftBrace,
                Token::Plain("type"),
                Token::Colon,
                Token::Plain("string"),
                Token::Comma,
                Token::Plain("required"),
                Token::Colon,
                Token::Plain("false"),
                Token::RightBrace,
            ]
        );
    }

    #[test]
    fn test_type_expression_brackets_outside_flow() {
        assert_eq!(
            significant("type: Person[]"),
            vec![Token::Plain("type"), Token::Colon, Token::Plain("Person[]")]
        );
    }

    #[test]
    fn test_quoted_scalars() {
        assert_eq!(
            significant(r#"a: "tab\there é""#),
            vec![
                Token::Plain("a"),
                Token::Colon,
                Token::Quoted("tab\there é".to_string()),
            ]
        );
        assert_eq!(
            significant("b: 'it''s'"),
            vec![
                Token::Plain("b"),
                Token::Colon,
                Token::Quoted("it's".to_string()),
            ]
        );
    }

    #[test]
    fn test_literal_block_scalar() {
        let input = "description: |\n  line one\n  line two\nnext: x";
        assert_eq!(
            significant(input),
            vec![
                Token::Plain("description"),
                Token::Colon,
                Token::BlockScalar("line one\nline two\n".to_string()),
                Token::Newline,
                Token::Plain("next"),
                Token::Colon,
                Token::Plain("x"),
            ]
        );
    }

    #[test]
    fn test_folded_block_scalar_strip() {
        let input = "  description: >-\n    folded\n    text\n\n    para\n  other: y";
        let significant = significant(input);
        assert_eq!(
            significant[2],
            Token::BlockScalar("folded text\npara".to_string())
        );
        assert_eq!(significant[4], Token::Plain("other"));
    }

    #[test]
    fn test_block_scalar_span_ends_at_last_content_line() {
        let input = "d: |\n  x\n\ne: f";
        let tokens = tokenize(input).unwrap();
        let block = tokens
            .iter()
            .find(|t| matches!(t.token, Token::BlockScalar(_)))
            .unwrap();
        assert_eq!(block.span, Span::new(3..8));
    }

    #[test]
    fn test_crlf_newlines() {
        assert_eq!(
            tokens("a: b\r\nc: d"),
            vec![
                Token::Plain("a"),
                Token::Colon,
                Token::Whitespace,
                Token::Plain("b"),
                Token::Newline,
                Token::Plain("c"),
                Token::Colon,
                Token::Whitespace,
                Token::Plain("d"),
            ]
        );
    }

    #[test]
    fn test_spans_are_byte_ranges() {
        let tokens = tokenize("ab: cd").unwrap();
        assert_eq!(tokens[0].span, Span::new(0..2));
        assert_eq!(tokens[1].span, Span::new(2..3));
        assert_eq!(tokens[3].span, Span::new(4..6));
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(first_error_code("a: \"open\nb: c"), ErrorCode::E001);
        assert_eq!(first_error_code("a: 'open"), ErrorCode::E001);
    }

    #[test]
    fn test_invalid_escape() {
        assert_eq!(first_error_code(r#"a: "bad \q""#), ErrorCode::E003);
    }

    #[test]
    fn test_tab_indentation() {
        assert_eq!(first_error_code("types:\n\tPerson: object"), ErrorCode::E004);
    }

    #[test]
    fn test_tab_on_blank_line_is_allowed() {
        assert!(tokenize("a: b\n\t\nc: d").is_ok());
    }

    #[test]
    fn test_flow_indicator_outside_flow() {
        assert_eq!(first_error_code("a: ]"), ErrorCode::E002);
    }

    #[test]
    fn test_multiple_errors_collected() {
        let err = tokenize("a: ]\nb: }\n").unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
    }
}
