//! Scanner for arithmetic expressions
//!
//! Walks a byte buffer left to right and produces tokens one at a time.
//! Each step looks at the class of the current byte and hands off to the
//! matching sub-scanner. No step looks more than two bytes past the
//! current one.

use crate::buffer::TokenBuffer;
use crate::classify::{classify, is_digit, is_name_continue, is_whitespace, CharClass};
use crate::number::{parse_double, parse_integer, parse_single};
use crate::options::{PayloadOverflow, ScanOptions, UnknownInput};
use crate::token::{Token, TokenKind, MAX_NAME_LEN, MAX_STRING_LEN};
use aritlex_error::{
    describe_byte,
    span::{Position, Span},
    Diagnostic, Diagnostics, ErrorCode, LexError, Result,
};
use tracing::{debug, trace};

/// The scanner
///
/// A `0` byte ends the input just like the end of the buffer does.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    /// Bytes being scanned
    src: &'src [u8],
    /// Index of the current byte
    pos: usize,
    /// Current line (1-indexed)
    line: u32,
    /// Current column (1-indexed)
    column: u32,
    options: ScanOptions,
    /// Set once the iterator has yielded `Eof` or an error
    finished: bool,
    /// Warnings about input that was accepted but degraded
    diagnostics: Diagnostics,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer with the default (lenient) options
    pub fn new<S: AsRef<[u8]> + ?Sized>(source: &'src S) -> Self {
        Self::with_options(source, ScanOptions::default())
    }

    pub fn with_options<S: AsRef<[u8]> + ?Sized>(source: &'src S, options: ScanOptions) -> Self {
        Self {
            src: source.as_ref(),
            pos: 0,
            line: 1,
            column: 1,
            options,
            finished: false,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Returns the warnings collected so far
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consumes and returns the warnings
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    /// Restarts the scan from the first byte
    pub fn rewind(&mut self) {
        self.pos = 0;
        self.line = 1;
        self.column = 1;
        self.finished = false;
        self.diagnostics.clear();
    }

    /// Returns the current byte, or `0` at the end of the buffer
    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> u8 {
        self.src.get(self.pos + n).copied().unwrap_or(0)
    }

    /// Advances past the current byte and returns it
    fn advance(&mut self) -> u8 {
        let b = self.peek();
        if b == 0 {
            return 0;
        }

        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        b
    }

    /// Consumes the current byte if it is `expected`
    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column, self.pos)
    }

    fn make_span(&self, start: Position) -> Span {
        Span::new(start, self.current_position())
    }

    fn skip_whitespace(&mut self) {
        while is_whitespace(self.peek()) {
            self.advance();
        }
    }

    /// Skips digits and digit separators
    fn skip_digit_run(&mut self) {
        while is_digit(self.peek()) || self.peek() == b'_' {
            self.advance();
        }
    }

    /// Reads a numeric literal
    fn lex_number(&mut self) -> Token {
        let start = self.current_position();
        let begin = self.pos;

        if self.peek() == b'0' {
            match self.peek_at(1) {
                b'x' | b'X' => return self.lex_prefixed_integer(start, 16),
                b'b' | b'B' => return self.lex_prefixed_integer(start, 2),
                _ => {}
            }
        }

        let mut is_float = false;
        self.skip_digit_run();

        if self.eat(b'.') {
            is_float = true;
            self.skip_digit_run();
        }

        if matches!(self.peek(), b'e' | b'E') {
            is_float = true;
            self.advance();
            if matches!(self.peek(), b'+' | b'-') {
                self.advance();
            }
            self.skip_digit_run();
        }

        let lexeme = &self.src[begin..self.pos];

        let kind = if matches!(self.peek(), b'f' | b'F') {
            self.advance();
            TokenKind::FloatLit(f64::from(parse_single(lexeme).value))
        } else if is_float {
            TokenKind::FloatLit(parse_double(lexeme).value)
        } else {
            // Leading zeros are decimal here; octal is only inferred by
            // a bare `parse_integer` call.
            let parsed = parse_integer(lexeme, Some(10));
            debug_assert_eq!(parsed.consumed, lexeme.len());
            TokenKind::IntLit(parsed.value)
        };

        Token::new(kind, self.make_span(start))
    }

    /// Reads a `0x`/`0b` literal. Always an integer, wrapping on overflow.
    fn lex_prefixed_integer(&mut self, start: Position, radix: u32) -> Token {
        self.advance();
        self.advance();

        let mut value: i32 = 0;
        loop {
            let b = self.peek();
            if b == b'_' {
                self.advance();
                continue;
            }
            let Some(digit) = char::from(b).to_digit(radix) else {
                break;
            };
            value = value.wrapping_mul(radix as i32).wrapping_add(digit as i32);
            self.advance();
        }

        Token::new(TokenKind::IntLit(value), self.make_span(start))
    }

    /// Reads a string literal, decoding escapes
    fn lex_string(&mut self) -> Result<Token> {
        let start = self.current_position();
        self.advance(); // opening quote

        let mut value: Vec<u8> = Vec::new();
        let mut truncated = false;
        let mut terminated = false;

        loop {
            let b = match self.peek() {
                0 => break,
                b'"' => {
                    self.advance();
                    terminated = true;
                    break;
                }
                b'\\' => {
                    self.advance();
                    match self.advance() {
                        0 => break,
                        b'n' => b'\n',
                        b't' => b'\t',
                        b'r' => b'\r',
                        // `\"`, `\\` and unknown escapes keep the escaped byte
                        other => other,
                    }
                }
                _ => self.advance(),
            };

            if value.len() == MAX_STRING_LEN {
                match self.options.overflow {
                    PayloadOverflow::Reject => {
                        return Err(LexError::StringTooLong {
                            span: self.make_span(start),
                            max: MAX_STRING_LEN,
                        });
                    }
                    PayloadOverflow::Truncate => {
                        truncated = true;
                        continue;
                    }
                }
            }
            value.push(b);
        }

        let span = self.make_span(start);

        if !terminated {
            debug!(offset = start.offset, "unterminated string literal");
            self.diagnostics.push(
                Diagnostic::warning("unterminated string literal")
                    .with_code(ErrorCode::UNTERMINATED_STRING)
                    .with_label(span, "string starts here and runs to the end of input")
                    .with_help("add a closing `\"`"),
            );
        }

        if truncated {
            self.diagnostics.push(
                Diagnostic::warning(format!(
                    "string literal truncated to {} bytes",
                    MAX_STRING_LEN
                ))
                .with_code(ErrorCode::STRING_TOO_LONG)
                .with_label(span, "this literal is too long"),
            );
        }

        let value = String::from_utf8_lossy(&value).into_owned();
        Ok(Token::new(TokenKind::StringLit(value), span))
    }

    /// Reads an identifier. There are no keywords.
    fn lex_name(&mut self) -> Result<Token> {
        let start = self.current_position();
        let begin = self.pos;

        while is_name_continue(self.peek()) {
            self.advance();
        }

        let lexeme = &self.src[begin..self.pos];
        let span = self.make_span(start);

        let stored = if lexeme.len() > MAX_NAME_LEN {
            match self.options.overflow {
                PayloadOverflow::Reject => {
                    return Err(LexError::NameTooLong {
                        span,
                        len: lexeme.len(),
                        max: MAX_NAME_LEN,
                    });
                }
                PayloadOverflow::Truncate => {
                    self.diagnostics.push(
                        Diagnostic::warning(format!("identifier truncated to {} bytes", MAX_NAME_LEN))
                            .with_code(ErrorCode::NAME_TOO_LONG)
                            .with_label(span, "this identifier is too long"),
                    );
                    &lexeme[..MAX_NAME_LEN]
                }
            }
        } else {
            lexeme
        };

        // Name bytes are ASCII by construction
        let name: String = stored.iter().map(|&b| char::from(b)).collect();
        Ok(Token::new(TokenKind::Name(name), span))
    }

    /// Reads an operator or punctuation token, longest spelling first.
    /// Returns `None`, consuming nothing, if the byte starts no operator.
    fn lex_operator(&mut self) -> Option<TokenKind> {
        use TokenKind::*;

        let single = match self.peek() {
            b'+' => Plus,
            b'-' => Minus,
            b'*' => Star,
            b'/' => Slash,
            b'%' => Percent,
            b'=' => Assign,
            b'!' => Not,
            b'<' => Lt,
            b'>' => Gt,
            b'&' => Amp,
            b'|' => Pipe,
            b'^' => Caret,
            b'~' => Tilde,
            b'(' => LParen,
            b')' => RParen,
            b'?' => Question,
            b':' => Colon,
            _ => return None,
        };
        self.advance();

        let kind = match single {
            Plus if self.eat(b'+') => PlusPlus,
            Plus => self.with_eq(PlusEq, Plus),
            Minus if self.eat(b'-') => MinusMinus,
            Minus => self.with_eq(MinusEq, Minus),
            Star => self.with_eq(StarEq, Star),
            Slash => self.with_eq(SlashEq, Slash),
            Percent => self.with_eq(PercentEq, Percent),
            Assign => self.with_eq(EqEq, Assign),
            Not => self.with_eq(Ne, Not),
            Caret => self.with_eq(CaretEq, Caret),
            Lt if self.eat(b'<') => self.with_eq(ShlEq, Shl),
            Lt => self.with_eq(Le, Lt),
            Gt if self.eat(b'>') => self.with_eq(ShrEq, Shr),
            Gt => self.with_eq(Ge, Gt),
            Amp if self.eat(b'&') => AndAnd,
            Amp => self.with_eq(AmpEq, Amp),
            Pipe if self.eat(b'|') => OrOr,
            Pipe => self.with_eq(PipeEq, Pipe),
            // `~ ( ) ? :` have no longer spellings
            other => other,
        };

        Some(kind)
    }

    /// `long` if the next byte is `=`, otherwise `short`
    fn with_eq(&mut self, long: TokenKind, short: TokenKind) -> TokenKind {
        if self.eat(b'=') {
            long
        } else {
            short
        }
    }

    /// Applies the unknown-input policy to the current byte
    fn unknown_byte(&mut self) -> Result<Option<Token>> {
        let start = self.current_position();
        let byte = self.advance();
        let span = self.make_span(start);

        match self.options.unknown {
            UnknownInput::Skip => {
                debug!(offset = start.offset, byte, "skipping unknown byte");
                self.diagnostics.push(
                    Diagnostic::warning(format!("skipped character {}", describe_byte(byte)))
                        .with_code(ErrorCode::UNEXPECTED_CHAR)
                        .with_label(span, "ignored"),
                );
                Ok(None)
            }
            UnknownInput::EmitError => Ok(Some(Token::new(TokenKind::Error(byte), span))),
            UnknownInput::Reject => Err(LexError::UnexpectedChar { byte, span }),
        }
    }

    /// Scans the next token.
    ///
    /// After the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            let token = match classify(self.peek()) {
                CharClass::End => Token::new(TokenKind::Eof, Span::point(self.current_position())),
                CharClass::Whitespace => {
                    self.skip_whitespace();
                    continue;
                }
                CharClass::Number => self.lex_number(),
                CharClass::Name => self.lex_name()?,
                CharClass::Quote => self.lex_string()?,
                CharClass::Operator => {
                    let start = self.current_position();
                    match self.lex_operator() {
                        Some(kind) => Token::new(kind, self.make_span(start)),
                        None => match self.unknown_byte()? {
                            Some(token) => token,
                            None => continue,
                        },
                    }
                }
                CharClass::Other => match self.unknown_byte()? {
                    Some(token) => token,
                    None => continue,
                },
            };

            trace!(kind = token.kind.name(), offset = token.span.start.offset, "token");
            return Ok(token);
        }
    }

    /// Scans the whole input, `Eof` included
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        self.finished = true;
        Ok(tokens)
    }

    /// Scans the whole input into a fixed-capacity buffer.
    ///
    /// Rejects an empty source and a zero-capacity buffer without touching
    /// `out`. Otherwise the scan restarts from the first byte, whatever the
    /// iterator already consumed, and the buffer is cleared; if it fills up before
    /// `Eof` is written the scan stops with `BufferExhausted` and the buffer
    /// is left empty.
    pub fn fill(&mut self, out: &mut TokenBuffer) -> Result<usize> {
        if self.src.is_empty() {
            return Err(LexError::EmptyInput);
        }
        if out.capacity() == 0 {
            return Err(LexError::ZeroCapacity);
        }

        self.rewind();
        out.clear();
        let result = self.fill_tokens(out);
        self.finished = true;
        if result.is_err() {
            out.clear();
        }
        result
    }

    fn fill_tokens(&mut self, out: &mut TokenBuffer) -> Result<usize> {
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            out.push(token)?;

            if is_eof {
                return Ok(out.len());
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    /// Yields every token up to and including `Eof`, or up to the first
    /// error, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.next_token();
        if item.as_ref().map_or(true, Token::is_eof) {
            self.finished = true;
        }
        Some(item)
    }
}
