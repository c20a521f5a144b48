//! aritlex-lexer - Scanner for arithmetic expression fragments
//!
//! Converts a byte buffer into a sequence of typed tokens.
//!
//! # Features
//!
//! - Integers: decimal, `0x` hex and `0b` binary, with `_` digit separators
//! - Floats: fractions, exponents and an `f`/`F` single-precision suffix
//! - Double-quoted strings with `\n \t \r \" \\` escapes
//! - Identifiers (no keywords)
//! - C-style operators, matched longest first (`<<=` is one token)
//!
//! The scanner only classifies. It does not check grammar and does not
//! evaluate anything.
//!
//! # Example
//!
//! ```rust
//! use aritlex_lexer::{tokenize_into, ScanOptions, TokenBuffer, TokenKind};
//!
//! let mut tokens = TokenBuffer::with_capacity(16);
//! let count = tokenize_into(b"x <<= 0xFF", &mut tokens, ScanOptions::default())?;
//!
//! assert_eq!(count, 4);
//! assert_eq!(tokens.get(1).map(|t| &t.kind), Some(&TokenKind::ShlEq));
//! assert_eq!(tokens.get(2).map(|t| &t.kind), Some(&TokenKind::IntLit(255)));
//! # Ok::<(), aritlex_lexer::LexError>(())
//! ```
//!
//! For input without a known bound, [`Lexer`] produces the same tokens one
//! at a time.

pub mod buffer;
pub mod classify;
pub mod lexer;
pub mod number;
pub mod options;
pub mod token;

pub use aritlex_error::{Diagnostics, LexError, Result};
pub use buffer::{tokenize_into, TokenBuffer};
pub use lexer::Lexer;
pub use options::{PayloadOverflow, ScanOptions, UnknownInput};
pub use token::{Category, Token, TokenKind};

/// Tokenizes source text with the default options and no capacity limit
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}
