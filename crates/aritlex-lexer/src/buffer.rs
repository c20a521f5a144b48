//! Fixed-capacity token output
//!
//! The caller decides up front how many tokens a scan may produce. Every
//! append is checked, so a scan that would overflow stops with
//! `BufferExhausted` instead of writing past the end.

use crate::lexer::Lexer;
use crate::options::ScanOptions;
use crate::token::Token;
use aritlex_error::{LexError, Result};
use tracing::debug;

/// Largest number of slots allocated eagerly; bigger buffers grow on demand
const PREALLOC_LIMIT: usize = 1024;

/// A caller-owned token sequence with a hard capacity.
///
/// After a successful scan the last token is always `Eof`; after a failed
/// one the buffer is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    capacity: usize,
}

impl TokenBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity.min(PREALLOC_LIMIT)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tokens.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }

    pub(crate) fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Appends a token if there is room for it
    pub(crate) fn push(&mut self, token: Token) -> Result<()> {
        if self.is_full() {
            return Err(LexError::BufferExhausted {
                capacity: self.capacity,
            });
        }
        self.tokens.push(token);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TokenBuffer {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenBuffer {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Scans `source` into `out` and returns the number of tokens written.
///
/// Rejects an empty source and a zero-capacity buffer before touching
/// `out`. Otherwise the buffer is overwritten, ending with `Eof`.
pub fn tokenize_into(source: &[u8], out: &mut TokenBuffer, options: ScanOptions) -> Result<usize> {
    let mut lexer = Lexer::with_options(source, options);
    let count = lexer.fill(out)?;

    debug!(
        bytes = source.len(),
        tokens = count,
        capacity = out.capacity(),
        "scan complete"
    );
    Ok(count)
}
