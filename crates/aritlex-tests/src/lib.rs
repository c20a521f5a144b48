//! Integration tests for the aritlex scanner
//!
//! Helpers for asserting token sequences, plus end-to-end scenarios that
//! exercise every token kind through the public entry points.

use aritlex_lexer::{tokenize_into, ScanOptions, Token, TokenBuffer, TokenKind};

#[cfg(test)]
mod properties;

/// Capacity used by the scenario tests
pub const TOKENS_CAPACITY: usize = 1024;

/// Scans `source` into a fresh buffer with the default options
pub fn scan(source: &str) -> Vec<Token> {
    let mut buffer = TokenBuffer::with_capacity(TOKENS_CAPACITY);
    if let Err(e) = tokenize_into(source.as_bytes(), &mut buffer, ScanOptions::default()) {
        panic!("Expected {:?} to scan, but got: {}", source, e);
    }
    buffer.into_vec()
}

/// Kinds of the tokens of `source`, `Eof` included
pub fn lex_kinds(source: &str) -> Vec<TokenKind> {
    scan(source).into_iter().map(|t| t.kind).collect()
}

/// True if two kinds are equal, comparing floats with a relative tolerance
pub fn kinds_match(actual: &TokenKind, expected: &TokenKind) -> bool {
    match (actual, expected) {
        (TokenKind::FloatLit(a), TokenKind::FloatLit(b)) => {
            (a - b).abs() <= b.abs().max(1.0) * 1e-6
        }
        _ => actual == expected,
    }
}

/// Asserts that `source` scans to exactly `expected`
pub fn assert_tokens(source: &str, expected: &[TokenKind]) {
    let actual = lex_kinds(source);
    if actual.len() != expected.len()
        || !actual.iter().zip(expected).all(|(a, e)| kinds_match(a, e))
    {
        panic!(
            "Token mismatch for {:?}\n\nexpected: {:?}\n\nactual:   {:?}",
            source, expected, actual
        );
    }
}

/// Asserts the kind tag at each listed index
pub fn assert_kinds_at(source: &str, expected: &[(usize, TokenKind)]) {
    let actual = lex_kinds(source);
    for (index, kind) in expected {
        match actual.get(*index) {
            Some(found) if found.name() == kind.name() => {}
            other => panic!(
                "Expected {} at index {} of {:?}, found {:?}",
                kind.name(),
                index,
                source,
                other
            ),
        }
    }
}
