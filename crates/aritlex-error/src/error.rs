//! Scan errors
//!
//! Every way a scan can fail. Silent degradations (unterminated strings,
//! skipped bytes, integer wraparound) are not errors and never show up here.

use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::span::Span;
use thiserror::Error;

/// Error returned by the scanner and the buffer entry point
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// The input buffer holds no bytes
    #[error("input buffer is empty")]
    EmptyInput,

    /// The output buffer cannot hold a single token
    #[error("output buffer has zero capacity")]
    ZeroCapacity,

    /// The output buffer filled up before the end-of-stream token was written
    #[error("output buffer exhausted after {capacity} tokens")]
    BufferExhausted { capacity: usize },

    /// An identifier does not fit in its name payload
    #[error("identifier is {len} bytes long, at most {max} fit")]
    NameTooLong { span: Span, len: usize, max: usize },

    /// A string literal does not fit in its string payload
    #[error("string literal exceeds {max} bytes")]
    StringTooLong { span: Span, max: usize },

    /// A byte that starts no token, under the rejecting policy
    #[error("unexpected character {}", byte_display(.byte))]
    UnexpectedChar { byte: u8, span: Span },
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::EmptyInput => ErrorCode::EMPTY_INPUT,
            LexError::ZeroCapacity => ErrorCode::ZERO_CAPACITY,
            LexError::BufferExhausted { .. } => ErrorCode::BUFFER_EXHAUSTED,
            LexError::NameTooLong { .. } => ErrorCode::NAME_TOO_LONG,
            LexError::StringTooLong { .. } => ErrorCode::STRING_TOO_LONG,
            LexError::UnexpectedChar { .. } => ErrorCode::UNEXPECTED_CHAR,
        }
    }

    /// Location in the input, when the error has one
    pub fn span(&self) -> Option<Span> {
        match self {
            LexError::NameTooLong { span, .. }
            | LexError::StringTooLong { span, .. }
            | LexError::UnexpectedChar { span, .. } => Some(*span),
            LexError::EmptyInput | LexError::ZeroCapacity | LexError::BufferExhausted { .. } => {
                None
            }
        }
    }

    /// Builds a renderable diagnostic for this error
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.to_string()).with_code(self.code());

        match self {
            LexError::EmptyInput => diagnostic.with_help("pass at least one byte of input"),
            LexError::ZeroCapacity => diagnostic.with_help("allocate room for at least one token"),
            LexError::BufferExhausted { capacity } => diagnostic.with_help(format!(
                "{} slots were not enough; the end-of-stream token needs one too",
                capacity
            )),
            LexError::NameTooLong { span, max, .. } => diagnostic
                .with_label(*span, "identifier starts here")
                .with_help(format!("shorten the name to {} bytes or enable truncation", max)),
            LexError::StringTooLong { span, .. } => diagnostic
                .with_label(*span, "string literal starts here")
                .with_help("split the literal or enable truncation"),
            LexError::UnexpectedChar { span, .. } => {
                diagnostic.with_label(*span, "this byte does not start any token")
            }
        }
    }
}

fn byte_display(byte: &u8) -> String {
    describe_byte(*byte)
}

/// Printable form of a raw input byte
pub fn describe_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("0x{:02X}", byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn test_messages() {
        let span = Span::new(Position::start(), Position::new(1, 2, 1));

        assert_eq!(
            LexError::UnexpectedChar { byte: b'$', span }.to_string(),
            "unexpected character '$'"
        );
        assert_eq!(
            LexError::UnexpectedChar { byte: 0xC3, span }.to_string(),
            "unexpected character 0xC3"
        );
        assert_eq!(
            LexError::BufferExhausted { capacity: 4 }.to_string(),
            "output buffer exhausted after 4 tokens"
        );
    }

    #[test]
    fn test_diagnostic_carries_code_and_label() {
        let span = Span::new(Position::start(), Position::new(1, 40, 39));
        let error = LexError::NameTooLong { span, len: 39, max: 31 };

        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.code, Some(ErrorCode::NAME_TOO_LONG));
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.labels[0].span, span);
        assert!(LexError::EmptyInput.span().is_none());
    }
}
