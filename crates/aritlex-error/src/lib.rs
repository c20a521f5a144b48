//! aritlex-error - Errors and diagnostics for the aritlex scanner
//!
//! Source locations, the scanner's error type and a compiler-style
//! renderer for showing them next to the offending input.
//!
//! # Example
//!
//! ```rust
//! use aritlex_error::{DiagnosticRenderer, LexError, SourceFile};
//! use aritlex_error::span::{Position, Span};
//!
//! let file = SourceFile::new("<expr>", "a $ b");
//! let span = Span::new(Position::new(1, 3, 2), Position::new(1, 4, 3));
//!
//! let error = LexError::UnexpectedChar { byte: b'$', span };
//! let renderer = DiagnosticRenderer::new(&file).without_colors();
//! println!("{}", renderer.render(&error.to_diagnostic()));
//! ```

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticRenderer, ErrorCode, Label, Level, SourceFile};
pub use error::{describe_byte, LexError};
pub use span::{Position, Span};

/// Result type of every fallible scan operation
pub type Result<T> = std::result::Result<T, LexError>;

/// Warnings collected while scanning
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.level == Level::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Renders all diagnostics against the scanned file
    pub fn render(&self, file: &SourceFile) -> String {
        let renderer = DiagnosticRenderer::new(file);
        self.items
            .iter()
            .map(|d| renderer.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
