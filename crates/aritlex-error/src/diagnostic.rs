//! Diagnostic - compiler-style error messages
//!
//! Renders scan errors and warnings with:
//! - Error code (EL001, EL002, etc.)
//! - Precise location
//! - Source snippet with a caret underline
//! - Help text

use crate::span::Span;
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// The scan was aborted
    Error,
    /// The scan continued, but the input was not what it looked like
    Warning,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
        }
    }

    /// ANSI color escape for the level
    pub fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "\x1b[1;31m",   // Bold Red
            Level::Warning => "\x1b[1;33m", // Bold Yellow
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A label pointing at a region of the input
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

/// Structured error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// Category (L = Lexer, A = API contract)
    pub category: char,
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    // Scanner errors
    pub const UNEXPECTED_CHAR: Self = Self::new('L', 1);
    pub const UNTERMINATED_STRING: Self = Self::new('L', 2);
    pub const NAME_TOO_LONG: Self = Self::new('L', 3);
    pub const STRING_TOO_LONG: Self = Self::new('L', 4);

    // Entry point contract
    pub const EMPTY_INPUT: Self = Self::new('A', 1);
    pub const ZERO_CAPACITY: Self = Self::new('A', 2);
    pub const BUFFER_EXHAUSTED: Self = Self::new('A', 3);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// A complete diagnostic
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub helps: Vec<String>,
}

impl Diagnostic {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            helps: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }
}

/// The scanned text, kept around for rendering snippets
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Offset of each line start
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Returns a line of the source (1-indexed)
    pub fn get_line(&self, line: u32) -> Option<&str> {
        let line_idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|&e| e.saturating_sub(1))
            .unwrap_or(self.source.len());

        self.source.get(start..end)
    }
}

/// Renders a diagnostic for display
pub struct DiagnosticRenderer<'a> {
    file: &'a SourceFile,
    use_colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Self {
            file,
            use_colors: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        let paint = |code: &'static str| if self.use_colors { code } else { "" };
        let reset = paint("\x1b[0m");
        let bold = paint("\x1b[1m");
        let blue = paint("\x1b[1;34m");
        let color = if self.use_colors {
            diagnostic.level.color_code()
        } else {
            ""
        };

        // error[EL001]: message
        output.push_str(color);
        output.push_str(diagnostic.level.as_str());
        if let Some(code) = &diagnostic.code {
            output.push_str(&format!("[{}]", code));
        }
        output.push_str(reset);
        output.push_str(bold);
        output.push_str(": ");
        output.push_str(&diagnostic.message);
        output.push_str(reset);
        output.push('\n');

        for label in &diagnostic.labels {
            let start = label.span.start;
            output.push_str(&format!(
                " {}-->{} {}:{}:{}\n",
                blue, reset, self.file.name, start.line, start.column
            ));

            let Some(line_content) = self.file.get_line(start.line) else {
                continue;
            };

            let padding = " ".repeat(start.line.to_string().len());
            output.push_str(&format!(" {} {}|{}\n", padding, blue, reset));
            output.push_str(&format!(
                " {}{}{} |{} {}\n",
                blue, start.line, reset, reset, line_content
            ));

            let underline_len = if start.line == label.span.end.line {
                (label.span.end.column.saturating_sub(start.column)).max(1) as usize
            } else {
                line_content
                    .len()
                    .saturating_sub((start.column as usize).saturating_sub(1))
                    .max(1)
            };
            let spaces = " ".repeat((start.column as usize).saturating_sub(1));

            output.push_str(&format!(
                " {} {}|{} {}{}{}{} {}\n",
                padding,
                blue,
                reset,
                spaces,
                color,
                "^".repeat(underline_len),
                reset,
                label.message
            ));
        }

        let green = paint("\x1b[1;32m");
        for help in &diagnostic.helps {
            output.push_str(&format!("   = {}help{}: {}\n", green, reset, help));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn test_diagnostic_rendering() {
        let file = SourceFile::new("expr.txt", "a = 1\nb $ 2");
        let span = Span::new(Position::new(2, 3, 8), Position::new(2, 4, 9));

        let diagnostic = Diagnostic::error("unexpected character '$'")
            .with_code(ErrorCode::UNEXPECTED_CHAR)
            .with_label(span, "not part of any token")
            .with_help("remove the character");

        let output = DiagnosticRenderer::new(&file)
            .without_colors()
            .render(&diagnostic);

        assert!(output.starts_with("error[EL001]: unexpected character '$'"));
        assert!(output.contains("expr.txt:2:3"));
        assert!(output.contains("2 | b $ 2"));
        assert!(output.contains("|   ^ not part of any token"));
        assert!(output.contains("help: remove the character"));
    }

    #[test]
    fn test_get_line() {
        let file = SourceFile::new("x", "one\ntwo\n");
        assert_eq!(file.get_line(1), Some("one"));
        assert_eq!(file.get_line(2), Some("two"));
        assert_eq!(file.get_line(0), None);
    }
}
