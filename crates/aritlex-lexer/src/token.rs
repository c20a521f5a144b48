//! Tokens produced by the scanner
//!
//! Defines every token kind the scanner can emit and the grouping used
//! to describe them.

use aritlex_error::span::Span;
use serde::Serialize;
use std::fmt;

/// Bytes reserved for an identifier payload, terminator included
pub const NAME_CAPACITY: usize = 32;

/// Bytes reserved for a string literal payload, terminator included
pub const STRING_CAPACITY: usize = 128;

/// Longest identifier that fits in its payload
pub const MAX_NAME_LEN: usize = NAME_CAPACITY - 1;

/// Longest decoded string literal that fits in its payload
pub const MAX_STRING_LEN: usize = STRING_CAPACITY - 1;

/// All token kinds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum TokenKind {
    // =========================================
    // Literals and names
    // =========================================
    /// Integer literal: `42`, `0xFF`, `0b1010`, `1_000`
    IntLit(i32),
    /// Floating-point literal: `3.14`, `.5`, `1e10`, `2.5f`
    FloatLit(f64),
    /// Identifier: `x`, `_tmp`, `Test123`
    Name(String),
    /// String literal with escapes decoded
    StringLit(String),

    // =========================================
    // Arithmetic
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,

    // =========================================
    // Assignment
    // =========================================
    /// `=`
    Assign,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `/=`
    SlashEq,
    /// `%=`
    PercentEq,
    /// `<<=`
    ShlEq,
    /// `>>=`
    ShrEq,
    /// `&=`
    AmpEq,
    /// `|=`
    PipeEq,
    /// `^=`
    CaretEq,

    // =========================================
    // Comparison
    // =========================================
    /// `==`
    EqEq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,

    // =========================================
    // Logical
    // =========================================
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Not,

    // =========================================
    // Bitwise
    // =========================================
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `<<`
    Shl,
    /// `>>`
    Shr,

    // =========================================
    // Increment / decrement
    // =========================================
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,

    // =========================================
    // Grouping and ternary
    // =========================================
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `?`
    Question,
    /// `:`
    Colon,

    // =========================================
    // Special
    // =========================================
    /// End of the token stream
    Eof,
    /// A byte that starts no token (only emitted on request)
    Error(u8),
}

/// Coarse grouping of token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Literal,
    Name,
    Arithmetic,
    Assignment,
    CompoundAssignment,
    Comparison,
    Logical,
    Bitwise,
    IncDec,
    Grouping,
    Ternary,
    Eof,
    Error,
}

impl TokenKind {
    pub fn category(&self) -> Category {
        use TokenKind::*;
        match self {
            IntLit(_) | FloatLit(_) | StringLit(_) => Category::Literal,
            Name(_) => Category::Name,
            Plus | Minus | Star | Slash | Percent => Category::Arithmetic,
            Assign => Category::Assignment,
            PlusEq | MinusEq | StarEq | SlashEq | PercentEq | ShlEq | ShrEq | AmpEq | PipeEq
            | CaretEq => Category::CompoundAssignment,
            EqEq | Ne | Lt | Le | Gt | Ge => Category::Comparison,
            AndAnd | OrOr | Not => Category::Logical,
            Amp | Pipe | Caret | Tilde | Shl | Shr => Category::Bitwise,
            PlusPlus | MinusMinus => Category::IncDec,
            LParen | RParen => Category::Grouping,
            Question | Colon => Category::Ternary,
            Eof => Category::Eof,
            Error(_) => Category::Error,
        }
    }

    pub fn is_literal(&self) -> bool {
        self.category() == Category::Literal
    }

    /// True for every operator and punctuation kind
    pub fn is_operator(&self) -> bool {
        !matches!(
            self.category(),
            Category::Literal | Category::Name | Category::Eof | Category::Error
        )
    }

    /// Stable upper-case tag of the kind, independent of its payload
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            IntLit(_) => "NUM_INTEGER",
            FloatLit(_) => "NUM_FLOAT",
            Name(_) => "VAR",
            StringLit(_) => "STRING",
            Plus => "PLUS",
            Minus => "MINUS",
            Star => "MUL",
            Slash => "DIV",
            Percent => "MOD",
            Assign => "ASSIGN",
            PlusEq => "PLUS_EQ",
            MinusEq => "MINUS_EQ",
            StarEq => "MUL_EQ",
            SlashEq => "DIV_EQ",
            PercentEq => "MOD_EQ",
            ShlEq => "SHL_EQ",
            ShrEq => "SHR_EQ",
            AmpEq => "AND_EQ",
            PipeEq => "OR_EQ",
            CaretEq => "XOR_EQ",
            EqEq => "EQ",
            Ne => "NEQ",
            Lt => "LT",
            Le => "LE",
            Gt => "GT",
            Ge => "GE",
            AndAnd => "AND_AND",
            OrOr => "OR_OR",
            Not => "NOT",
            Amp => "AND",
            Pipe => "OR",
            Caret => "XOR",
            Tilde => "NOT_BIT",
            Shl => "SHL",
            Shr => "SHR",
            PlusPlus => "INC",
            MinusMinus => "DEC",
            LParen => "LPAREN",
            RParen => "RPAREN",
            Question => "QMARK",
            Colon => "COLON",
            Eof => "EOF",
            Error(_) => "ERROR",
        }
    }

    /// Source spelling of an operator or punctuation kind
    pub fn symbol(&self) -> Option<&'static str> {
        use TokenKind::*;
        let symbol = match self {
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Assign => "=",
            PlusEq => "+=",
            MinusEq => "-=",
            StarEq => "*=",
            SlashEq => "/=",
            PercentEq => "%=",
            ShlEq => "<<=",
            ShrEq => ">>=",
            AmpEq => "&=",
            PipeEq => "|=",
            CaretEq => "^=",
            EqEq => "==",
            Ne => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            AndAnd => "&&",
            OrOr => "||",
            Not => "!",
            Amp => "&",
            Pipe => "|",
            Caret => "^",
            Tilde => "~",
            Shl => "<<",
            Shr => ">>",
            PlusPlus => "++",
            MinusMinus => "--",
            LParen => "(",
            RParen => ")",
            Question => "?",
            Colon => ":",
            IntLit(_) | FloatLit(_) | Name(_) | StringLit(_) | Eof | Error(_) => return None,
        };
        Some(symbol)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IntLit(n) => write!(f, "{}", n),
            TokenKind::FloatLit(n) => write!(f, "{:.6}", n),
            TokenKind::Name(s) => write!(f, "{}", s),
            TokenKind::StringLit(s) => write!(f, "{:?}", s),
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Error(b) => write!(f, "ERROR({})", aritlex_error::describe_byte(*b)),
            other => write!(f, "{}", other.symbol().unwrap_or("?")),
        }
    }
}

/// A token and the bytes it was scanned from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Checks if the token has the same kind as `kind`, ignoring payloads
    pub fn is(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.kind) == std::mem::discriminant(kind)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.kind, self.span.start.line, self.span.start.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(TokenKind::ShlEq.category(), Category::CompoundAssignment);
        assert_eq!(TokenKind::Assign.category(), Category::Assignment);
        assert_eq!(TokenKind::Not.category(), Category::Logical);
        assert_eq!(TokenKind::Tilde.category(), Category::Bitwise);
        assert_eq!(TokenKind::Question.category(), Category::Ternary);
        assert!(TokenKind::StringLit(String::new()).is_literal());
        assert!(!TokenKind::Name("x".into()).is_operator());
        assert!(TokenKind::MinusMinus.is_operator());
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::ShrEq.to_string(), ">>=");
        assert_eq!(TokenKind::IntLit(-3).to_string(), "-3");
        assert_eq!(TokenKind::FloatLit(0.5).to_string(), "0.500000");
        assert_eq!(TokenKind::StringLit("a\nb".into()).to_string(), "\"a\\nb\"");
        assert_eq!(TokenKind::Error(b'$').to_string(), "ERROR('$')");
    }

    #[test]
    fn test_is_ignores_payload() {
        let token = Token::new(TokenKind::IntLit(1), Span::default());
        assert!(token.is(&TokenKind::IntLit(99)));
        assert!(!token.is(&TokenKind::FloatLit(1.0)));
        assert!(!token.is_eof());
    }
}
