//! Byte classification
//!
//! Single-byte predicates plus the lookup table the scanner dispatches on.
//! Everything here is ASCII only; bytes >= 0x80 are never letters or digits.

use serde::Serialize;

#[inline]
pub const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// ASCII letters only
#[inline]
pub const fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// Space, tab, carriage return and line feed
#[inline]
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
pub const fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub const fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

/// Continuation byte of a name: letter, digit or underscore
#[inline]
pub const fn is_name_continue(b: u8) -> bool {
    is_alpha(b) || is_digit(b) || b == b'_'
}

/// Lexeme category selected by the first byte of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharClass {
    /// The terminator byte `0`
    End,
    Whitespace,
    /// A digit or `.`
    Number,
    /// A letter or `_`
    Name,
    /// The string delimiter `"`
    Quote,
    /// A byte that starts an operator or punctuation token
    Operator,
    /// Anything else
    Other,
}

impl CharClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharClass::End => "end",
            CharClass::Whitespace => "whitespace",
            CharClass::Number => "number",
            CharClass::Name => "name",
            CharClass::Quote => "quote",
            CharClass::Operator => "operator",
            CharClass::Other => "other",
        }
    }
}

const fn class_of(b: u8) -> CharClass {
    match b {
        0 => CharClass::End,
        b' ' | b'\t' | b'\r' | b'\n' => CharClass::Whitespace,
        b'0'..=b'9' | b'.' => CharClass::Number,
        b'a'..=b'z' | b'A'..=b'Z' | b'_' => CharClass::Name,
        b'"' => CharClass::Quote,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'=' | b'!' | b'<' | b'>' | b'&' | b'|' | b'^'
        | b'~' | b'(' | b')' | b'?' | b':' => CharClass::Operator,
        _ => CharClass::Other,
    }
}

/// 256-entry class table, one indexed read per dispatch.
static CLASS_TABLE: [CharClass; 256] = {
    let mut table = [CharClass::Other; 256];
    let mut i = 0usize;
    while i < 256 {
        table[i] = class_of(i as u8);
        i += 1;
    }
    table
};

/// Returns the dispatch class of `b`
#[inline]
pub fn classify(b: u8) -> CharClass {
    CLASS_TABLE[b as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(is_digit(b'0') && is_digit(b'9') && !is_digit(b'a'));
        assert!(is_alpha(b'q') && is_alpha(b'Z') && !is_alpha(b'_') && !is_alpha(0xE9));
        assert!(is_whitespace(b'\n') && is_whitespace(b'\r') && !is_whitespace(0x0B));
        assert!(is_hex_digit(b'f') && is_hex_digit(b'F') && !is_hex_digit(b'g'));
        assert!(is_binary_digit(b'1') && !is_binary_digit(b'2'));
    }

    #[test]
    fn test_table_agrees_with_predicates() {
        for b in 0..=255u8 {
            let class = classify(b);
            assert_eq!(class == CharClass::Whitespace, is_whitespace(b), "byte {b:#04x}");
            if is_digit(b) {
                assert_eq!(class, CharClass::Number);
            }
            if is_alpha(b) {
                assert_eq!(class, CharClass::Name);
            }
        }
    }

    #[test]
    fn test_special_classes() {
        assert_eq!(classify(0), CharClass::End);
        assert_eq!(classify(b'.'), CharClass::Number);
        assert_eq!(classify(b'_'), CharClass::Name);
        assert_eq!(classify(b'"'), CharClass::Quote);
        assert_eq!(classify(b'~'), CharClass::Operator);
        assert_eq!(classify(b'$'), CharClass::Other);
        assert_eq!(classify(b'\''), CharClass::Other);
        assert_eq!(classify(0xFF), CharClass::Other);
    }
}
