//! Property-based tests for the scanner.
//!
//! Random inputs, checked against invariants that must hold for every
//! source buffer.

use aritlex_lexer::{
    tokenize_into, Lexer, PayloadOverflow, ScanOptions, TokenBuffer, TokenKind, UnknownInput,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Every operator and punctuation spelling
const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", "&=", "|=", "^=",
    "==", "!=", "<", "<=", ">", ">=", "&&", "||", "!", "&", "|", "^", "~", "<<", ">>", "++", "--",
    "(", ")", "?", ":",
];

fn arb_operator() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(OPERATORS)
}

/// Up to nine decimal digits, each optionally followed by a separator
fn arb_separated_digits() -> impl Strategy<Value = (String, String)> {
    proptest::collection::vec((0u8..10, any::<bool>()), 1..10).prop_map(|parts| {
        let last = parts.len() - 1;
        let mut plain = String::new();
        let mut separated = String::new();
        for (i, (digit, underscore)) in parts.into_iter().enumerate() {
            let c = char::from(b'0' + digit);
            plain.push(c);
            separated.push(c);
            if underscore && i != last {
                separated.push('_');
            }
        }
        (plain, separated)
    })
}

/// Short fragments built from the characters the scanner knows about
fn arb_fragment() -> impl Strategy<Value = String> {
    "[a-z0-9_ +*/%=<>!&|^~()?:.\"\\\\-]{0,48}"
}

fn lenient() -> ScanOptions {
    ScanOptions::new()
        .with_unknown(UnknownInput::EmitError)
        .with_overflow(PayloadOverflow::Truncate)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn decimal_integers_round_trip(n in 0i32..=i32::MAX) {
        let text = n.to_string();
        let tokens = aritlex_lexer::tokenize(&text).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(&tokens[0].kind, &TokenKind::IntLit(n));
        prop_assert_eq!(tokens[0].span.len(), text.len());
    }

    #[test]
    fn separators_do_not_change_value((plain, separated) in arb_separated_digits()) {
        let expected = aritlex_lexer::tokenize(&plain).unwrap();
        let actual = aritlex_lexer::tokenize(&separated).unwrap();
        prop_assert_eq!(&actual[0].kind, &expected[0].kind);
        prop_assert_eq!(actual.len(), 2);
    }

    #[test]
    fn operator_alone_is_one_token(op in arb_operator()) {
        let tokens = aritlex_lexer::tokenize(op).unwrap();
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind.symbol(), Some(op));
        prop_assert!(tokens[1].is_eof());
    }

    #[test]
    fn scanning_is_deterministic(source in arb_fragment(), capacity in 1usize..64) {
        let mut first = TokenBuffer::with_capacity(capacity);
        let mut second = TokenBuffer::with_capacity(capacity);
        let a = tokenize_into(source.as_bytes(), &mut first, ScanOptions::default());
        let b = tokenize_into(source.as_bytes(), &mut second, ScanOptions::default());
        prop_assert_eq!(a, b);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let tokens = Lexer::with_options(&bytes, lenient()).tokenize().unwrap();
        prop_assert!(tokens.last().map_or(false, |t| t.is_eof()));
        prop_assert!(tokens.len() <= bytes.len() + 1);
    }

    #[test]
    fn buffer_respects_capacity(
        bytes in proptest::collection::vec(any::<u8>(), 1..128),
        capacity in 1usize..32,
    ) {
        let mut out = TokenBuffer::with_capacity(capacity);
        match tokenize_into(&bytes, &mut out, lenient()) {
            Ok(count) => {
                prop_assert_eq!(count, out.len());
                prop_assert!(count <= capacity);
                prop_assert!(out.last().map_or(false, |t| t.is_eof()));
            }
            Err(aritlex_lexer::LexError::BufferExhausted { capacity: reported }) => {
                prop_assert_eq!(reported, capacity);
                prop_assert!(out.is_empty());
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
