//! Numeric literal conversion
//!
//! Converts a run of bytes into an integer or floating-point value and
//! reports how many bytes were used. The end of the slice and a `0` byte
//! both terminate the run. Underscores between digits are digit
//! separators and never end a run.
//!
//! Conversion never fails: integers wrap on overflow and an empty run
//! converts to zero.

use crate::classify::is_digit;

/// A converted value and the index of the first byte that was not used
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub consumed: usize,
}

struct Digits<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Digits<'a> {
    fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> u8 {
        self.src.get(self.pos + n).copied().unwrap_or(0)
    }

    fn bump(&mut self, n: usize) {
        self.pos += n;
    }

    /// Consumes a leading `+` or `-`, returning true for `-`
    fn sign(&mut self) -> bool {
        match self.peek() {
            b'-' => {
                self.bump(1);
                true
            }
            b'+' => {
                self.bump(1);
                false
            }
            _ => false,
        }
    }

    /// Folds a decimal digit run (with separators) into `acc`
    fn fold_decimal<T>(&mut self, mut acc: T, mut f: impl FnMut(T, u8) -> T) -> T {
        loop {
            match self.peek() {
                b'_' => self.bump(1),
                b if is_digit(b) => {
                    acc = f(acc, b - b'0');
                    self.bump(1);
                }
                _ => return acc,
            }
        }
    }
}

fn digit_value(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u32),
        b'a'..=b'f' => Some((b - b'a') as u32 + 10),
        b'A'..=b'F' => Some((b - b'A') as u32 + 10),
        _ => None,
    }
}

/// Converts an integer literal.
///
/// With `radix == None` the base comes from the prefix: `0x`/`0X` is 16,
/// `0b`/`0B` is 2, a leading `0` is 8 and anything else is 10. An explicit
/// radix never strips a prefix. Hex letters are recognized in every base
/// and stop the run when they are not below it.
pub fn parse_integer(src: &[u8], radix: Option<u32>) -> Parsed<i32> {
    let mut digits = Digits::new(src);
    let negative = digits.sign();

    let base = match radix {
        Some(base) => base,
        None => match (digits.peek(), digits.peek_at(1)) {
            (b'0', b'x' | b'X') => {
                digits.bump(2);
                16
            }
            (b'0', b'b' | b'B') => {
                digits.bump(2);
                2
            }
            (b'0', _) => {
                digits.bump(1);
                8
            }
            _ => 10,
        },
    };

    let mut value: i32 = 0;
    loop {
        let b = digits.peek();
        if b == b'_' {
            digits.bump(1);
            continue;
        }
        match digit_value(b) {
            Some(digit) if digit < base => {
                value = value
                    .wrapping_mul(base as i32)
                    .wrapping_add(digit as i32);
                digits.bump(1);
            }
            _ => break,
        }
    }

    let sign = if negative { -1 } else { 1 };
    Parsed {
        value: value.wrapping_mul(sign),
        consumed: digits.pos,
    }
}

/// Converts a floating-point literal.
///
/// Accepts `[sign] digits [. digits] [(e|E) [sign] digits]`. The fraction
/// is accumulated digit by digit and the exponent is applied by repeated
/// multiplication, so results can differ from a correctly rounded parse in
/// the last bits.
pub fn parse_double(src: &[u8]) -> Parsed<f64> {
    let mut digits = Digits::new(src);
    let sign = if digits.sign() { -1.0 } else { 1.0 };

    let mut result = digits.fold_decimal(0.0f64, |acc, d| acc * 10.0 + f64::from(d));

    if digits.peek() == b'.' {
        digits.bump(1);
        let mut step = 0.1f64;
        result = digits.fold_decimal(result, |acc, d| {
            let next = acc + f64::from(d) * step;
            step *= 0.1;
            next
        });
    }

    let mut exponent: u32 = 0;
    let mut negative_exponent = false;
    if matches!(digits.peek(), b'e' | b'E') {
        digits.bump(1);
        negative_exponent = digits.sign();
        exponent = digits.fold_decimal(0u32, |acc, d| {
            acc.saturating_mul(10).saturating_add(u32::from(d))
        });
    }

    let mut scale = 1.0f64;
    for _ in 0..exponent {
        scale *= 10.0;
        if scale.is_infinite() {
            break;
        }
    }
    if negative_exponent {
        result /= scale;
    } else {
        result *= scale;
    }

    Parsed {
        value: sign * result,
        consumed: digits.pos,
    }
}

/// Converts a single-precision literal: [`parse_double`] narrowed to `f32`
pub fn parse_single(src: &[u8]) -> Parsed<f32> {
    let Parsed { value, consumed } = parse_double(src);
    Parsed {
        value: value as f32,
        consumed,
    }
}
