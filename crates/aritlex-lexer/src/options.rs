//! Scan options

use serde::{Deserialize, Serialize};

/// What to do with a byte that starts no token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownInput {
    /// Drop the byte and keep scanning
    #[default]
    Skip,
    /// Emit an `Error` token carrying the byte and keep scanning
    EmitError,
    /// Abort the scan with `LexError::UnexpectedChar`
    Reject,
}

/// What to do with a name or string that does not fit in its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadOverflow {
    /// Abort with `NameTooLong` / `StringTooLong`
    #[default]
    Reject,
    /// Keep what fits and consume the rest of the lexeme
    Truncate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub unknown: UnknownInput,
    pub overflow: PayloadOverflow,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects anything that is not part of a token
    pub fn strict() -> Self {
        Self::default().with_unknown(UnknownInput::Reject)
    }

    pub fn with_unknown(mut self, unknown: UnknownInput) -> Self {
        self.unknown = unknown;
        self
    }

    pub fn with_overflow(mut self, overflow: PayloadOverflow) -> Self {
        self.overflow = overflow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lenient() {
        let options = ScanOptions::default();
        assert_eq!(options.unknown, UnknownInput::Skip);
        assert_eq!(options.overflow, PayloadOverflow::Reject);
        assert_eq!(ScanOptions::strict().unknown, UnknownInput::Reject);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ScanOptions = serde_json::from_str(r#"{"unknown":"emit-error"}"#).unwrap();
        assert_eq!(options.unknown, UnknownInput::EmitError);
        assert_eq!(options.overflow, PayloadOverflow::Reject);
    }
}
