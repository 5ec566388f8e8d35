//! Error types for identifier encoding, decoding, and minting.

use thiserror::Error;

/// Errors that can occur when building, parsing, or minting identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HailstoneError {
    /// A tag or version value is outside its allowed range or not an integer.
    #[error("value of {name} must be {reason}, but was {value}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A length class, buffer, or instance has the wrong size.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: String, actual: usize },

    /// The frame header carries an unrecognized length selector.
    #[error("invalid frame header 0x{header:02x}: {reason}")]
    InvalidHeader { header: u8, reason: String },

    /// The text is not valid base85 for this alphabet.
    #[error("invalid base85 encoding: {reason}")]
    InvalidEncoding { reason: String },

    /// The input is neither a decodable string nor a valid frame buffer.
    #[error("invalid identifier: {source}")]
    InvalidIdentifier {
        #[source]
        source: Box<HailstoneError>,
    },

    /// The random-byte source failed to produce entropy.
    #[error("random source failed: {0}")]
    RandomSource(String),
}

impl HailstoneError {
    pub(crate) fn invalid_argument(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_length(expected: impl Into<String>, actual: usize) -> Self {
        Self::InvalidLength {
            expected: expected.into(),
            actual,
        }
    }

    pub(crate) fn invalid_header(header: u8, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            header,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_encoding(reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            reason: reason.into(),
        }
    }

    /// Wraps a lower-level failure as an identifier recognition error.
    ///
    /// Already-wrapped errors are returned unchanged.
    pub(crate) fn invalid_identifier(cause: HailstoneError) -> Self {
        match cause {
            wrapped @ Self::InvalidIdentifier { .. } => wrapped,
            other => Self::InvalidIdentifier {
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, looking through `InvalidIdentifier`.
    pub fn root_cause(&self) -> &HailstoneError {
        match self {
            Self::InvalidIdentifier { source } => source.root_cause(),
            other => other,
        }
    }

    /// Returns true if this error indicates a rejected tag or version value.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns true if this error indicates a size mismatch.
    pub fn is_invalid_length(&self) -> bool {
        matches!(self, Self::InvalidLength { .. })
    }

    /// Returns true if this error indicates a malformed frame header.
    pub fn is_invalid_header(&self) -> bool {
        matches!(self, Self::InvalidHeader { .. })
    }

    /// Returns true if this error indicates malformed base85 text.
    pub fn is_invalid_encoding(&self) -> bool {
        matches!(self, Self::InvalidEncoding { .. })
    }

    /// Returns true if the input could not be recognized as an identifier.
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_message() {
        let err = HailstoneError::invalid_argument(
            "domain",
            1.5,
            "an integer between 0 and 255",
        );
        assert_eq!(
            err.to_string(),
            "value of domain must be an integer between 0 and 255, but was 1.5"
        );
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_identifier_wrapping_is_flat() {
        let inner = HailstoneError::invalid_length("8 or 16 bytes", 7);
        let once = HailstoneError::invalid_identifier(inner.clone());
        let twice = HailstoneError::invalid_identifier(once.clone());

        assert_eq!(once, twice);
        assert_eq!(twice.root_cause(), &inner);
        assert!(twice.root_cause().is_invalid_length());
    }

    #[test]
    fn test_identifier_source_chain() {
        use std::error::Error as _;

        let err = HailstoneError::invalid_identifier(HailstoneError::invalid_encoding(
            "unknown character '\"' at position 2",
        ));
        let source = err.source().expect("wrapped cause");
        assert!(source.to_string().starts_with("invalid base85 encoding"));
    }

    #[test]
    fn test_header_message_is_hex() {
        let err = HailstoneError::invalid_header(0xc0, "unknown length selector");
        assert_eq!(
            err.to_string(),
            "invalid frame header 0xc0: unknown length selector"
        );
    }
}
