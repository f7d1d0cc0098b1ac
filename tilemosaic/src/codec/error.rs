//! Error types for codec operations.

use std::fmt;

/// Errors that can occur while decoding or encoding images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The payload is not a decodable image.
    Decode(String),
    /// Encoding to the target format failed.
    Encode(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Decode(msg) => write!(f, "Decode failed: {}", msg),
            CodecError::Encode(msg) => write!(f, "Encode failed: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_display_decode() {
        let err = CodecError::Decode("unknown format".to_string());
        assert_eq!(err.to_string(), "Decode failed: unknown format");
    }

    #[test]
    fn test_codec_error_display_encode() {
        let err = CodecError::Encode("zero-sized image".to_string());
        assert_eq!(err.to_string(), "Encode failed: zero-sized image");
    }
}
