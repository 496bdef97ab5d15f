use thiserror::Error;

use super::claims::TokenType;

/// Error type for token encoding, decoding and validation.
///
/// Decoding failures are reported in check order: `Malformed` (structure),
/// `SignatureInvalid`, `Expired`, then `Malformed` again for claim shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid: {0}")]
    SignatureInvalid(String),

    #[error("Token is expired")]
    Expired,

    #[error("Wrong token type: expected {expected}, got {actual}")]
    WrongType {
        expected: TokenType,
        actual: TokenType,
    },
}
