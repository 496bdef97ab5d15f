use std::fmt;

use thiserror::Error;

/// Error type for signing secret loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Signing secret is not configured")]
    Missing,

    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Symmetric key used to sign and verify tokens.
///
/// Loaded once at startup and shared read-only afterwards. There is no
/// built-in fallback value: an absent secret is an error.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Minimum accepted length, 256 bits for HS256.
    pub const MIN_LENGTH: usize = 32;

    /// Wrap raw key material.
    ///
    /// # Errors
    /// * `Missing` - Secret is empty
    /// * `TooShort` - Secret is shorter than `MIN_LENGTH` bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let secret = secret.into();
        match secret.len() {
            0 => Err(SecretError::Missing),
            actual if actual < Self::MIN_LENGTH => Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
                actual,
            }),
            _ => Ok(Self(secret)),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
