use std::sync::Arc;

use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::jwt::TokenType;

/// Checks presented tokens and resolves them to a subject.
pub struct TokenValidator {
    codec: Arc<dyn TokenCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }

    /// Decode `token` and require it to be of `required_type`.
    ///
    /// # Returns
    /// The subject (identity identifier) carried by the token
    ///
    /// # Errors
    /// * Any decode failure of the codec
    /// * `WrongType` - Token is valid but of the other type
    pub fn validate(&self, token: &str, required_type: TokenType) -> Result<String, JwtError> {
        let claims = self.codec.decode(token)?;

        if claims.token_type != required_type {
            return Err(JwtError::WrongType {
                expected: required_type,
                actual: claims.token_type,
            });
        }

        Ok(claims.sub)
    }
}
