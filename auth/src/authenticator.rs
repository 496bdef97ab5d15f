use std::sync::Arc;

use crate::issuer::JwtTokenIssuer;
use crate::issuer::TokenIssuer;
use crate::issuer::TokenLifetimes;
use crate::issuer::TokenPair;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenCodec;
use crate::jwt::TokenType;
use crate::password::CredentialVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::SigningSecret;
use crate::validator::TokenValidator;

/// Authentication coordinator combining credential verification, token
/// issuance and token validation.
///
/// Immutable once built, so a single instance can be shared behind an `Arc`
/// by every request.
pub struct Authenticator {
    credential_verifier: Arc<dyn CredentialVerifier>,
    token_issuer: Arc<dyn TokenIssuer>,
    token_validator: TokenValidator,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with the default components: Argon2id
    /// credentials, HS256 tokens and default token lifetimes.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_lifetimes(secret, TokenLifetimes::default())
    }

    /// Create an authenticator with the default components and custom token
    /// lifetimes.
    pub fn with_lifetimes(secret: &SigningSecret, lifetimes: TokenLifetimes) -> Self {
        let codec: Arc<dyn TokenCodec> = Arc::new(JwtHandler::new(secret));

        Self::from_parts(
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtTokenIssuer::new(Arc::clone(&codec), lifetimes)),
            TokenValidator::new(codec),
        )
    }

    /// Assemble an authenticator from explicitly chosen components.
    pub fn from_parts(
        credential_verifier: Arc<dyn CredentialVerifier>,
        token_issuer: Arc<dyn TokenIssuer>,
        token_validator: TokenValidator,
    ) -> Self {
        Self {
            credential_verifier,
            token_issuer,
            token_validator,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.credential_verifier.hash(password)
    }

    /// Verify a password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.credential_verifier.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the tokens are issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be read
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_tokens(subject)?)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used by the refresh flow, where the caller has already validated a
    /// refresh token.
    pub fn issue_tokens(&self, subject: &str) -> Result<TokenPair, JwtError> {
        self.token_issuer.issue(subject)
    }

    /// Validate a token of the required type and return its subject.
    pub fn validate_token(&self, token: &str, required_type: TokenType) -> Result<String, JwtError> {
        self.token_validator.validate(token, required_type)
    }
}
