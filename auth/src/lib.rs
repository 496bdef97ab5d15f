//! Token lifecycle and credential verification library
//!
//! Provides the stateless building blocks for identity verification:
//! - Credential hashing and verification (Argon2id)
//! - Signed compact tokens carrying `sub`, `type` and `exp` (HMAC JWT)
//! - Access/refresh pair issuance and type-checked validation
//! - `Authorization` header parsing
//! - Authentication coordination
//!
//! Nothing here stores tokens. A token stays valid until it expires.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{CredentialVerifier, PasswordHasher};
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, JwtHandler, SigningSecret, TokenCodec, TokenType};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let handler = JwtHandler::new(&secret);
//! let claims = Claims::for_subject("user123", TokenType::Access, Duration::minutes(15)).unwrap();
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningSecret, TokenType};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token pair
//! let pair = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Authenticated request: validate the access token
//! let subject = auth.validate_token(&pair.access_token, TokenType::Access).unwrap();
//! assert_eq!(subject, "user123");
//!
//! // Refresh: only refresh tokens are accepted
//! let subject = auth.validate_token(&pair.refresh_token, TokenType::Refresh).unwrap();
//! let renewed = auth.issue_tokens(&subject).unwrap();
//! ```

pub mod authenticator;
pub mod bearer;
pub mod issuer;
pub mod jwt;
pub mod password;
pub mod secret;
pub mod validator;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use bearer::extract_token;
pub use bearer::BearerError;
pub use issuer::JwtTokenIssuer;
pub use issuer::TokenIssuer;
pub use issuer::TokenLifetimes;
pub use issuer::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenCodec;
pub use jwt::TokenType;
pub use password::CredentialVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::SecretError;
pub use secret::SigningSecret;
pub use validator::TokenValidator;
