pub mod argon2;
pub mod errors;
pub mod verifier;

pub use self::argon2::PasswordHasher;
pub use errors::PasswordError;
pub use verifier::CredentialVerifier;
