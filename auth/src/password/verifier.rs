use super::errors::PasswordError;

/// Capability for turning plaintext credentials into storable hashes and
/// checking plaintext against them.
///
/// Both operations are CPU-bound and intentionally slow. Async callers should
/// run them on a blocking thread.
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Hash a plaintext credential.
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or hashing failed
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Check a plaintext credential against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch.
    ///
    /// # Errors
    /// * `VerificationFailed` - The stored hash cannot be parsed
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError>;
}
