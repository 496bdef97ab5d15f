use super::claims::Claims;
use super::errors::JwtError;

/// Capability for turning claims into signed compact tokens and back.
///
/// Implementations own the signing secret and must be safe to share across
/// threads; encoding and decoding are pure and non-blocking.
pub trait TokenCodec: Send + Sync + 'static {
    /// Sign `claims` into a compact token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    fn encode(&self, claims: &Claims) -> Result<String, JwtError>;

    /// Verify a compact token string and return its claims.
    ///
    /// # Errors
    /// * `Malformed` - Bad structure, encoding or claim shape
    /// * `SignatureInvalid` - Disallowed algorithm or signature mismatch
    /// * `Expired` - `exp` is at or before the current time
    fn decode(&self, token: &str) -> Result<Claims, JwtError>;
}
