use thiserror::Error;

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Invalid Authorization header format")]
    InvalidFormat,
}

/// Scheme accepted in front of the token. Case-sensitive.
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from a raw `Authorization` header value.
///
/// Accepts `Bearer <token>` as well as a bare `<token>` with no scheme. The
/// value is split on single spaces, so anything with more than two parts
/// (including doubled spaces) or a scheme other than `Bearer` is rejected.
///
/// # Errors
/// * `Missing` - Header absent or empty
/// * `InvalidFormat` - Any other shape, or an empty token
pub fn extract_token(header: Option<&str>) -> Result<&str, BearerError> {
    let header = header.filter(|h| !h.is_empty()).ok_or(BearerError::Missing)?;

    let parts: Vec<&str> = header.split(' ').collect();
    let token = match parts.as_slice() {
        &[scheme, token] if scheme == BEARER_SCHEME => token,
        &[token] => token,
        _ => return Err(BearerError::InvalidFormat),
    };

    if token.is_empty() {
        return Err(BearerError::InvalidFormat);
    }

    Ok(token)
}
