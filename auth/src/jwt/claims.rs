use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Purpose of a token, fixed at issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token authorizing API calls
    Access,
    /// Long-lived token usable only to mint a new pair
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claim set carried by every token.
///
/// Serializes to exactly the keys `sub`, `type` and `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Token purpose
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims with an explicit expiration timestamp.
    pub fn new(sub: impl ToString, token_type: TokenType, exp: i64) -> Self {
        Self {
            sub: sub.to_string(),
            token_type,
            exp,
        }
    }

    /// Create claims expiring `lifetime` from now.
    ///
    /// # Arguments
    /// * `sub` - Identity identifier
    /// * `token_type` - Access or refresh
    /// * `lifetime` - Time until the token expires
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration falls outside the representable range
    pub fn for_subject(
        sub: impl ToString,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expiration = Utc::now().checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::EncodingFailed(format!("{} token lifetime overflows", token_type))
        })?;
        Ok(Self::new(sub, token_type, expiration.timestamp()))
    }

    /// Check if the claims are expired at `current_timestamp`.
    ///
    /// A token is expired at its `exp` second, not one second later.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
