use std::sync::Arc;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::jwt::TokenType;

/// Freshly minted access and refresh tokens.
///
/// Value type; nothing records which pairs have been handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// How long each token type stays valid after issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    access: Duration,
    refresh: Duration,
}

impl TokenLifetimes {
    /// Longest accepted lifetime for either token, in days.
    pub const MAX_DAYS: i64 = 3650;

    /// Build lifetimes, returning `None` unless both are strictly positive
    /// and no longer than [`Self::MAX_DAYS`].
    pub fn new(access: Duration, refresh: Duration) -> Option<Self> {
        let max = Duration::try_days(Self::MAX_DAYS)?;
        let in_range = |d: Duration| d > Duration::zero() && d <= max;

        if !in_range(access) || !in_range(refresh) {
            return None;
        }
        Some(Self { access, refresh })
    }

    pub fn access(&self) -> Duration {
        self.access
    }

    pub fn refresh(&self) -> Duration {
        self.refresh
    }
}

impl Default for TokenLifetimes {
    /// 15 minutes for access tokens, 7 days for refresh tokens.
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        }
    }
}

/// Capability for minting a token pair for an identity.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Issue an access and a refresh token for `subject`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Either token could not be signed
    fn issue(&self, subject: &str) -> Result<TokenPair, JwtError>;
}

/// Token issuer backed by a [`TokenCodec`].
pub struct JwtTokenIssuer {
    codec: Arc<dyn TokenCodec>,
    lifetimes: TokenLifetimes,
}

impl JwtTokenIssuer {
    pub fn new(codec: Arc<dyn TokenCodec>, lifetimes: TokenLifetimes) -> Self {
        Self { codec, lifetimes }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &str) -> Result<TokenPair, JwtError> {
        let access = Claims::for_subject(subject, TokenType::Access, self.lifetimes.access())?;
        let refresh = Claims::for_subject(subject, TokenType::Refresh, self.lifetimes.refresh())?;

        Ok(TokenPair {
            access_token: self.codec.encode(&access)?,
            refresh_token: self.codec.encode(&refresh)?,
        })
    }
}
