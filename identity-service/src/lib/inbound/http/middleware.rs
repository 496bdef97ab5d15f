use auth::TokenType;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::INVALID_TOKEN_MESSAGE;
use crate::domain::identity::models::IdentityId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub identity_id: IdentityId,
}

/// Middleware that admits only requests carrying a valid access token.
///
/// Accepts `Bearer <token>` or a bare token. On success the identity is
/// attached as an [`AuthenticatedIdentity`] extension; otherwise the request
/// is answered with 401 and never reaches the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity_id = {
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str())
            .transpose()
            .map_err(|e| {
                tracing::debug!(reason = %e, "Authorization header is not visible ASCII");
                ApiError::Unauthorized(auth::BearerError::InvalidFormat.to_string())
            })?;

        let token = auth::extract_token(authorization).map_err(|e| {
            tracing::debug!(reason = %e, "Authorization header rejected");
            ApiError::Unauthorized(e.to_string())
        })?;

        let subject = state
            .authenticator
            .validate_token(token, TokenType::Access)
            .map_err(|e| {
                tracing::warn!(reason = %e, "Access token rejected");
                ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
            })?;

        IdentityId::from_string(&subject).map_err(|e| {
            tracing::warn!(reason = %e, "Access token subject is not an identity id");
            ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
        })?
    };

    req.extensions_mut()
        .insert(AuthenticatedIdentity { identity_id });

    Ok(next.run(req).await)
}
