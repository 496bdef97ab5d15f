use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::Password;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;
use crate::identity::errors::EmailError;
use crate::identity::errors::PasswordError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    state
        .identity_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

impl LoginRequest {
    // Only presence is checked here; a malformed email is just an unknown one.
    fn try_into_command(self) -> Result<LoginCommand, ParseLoginRequestError> {
        let password = Password::new(self.password)?;
        Ok(LoginCommand::new(self.email, password)?)
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
