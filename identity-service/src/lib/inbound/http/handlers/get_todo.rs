use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn get_todo(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedIdentity>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let id = TodoId::from_string(&id).map_err(TodoError::from)?;

    state
        .todo_service
        .get_todo(&authenticated.identity_id, &id)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
