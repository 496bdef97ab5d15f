use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

/// Replace description and completion. An empty or absent title is kept.
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedIdentity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let id = TodoId::from_string(&id).map_err(TodoError::from)?;

    state
        .todo_service
        .update_todo(&authenticated.identity_id, &id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}

/// HTTP request body for updating a todo (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    completed: bool,
}

impl From<UpdateTodoRequest> for UpdateTodoCommand {
    fn from(body: UpdateTodoRequest) -> Self {
        UpdateTodoCommand::new(body.title, body.description, body.completed)
    }
}
