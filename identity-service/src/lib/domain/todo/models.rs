use std::fmt;

use uuid::Uuid;

use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoIdError;
use crate::domain::todo::errors::TodoTitleError;

/// Task owned by a single identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: TodoTitle,
    pub description: String,
    pub completed: bool,
    pub owner: IdentityId,
}

impl Todo {
    /// New, not yet completed todo for `owner`.
    pub fn new(owner: IdentityId, command: CreateTodoCommand) -> Self {
        Self {
            id: TodoId::new(),
            title: command.title,
            description: command.description,
            completed: false,
            owner,
        }
    }

    /// Apply an update. An absent title keeps the current one.
    pub fn apply(&mut self, command: UpdateTodoCommand) {
        if let Some(title) = command.title {
            self.title = title;
        }
        self.description = command.description;
        self.completed = command.completed;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a todo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty todo title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// # Errors
    /// * `Empty` - Title is empty
    pub fn new(title: String) -> Result<Self, TodoTitleError> {
        if title.is_empty() {
            return Err(TodoTitleError::Empty);
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: String,
}

impl CreateTodoCommand {
    pub fn new(title: TodoTitle, description: String) -> Self {
        Self { title, description }
    }
}

/// Full replacement of description and completion state.
#[derive(Debug, Clone)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: String,
    pub completed: bool,
}

impl UpdateTodoCommand {
    /// An empty `title` means "keep the current title".
    pub fn new(title: String, description: String, completed: bool) -> Self {
        Self {
            title: TodoTitle::new(title).ok(),
            description,
            completed,
        }
    }
}
