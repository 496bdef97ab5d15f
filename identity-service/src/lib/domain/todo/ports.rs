use async_trait::async_trait;

use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;

/// Port for todo operations on behalf of an authenticated owner.
///
/// A todo belonging to another identity is reported as `NotFound`.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(
        &self,
        owner: &IdentityId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Every todo of `owner`, oldest first.
    async fn list_todos(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn get_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        owner: &IdentityId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - Todo does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<(), TodoError>;

    /// Remove every todo of `owner` and return how many were removed.
    async fn delete_todos(&self, owner: &IdentityId) -> Result<u64, TodoError>;
}

/// Persistence operations for todos.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Todos of `owner` in insertion order.
    async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError>;

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;

    /// # Errors
    /// * `NotFound` - No stored todo has this id
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Returns whether a todo was removed.
    async fn delete(&self, id: &TodoId) -> Result<bool, TodoError>;

    /// Returns the number of todos removed.
    async fn delete_by_owner(&self, owner: &IdentityId) -> Result<u64, TodoError>;
}
