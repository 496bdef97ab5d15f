use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoRepository;

/// Process-local todo store.
///
/// A `Vec` keeps insertion order, which is the listing order.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError> {
        Ok(self
            .todos
            .read()
            .await
            .iter()
            .filter(|todo| todo.owner == *owner)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        Ok(self
            .todos
            .read()
            .await
            .iter()
            .find(|todo| todo.id == *id)
            .cloned())
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;
        let Some(stored) = todos.iter_mut().find(|stored| stored.id == todo.id) else {
            return Err(TodoError::NotFound(todo.id.to_string()));
        };

        *stored = todo.clone();
        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> Result<bool, TodoError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| todo.id != *id);
        Ok(todos.len() < before)
    }

    async fn delete_by_owner(&self, owner: &IdentityId) -> Result<u64, TodoError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| todo.owner != *owner);
        Ok((before - todos.len()) as u64)
    }
}
