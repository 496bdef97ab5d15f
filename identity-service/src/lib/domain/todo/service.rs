use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::ports::TodoServicePort;

pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    /// The todo, provided `owner` owns it.
    async fn owned(&self, owner: &IdentityId, id: &TodoId) -> Result<Todo, TodoError> {
        match self.repository.find_by_id(id).await? {
            Some(todo) if todo.owner == *owner => Ok(todo),
            Some(_) => {
                tracing::warn!(todo_id = %id, identity_id = %owner, "Todo owned by another identity");
                Err(TodoError::NotFound(id.to_string()))
            }
            None => Err(TodoError::NotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn create_todo(
        &self,
        owner: &IdentityId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = self.repository.create(Todo::new(*owner, command)).await?;
        tracing::info!(todo_id = %todo.id, identity_id = %owner, "Todo created");
        Ok(todo)
    }

    async fn list_todos(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError> {
        self.repository.find_by_owner(owner).await
    }

    async fn get_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<Todo, TodoError> {
        self.owned(owner, id).await
    }

    async fn update_todo(
        &self,
        owner: &IdentityId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.owned(owner, id).await?;
        todo.apply(command);
        self.repository.update(todo).await
    }

    async fn delete_todo(&self, owner: &IdentityId, id: &TodoId) -> Result<(), TodoError> {
        self.owned(owner, id).await?;
        if !self.repository.delete(id).await? {
            return Err(TodoError::NotFound(id.to_string()));
        }
        tracing::info!(todo_id = %id, identity_id = %owner, "Todo deleted");
        Ok(())
    }

    async fn delete_todos(&self, owner: &IdentityId) -> Result<u64, TodoError> {
        let removed = self.repository.delete_by_owner(owner).await?;
        tracing::info!(identity_id = %owner, removed, "Todos deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::todo::models::TodoTitle;

    mock! {
        pub TestTodoRepository {}

        #[async_trait]
        impl TodoRepository for TestTodoRepository {
            async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn find_by_owner(&self, owner: &IdentityId) -> Result<Vec<Todo>, TodoError>;
            async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;
            async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;
            async fn delete(&self, id: &TodoId) -> Result<bool, TodoError>;
            async fn delete_by_owner(&self, owner: &IdentityId) -> Result<u64, TodoError>;
        }
    }

    fn stored_todo(owner: IdentityId) -> Todo {
        Todo::new(
            owner,
            CreateTodoCommand::new(
                TodoTitle::new("Buy milk".to_string()).unwrap(),
                "Go to the store".to_string(),
            ),
        )
    }

    #[tokio::test]
    async fn test_create_todo_assigns_owner() {
        let mut repository = MockTestTodoRepository::new();
        let owner = IdentityId::new();

        repository
            .expect_create()
            .withf(move |todo| todo.owner == owner && !todo.completed)
            .times(1)
            .returning(Ok);

        let service = TodoService::new(Arc::new(repository));
        let todo = service
            .create_todo(
                &owner,
                CreateTodoCommand::new(
                    TodoTitle::new("Buy milk".to_string()).unwrap(),
                    String::new(),
                ),
            )
            .await
            .unwrap();

        assert_eq!(todo.owner, owner);
        assert_eq!(todo.title.as_str(), "Buy milk");
    }

    #[tokio::test]
    async fn test_get_todo_of_another_owner_is_not_found() {
        let mut repository = MockTestTodoRepository::new();
        let todo = stored_todo(IdentityId::new());
        let id = todo.id;

        repository
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(todo.clone())));

        let service = TodoService::new(Arc::new(repository));
        let result = service.get_todo(&IdentityId::new(), &id).await;

        assert_eq!(result.unwrap_err(), TodoError::NotFound(id.to_string()));
    }

    #[tokio::test]
    async fn test_update_todo_keeps_title_when_empty() {
        let mut repository = MockTestTodoRepository::new();
        let owner = IdentityId::new();
        let todo = stored_todo(owner);
        let id = todo.id;

        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(todo.clone())));
        repository
            .expect_update()
            .withf(|todo| todo.title.as_str() == "Buy milk" && todo.completed)
            .times(1)
            .returning(Ok);

        let service = TodoService::new(Arc::new(repository));
        let updated = service
            .update_todo(
                &owner,
                &id,
                UpdateTodoCommand::new(String::new(), "done".to_string(), true),
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "done");
    }

    #[tokio::test]
    async fn test_update_todo_of_another_owner_never_writes() {
        let mut repository = MockTestTodoRepository::new();
        let todo = stored_todo(IdentityId::new());
        let id = todo.id;

        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(todo.clone())));
        repository.expect_update().times(0);

        let service = TodoService::new(Arc::new(repository));
        let result = service
            .update_todo(
                &IdentityId::new(),
                &id,
                UpdateTodoCommand::new("Stolen".to_string(), String::new(), true),
            )
            .await;

        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_todo_is_not_found() {
        let mut repository = MockTestTodoRepository::new();

        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = TodoService::new(Arc::new(repository));
        let result = service.delete_todo(&IdentityId::new(), &TodoId::new()).await;

        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_todos_is_scoped_to_owner() {
        let mut repository = MockTestTodoRepository::new();
        let owner = IdentityId::new();

        repository
            .expect_delete_by_owner()
            .with(eq(owner))
            .times(1)
            .returning(|_| Ok(3));

        let service = TodoService::new(Arc::new(repository));

        assert_eq!(service.delete_todos(&owner).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_database_error_propagates() {
        let mut repository = MockTestTodoRepository::new();

        repository
            .expect_find_by_owner()
            .returning(|_| Err(TodoError::DatabaseError("connection reset".to_string())));

        let service = TodoService::new(Arc::new(repository));
        let result = service.list_todos(&IdentityId::new()).await;

        assert!(matches!(result, Err(TodoError::DatabaseError(_))));
    }
}
