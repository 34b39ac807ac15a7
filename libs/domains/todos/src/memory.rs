//! In-process TodoRepository for tests and `TODO_STORE=memory`

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{TodoError, TodoResult};
use crate::models::{FieldUpdate, Todo};
use crate::repository::TodoRepository;

/// Keeps Todos in insertion order. The lock is held for one call only.
#[derive(Debug, Default)]
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
    async fn find_all(&self) -> TodoResult<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn insert(&self, todo: &Todo) -> TodoResult<()> {
        let mut todos = self.todos.write().await;
        if todos.iter().any(|t| t.id == todo.id) {
            return Err(TodoError::Store(format!("duplicate todo id: {}", todo.id)));
        }
        todos.push(todo.clone());
        Ok(())
    }

    async fn update_field(&self, id: &str, update: FieldUpdate) -> TodoResult<()> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;

        match update {
            FieldUpdate::Complete(complete) => todo.complete = complete,
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> TodoResult<()> {
        let mut todos = self.todos.write().await;
        let index = todos
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;

        todos.remove(index);
        Ok(())
    }
}
