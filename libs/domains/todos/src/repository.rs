use async_trait::async_trait;

use crate::error::TodoResult;
use crate::models::{FieldUpdate, Todo};

/// Repository trait for Todo persistence
///
/// Implementations own the stored state; callers hold no copies between
/// calls. Ids that cannot name a stored Todo yield `TodoError::NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Every stored Todo in store-defined order
    async fn find_all(&self) -> TodoResult<Vec<Todo>>;

    /// Persist a new Todo with its id already assigned
    async fn insert(&self, todo: &Todo) -> TodoResult<()>;

    /// Apply a single-field update in place
    async fn update_field(&self, id: &str, update: FieldUpdate) -> TodoResult<()>;

    /// Delete a Todo by id
    async fn remove(&self, id: &str) -> TodoResult<()>;
}
