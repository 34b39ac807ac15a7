//! Todo Service - the five business operations

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::context::RequestContext;
use crate::error::TodoResult;
use crate::models::{FieldUpdate, NewTodo, Todo};
use crate::repository::TodoRepository;

/// Business operations on the task list.
///
/// Implemented by the core service, by every decorator wrapping it and by
/// the client-side adapters, so callers only ever see `Arc<dyn TodoService>`.
#[async_trait]
pub trait TodoService: Send + Sync {
    /// Every stored Todo; an empty store yields an empty list
    async fn get(&self, ctx: &RequestContext) -> TodoResult<Vec<Todo>>;

    /// Persist a new Todo under a fresh id and return it
    async fn add(&self, ctx: &RequestContext, todo: NewTodo) -> TodoResult<Todo>;

    async fn set_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()>;

    async fn remove_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()>;

    async fn delete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()>;
}

/// Wraps a service in another behaviour-preserving service.
pub type Middleware = Box<dyn Fn(Arc<dyn TodoService>) -> Arc<dyn TodoService> + Send + Sync>;

/// Build the decorated service.
///
/// The first middleware in `middleware` ends up outermost: it sees each call
/// first and the result last.
pub fn new<R>(repository: R, middleware: Vec<Middleware>) -> Arc<dyn TodoService>
where
    R: TodoRepository + 'static,
{
    let core: Arc<dyn TodoService> = Arc::new(BasicTodoService::new(repository));
    middleware
        .iter()
        .rev()
        .fold(core, |service, wrap| wrap(service))
}

/// Core service delegating straight to the repository.
///
/// Adds no caching or validation; every store call runs under the caller's
/// deadline.
pub struct BasicTodoService<R: TodoRepository> {
    repository: Arc<R>,
}

impl<R: TodoRepository> BasicTodoService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

#[async_trait]
impl<R: TodoRepository> TodoService for BasicTodoService<R> {
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn get(&self, ctx: &RequestContext) -> TodoResult<Vec<Todo>> {
        ctx.run(self.repository.find_all()).await
    }

    #[instrument(skip(self, ctx, todo), fields(request_id = %ctx.request_id()))]
    async fn add(&self, ctx: &RequestContext, todo: NewTodo) -> TodoResult<Todo> {
        let todo = Todo::new(todo);
        ctx.run(self.repository.insert(&todo)).await?;

        tracing::info!(todo_id = %todo.id, "Todo created");
        Ok(todo)
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn set_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        ctx.run(self.repository.update_field(id, FieldUpdate::Complete(true)))
            .await
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn remove_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        ctx.run(self.repository.update_field(id, FieldUpdate::Complete(false)))
            .await
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    async fn delete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        ctx.run(self.repository.remove(id)).await
    }
}
