//! Endpoint layer: one uniform async function per operation.
//!
//! Business errors travel inside [`Outcome::Failure`]; the outer `Result`
//! only fails when the endpoint itself could not produce an outcome.

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;

use crate::context::RequestContext;
use crate::error::{TodoError, TodoResult};
use crate::models::{NewTodo, Todo};
use crate::service::TodoService;

/// Result of an operation as seen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(TodoError),
}

impl<T> Outcome<T> {
    /// The business error, if the operation failed.
    pub fn failed(&self) -> Option<&TodoError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }

    pub fn into_result(self) -> TodoResult<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(err) => Err(err),
        }
    }
}

impl<T> From<TodoResult<T>> for Outcome<T> {
    fn from(result: TodoResult<T>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Failure(err),
        }
    }
}

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("endpoint panicked: {0}")]
    Panicked(String),
}

pub type EndpointResult<T> = Result<Outcome<T>, EndpointError>;

pub type Endpoint<Req, Resp> =
    Arc<dyn Fn(RequestContext, Req) -> BoxFuture<'static, EndpointResult<Resp>> + Send + Sync>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponse {
    pub t: Vec<Todo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRequest {
    #[serde(default)]
    pub todo: NewTodo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddResponse {
    pub t: Todo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCompleteRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCompleteResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveCompleteRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveCompleteResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Lift an operation into an [`Endpoint`]. A panic while the operation runs
/// becomes `EndpointError::Panicked` instead of unwinding into the server.
fn endpoint<Req, Resp, F, Fut>(operation: F) -> Endpoint<Req, Resp>
where
    Req: Send + 'static,
    Resp: Send + 'static,
    F: Fn(RequestContext, Req) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = TodoResult<Resp>> + Send + 'static,
{
    Arc::new(move |ctx, request| {
        let call = operation(ctx, request);
        async move {
            match AssertUnwindSafe(call).catch_unwind().await {
                Ok(result) => Ok(Outcome::from(result)),
                Err(payload) => Err(EndpointError::Panicked(panic_message(payload.as_ref()))),
            }
        }
        .boxed()
    })
}

pub fn make_get_endpoint(service: Arc<dyn TodoService>) -> Endpoint<GetRequest, GetResponse> {
    endpoint(move |ctx, _request: GetRequest| {
        let service = service.clone();
        async move { service.get(&ctx).await.map(|t| GetResponse { t }) }
    })
}

pub fn make_add_endpoint(service: Arc<dyn TodoService>) -> Endpoint<AddRequest, AddResponse> {
    endpoint(move |ctx, request: AddRequest| {
        let service = service.clone();
        async move { service.add(&ctx, request.todo).await.map(|t| AddResponse { t }) }
    })
}

pub fn make_set_complete_endpoint(
    service: Arc<dyn TodoService>,
) -> Endpoint<SetCompleteRequest, SetCompleteResponse> {
    endpoint(move |ctx, request: SetCompleteRequest| {
        let service = service.clone();
        async move {
            service.set_complete(&ctx, &request.id).await?;
            Ok(SetCompleteResponse {})
        }
    })
}

pub fn make_remove_complete_endpoint(
    service: Arc<dyn TodoService>,
) -> Endpoint<RemoveCompleteRequest, RemoveCompleteResponse> {
    endpoint(move |ctx, request: RemoveCompleteRequest| {
        let service = service.clone();
        async move {
            service.remove_complete(&ctx, &request.id).await?;
            Ok(RemoveCompleteResponse {})
        }
    })
}

pub fn make_delete_endpoint(
    service: Arc<dyn TodoService>,
) -> Endpoint<DeleteRequest, DeleteResponse> {
    endpoint(move |ctx, request: DeleteRequest| {
        let service = service.clone();
        async move {
            service.delete(&ctx, &request.id).await?;
            Ok(DeleteResponse {})
        }
    })
}

/// All five endpoints over one service.
#[derive(Clone)]
pub struct Endpoints {
    pub get: Endpoint<GetRequest, GetResponse>,
    pub add: Endpoint<AddRequest, AddResponse>,
    pub set_complete: Endpoint<SetCompleteRequest, SetCompleteResponse>,
    pub remove_complete: Endpoint<RemoveCompleteRequest, RemoveCompleteResponse>,
    pub delete: Endpoint<DeleteRequest, DeleteResponse>,
}

impl Endpoints {
    pub fn new(service: Arc<dyn TodoService>) -> Self {
        Self {
            get: make_get_endpoint(service.clone()),
            add: make_add_endpoint(service.clone()),
            set_complete: make_set_complete_endpoint(service.clone()),
            remove_complete: make_remove_complete_endpoint(service.clone()),
            delete: make_delete_endpoint(service),
        }
    }
}

fn transport_error(err: EndpointError) -> TodoError {
    TodoError::Transport(err.to_string())
}

/// Calling through the endpoints gives the same contract as the service,
/// with endpoint failures reported as `TodoError::Transport`.
#[async_trait]
impl TodoService for Endpoints {
    async fn get(&self, ctx: &RequestContext) -> TodoResult<Vec<Todo>> {
        let outcome = (self.get)(ctx.clone(), GetRequest {})
            .await
            .map_err(transport_error)?;
        outcome.into_result().map(|response| response.t)
    }

    async fn add(&self, ctx: &RequestContext, todo: NewTodo) -> TodoResult<Todo> {
        let outcome = (self.add)(ctx.clone(), AddRequest { todo })
            .await
            .map_err(transport_error)?;
        outcome.into_result().map(|response| response.t)
    }

    async fn set_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let request = SetCompleteRequest { id: id.to_string() };
        let outcome = (self.set_complete)(ctx.clone(), request)
            .await
            .map_err(transport_error)?;
        outcome.into_result().map(|_| ())
    }

    async fn remove_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let request = RemoveCompleteRequest { id: id.to_string() };
        let outcome = (self.remove_complete)(ctx.clone(), request)
            .await
            .map_err(transport_error)?;
        outcome.into_result().map(|_| ())
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let request = DeleteRequest { id: id.to_string() };
        let outcome = (self.delete)(ctx.clone(), request)
            .await
            .map_err(transport_error)?;
        outcome.into_result().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryTodoRepository;
    use crate::service;

    fn endpoints() -> Endpoints {
        Endpoints::new(service::new(InMemoryTodoRepository::new(), vec![]))
    }

    #[test]
    fn test_outcome_failed() {
        let ok: Outcome<u8> = Outcome::Success(1);
        let failed: Outcome<u8> = Outcome::Failure(TodoError::DeadlineExceeded);

        assert!(ok.failed().is_none());
        assert_eq!(failed.failed(), Some(&TodoError::DeadlineExceeded));
        assert_eq!(failed.into_result(), Err(TodoError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_add_then_get_through_endpoints() {
        let endpoints = endpoints();
        let ctx = RequestContext::new("ep");

        let added = (endpoints.add)(
            ctx.clone(),
            AddRequest {
                todo: NewTodo::new("through endpoint"),
            },
        )
        .await
        .unwrap();
        let Outcome::Success(AddResponse { t: todo }) = added else {
            panic!("add did not succeed");
        };

        let listed = (endpoints.get)(ctx, GetRequest {}).await.unwrap();
        assert_eq!(listed, Outcome::Success(GetResponse { t: vec![todo] }));
    }

    #[tokio::test]
    async fn test_business_error_is_an_outcome() {
        let endpoints = endpoints();
        let result = (endpoints.delete)(
            RequestContext::new("ep"),
            DeleteRequest {
                id: "missing".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(result.failed(), Some(&TodoError::NotFound("missing".into())));
    }

    struct PanickingService;

    #[async_trait]
    impl TodoService for PanickingService {
        async fn get(&self, _ctx: &RequestContext) -> TodoResult<Vec<Todo>> {
            panic!("store handle poisoned")
        }
        async fn add(&self, _ctx: &RequestContext, _todo: NewTodo) -> TodoResult<Todo> {
            unimplemented!()
        }
        async fn set_complete(&self, _ctx: &RequestContext, _id: &str) -> TodoResult<()> {
            unimplemented!()
        }
        async fn remove_complete(&self, _ctx: &RequestContext, _id: &str) -> TodoResult<()> {
            unimplemented!()
        }
        async fn delete(&self, _ctx: &RequestContext, _id: &str) -> TodoResult<()> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_panic_becomes_endpoint_error() {
        let endpoints = Endpoints::new(Arc::new(PanickingService));

        let err = (endpoints.get)(RequestContext::new("ep"), GetRequest {})
            .await
            .unwrap_err();
        assert!(matches!(err, EndpointError::Panicked(ref msg) if msg == "store handle poisoned"));

        let via_service = endpoints.get(&RequestContext::new("ep")).await;
        assert!(matches!(via_service, Err(TodoError::Transport(_))));
    }

    #[tokio::test]
    async fn test_endpoints_as_service_round_trip() {
        let endpoints = endpoints();
        let ctx = RequestContext::new("ep");

        let todo = endpoints.add(&ctx, NewTodo::new("client side")).await.unwrap();
        endpoints.set_complete(&ctx, &todo.id).await.unwrap();
        assert!(endpoints.get(&ctx).await.unwrap()[0].complete);

        endpoints.delete(&ctx, &todo.id).await.unwrap();
        assert_eq!(
            endpoints.delete(&ctx, &todo.id).await,
            Err(TodoError::NotFound(todo.id.clone()))
        );
    }
}
