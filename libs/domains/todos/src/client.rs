//! HTTP client implementing [`TodoService`] against the todo routes.

use async_trait::async_trait;
use axum_helpers::ErrorResponse;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::context::RequestContext;
use crate::endpoints::{
    AddRequest, AddResponse, DeleteResponse, GetResponse, RemoveCompleteRequest,
    RemoveCompleteResponse, SetCompleteRequest, SetCompleteResponse,
};
use crate::error::{TodoError, TodoResult};
use crate::handlers::REQUEST_ID_HEADER;
use crate::models::{NewTodo, Todo};
use crate::service::TodoService;

/// Remote todo service reached over HTTP.
///
/// ```ignore
/// let client = HttpTodoClient::new("http://localhost:8080");
/// let todos = client.get(&RequestContext::background()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpTodoClient {
    base_url: String,
    client: Client,
}

impl HttpTodoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Reuse an existing `reqwest::Client` and its connection pool.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send with the context's request id and remaining deadline, then decode
    /// either the success payload or the error envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: RequestBuilder,
        id: Option<&str>,
    ) -> TodoResult<T> {
        let mut request = request.header(REQUEST_ID_HEADER, ctx.request_id());
        if let Some(remaining) = ctx.remaining() {
            if remaining.is_zero() {
                return Err(TodoError::DeadlineExceeded);
            }
            request = request.timeout(remaining);
        }

        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        debug!(request_id = ctx.request_id(), %status, "Todo API response");

        if status.is_success() {
            return response.json::<T>().await.map_err(request_error);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(decode_error(status, message, id))
    }
}

fn request_error(err: reqwest::Error) -> TodoError {
    if err.is_timeout() {
        TodoError::DeadlineExceeded
    } else {
        TodoError::Transport(err.to_string())
    }
}

/// Map a non-success status and its `{"error"}` message back to a TodoError.
fn decode_error(status: StatusCode, message: String, id: Option<&str>) -> TodoError {
    match status {
        StatusCode::NOT_FOUND => TodoError::NotFound(id.map(str::to_string).unwrap_or(message)),
        StatusCode::BAD_REQUEST => TodoError::Validation(message),
        StatusCode::GATEWAY_TIMEOUT => TodoError::DeadlineExceeded,
        _ => TodoError::Store(message),
    }
}

#[async_trait]
impl TodoService for HttpTodoClient {
    async fn get(&self, ctx: &RequestContext) -> TodoResult<Vec<Todo>> {
        let response: GetResponse = self.send(ctx, self.client.get(self.url("/")), None).await?;
        Ok(response.t)
    }

    async fn add(&self, ctx: &RequestContext, todo: NewTodo) -> TodoResult<Todo> {
        let request = self.client.post(self.url("/add")).json(&AddRequest { todo });
        let response: AddResponse = self.send(ctx, request, None).await?;
        Ok(response.t)
    }

    async fn set_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let request = self
            .client
            .put(self.url("/set-complete"))
            .json(&SetCompleteRequest { id: id.to_string() });
        let _: SetCompleteResponse = self.send(ctx, request, Some(id)).await?;
        Ok(())
    }

    async fn remove_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let request = self
            .client
            .put(self.url("/remove-complete"))
            .json(&RemoveCompleteRequest { id: id.to_string() });
        let _: RemoveCompleteResponse = self.send(ctx, request, Some(id)).await?;
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let path = format!("/delete/{}", urlencoding::encode(id));
        let _: DeleteResponse = self
            .send(ctx, self.client.delete(self.url(&path)), Some(id))
            .await?;
        Ok(())
    }
}
