//! Service decorators: logging and metrics.
//!
//! Each decorator delegates every call unchanged and only observes the
//! result. Compose them with [`crate::service::new`].

use async_trait::async_trait;
use observability::TodoMetrics;
use std::sync::Arc;
use std::time::Instant;
use strum::{Display, EnumString};
use tracing::{info, warn};

use crate::context::RequestContext;
use crate::error::TodoResult;
use crate::models::{NewTodo, Todo};
use crate::service::{Middleware, TodoService};

/// Decorators selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MiddlewareKind {
    Logging,
    Metrics,
}

impl MiddlewareKind {
    pub fn build(self) -> Middleware {
        match self {
            MiddlewareKind::Logging => logging_middleware(),
            MiddlewareKind::Metrics => metrics_middleware(),
        }
    }

    /// Parse a comma separated list such as `logging,metrics`, keeping order.
    pub fn parse_list(value: &str) -> Result<Vec<Self>, strum::ParseError> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

pub fn logging_middleware() -> Middleware {
    Box::new(|next| Arc::new(LoggingMiddleware { next }))
}

pub fn metrics_middleware() -> Middleware {
    Box::new(|next| Arc::new(MetricsMiddleware { next }))
}

struct LoggingMiddleware {
    next: Arc<dyn TodoService>,
}

fn log_call<T>(
    method: &'static str,
    ctx: &RequestContext,
    input: &str,
    result: &TodoResult<T>,
    summarize: impl FnOnce(&T) -> String,
    started: Instant,
) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(value) => info!(
            method,
            request_id = ctx.request_id(),
            input,
            output = %summarize(value),
            elapsed_ms,
            "Todo call"
        ),
        Err(err) => warn!(
            method,
            request_id = ctx.request_id(),
            input,
            error = %err,
            elapsed_ms,
            "Todo call failed"
        ),
    }
}

#[async_trait]
impl TodoService for LoggingMiddleware {
    async fn get(&self, ctx: &RequestContext) -> TodoResult<Vec<Todo>> {
        let started = Instant::now();
        let result = self.next.get(ctx).await;
        log_call("get", ctx, "", &result, |t| format!("{} todos", t.len()), started);
        result
    }

    async fn add(&self, ctx: &RequestContext, todo: NewTodo) -> TodoResult<Todo> {
        let started = Instant::now();
        let input = format!("title={:?} complete={}", todo.title, todo.complete);
        let result = self.next.add(ctx, todo).await;
        log_call("add", ctx, &input, &result, |t| format!("id={}", t.id), started);
        result
    }

    async fn set_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let started = Instant::now();
        let result = self.next.set_complete(ctx, id).await;
        log_call("set_complete", ctx, &format!("id={id}"), &result, |_| "ok".into(), started);
        result
    }

    async fn remove_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let started = Instant::now();
        let result = self.next.remove_complete(ctx, id).await;
        log_call(
            "remove_complete",
            ctx,
            &format!("id={id}"),
            &result,
            |_| "ok".into(),
            started,
        );
        result
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let started = Instant::now();
        let result = self.next.delete(ctx, id).await;
        log_call("delete", ctx, &format!("id={id}"), &result, |_| "ok".into(), started);
        result
    }
}

struct MetricsMiddleware {
    next: Arc<dyn TodoService>,
}

#[async_trait]
impl TodoService for MetricsMiddleware {
    async fn get(&self, ctx: &RequestContext) -> TodoResult<Vec<Todo>> {
        let started = Instant::now();
        let result = self.next.get(ctx).await;
        TodoMetrics::record_result("get", &result, started.elapsed());
        result
    }

    async fn add(&self, ctx: &RequestContext, todo: NewTodo) -> TodoResult<Todo> {
        let started = Instant::now();
        let result = self.next.add(ctx, todo).await;
        TodoMetrics::record_result("add", &result, started.elapsed());
        result
    }

    async fn set_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let started = Instant::now();
        let result = self.next.set_complete(ctx, id).await;
        TodoMetrics::record_result("set_complete", &result, started.elapsed());
        result
    }

    async fn remove_complete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let started = Instant::now();
        let result = self.next.remove_complete(ctx, id).await;
        TodoMetrics::record_result("remove_complete", &result, started.elapsed());
        result
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> TodoResult<()> {
        let started = Instant::now();
        let result = self.next.delete(ctx, id).await;
        TodoMetrics::record_result("delete", &result, started.elapsed());
        result
    }
}
