//! Per-request context passed through every layer.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

use crate::error::{TodoError, TodoResult};

/// Request id plus an optional deadline.
///
/// The transport builds one per inbound request; store calls made on its
/// behalf run through [`RequestContext::run`] so they stop at the deadline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            deadline: None,
        }
    }

    /// A context with a generated id and no deadline.
    pub fn background() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Deadline `timeout` from now. A timeout too large to represent as an
    /// instant leaves the context unbounded.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Drive `fut` to completion or fail with `DeadlineExceeded`.
    pub async fn run<F, T>(&self, fut: F) -> TodoResult<T>
    where
        F: Future<Output = TodoResult<T>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| TodoError::DeadlineExceeded)?,
            None => fut.await,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}
