use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("{0}")]
    Validation(String),

    #[error("todo not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Store(String),

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("{0}")]
    Transport(String),
}

pub type TodoResult<T> = Result<T, TodoError>;

/// Convert TodoError to AppError for standardized error responses
impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(msg) => AppError::BadRequest(msg),
            err @ TodoError::NotFound(_) => AppError::NotFound(err.to_string()),
            err @ TodoError::DeadlineExceeded => AppError::GatewayTimeout(err.to_string()),
            TodoError::Store(msg) | TodoError::Transport(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for TodoError {
    fn from(err: mongodb::error::Error) -> Self {
        TodoError::Store(err.to_string())
    }
}
