use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

/// Single non-empty path segment identifying a resource.
///
/// Unlike `Path<String>`, a missing or blank segment is rejected with
/// `400 {"error": "missing id"}`. Mount the same handler on the bare prefix
/// (for example `/delete` and `/delete/`) to get that response instead of a 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPath(pub String);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => id,
            Err(rejection) => {
                tracing::debug!(%rejection, "Path id rejected");
                return Err(AppError::BadRequest("missing id".to_string()));
            }
        };

        if id.trim().is_empty() {
            return Err(AppError::BadRequest("missing id".to_string()));
        }

        Ok(IdPath(id))
    }
}
