//! Integer error codes attached to error logs.
//!
//! Codes never appear in response bodies; they exist so log queries can
//! group failures without parsing messages.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::NotFound.code(), 1004);
//! assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Client errors (1000s)
    ValidationError,
    InvalidJson,
    NotFound,
    MethodNotAllowed,

    // Server errors (5000s)
    InternalError,
    ServiceUnavailable,
    GatewayTimeout,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::GatewayTimeout => "GATEWAY_TIMEOUT",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidJson => 1003,
            Self::NotFound => 1004,
            Self::MethodNotAllowed => 1005,
            Self::InternalError => 5001,
            Self::ServiceUnavailable => 5003,
            Self::GatewayTimeout => 5004,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
