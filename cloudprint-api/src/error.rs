//! Error types for the raw vendor bindings

use thiserror::Error;

/// Errors raised while performing a vendor HTTP call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be built or sent, or the body not read.
    #[error("request failed: {0}")]
    Request(String),

    /// The platform answered with a non-200 status code.
    #[error("http status {0}")]
    Status(u16),

    /// The platform has no endpoint for this operation.
    #[error("operation not supported by this vendor")]
    Unsupported,
}

/// Result type for raw vendor calls.
pub type ApiResult<T> = Result<T, ApiError>;
