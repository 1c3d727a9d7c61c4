//! Error type shared by every cloud operation

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use cloudprint_api::ApiError;

/// Why a cloud operation failed.
///
/// Vendor rejections carry the platform's own message untouched (usually
/// Chinese); the other kinds carry stable English texts. Nothing in this
/// crate panics on vendor input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloudError {
    /// The request never produced a usable HTTP 200 body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The platform answered 200 but flagged the call as failed.
    #[error("{0}")]
    Vendor(String),

    /// The platform has no endpoint for this operation.
    #[error("operation not supported by this vendor")]
    Unsupported,

    /// The reply body did not match the documented shape.
    #[error("could not parse response")]
    Parse,
}

impl From<ApiError> for CloudError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unsupported => CloudError::Unsupported,
            other => CloudError::Transport(other.to_string()),
        }
    }
}

/// Result type for cloud operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// Decode a vendor reply body, folding any decode failure into
/// [`CloudError::Parse`].
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> CloudResult<T> {
    serde_json::from_str(body).map_err(|err| {
        warn!(%err, "unparseable vendor body");
        CloudError::Parse
    })
}
