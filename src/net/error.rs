//! Failure taxonomy for API calls.
//!
//! There is no central handler: each caller decides how to surface an
//! [`ApiError`], usually through a notification.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message used when the server reports a failure without a `message` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "请求失败";
/// Message for a 401 response.
pub const AUTH_FAILURE_MESSAGE: &str = "身份验证失败，请重新登录";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered 401; the token has been cleared.
    #[error("身份验证失败，请重新登录")]
    Unauthorized,
    /// Any other non-success status.
    #[error("{message}")]
    Request { status: u16, message: String },
    /// The request never produced a response (offline, CORS, aborted).
    #[error("network error: {0}")]
    Network(String),
    /// A success response whose body is not JSON.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// The payload could not be serialized.
    #[error("invalid request payload: {0}")]
    Encode(String),
}

impl ApiError {
    /// Name exposed to page scripts as `Error.name`.
    pub fn js_name(&self) -> &'static str {
        match self {
            Self::Unauthorized => "AuthenticationError",
            Self::Request { .. } => "RequestError",
            Self::Network(_) => "NetworkError",
            Self::Decode(_) | Self::Encode(_) => "SyntaxError",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
