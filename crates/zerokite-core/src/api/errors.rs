use thiserror::Error;

use super::response::ApiBody;

/// Normalized remote API failure, whether signalled by HTTP status or by an
/// error envelope inside a successful response.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: String,
    pub message: String,
    pub status_code: Option<u16>,
    pub raw_body: Option<ApiBody>,
}

impl ApiError {
    /// A response that passed normalization but lacks what the caller needs.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>, raw_body: Option<ApiBody>) -> Self {
        Self {
            kind: "InvalidResponse".to_string(),
            message: message.into(),
            status_code: None,
            raw_body,
        }
    }
}
