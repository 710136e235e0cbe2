//! Errors returned by backend calls.

use forms::FormError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response. `message` is the server's own wording when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response decoded but violates a record invariant.
    #[error("Invalid record from server: {0}")]
    Shape(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Not found")]
    NotFound,
}

impl From<ApiError> for FormError {
    fn from(err: ApiError) -> Self {
        FormError::Backend(err.to_string())
    }
}

/// Error body shapes used by the REST gateway (`message`) and the auth service
/// (`msg` / `error_description`).
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ErrorBody {
    pub(crate) fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub(crate) fn code(&self) -> Option<String> {
        self.code.as_ref().map(|c| match c {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn text(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Build an [`ApiError::Status`] keeping the server message verbatim.
pub(crate) fn status_error(status: u16, body: &str) -> ApiError {
    let message = ErrorBody::parse(body)
        .text()
        .unwrap_or_else(|| format!("Request failed with status {}", status));
    ApiError::Status { status, message }
}
