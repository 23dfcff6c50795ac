use thiserror::Error;

/// Message shown when the server gave nothing more specific.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("unauthorized (HTTP {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Unauthorized { status: u16, detail: Option<String> },

    #[error("request failed (HTTP {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Server-provided detail text, when the response carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail, .. } | ApiError::Status { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } | ApiError::Status { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text for a user-facing notification.
    pub fn user_message(&self) -> String {
        self.detail().unwrap_or(GENERIC_MESSAGE).to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}
