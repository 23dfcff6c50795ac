use recipehub_api::ApiError;
use recipehub_core::error::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("not logged in")]
    NotAuthenticated,
}

impl AppError {
    /// True for errors that should send the user back to the login flow.
    pub fn needs_login(&self) -> bool {
        match self {
            AppError::NotAuthenticated => true,
            AppError::Api(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}
