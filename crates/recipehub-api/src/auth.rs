use recipehub_core::models::auth::TokenResponse;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::paths;

/// Exchange email/password for a bearer token.
///
/// The backend expects OAuth2 password-form fields, so the email travels as
/// `username`.
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<TokenResponse, ApiError> {
    info!(email = email, "initiating login");

    let result: Result<TokenResponse, ApiError> = client
        .post_form(paths::LOGIN, &[("username", email), ("password", password)])
        .await;

    match result {
        Ok(token) if token.access_token.is_empty() => {
            warn!(email = email, "login response carried an empty token");
            Err(ApiError::MalformedResponse(
                "login response did not contain a token".to_string(),
            ))
        }
        Ok(token) => Ok(token),
        Err(e) => {
            warn!(email = email, error = %e, "login failed");
            Err(e)
        }
    }
}
