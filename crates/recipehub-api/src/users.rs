use recipehub_core::models::user::{NewUser, User};
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::paths;

/// Profile of the user the bearer token belongs to.
pub async fn current_user(client: &ApiClient) -> Result<User, ApiError> {
    client.get(paths::CURRENT_USER).await
}

pub async fn register(client: &ApiClient, new_user: &NewUser) -> Result<User, ApiError> {
    info!(email = %new_user.email, "registering user");
    client.post(paths::REGISTER, new_user).await
}
