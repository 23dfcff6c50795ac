use recipehub_api::{auth as api_auth, users};
use recipehub_core::cache_keys;
use recipehub_core::draft::{LoginForm, RegisterForm};
use recipehub_core::models::user::User;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Exchange credentials for a token and enter the authenticated state.
///
/// User-scoped queries are invalidated so the next read sees the new
/// identity. On any failure the session is left exactly as it was.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<(), AppError> {
    let form = LoginForm::new(email.trim(), password);
    form.validate()?;

    let token = api_auth::login(&state.api, &form.email, &form.password).await?;
    state.session.login(token.access_token)?;

    let invalidated = state.cache.invalidate_many(&cache_keys::user_scoped());
    info!(email = %form.email, invalidated, "logged in");
    Ok(())
}

/// Leave the authenticated state. Never touches the network.
pub fn logout(state: &AppState) {
    state.session.logout();
    let removed: usize = cache_keys::user_scoped()
        .iter()
        .map(|key| state.cache.remove(key))
        .sum();
    info!(removed, "logged out, user-scoped cache dropped");
}

/// Create an account. Does not log in.
pub async fn register(state: &AppState, form: &RegisterForm) -> Result<User, AppError> {
    let new_user = form.to_new_user()?;
    let user = users::register(&state.api, &new_user).await?;
    info!(user_id = user.id, "account created");
    Ok(user)
}
