use recipehub_core::models::recipe::Recipe;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::paths;

/// Recipes the authenticated user has marked as favorite.
pub async fn list_favorites(client: &ApiClient) -> Result<Vec<Recipe>, ApiError> {
    client.get(paths::FAVORITES).await
}

pub async fn add_favorite(client: &ApiClient, recipe_id: u64) -> Result<(), ApiError> {
    info!(recipe_id, "adding favorite");
    let _: serde_json::Value = client
        .post(&paths::recipe_favorite(recipe_id), &serde_json::Value::Null)
        .await?;
    Ok(())
}

pub async fn remove_favorite(client: &ApiClient, recipe_id: u64) -> Result<(), ApiError> {
    info!(recipe_id, "removing favorite");
    let _: serde_json::Value = client.delete(&paths::recipe_favorite(recipe_id)).await?;
    Ok(())
}
