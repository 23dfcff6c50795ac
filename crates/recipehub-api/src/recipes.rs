use recipehub_core::models::recipe::{Recipe, RecipePayload};
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::paths;

/// List every published recipe.
pub async fn list_recipes(client: &ApiClient) -> Result<Vec<Recipe>, ApiError> {
    client.get(paths::RECIPES).await
}

/// List recipes owned by the authenticated user.
pub async fn list_my_recipes(client: &ApiClient) -> Result<Vec<Recipe>, ApiError> {
    client.get(paths::MY_RECIPES).await
}

pub async fn get_recipe(client: &ApiClient, id: u64) -> Result<Recipe, ApiError> {
    client.get(&paths::recipe(id)).await
}

/// Create a recipe. Returns the server's copy, with its assigned id.
pub async fn create_recipe(
    client: &ApiClient,
    payload: &RecipePayload,
) -> Result<Recipe, ApiError> {
    info!(
        title = %payload.title,
        ingredients = payload.ingredients.len(),
        steps = payload.instructions.len(),
        "creating recipe"
    );
    client.post(paths::CREATE_RECIPE, payload).await
}

/// Replace a recipe's fields.
pub async fn update_recipe(
    client: &ApiClient,
    id: u64,
    payload: &RecipePayload,
) -> Result<Recipe, ApiError> {
    info!(id, title = %payload.title, "updating recipe");
    client.put(&paths::recipe(id), payload).await
}

pub async fn delete_recipe(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    info!(id, "deleting recipe");
    let _: serde_json::Value = client.delete(&paths::recipe(id)).await?;
    Ok(())
}
