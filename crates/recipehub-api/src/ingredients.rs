use recipehub_core::models::ingredient::Ingredient;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::paths;

/// The ingredient catalog offered by the recipe form.
pub async fn list_ingredients(client: &ApiClient) -> Result<Vec<Ingredient>, ApiError> {
    client.get(paths::INGREDIENTS).await
}
