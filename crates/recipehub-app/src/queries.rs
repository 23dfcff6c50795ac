//! Cache-bound reads. Each query pairs one cache key with one service call.

use std::sync::Arc;

use recipehub_api::{ApiError, favorites, ingredients, recipes, users};
use recipehub_core::cache_keys;
use recipehub_core::models::ingredient::Ingredient;
use recipehub_core::models::recipe::Recipe;
use recipehub_core::models::user::User;

use crate::state::AppState;

pub async fn recipes(state: &AppState) -> Result<Arc<Vec<Recipe>>, ApiError> {
    let api = state.api.clone();
    state
        .cache
        .query(cache_keys::recipes(), move || async move {
            recipes::list_recipes(&api).await
        })
        .await
}

pub async fn my_recipes(state: &AppState) -> Result<Arc<Vec<Recipe>>, ApiError> {
    let api = state.api.clone();
    state
        .cache
        .query(cache_keys::my_recipes(), move || async move {
            recipes::list_my_recipes(&api).await
        })
        .await
}

pub async fn recipe(state: &AppState, id: u64) -> Result<Arc<Recipe>, ApiError> {
    let api = state.api.clone();
    state
        .cache
        .query(cache_keys::recipe(id), move || async move {
            recipes::get_recipe(&api, id).await
        })
        .await
}

pub async fn favorites(state: &AppState) -> Result<Arc<Vec<Recipe>>, ApiError> {
    let api = state.api.clone();
    state
        .cache
        .query(cache_keys::favorites(), move || async move {
            favorites::list_favorites(&api).await
        })
        .await
}

pub async fn ingredients(state: &AppState) -> Result<Arc<Vec<Ingredient>>, ApiError> {
    let api = state.api.clone();
    state
        .cache
        .query(cache_keys::ingredients(), move || async move {
            ingredients::list_ingredients(&api).await
        })
        .await
}

pub async fn current_user(state: &AppState) -> Result<Arc<User>, ApiError> {
    let api = state.api.clone();
    state
        .cache
        .query(cache_keys::current_user(), move || async move {
            users::current_user(&api).await
        })
        .await
}
