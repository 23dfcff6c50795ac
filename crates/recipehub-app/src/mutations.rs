//! Writes. Each mutation invalidates the queries its success makes stale;
//! a failed mutation leaves the cache untouched.

use recipehub_api::{ApiError, favorites, recipes};
use recipehub_core::cache_keys;
use recipehub_core::models::recipe::{Recipe, RecipePayload};

use crate::state::AppState;

pub async fn create_recipe(state: &AppState, payload: &RecipePayload) -> Result<Recipe, ApiError> {
    state
        .cache
        .mutate(recipes::create_recipe(&state.api, payload), |_| {
            vec![cache_keys::recipes(), cache_keys::my_recipes()]
        })
        .await
}

pub async fn update_recipe(
    state: &AppState,
    id: u64,
    payload: &RecipePayload,
) -> Result<Recipe, ApiError> {
    state
        .cache
        .mutate(recipes::update_recipe(&state.api, id, payload), |_| {
            vec![
                cache_keys::recipes(),
                cache_keys::my_recipes(),
                cache_keys::recipe(id),
            ]
        })
        .await
}

pub async fn delete_recipe(state: &AppState, id: u64) -> Result<(), ApiError> {
    state
        .cache
        .mutate(recipes::delete_recipe(&state.api, id), |_| {
            vec![
                cache_keys::recipes(),
                cache_keys::my_recipes(),
                cache_keys::recipe(id),
                cache_keys::favorites(),
            ]
        })
        .await
}

pub async fn add_favorite(state: &AppState, id: u64) -> Result<(), ApiError> {
    state
        .cache
        .mutate(favorites::add_favorite(&state.api, id), |_| {
            vec![cache_keys::favorites(), cache_keys::recipe(id)]
        })
        .await
}

pub async fn remove_favorite(state: &AppState, id: u64) -> Result<(), ApiError> {
    state
        .cache
        .mutate(favorites::remove_favorite(&state.api, id), |_| {
            vec![cache_keys::favorites(), cache_keys::recipe(id)]
        })
        .await
}
