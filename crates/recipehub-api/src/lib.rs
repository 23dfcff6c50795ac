//! recipehub-api
//!
//! REST operations. Thin typed wrapper around the RecipeHub backend.

pub mod auth;
pub mod client;
pub mod error;
pub mod favorites;
pub mod ingredients;
pub mod paths;
pub mod recipes;
pub mod users;

pub use client::{ApiClient, TokenProvider};
pub use error::ApiError;
