//! recipehub-core
//!
//! Pure domain types, cache key conventions, and form drafts.
//! No HTTP dependency; this is the shared vocabulary of the RecipeHub client.

pub mod cache_keys;
pub mod draft;
pub mod error;
pub mod models;
