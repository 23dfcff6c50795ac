//! recipehub-cache
//!
//! Client-side query cache: results stored by key, served while fresh,
//! revalidated in the background once aged, refetched after invalidation.

pub mod cache;
pub mod entry;

pub use cache::{CacheConfig, QueryCache};
