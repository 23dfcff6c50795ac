//! recipehub-app library root.
//!
//! Application layer of the RecipeHub client: configuration, the persisted
//! auth session, cache-bound queries and mutations, and view models. The
//! `recipehub` binary is a thin command front end over these modules.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod mutations;
pub mod queries;
pub mod session;
pub mod state;
pub mod storage;
pub mod views;

pub use error::AppError;
pub use state::AppState;
