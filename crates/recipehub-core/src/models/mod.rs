pub mod auth;
pub mod ingredient;
pub mod instruction;
pub mod recipe;
pub mod user;
