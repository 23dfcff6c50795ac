//! Form drafts: local editing state with field-level validation.

pub mod credentials;
pub mod image;
pub mod recipe;

pub use credentials::{LoginForm, RegisterForm};
pub use image::ImageSource;
pub use recipe::RecipeDraft;
