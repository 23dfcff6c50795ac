//! Endpoint path conventions.
//!
//! Pure string functions; no HTTP dependency. These define the REST
//! surface the client talks to, relative to the configured base URL.

pub const LOGIN: &str = "/api/login";

pub const RECIPES: &str = "/api/recipes";

pub const MY_RECIPES: &str = "/api/recipes/my-recipes";

pub const CREATE_RECIPE: &str = "/api/recipes/create";

pub const FAVORITES: &str = "/api/favorites";

pub const INGREDIENTS: &str = "/api/ingredients";

pub const CURRENT_USER: &str = "/api/users/me";

pub const REGISTER: &str = "/api/users/create";

pub fn recipe(id: u64) -> String {
    format!("/api/recipes/{id}")
}

pub fn recipe_favorite(id: u64) -> String {
    format!("/api/recipes/{id}/favorite")
}
