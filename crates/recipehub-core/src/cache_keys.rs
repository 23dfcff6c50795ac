//! Cache key conventions.
//!
//! Pure value functions; no cache dependency. These define the canonical
//! keys under which query results are stored, and the prefixes mutations
//! invalidate.

use std::fmt;

use serde::Serialize;

pub const RECIPES: &str = "recipes";
pub const MY_RECIPES: &str = "myRecipes";
pub const RECIPE: &str = "recipe";
pub const FAVORITES: &str = "favorites";
pub const INGREDIENTS: &str = "ingredients";
pub const CURRENT_USER: &str = "currentUser";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum KeyPart {
    Name(String),
    Id(u64),
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::Name(s.to_string())
    }
}

impl From<u64> for KeyPart {
    fn from(id: u64) -> Self {
        KeyPart::Id(id)
    }
}

/// Identifier of a cached query result, e.g. `["recipe", 5]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CacheKey(Vec<KeyPart>);

impl CacheKey {
    pub fn new(parts: impl IntoIterator<Item = KeyPart>) -> Self {
        Self(parts.into_iter().collect())
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// True when `prefix` is a leading run of this key's parts.
    /// Every key starts with itself.
    pub fn starts_with(&self, prefix: &CacheKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match part {
                KeyPart::Name(name) => write!(f, "{name:?}")?,
                KeyPart::Id(id) => write!(f, "{id}")?,
            }
        }
        f.write_str("]")
    }
}

pub fn recipes() -> CacheKey {
    CacheKey::new([RECIPES.into()])
}

pub fn my_recipes() -> CacheKey {
    CacheKey::new([MY_RECIPES.into()])
}

pub fn recipe(id: u64) -> CacheKey {
    CacheKey::new([RECIPE.into(), id.into()])
}

/// Prefix matching every `recipe(id)` key.
pub fn all_recipe_details() -> CacheKey {
    CacheKey::new([RECIPE.into()])
}

pub fn favorites() -> CacheKey {
    CacheKey::new([FAVORITES.into()])
}

pub fn ingredients() -> CacheKey {
    CacheKey::new([INGREDIENTS.into()])
}

pub fn current_user() -> CacheKey {
    CacheKey::new([CURRENT_USER.into()])
}

/// Keys whose contents depend on who is logged in.
pub fn user_scoped() -> Vec<CacheKey> {
    vec![my_recipes(), favorites(), current_user()]
}
