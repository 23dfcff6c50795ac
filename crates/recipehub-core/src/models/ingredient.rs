use serde::{Deserialize, Serialize};

/// Catalog entry, independent of any recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u64,
    pub name: String,
    pub unit: String,
}

/// Join row between a recipe and a catalog ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: u64,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<Ingredient>,
}

/// Ingredient line as sent in a create/update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub ingredient_id: u64,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&RecipeIngredient> for IngredientLine {
    fn from(ri: &RecipeIngredient) -> Self {
        Self {
            ingredient_id: ri.ingredient_id,
            quantity: ri.quantity,
            notes: ri.notes.clone(),
        }
    }
}
