use std::fmt;

use serde::{Deserialize, Serialize};

use super::ingredient::{IngredientLine, RecipeIngredient};
use super::instruction::{Instruction, InstructionStep};
use super::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    Appetizer,
    Beverage,
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Dessert,
        Category::Snack,
        Category::Appetizer,
        Category::Beverage,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "breakfast",
            Category::Lunch => "lunch",
            Category::Dinner => "dinner",
            Category::Dessert => "dessert",
            Category::Snack => "snack",
            Category::Appetizer => "appetizer",
            Category::Beverage => "beverage",
            Category::Other => "other",
        }
    }

    /// Tab/menu label: "breakfast" -> "Breakfast".
    pub fn label(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cooking_time: u32,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub total_time: Option<u32>,
    pub servings: u32,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub additional_images: Vec<String>,
    #[serde(default)]
    pub calories_per_serving: Option<u32>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub dietary_info: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    pub user_id: u64,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub user: Option<User>,
}

impl Recipe {
    /// Total time as reported by the server, or prep + cooking.
    pub fn total_minutes(&self) -> u32 {
        self.total_time
            .unwrap_or_else(|| self.prep_time.unwrap_or(0).saturating_add(self.cooking_time))
    }

    /// Instructions in step order.
    pub fn ordered_instructions(&self) -> Vec<&Instruction> {
        let mut steps: Vec<&Instruction> = self.instructions.iter().collect();
        steps.sort_by_key(|i| i.step_number);
        steps
    }
}

/// Body of a create or update request, produced by a validated
/// [`RecipeDraft`](crate::draft::RecipeDraft).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cooking_time: u32,
    pub prep_time: u32,
    pub total_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub category: Category,
    pub cuisine: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_serving: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub ingredients: Vec<IngredientLine>,
    pub instructions: Vec<InstructionStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub additional_images: Vec<String>,
}
