use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationErrors};
use crate::models::ingredient::IngredientLine;
use crate::models::instruction::InstructionStep;
use crate::models::recipe::{Category, Difficulty, Recipe, RecipePayload};

use super::image::ImageSource;

/// Local editing state of the create/edit recipe form.
///
/// Numeric fields are optional so an untouched input can be told apart from
/// an explicit zero. Ingredient lines with `ingredient_id == 0` have not had
/// an ingredient selected yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cooking_time: Option<u32>,
    #[serde(default)]
    pub total_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_category")]
    pub category: Category,
    #[serde(default = "default_cuisine")]
    pub cuisine: String,
    #[serde(default)]
    pub dietary_info: String,
    #[serde(default)]
    pub calories_per_serving: Option<u32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub instructions: Vec<InstructionStep>,
    #[serde(default)]
    pub featured_image: Option<ImageSource>,
    #[serde(default)]
    pub additional_images: Vec<ImageSource>,
}

fn default_category() -> Category {
    Category::Breakfast
}

fn default_cuisine() -> String {
    "Other".to_string()
}

fn blank_ingredient() -> IngredientLine {
    IngredientLine {
        ingredient_id: 0,
        quantity: 0.0,
        notes: None,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            prep_time: Some(0),
            cooking_time: None,
            total_time: None,
            servings: None,
            difficulty: Difficulty::Easy,
            category: default_category(),
            cuisine: default_cuisine(),
            dietary_info: String::new(),
            calories_per_serving: None,
            notes: String::new(),
            source: String::new(),
            ingredients: vec![blank_ingredient()],
            instructions: vec![InstructionStep {
                step_number: 1,
                description: String::new(),
            }],
            featured_image: None,
            additional_images: Vec::new(),
        }
    }
}

impl RecipeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a draft from its JSON form. Step numbers are normalized.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut draft: RecipeDraft = serde_json::from_str(json)?;
        draft.instructions.sort_by_key(|s| s.step_number);
        draft.renumber_instructions();
        Ok(draft)
    }

    /// Pre-fill the edit form from a fetched recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let mut draft = Self {
            title: recipe.title.clone(),
            description: recipe.description.clone().unwrap_or_default(),
            prep_time: recipe.prep_time,
            cooking_time: Some(recipe.cooking_time),
            total_time: recipe.total_time,
            servings: Some(recipe.servings),
            difficulty: recipe.difficulty.unwrap_or_default(),
            category: recipe.category.unwrap_or(Category::Other),
            cuisine: recipe.cuisine.clone().unwrap_or_else(default_cuisine),
            dietary_info: recipe.dietary_info.clone().unwrap_or_default(),
            calories_per_serving: recipe.calories_per_serving,
            notes: recipe.notes.clone().unwrap_or_default(),
            source: recipe.source.clone().unwrap_or_default(),
            ingredients: recipe.ingredients.iter().map(IngredientLine::from).collect(),
            instructions: recipe
                .ordered_instructions()
                .into_iter()
                .map(InstructionStep::from)
                .collect(),
            featured_image: recipe.featured_image.as_deref().map(ImageSource::url),
            additional_images: recipe
                .additional_images
                .iter()
                .map(|url| ImageSource::url(url.as_str()))
                .collect(),
        };
        draft.renumber_instructions();
        draft
    }

    pub fn append_ingredient(&mut self) {
        self.ingredients.push(blank_ingredient());
    }

    /// Remove the ingredient line at `index`. The last remaining line is
    /// kept; returns whether a line was removed.
    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        if self.ingredients.len() <= 1 || index >= self.ingredients.len() {
            return false;
        }
        self.ingredients.remove(index);
        true
    }

    pub fn append_instruction(&mut self) {
        let step_number = self.instructions.len() as u32 + 1;
        self.instructions.push(InstructionStep {
            step_number,
            description: String::new(),
        });
    }

    /// Remove the step at display position `index` and renumber the rest
    /// densely from 1 in their existing order.
    pub fn remove_instruction(&mut self, index: usize) -> bool {
        if index >= self.instructions.len() {
            return false;
        }
        self.instructions.remove(index);
        self.renumber_instructions();
        true
    }

    pub fn set_instruction_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.instructions.get_mut(index) {
            Some(step) => {
                step.description = text.into();
                true
            }
            None => false,
        }
    }

    fn renumber_instructions(&mut self) {
        for (i, step) in self.instructions.iter_mut().enumerate() {
            step.step_number = i as u32 + 1;
        }
    }

    /// Check required fields locally. Nothing here touches the network.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        }
        if self.cuisine.trim().is_empty() {
            errors.add("cuisine", "Cuisine is required");
        }
        match self.cooking_time {
            None => errors.add("cooking_time", "Cooking time is required"),
            Some(0) => errors.add("cooking_time", "Cooking time must be positive"),
            Some(_) => {}
        }
        match self.servings {
            None => errors.add("servings", "Servings is required"),
            Some(0) => errors.add("servings", "Servings must be positive"),
            Some(_) => {}
        }

        if self.ingredients.is_empty() {
            errors.add("ingredients", "Add at least one ingredient");
        }
        for (i, line) in self.ingredients.iter().enumerate() {
            if line.ingredient_id == 0 {
                errors.add(format!("ingredients.{i}.ingredient_id"), "Select an ingredient");
            }
            if !(line.quantity.is_finite() && line.quantity > 0.0) {
                errors.add(format!("ingredients.{i}.quantity"), "Quantity must be positive");
            }
        }

        if self.instructions.is_empty() {
            errors.add("instructions", "Add at least one step");
        }
        for (i, step) in self.instructions.iter().enumerate() {
            if step.description.trim().is_empty() {
                errors.add(format!("instructions.{i}.description"), "Step description is required");
            }
        }

        // A blank featured URL means "no image"; anything else must be usable.
        if let Some(image) = &self.featured_image
            && !image.is_blank()
            && let Some(problem) = image.problem()
        {
            errors.add("featured_image", problem);
        }
        for (i, image) in self.additional_images.iter().enumerate() {
            if let Some(problem) = image.problem() {
                errors.add(format!("additional_images.{i}"), problem);
            }
        }

        errors.into_result()
    }

    /// Validate, then build the request body. One payload ingredient per
    /// draft line, images resolved to strings.
    pub fn to_payload(&self) -> Result<RecipePayload, ValidationErrors> {
        self.validate()?;

        let prep_time = self.prep_time.unwrap_or(0);
        let cooking_time = self.cooking_time.unwrap_or(0);
        let total_time = match self.total_time {
            Some(t) if t > 0 => t,
            _ => prep_time.saturating_add(cooking_time),
        };

        Ok(RecipePayload {
            title: self.title.trim().to_string(),
            description: non_blank(&self.description),
            cooking_time,
            prep_time,
            total_time,
            servings: self.servings.unwrap_or(0),
            difficulty: self.difficulty,
            category: self.category,
            cuisine: self.cuisine.trim().to_string(),
            dietary_info: non_blank(&self.dietary_info),
            calories_per_serving: self.calories_per_serving,
            notes: non_blank(&self.notes),
            source: non_blank(&self.source),
            ingredients: self
                .ingredients
                .iter()
                .map(|line| IngredientLine {
                    ingredient_id: line.ingredient_id,
                    quantity: line.quantity,
                    notes: line.notes.as_deref().and_then(non_blank),
                })
                .collect(),
            instructions: self
                .instructions
                .iter()
                .enumerate()
                .map(|(i, step)| InstructionStep {
                    step_number: i as u32 + 1,
                    description: step.description.trim().to_string(),
                })
                .collect(),
            featured_image: self
                .featured_image
                .as_ref()
                .filter(|image| !image.is_blank())
                .map(ImageSource::resolve),
            additional_images: self.additional_images.iter().map(ImageSource::resolve).collect(),
        })
    }
}
