//! View models: what each screen needs, assembled from queries.

use std::sync::Arc;

use recipehub_core::draft::RecipeDraft;
use recipehub_core::models::recipe::{Category, Recipe};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::{mutations, queries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryTab {
    #[default]
    All,
    Category(Category),
}

impl CategoryTab {
    pub fn label(&self) -> String {
        match self {
            CategoryTab::All => "All".to_string(),
            CategoryTab::Category(c) => c.label(),
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            CategoryTab::All => true,
            CategoryTab::Category(c) => recipe.category.unwrap_or(Category::Other) == *c,
        }
    }

    /// `"all"` or a category name, case-insensitive.
    pub fn parse(s: &str) -> Option<CategoryTab> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(CategoryTab::All);
        }
        Category::parse(s).map(CategoryTab::Category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSummary {
    pub tab: CategoryTab,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct RecipeListView {
    pub selected: CategoryTab,
    pub tabs: Vec<TabSummary>,
    pub recipes: Vec<Recipe>,
}

pub fn filter_recipes(recipes: &[Recipe], tab: CategoryTab) -> Vec<Recipe> {
    recipes.iter().filter(|r| tab.matches(r)).cloned().collect()
}

fn tab_summaries(recipes: &[Recipe]) -> Vec<TabSummary> {
    std::iter::once(CategoryTab::All)
        .chain(Category::ALL.into_iter().map(CategoryTab::Category))
        .map(|tab| TabSummary {
            tab,
            label: tab.label(),
            count: recipes.iter().filter(|r| tab.matches(r)).count(),
        })
        .collect()
}

/// Home screen: every recipe, filtered by the selected category tab.
pub async fn recipe_list(state: &AppState, tab: CategoryTab) -> Result<RecipeListView, AppError> {
    let all = queries::recipes(state).await?;
    Ok(RecipeListView {
        selected: tab,
        tabs: tab_summaries(&all),
        recipes: filter_recipes(&all, tab),
    })
}

#[derive(Debug, Clone)]
pub struct RecipeDetailView {
    pub recipe: Arc<Recipe>,
    pub is_favorite: bool,
    pub is_owner: bool,
}

/// Detail screen. Anonymous visitors see the recipe only; for a logged-in
/// user the favorites list and profile are fetched alongside it.
pub async fn recipe_detail(state: &AppState, id: u64) -> Result<RecipeDetailView, AppError> {
    if !state.session.is_authenticated() {
        let recipe = queries::recipe(state, id).await?;
        return Ok(RecipeDetailView {
            recipe,
            is_favorite: false,
            is_owner: false,
        });
    }

    let (recipe, favorites, user) = tokio::try_join!(
        queries::recipe(state, id),
        queries::favorites(state),
        queries::current_user(state),
    )?;
    let is_favorite = favorites.iter().any(|r| r.id == id);
    let is_owner = recipe.user_id == user.id;
    debug!(id, is_favorite, is_owner, "recipe detail assembled");

    Ok(RecipeDetailView {
        recipe,
        is_favorite,
        is_owner,
    })
}

#[derive(Debug, Clone)]
pub struct FavoritesView {
    pub recipes: Arc<Vec<Recipe>>,
}

impl FavoritesView {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

pub async fn favorites_view(state: &AppState) -> Result<FavoritesView, AppError> {
    state.require_auth()?;
    Ok(FavoritesView {
        recipes: queries::favorites(state).await?,
    })
}

pub async fn my_recipes(state: &AppState) -> Result<Arc<Vec<Recipe>>, AppError> {
    state.require_auth()?;
    Ok(queries::my_recipes(state).await?)
}

/// Flip the favorite mark on a recipe. Returns the new status.
pub async fn toggle_favorite(state: &AppState, id: u64) -> Result<bool, AppError> {
    state.require_auth()?;
    let favorites = queries::favorites(state).await?;
    if favorites.iter().any(|r| r.id == id) {
        mutations::remove_favorite(state, id).await?;
        Ok(false)
    } else {
        mutations::add_favorite(state, id).await?;
        Ok(true)
    }
}

/// Edit form pre-filled from the current server copy.
pub async fn edit_draft(state: &AppState, id: u64) -> Result<RecipeDraft, AppError> {
    let recipe = queries::recipe(state, id).await?;
    Ok(RecipeDraft::from_recipe(&recipe))
}

/// Validate locally, then create. Nothing is sent if validation fails.
pub async fn submit_create(state: &AppState, draft: &RecipeDraft) -> Result<Recipe, AppError> {
    let payload = draft.to_payload()?;
    state.require_auth()?;
    Ok(mutations::create_recipe(state, &payload).await?)
}

pub async fn submit_update(
    state: &AppState,
    id: u64,
    draft: &RecipeDraft,
) -> Result<Recipe, AppError> {
    let payload = draft.to_payload()?;
    state.require_auth()?;
    Ok(mutations::update_recipe(state, id, &payload).await?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A user-facing message for a failed action.
///
/// Validation failures carry per-field messages for inline display;
/// everything else is a single dismissible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

pub const LOGIN_AGAIN_MESSAGE: &str = "Your session has expired. Please log in again.";

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to continue.";

pub fn notice_for(err: &AppError) -> Notice {
    match err {
        AppError::Validation(errors) => Notice {
            severity: Severity::Warning,
            message: "Please fix the highlighted fields.".to_string(),
            fields: errors
                .iter()
                .map(|(field, msg)| (field.to_string(), msg.to_string()))
                .collect(),
        },
        AppError::NotAuthenticated => Notice {
            severity: Severity::Warning,
            message: LOGIN_REQUIRED_MESSAGE.to_string(),
            fields: Vec::new(),
        },
        AppError::Api(e) if e.is_unauthorized() => Notice {
            severity: Severity::Warning,
            message: LOGIN_AGAIN_MESSAGE.to_string(),
            fields: Vec::new(),
        },
        AppError::Api(e) => Notice {
            severity: Severity::Error,
            message: e.user_message(),
            fields: Vec::new(),
        },
        AppError::Storage(e) => Notice {
            severity: Severity::Error,
            message: format!("Could not save your session: {e}"),
            fields: Vec::new(),
        },
    }
}
