use std::path::Path;
use std::sync::Arc;

use eyre::{Result, WrapErr};
use recipehub_app::cli::{Action, ConfigCommand};
use recipehub_app::config;
use recipehub_app::storage::FileStorage;
use recipehub_app::views::{self, CategoryTab, notice_for};
use recipehub_app::{AppError, AppState, auth, mutations, queries};
use recipehub_core::draft::{RecipeDraft, RegisterForm};
use recipehub_core::models::recipe::Recipe;

fn read_draft(path: &Path) -> Result<RecipeDraft> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read draft at {}", path.display()))?;
    Ok(RecipeDraft::from_json(&json)?)
}

fn print_recipe_line(recipe: &Recipe) {
    let category = recipe
        .category
        .map(|c| c.label())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:>5}  {:<40}  {:<10}  {} min",
        recipe.id,
        recipe.title,
        category,
        recipe.total_minutes()
    );
}

fn print_recipe(view: &views::RecipeDetailView) {
    let recipe = &view.recipe;
    println!("{} (#{})", recipe.title, recipe.id);
    if let Some(description) = &recipe.description {
        println!("{description}");
    }
    println!(
        "prep {} min, cook {} min, total {} min, serves {}",
        recipe.prep_time.unwrap_or(0),
        recipe.cooking_time,
        recipe.total_minutes(),
        recipe.servings
    );
    if view.is_favorite {
        println!("* favorite");
    }
    if view.is_owner {
        println!("* yours");
    }

    println!("\ningredients:");
    for line in &recipe.ingredients {
        let name = line
            .ingredient
            .as_ref()
            .map(|i| format!("{} {}", i.unit, i.name))
            .unwrap_or_else(|| format!("ingredient #{}", line.ingredient_id));
        match &line.notes {
            Some(notes) => println!("  - {} {name} ({notes})", line.quantity),
            None => println!("  - {} {name}", line.quantity),
        }
    }

    println!("\nsteps:");
    for step in recipe.ordered_instructions() {
        println!("  {}. {}", step.step_number, step.description);
    }
}

/// Turn an application error into a printed notice plus a failing exit.
fn report(err: AppError) -> eyre::Report {
    let notice = notice_for(&err);
    for (field, message) in &notice.fields {
        eprintln!("  {field}: {message}");
    }
    eyre::Report::new(err).wrap_err(notice.message)
}

trait Noticed<T> {
    fn noticed(self) -> Result<T>;
}

impl<T> Noticed<T> for Result<T, AppError> {
    fn noticed(self) -> Result<T> {
        self.map_err(report)
    }
}

pub fn run_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = config::resolve_config()?;
            println!("config dir:   {}", config::config_dir()?.display());
            println!("api base url: {}", config.api_base_url);
            println!("stale after:  {}s", config.stale_secs);
        }
        ConfigCommand::SetUrl { url } => {
            let config = config::set_api_base_url(&url)?;
            println!("api base url set to {}", config.api_base_url);
        }
        ConfigCommand::Reset => {
            if config::delete_config()? {
                println!("saved config removed, defaults restored");
            } else {
                println!("no saved config");
            }
        }
    }
    Ok(())
}

pub async fn run(action: Action) -> Result<()> {
    let config = config::resolve_config()?;
    tracing::debug!(api_base_url = %config.api_base_url, "configuration resolved");

    let storage = Arc::new(FileStorage::in_config_dir()?);
    let state = AppState::new(&config, storage)?;

    execute(&state, action).await
}

async fn execute(state: &AppState, action: Action) -> Result<()> {
    match action {
        Action::Login { email, password } => {
            auth::login(state, &email, &password).await.noticed()?;
            println!("logged in as {email}");
        }
        Action::Logout => {
            auth::logout(state);
            println!("logged out");
        }
        Action::Register {
            name,
            email,
            password,
        } => {
            let form = RegisterForm {
                name,
                email,
                confirm_password: password.clone(),
                password,
            };
            let user = auth::register(state, &form).await.noticed()?;
            println!("registered {} (#{}), now log in", user.display_name(), user.id);
        }
        Action::Whoami => {
            state.require_auth().noticed()?;
            let user = queries::current_user(state)
                .await
                .map_err(AppError::from)
                .noticed()?;
            println!("{} <{}>", user.display_name(), user.email);
        }
        Action::Recipes { category } => {
            let view = views::recipe_list(state, category).await.noticed()?;
            let tabs: Vec<String> = view
                .tabs
                .iter()
                .filter(|t| t.count > 0 || t.tab == CategoryTab::All)
                .map(|t| format!("{} ({})", t.label, t.count))
                .collect();
            println!("{}\n", tabs.join("  "));
            view.recipes.iter().for_each(print_recipe_line);
        }
        Action::MyRecipes => {
            let recipes = views::my_recipes(state).await.noticed()?;
            if recipes.is_empty() {
                println!("you have not created any recipes yet");
            }
            recipes.iter().for_each(print_recipe_line);
        }
        Action::Recipe { id } => {
            let view = views::recipe_detail(state, id).await.noticed()?;
            print_recipe(&view);
        }
        Action::Favorites => {
            let view = views::favorites_view(state).await.noticed()?;
            if view.is_empty() {
                println!("no favorites yet");
            }
            view.recipes.iter().for_each(print_recipe_line);
        }
        Action::Favorite { id } => {
            set_favorite(state, id, true).await.noticed()?;
            println!("recipe #{id} added to favorites");
        }
        Action::Unfavorite { id } => {
            set_favorite(state, id, false).await.noticed()?;
            println!("recipe #{id} removed from favorites");
        }
        Action::Delete { id } => {
            state.require_auth().noticed()?;
            mutations::delete_recipe(state, id)
                .await
                .map_err(AppError::from)
                .noticed()?;
            println!("recipe #{id} deleted");
        }
        Action::Create { draft } => {
            let draft = read_draft(&draft)?;
            let recipe = views::submit_create(state, &draft).await.noticed()?;
            println!("created recipe #{}", recipe.id);
        }
        Action::Update { id, draft } => {
            let draft = read_draft(&draft)?;
            let recipe = views::submit_update(state, id, &draft).await.noticed()?;
            println!("updated recipe #{}", recipe.id);
        }
    }
    Ok(())
}

/// Bring the favorite mark to `want`, toggling only when it differs.
async fn set_favorite(state: &AppState, id: u64, want: bool) -> Result<(), AppError> {
    let view = views::recipe_detail(state, id).await?;
    if view.is_favorite != want {
        views::toggle_favorite(state, id).await?;
    }
    Ok(())
}
