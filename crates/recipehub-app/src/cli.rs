//! Command-line surface of the `recipehub` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::views::CategoryTab;

#[derive(Parser, Debug)]
#[command(name = "recipehub", version)]
#[command(about = "Browse, favorite and publish recipes on a RecipeHub server")]
#[command(after_help = "Environment:\n  \
    RECIPEHUB_API_URL     backend base URL, overrides the saved config\n  \
    RECIPEHUB_LOG_FORMAT  set to json for JSON logs\n  \
    RUST_LOG              log filter (default info)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or change the saved configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    #[command(flatten)]
    Action(Action),
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Save a new backend base URL
    SetUrl { url: String },
    /// Delete the saved configuration
    Reset,
}

/// Commands that talk to the backend.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Action {
    /// Log in and remember the session
    Login { email: String, password: String },
    /// Forget the stored session
    Logout,
    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Show the logged-in user
    Whoami,
    /// List recipes, optionally for one category
    Recipes {
        #[arg(default_value = "all", value_parser = parse_tab)]
        category: CategoryTab,
    },
    /// List your own recipes
    MyRecipes,
    /// Show one recipe
    Recipe { id: u64 },
    /// List your favorites
    Favorites,
    /// Mark a recipe as favorite
    Favorite { id: u64 },
    /// Remove a recipe from your favorites
    Unfavorite { id: u64 },
    /// Delete one of your recipes
    Delete { id: u64 },
    /// Publish a recipe from a draft JSON file
    Create { draft: PathBuf },
    /// Replace a recipe with a draft JSON file
    Update { id: u64, draft: PathBuf },
}

fn parse_tab(s: &str) -> Result<CategoryTab, String> {
    CategoryTab::parse(s).ok_or_else(|| format!("unknown category {s:?}"))
}
