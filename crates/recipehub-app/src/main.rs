use clap::Parser;
use eyre::Result;
use recipehub_app::cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

mod commands;

/// Set to `json` for machine-readable logs on stderr.
const LOG_FORMAT_ENV: &str = "RECIPEHUB_LOG_FORMAT";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Config(command) => commands::run_config(command),
        Command::Action(action) => commands::run(action).await,
    }
}
