use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

pub const DEFAULT_STALE_SECS: u64 = 30;

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV: &str = "RECIPEHUB_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeHubConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub api_base_url: String,
    /// Seconds a fetched result is served before background revalidation.
    /// Added in v1.
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
}

fn default_stale_secs() -> u64 {
    DEFAULT_STALE_SECS
}

impl Default for RecipeHubConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            stale_secs: DEFAULT_STALE_SECS,
        }
    }
}

impl RecipeHubConfig {
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.recipehub.client"))
}

const CONFIG_FILE: &str = "config.json";

pub fn load_config_from(path: &Path) -> eyre::Result<RecipeHubConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: RecipeHubConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update RecipeHub."
        ));
    }

    // v0 → v1: `base_url` renamed to `api_base_url`, `stale_secs` added
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(url) = obj.remove("base_url") {
            obj.entry("api_base_url").or_insert(url);
        }
        obj.entry("stale_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_STALE_SECS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed base_url, added stale_secs)");
    }

    Ok(json)
}

pub fn save_config_to(dir: &Path, config: &RecipeHubConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Config saved in `dir`, or defaults when there is none yet.
pub fn load_or_default_in(dir: &Path) -> eyre::Result<RecipeHubConfig> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        load_config_from(&path)
    } else {
        Ok(RecipeHubConfig::default())
    }
}

/// Persist a new API base URL. The URL is checked before anything is
/// written, so a bad value leaves the saved config untouched.
pub fn set_api_base_url(url: &str) -> eyre::Result<RecipeHubConfig> {
    set_api_base_url_in(&config_dir()?, url)
}

pub fn set_api_base_url_in(dir: &Path, url: &str) -> eyre::Result<RecipeHubConfig> {
    let client = recipehub_api::ApiClient::new(url)?;
    let mut config = load_or_default_in(dir)?;
    config.api_base_url = client.base_url().to_string();
    save_config_to(dir, &config)?;
    Ok(config)
}

pub fn delete_config() -> eyre::Result<bool> {
    delete_config_in(&config_dir()?)
}

/// Remove the saved config from `dir`. Returns whether a file was removed.
pub fn delete_config_in(dir: &Path) -> eyre::Result<bool> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(&path)?;
    tracing::info!(path = %path.display(), "config deleted");
    Ok(true)
}

/// Saved config (or defaults), with the environment override applied.
pub fn resolve_config() -> eyre::Result<RecipeHubConfig> {
    let mut config = load_or_default_in(&config_dir()?)?;

    if let Ok(url) = std::env::var(API_URL_ENV)
        && !url.trim().is_empty()
    {
        tracing::debug!(url = %url, "API base URL overridden from environment");
        config.api_base_url = url;
    }

    Ok(config)
}
