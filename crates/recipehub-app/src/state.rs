use std::sync::Arc;

use recipehub_api::ApiClient;
use recipehub_cache::{CacheConfig, QueryCache};

use crate::config::RecipeHubConfig;
use crate::error::AppError;
use crate::session::AuthSession;
use crate::storage::SessionStorage;

/// Shared application state, passed to every query, mutation and view.
///
/// Built once at startup; clones share the same cache and session.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub cache: QueryCache,
    pub session: AuthSession,
}

impl AppState {
    pub fn new(
        config: &RecipeHubConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, AppError> {
        let session = AuthSession::restore(storage);
        let api = ApiClient::new(&config.api_base_url)?
            .with_token_provider(Arc::new(session.clone()));
        let cache = QueryCache::new(CacheConfig {
            stale_time: config.stale_time(),
        });

        Ok(Self {
            api,
            cache,
            session,
        })
    }

    pub fn require_auth(&self) -> Result<(), AppError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::NotAuthenticated)
        }
    }
}
