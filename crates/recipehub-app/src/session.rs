use std::sync::{Arc, PoisonError, RwLock};

use recipehub_api::TokenProvider;
use tracing::{info, warn};

use crate::storage::SessionStorage;

/// Storage key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Process-wide authentication state.
///
/// Anonymous until [`login`](Self::login), authenticated until
/// [`logout`](Self::logout). Restored from storage at startup: a stored
/// token means the session starts authenticated. Clones share state.
#[derive(Clone)]
pub struct AuthSession {
    token: Arc<RwLock<Option<String>>>,
    storage: Arc<dyn SessionStorage>,
}

impl AuthSession {
    /// Build the session from whatever the storage holds.
    pub fn restore(storage: Arc<dyn SessionStorage>) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => {
                info!("restored authenticated session from storage");
                Some(token)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "failed to read stored session, starting anonymous");
                None
            }
        };

        Self {
            token: Arc::new(RwLock::new(token)),
            storage,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Enter the authenticated state with a token the backend issued.
    /// The token is persisted before it becomes visible to requests.
    pub fn login(&self, token: String) -> std::io::Result<()> {
        self.storage.set(TOKEN_KEY, &token)?;
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        info!("session authenticated");
        Ok(())
    }

    /// Return to the anonymous state. Always succeeds and never touches the
    /// network; a storage failure is logged.
    pub fn logout(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            warn!(error = %e, "failed to clear stored session");
        }
        info!("session cleared");
    }
}

impl TokenProvider for AuthSession {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}
