use std::fmt;
use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Source of the bearer token attached to outgoing requests.
///
/// Read on every request, so a login or logout is visible to the next call
/// without rebuilding the client.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// HTTP wrapper: base URL + optional bearer token + JSON decoding.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Option<Arc<dyn TokenProvider>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token_provider", &self.tokens.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{trimmed}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{trimmed}: scheme must be http or https"
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: trimmed.to_string(),
            tokens: None,
        })
    }

    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.tokens = Some(provider);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, |req| req).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, |req| req.json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, |req| req.json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, |req| req).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.send(Method::POST, path, |req| req.form(form)).await
    }

    async fn send<T, F>(&self, method: Method, path: &str, build: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let mut req = self.http.request(method.clone(), self.url(path));
        if let Some(token) = self.tokens.as_ref().and_then(|t| t.bearer_token()) {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = build(req);

        let resp = req.send().await.map_err(|e| {
            debug!(method = %method, path = path, error = %e, "request failed to send");
            ApiError::from(e)
        })?;

        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(method = %method, path = path, status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        // Empty bodies (204, bare 200) decode as JSON null so `()` works.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let detail = extract_detail(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
            status: status.as_u16(),
            detail,
        },
        _ => ApiError::Status {
            status: status.as_u16(),
            detail,
        },
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, `{"detail": [{"msg": "..."}, ...]}`,
/// `{"error": "..."}` and plain-text bodies.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?.trim();
    if text.is_empty() {
        return None;
    }

    let json: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return Some(text.to_string()),
    };

    match json.get("detail").or_else(|| json.get("error")) {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}
