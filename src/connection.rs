//! HTTP transport for the household API.
//!
//! Wraps a lazily built blocking `reqwest` client and the response cache.
//! GET responses are cached per path; when the server cannot be reached the
//! last cached response is served instead. Non-2xx responses become
//! [`HouseholdError::Api`] carrying the body's `error` message.

use crate::cache::CacheManager;
use crate::config;
use crate::error::{HouseholdError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::OnceCell;
use std::time::Duration;

/// Talks to the REST API and keeps the response cache up to date.
pub struct Connection {
    base_url: String,
    timeout: Duration,
    client: OnceCell<Client>,
    /// The cache of previously fetched GET responses.
    pub cache: CacheManager,
}

impl Connection {
    /// Create a connection to `base_url` (e.g. `http://localhost:8080/api`).
    ///
    /// No request is made until the first query.
    pub fn new(base_url: &str, cache: CacheManager, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: OnceCell::new(),
            cache,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and deserialize the response.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[])
    }

    /// GET `path` with query parameters and deserialize the response.
    ///
    /// In offline mode only the cache is consulted. Otherwise a successful
    /// response refreshes the cache, and a transport failure falls back to
    /// the cached response when there is one.
    pub fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let key = cache_key(path, query);

        if self.cache.offline {
            return match self.cache.load(&key)? {
                Some(value) => Ok(serde_json::from_value(value)?),
                None => Err(HouseholdError::NotFound(format!(
                    "{} is not cached and offline mode is enabled",
                    key
                ))),
            };
        }

        let fetched = self
            .client()
            .and_then(|client| self.send(client.get(self.url(path)).query(query)));

        match fetched {
            Ok(value) => {
                if let Err(e) = self.cache.store(&key, &value) {
                    log::warn!("Failed to cache response for {}: {}", key, e);
                }
                Ok(serde_json::from_value(value)?)
            }
            Err(e) if e.is_transport() => match self.cache.load(&key) {
                Ok(Some(value)) => {
                    log::warn!("Request for {} failed ({}); using cached response", key, e);
                    Ok(serde_json::from_value(value)?)
                }
                _ => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    /// POST a JSON body and deserialize the response.
    pub fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let value = self.request(Method::POST, path, Some(body))?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST a JSON body, ignoring any response payload.
    pub fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.request(Method::POST, path, Some(body))?;
        Ok(())
    }

    /// PUT with an optional JSON body, ignoring any response payload.
    pub fn put<B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<()> {
        self.request(Method::PUT, path, body)?;
        Ok(())
    }

    /// Drop cached GET responses touched by a mutation. Failures are logged.
    pub fn invalidate(&self, fragment: &str) {
        if let Err(e) = self.cache.invalidate(fragment) {
            log::warn!("Failed to invalidate cached {}: {}", fragment, e);
        }
    }

    fn request<B: Serialize>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value> {
        if self.cache.offline {
            return Err(HouseholdError::InvalidArgument(format!(
                "cannot {} {} while offline",
                method, path
            )));
        }
        let mut req = self.client()?.request(method, self.url(path));
        if let Some(body) = body {
            req = req.json(body);
        }
        self.send(req)
    }

    /// Send a request and decode the JSON payload.
    fn send(&self, req: RequestBuilder) -> Result<Value> {
        let resp = req.send()?;
        let status = resp.status();
        log::debug!("{} {}", status.as_u16(), resp.url());
        let text = resp.text()?;

        if !status.is_success() {
            return Err(HouseholdError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let value: Value = serde_json::from_str(&text)?;
        Ok(extract_data(value))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Cache key for a path plus query string.
fn cache_key(path: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let qs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{}?{}", path, qs.join("&"))
}

/// The `error` field of an error body, or a generic message.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| config::GENERIC_ERROR_MESSAGE.to_string())
}

/// Unwrap a `{"data": ...}` envelope, or return the value as-is if there is
/// no envelope.
fn extract_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
