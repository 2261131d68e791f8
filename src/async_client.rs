//! Async wrapper around [`HouseholdSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the network.
//!
//! # Example
//!
//! ```no_run
//! use household_sdk::AsyncHouseholdSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncHouseholdSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let week = sdk.run(|s| s.chores().week("household-id")).await.unwrap();
//!
//!     // Convenience method for the notification badge
//!     let unseen = sdk.unseen_count("account-id", "household-id").await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config;
use crate::error::{HouseholdError, Result};
use crate::HouseholdSdk;

// ---------------------------------------------------------------------------
// AsyncHouseholdSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncHouseholdSdk`] instance.
pub struct AsyncHouseholdSdkBuilder {
    base_url: String,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for AsyncHouseholdSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            cache_dir: None,
            offline: false,
            timeout: Duration::from_secs(30),
            clock: Arc::new(SystemClock),
        }
    }
}

impl AsyncHouseholdSdkBuilder {
    /// Set the API base URL, including the `/api` prefix.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the clock used for relative day labels.
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncHouseholdSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = HouseholdSdk::builder()
                .base_url(&self.base_url)
                .offline(self.offline)
                .timeout(self.timeout)
                .clock_arc(self.clock);
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            let sdk = builder.build()?;
            Ok(AsyncHouseholdSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| HouseholdError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncHouseholdSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`HouseholdSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`HouseholdSdk`] is
/// protected by a [`Mutex`] since its lazily built client is not `Sync`.
pub struct AsyncHouseholdSdk {
    inner: Arc<Mutex<HouseholdSdk>>,
}

impl AsyncHouseholdSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncHouseholdSdkBuilder {
        AsyncHouseholdSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&HouseholdSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&HouseholdSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| HouseholdError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| HouseholdError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Count unseen notifications asynchronously.
    pub async fn unseen_count(&self, account_id: &str, household_id: &str) -> Result<usize> {
        let account_id = account_id.to_string();
        let household_id = household_id.to_string();
        self.run(move |s| s.notifications().unseen_count(&account_id, &household_id))
            .await
    }

    /// Remove every cached response.
    pub async fn clear_cache(&self) -> Result<()> {
        self.run(|s| s.clear_cache()).await
    }

    /// Close the SDK, releasing all resources.
    ///
    /// The blocking HTTP client is dropped on the blocking pool, which an
    /// async task must not do itself.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| HouseholdError::InvalidArgument(format!("Task join error: {e}")))
    }
}
