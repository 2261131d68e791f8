//! Household SDK for Rust.
//!
//! Provides a high-level client for the household chores and expenses API:
//! accounts, households, chore assignments, expense splits, notifications and
//! reviews. GET responses are cached locally so a failed refresh can fall
//! back to the last good data, and chore and transaction listings can be
//! grouped into labeled calendar days for display.
//!
//! # Quick start
//!
//! ```no_run
//! use household_sdk::HouseholdSdk;
//!
//! let sdk = HouseholdSdk::builder()
//!     .base_url("http://localhost:8080/api")
//!     .build()
//!     .unwrap();
//!
//! // Chores for the coming week, one section per day
//! for bucket in sdk.chores().week("household-id").unwrap() {
//!     println!("{} ({})", bucket.label, bucket.date_string);
//!     for chore in &bucket.items {
//!         println!("  {}", chore.chore.title);
//!     }
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod clock;
pub mod config;
pub mod connection;
pub mod error;
pub mod grouping;
pub mod models;
pub mod queries;

#[cfg(feature = "async")]
pub use async_client::AsyncHouseholdSdk;
pub use cache::CacheManager;
pub use clock::{Clock, FixedClock, SystemClock};
pub use connection::Connection;
pub use error::{HouseholdError, Result};
pub use grouping::{
    group_by_date, group_chores, group_splits, BucketLabel, Grouped, GroupedBucket,
    GroupingOptions,
};
pub use models::Money;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// HouseholdSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`HouseholdSdk`] instance.
///
/// Use [`HouseholdSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](HouseholdSdkBuilder::build) to create the SDK.
pub struct HouseholdSdkBuilder {
    base_url: String,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for HouseholdSdkBuilder {
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

impl HouseholdSdkBuilder {
    /// Set the API base URL, including the `/api` prefix.
    ///
    /// Defaults to `http://localhost:8080/api`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/household-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the server: reads are served
    /// from the response cache and writes fail. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the clock used for relative day labels. Defaults to the system
    /// clock.
    pub fn clock<C: Clock + 'static>(self, clock: C) -> Self {
        self.clock_arc(Arc::new(clock))
    }

    /// Set an already shared clock.
    pub(crate) fn clock_arc(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the SDK, creating the cache directory if needed.
    ///
    /// No request is sent until the first query.
    pub fn build(self) -> Result<HouseholdSdk> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(HouseholdError::InvalidArgument(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        let cache = CacheManager::new(self.cache_dir, self.offline)?;
        let conn = Connection::new(&self.base_url, cache, self.timeout);
        Ok(HouseholdSdk {
            conn,
            clock: self.clock,
        })
    }
}

// ---------------------------------------------------------------------------
// HouseholdSdk
// ---------------------------------------------------------------------------

/// The main entry point for the household SDK.
///
/// Wraps a [`Connection`] (which owns the HTTP client and [`CacheManager`])
/// and exposes resource-specific query interfaces as lightweight borrowing
/// wrappers.
///
/// Created via [`HouseholdSdk::builder()`].
pub struct HouseholdSdk {
    conn: Connection,
    clock: Arc<dyn Clock>,
}

impl HouseholdSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> HouseholdSdkBuilder {
        HouseholdSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the account query interface.
    pub fn accounts(&self) -> queries::AccountQuery<'_> {
        queries::AccountQuery::new(&self.conn)
    }

    /// Access the household query interface.
    pub fn households(&self) -> queries::HouseholdQuery<'_> {
        queries::HouseholdQuery::new(&self.conn)
    }

    /// Access the chore query interface.
    ///
    /// Grouped views label days relative to the SDK clock.
    pub fn chores(&self) -> queries::ChoreQuery<'_> {
        queries::ChoreQuery::new(&self.conn, self.clock.as_ref())
    }

    /// Access the transaction query interface.
    pub fn transactions(&self) -> queries::TransactionQuery<'_> {
        queries::TransactionQuery::new(&self.conn, self.clock.as_ref())
    }

    /// Access the notification query interface.
    pub fn notifications(&self) -> queries::NotificationQuery<'_> {
        queries::NotificationQuery::new(&self.conn)
    }

    /// Access the review query interface.
    pub fn reviews(&self) -> queries::ReviewQuery<'_> {
        queries::ReviewQuery::new(&self.conn)
    }

    // -- Metadata and utility methods --------------------------------------

    /// The clock used for relative day labels.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Whether the SDK serves cached responses only.
    pub fn is_offline(&self) -> bool {
        self.conn.cache.offline
    }

    /// Remove every cached response.
    pub fn clear_cache(&self) -> Result<()> {
        self.conn.cache.clear()?;
        log::info!("Response cache cleared");
        Ok(())
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        drop(self);
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for HouseholdSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HouseholdSdk(base_url={}, cache_dir={}, offline={})",
            self.conn.base_url(),
            self.conn.cache.cache_dir.display(),
            self.conn.cache.offline
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_clock_reaches_the_sdk() {
        let dir = tempfile::tempdir().unwrap();
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::at_date(2024, 6, 10).unwrap());
        let sdk = HouseholdSdk::builder()
            .cache_dir(dir.path())
            .clock_arc(clock)
            .build()
            .unwrap();
        assert_eq!(sdk.clock().today().to_string(), "2024-06-10");
    }
}
