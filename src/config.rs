use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Message used when an error response carries no `error` field.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Notification badges cap their count display at this value.
pub const BADGE_COUNT_CAP: usize = 99;

/// Number of whole days, starting today, that are labeled by weekday name.
pub const WEEK_WINDOW_DAYS: u64 = 7;

/// Extension for cached responses (gzip-compressed JSON).
pub const CACHE_EXTENSION: &str = "json.gz";

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("household-sdk")
    } else {
        PathBuf::from(".household-sdk-cache")
    }
}
