//! On-disk cache of the last good response for each GET path.
//!
//! Responses are stored gzip-compressed, one file per request key. The cache
//! backs offline mode and lets a failed refresh fall back to the previously
//! fetched data instead of surfacing a transport error.

use crate::config;
use crate::error::{HouseholdError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;

/// Stores and loads cached API responses.
pub struct CacheManager {
    /// Directory where cached responses are stored.
    pub cache_dir: PathBuf,
    /// If true, never contact the server (serve cached responses only).
    pub offline: bool,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
        })
    }

    /// File path for a request key such as `/households/abc/chores`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.{}", sanitize_key(key), config::CACHE_EXTENSION))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entry_path(key).exists()
    }

    /// Write a response to the cache.
    ///
    /// Writes to a temp file first and renames on success, so an interrupted
    /// write never leaves a corrupt entry behind.
    pub fn store(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let dest = self.entry_path(key);
        let tmp_dest = PathBuf::from(format!("{}.tmp", dest.display()));

        let result = (|| -> Result<()> {
            let file = fs::File::create(&tmp_dest)?;
            let mut encoder = GzEncoder::new(file, Compression::default());
            encoder.write_all(&serde_json::to_vec(value)?)?;
            encoder.finish()?;
            fs::rename(&tmp_dest, &dest)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    /// Load a cached response, or `None` if nothing is cached for `key`.
    ///
    /// If the cached file is corrupt it is deleted so the next successful
    /// fetch replaces it, and a `NotFound` error is returned.
    pub fn load(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let parse_result = (|| -> Result<serde_json::Value> {
            let file = fs::File::open(&path)?;
            let mut decoder = GzDecoder::new(BufReader::new(file));
            let mut contents = String::new();
            decoder.read_to_string(&mut contents)?;
            Ok(serde_json::from_str(&contents)?)
        })();

        match parse_result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Corrupt cache file {}: {} -- removing", path.display(), e);
                let _ = fs::remove_file(&path);
                Err(HouseholdError::NotFound(format!(
                    "Cache entry '{}' was corrupt and has been removed. \
                     Original error: {}",
                    key, e
                )))
            }
        }
    }

    /// Remove every entry whose key contains `fragment`.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate(&self, fragment: &str) -> Result<usize> {
        let needle = sanitize_key(fragment);
        let mut removed = 0;
        for entry in fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.ends_with(config::CACHE_EXTENSION) && name.contains(&needle) {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        if removed > 0 {
            log::debug!("Invalidated {} cached responses matching {:?}", removed, fragment);
        }
        Ok(removed)
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

/// Encode a request key as a file-name-safe string.
///
/// ASCII letters, digits, `-` and `=` are kept. `_` becomes `__` and every
/// other byte becomes `_XX` (uppercase hex), so distinct keys never share a
/// file. The encoding is applied per character, which keeps substring
/// matches on encoded fragments meaningful.
fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'=' => out.push(byte as char),
            b'_' => out.push_str("__"),
            other => out.push_str(&format!("_{:02X}", other)),
        }
    }
    out
}
