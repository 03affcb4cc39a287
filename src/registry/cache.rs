//! Persistent release-timestamp cache.
//!
//! Maps full `group:artifact:version` strings to epoch-millisecond release
//! times. The cache is loaded leniently at the start of a run (an absent or
//! corrupt file is an empty cache, not an error), mutated in memory as
//! lookups succeed, and written back at the end of every run so successful
//! lookups are never repeated.
//!
//! Failed lookups are recorded in memory only: they short-circuit repeat
//! lookups within the same run but are skipped at persist time, so an
//! artifact the registry cannot resolve is retried on every run.

use crate::error::{AuditError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// In-memory timestamp cache keyed by GAV string.
#[derive(Debug, Default)]
pub struct TimestampCache {
    entries: HashMap<String, Option<i64>>,
}

impl TimestampCache {
    /// Load the cache from `path`. Absent or corrupt files yield an empty cache.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                debug!("starting with empty timestamp cache: {err}");
                return Self::default();
            }
        };
        // Null values may appear in caches written by older tooling; they
        // carry no information and are dropped so the lookup is retried.
        match serde_json::from_str::<HashMap<String, Option<i64>>>(&content) {
            Ok(loaded) => {
                let entries: HashMap<String, Option<i64>> = loaded
                    .into_iter()
                    .filter(|(_, v)| v.is_some())
                    .collect();
                debug!("loaded {} cached timestamps from {}", entries.len(), path.display());
                Self { entries }
            }
            Err(err) => {
                warn!("ignoring corrupt timestamp cache {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Cached lookup state for a GAV: `None` means never looked up this run,
    /// `Some(None)` a failed lookup, `Some(Some(ts))` a known release time.
    #[must_use]
    pub fn lookup(&self, gav: &str) -> Option<Option<i64>> {
        self.entries.get(gav).copied()
    }

    /// Record a lookup result (positive or negative).
    pub fn record(&mut self, gav: impl Into<String>, timestamp_ms: Option<i64>) {
        self.entries.insert(gav.into(), timestamp_ms);
    }

    /// Number of resolved entries that would be persisted.
    #[must_use]
    pub fn resolved_len(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    /// Write the cache back to `path`, creating parent directories as needed.
    ///
    /// Only resolved entries are written; negative in-run markers are
    /// dropped so the next run retries them against the registry.
    pub fn persist(&self, path: &Path) -> Result<()> {
        // BTreeMap for stable key order so the file diffs cleanly.
        let resolved: BTreeMap<&str, i64> = self
            .entries
            .iter()
            .filter_map(|(k, v)| v.map(|ts| (k.as_str(), ts)))
            .collect();
        let mut content = serde_json::to_string_pretty(&resolved).map_err(|err| {
            AuditError::Cache {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        })?;
        content.push('\n');
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| AuditError::Cache {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        }
        fs::write(path, content).map_err(|err| AuditError::Cache {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_is_empty_cache() {
        let cache = TimestampCache::load(Path::new("/nonexistent/cache.json"));
        assert_eq!(cache.resolved_len(), 0);
    }

    #[test]
    fn corrupt_file_is_empty_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cache.json");
        fs::write(&path, "][").unwrap();
        let cache = TimestampCache::load(&path);
        assert_eq!(cache.resolved_len(), 0);
    }

    #[test]
    fn roundtrip_keeps_resolved_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/cache.json");

        let mut cache = TimestampCache::default();
        cache.record("g:a:1.0", Some(1_600_000_000_000));
        cache.record("g:b:2.0", Some(1_700_000_000_000));
        cache.persist(&path).unwrap();

        let reloaded = TimestampCache::load(&path);
        assert_eq!(reloaded.lookup("g:a:1.0"), Some(Some(1_600_000_000_000)));
        assert_eq!(reloaded.lookup("g:b:2.0"), Some(Some(1_700_000_000_000)));
    }

    #[test]
    fn negative_entries_are_not_persisted() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cache.json");

        let mut cache = TimestampCache::default();
        cache.record("g:a:1.0", Some(1_600_000_000_000));
        cache.record("g:gone:9.9", None);
        assert_eq!(cache.lookup("g:gone:9.9"), Some(None));
        cache.persist(&path).unwrap();

        let reloaded = TimestampCache::load(&path);
        assert_eq!(reloaded.lookup("g:gone:9.9"), None);
        assert_eq!(reloaded.resolved_len(), 1);
    }
}
