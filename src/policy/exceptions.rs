//! Age-policy exception loading.
//!
//! The exceptions document is JSON and accepts three shapes, kept loose so
//! the file stays ergonomic to hand-edit:
//!
//! 1. a flat array of `"group:artifact"` / `"group:artifact:version"` strings;
//! 2. an object with `allowedGa` / `allowedGav` string arrays;
//! 3. an object with an `allowed` array whose items are such strings or
//!    objects `{"ga": ..}` / `{"gav": ..}` with an optional `"until"` date.
//!
//! All shapes normalize into two flat allow-sets right here; nothing
//! shape-specific escapes the loader. A grant whose `until` date has passed
//! is dropped at load time and never resurfaces mid-run.

use crate::model::Coordinate;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// The two allow-sets derived from the exceptions document.
#[derive(Debug, Clone, Default)]
pub struct ExceptionSet {
    allowed_ga: HashSet<String>,
    allowed_gav: HashSet<String>,
}

impl ExceptionSet {
    /// Load exceptions from `path`, dropping grants expired as of `today`.
    ///
    /// A missing document yields empty sets; an unreadable or non-JSON
    /// document is treated the same way (with a warning) so a broken
    /// exceptions file surfaces as policy violations, never as a crash.
    #[must_use]
    pub fn load(path: &Path, today: NaiveDate) -> Self {
        if !path.exists() {
            debug!("no exceptions document at {}", path.display());
            return Self::default();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("cannot read exceptions {}: {err}", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => Self::from_value(&value, today),
            Err(err) => {
                warn!("cannot parse exceptions {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Normalize any accepted document shape into the two allow-sets.
    #[must_use]
    pub fn from_value(value: &Value, today: NaiveDate) -> Self {
        let mut set = Self::default();
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(s) = item.as_str() {
                        set.add_string(s);
                    }
                }
            }
            Value::Object(map) => {
                if let Some(items) = map.get("allowedGa").and_then(Value::as_array) {
                    for item in items {
                        if let Some(s) = item.as_str() {
                            set.add_ga(s);
                        }
                    }
                }
                if let Some(items) = map.get("allowedGav").and_then(Value::as_array) {
                    for item in items {
                        if let Some(s) = item.as_str() {
                            set.add_gav(s);
                        }
                    }
                }
                if let Some(items) = map.get("allowed").and_then(Value::as_array) {
                    for item in items {
                        set.add_allowed_item(item, today);
                    }
                }
            }
            _ => debug!("ignoring exceptions document of unexpected shape"),
        }
        set
    }

    /// Whether a coordinate is covered by either allow-set.
    #[must_use]
    pub fn is_excepted(&self, coord: &Coordinate) -> bool {
        self.allowed_ga.contains(&coord.ga()) || self.allowed_gav.contains(&coord.gav())
    }

    /// Number of loaded grants, for log lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allowed_ga.len() + self.allowed_gav.len()
    }

    /// True when no grants are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed_ga.is_empty() && self.allowed_gav.is_empty()
    }

    fn add_allowed_item(&mut self, item: &Value, today: NaiveDate) {
        match item {
            Value::String(s) => self.add_string(s),
            Value::Object(map) => {
                if let Some(until) = map.get("until").and_then(Value::as_str) {
                    // An unparsable `until` is treated as non-expiring rather
                    // than rejecting the whole document.
                    match NaiveDate::parse_from_str(until, "%Y-%m-%d") {
                        Ok(until_date) if today > until_date => {
                            debug!("dropping expired exception grant (until {until})");
                            return;
                        }
                        Ok(_) => {}
                        Err(err) => debug!("unparsable until date {until:?}: {err}"),
                    }
                }
                if let Some(ga) = map.get("ga").and_then(Value::as_str) {
                    self.add_ga(ga);
                }
                if let Some(gav) = map.get("gav").and_then(Value::as_str) {
                    self.add_gav(gav);
                }
            }
            other => debug!("skipping malformed exception entry: {other}"),
        }
    }

    /// Classify a bare string by colon count: one colon is a GA, two a GAV.
    fn add_string(&mut self, s: &str) {
        match s.matches(':').count() {
            1 => {
                self.allowed_ga.insert(s.to_string());
            }
            2 => {
                self.allowed_gav.insert(s.to_string());
            }
            _ => debug!("skipping malformed exception entry: {s:?}"),
        }
    }

    fn add_ga(&mut self, s: &str) {
        if s.matches(':').count() == 1 {
            self.allowed_ga.insert(s.to_string());
        } else {
            debug!("skipping malformed ga entry: {s:?}");
        }
    }

    fn add_gav(&mut self, s: &str) {
        if s.matches(':').count() == 2 {
            self.allowed_gav.insert(s.to_string());
        } else {
            debug!("skipping malformed gav entry: {s:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn coord() -> Coordinate {
        Coordinate::new("com.acme", "widget", "1.2.3")
    }

    #[test]
    fn flat_list_shape() {
        let value = json!(["com.acme:widget", "org.other:thing:2.0"]);
        let set = ExceptionSet::from_value(&value, today());
        assert!(set.is_excepted(&coord()));
        assert!(set.is_excepted(&Coordinate::new("org.other", "thing", "2.0")));
        assert!(!set.is_excepted(&Coordinate::new("org.other", "thing", "2.1")));
    }

    #[test]
    fn allowed_ga_gav_fields_shape() {
        let value = json!({
            "allowedGa": ["com.acme:widget"],
            "allowedGav": ["org.other:thing:2.0"],
        });
        let set = ExceptionSet::from_value(&value, today());
        assert_eq!(set.len(), 2);
        assert!(set.is_excepted(&coord()));
    }

    #[test]
    fn ga_exception_covers_every_version() {
        let value = json!(["com.acme:widget"]);
        let set = ExceptionSet::from_value(&value, today());
        assert!(set.is_excepted(&Coordinate::new("com.acme", "widget", "0.1")));
        assert!(set.is_excepted(&Coordinate::new("com.acme", "widget", "99.0")));
    }

    #[test]
    fn allowed_objects_with_until() {
        let value = json!({
            "allowed": [
                { "ga": "com.acme:widget", "until": "2026-08-05" },
                { "gav": "org.other:thing:2.0", "until": "2026-08-06" },
            ]
        });
        let set = ExceptionSet::from_value(&value, today());
        // Strictly-before-today grants expire; on-or-after grants hold.
        assert!(!set.is_excepted(&coord()));
        assert!(set.is_excepted(&Coordinate::new("org.other", "thing", "2.0")));
    }

    #[test]
    fn unparsable_until_is_non_expiring() {
        let value = json!({
            "allowed": [{ "ga": "com.acme:widget", "until": "soonish" }]
        });
        let set = ExceptionSet::from_value(&value, today());
        assert!(set.is_excepted(&coord()));
    }

    #[test]
    fn malformed_items_are_skipped_not_fatal() {
        let value = json!({
            "allowed": [
                42,
                "not-a-coordinate",
                "a:b:c:d",
                { "ga": "too:many:colons" },
                "com.acme:widget",
            ]
        });
        let set = ExceptionSet::from_value(&value, today());
        assert_eq!(set.len(), 1);
        assert!(set.is_excepted(&coord()));
    }

    #[test]
    fn missing_document_is_empty() {
        let set = ExceptionSet::load(Path::new("/nonexistent/exceptions.json"), today());
        assert!(set.is_empty());
    }

    #[test]
    fn corrupt_document_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("exceptions.json");
        std::fs::write(&path, "{ not json").unwrap();
        let set = ExceptionSet::load(&path, today());
        assert!(set.is_empty());
    }
}
