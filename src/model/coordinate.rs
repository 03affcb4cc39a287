//! Maven artifact coordinates.
//!
//! A [`Coordinate`] is the universal key across the audit: it identifies a
//! third-party artifact by group, artifact and version (GAV). The derived
//! `group:artifact` (GA) form identifies an artifact across all its versions
//! and is what version-independent exceptions match against.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a third-party Maven artifact.
///
/// Equality is structural and ordering is lexicographic by group, then
/// artifact, then version, so a `BTreeSet<Coordinate>` iterates in the
/// deterministic order the audit report requires.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Group identifier, e.g. `org.slf4j`
    pub group: String,
    /// Artifact identifier, e.g. `slf4j-api`
    pub artifact: String,
    /// Version string, e.g. `2.0.17`
    pub version: String,
}

impl Coordinate {
    /// Create a coordinate from its three components.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// The version-independent `group:artifact` form.
    #[must_use]
    pub fn ga(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }

    /// The full `group:artifact:version` form.
    #[must_use]
    pub fn gav(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }

    /// Group components as repository path segments (`org.slf4j` → `org/slf4j`).
    #[must_use]
    pub fn group_path(&self) -> String {
        self.group.replace('.', "/")
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_forms() {
        let c = Coordinate::new("org.slf4j", "slf4j-api", "2.0.17");
        assert_eq!(c.ga(), "org.slf4j:slf4j-api");
        assert_eq!(c.gav(), "org.slf4j:slf4j-api:2.0.17");
        assert_eq!(c.group_path(), "org/slf4j");
        assert_eq!(c.to_string(), c.gav());
    }

    #[test]
    fn ordering_is_group_then_artifact_then_version() {
        let mut coords = vec![
            Coordinate::new("org.b", "x", "1"),
            Coordinate::new("org.a", "y", "2"),
            Coordinate::new("org.a", "x", "2"),
            Coordinate::new("org.a", "x", "1"),
        ];
        coords.sort();
        let gavs: Vec<String> = coords.iter().map(Coordinate::gav).collect();
        assert_eq!(gavs, vec!["org.a:x:1", "org.a:x:2", "org.a:y:2", "org.b:x:1"]);
    }

    #[test]
    fn set_semantics_deduplicate() {
        use std::collections::BTreeSet;
        let mut set = BTreeSet::new();
        set.insert(Coordinate::new("g", "a", "1"));
        set.insert(Coordinate::new("g", "a", "1"));
        assert_eq!(set.len(), 1);
    }
}
