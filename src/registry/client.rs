//! Maven Central release-date client.
//!
//! Release times come from a HEAD request against the artifact's POM at its
//! canonical repository path: the `Last-Modified` header of the descriptor
//! is the publication time. This avoids depending on search-index freshness.

use crate::model::Coordinate;
use crate::registry::resolver::ReleaseDateSource;
use chrono::DateTime;
use std::time::Duration;
use tracing::debug;

/// Default Maven Central repository root.
pub const MAVEN_CENTRAL_URL: &str = "https://repo1.maven.org/maven2";

/// Registry client configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Repository base URL (no trailing slash)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Fixed delay after every request, to stay within the registry's
    /// acceptable request rate
    pub throttle: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: MAVEN_CENTRAL_URL.to_string(),
            timeout: Duration::from_secs(15),
            throttle: Duration::from_millis(50),
        }
    }
}

/// Blocking HTTP client for registry descriptor lookups.
pub struct RegistryClient {
    config: RegistryConfig,
    client: reqwest::blocking::Client,
}

impl RegistryClient {
    /// Create a client with the given configuration.
    ///
    /// # Errors
    /// Returns the underlying builder error if TLS setup fails.
    pub fn new(config: RegistryConfig) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("dep-age-audit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    /// Canonical URL of the coordinate's POM descriptor.
    #[must_use]
    pub fn descriptor_url(&self, coord: &Coordinate) -> String {
        format!(
            "{}/{}/{}/{}/{}-{}.pom",
            self.config.base_url,
            coord.group_path(),
            coord.artifact,
            coord.version,
            coord.artifact,
            coord.version
        )
    }
}

impl ReleaseDateSource for RegistryClient {
    /// Resolve the release time of `coord` in epoch milliseconds.
    ///
    /// Every failure mode (network error, non-success status, missing or
    /// unparsable `Last-Modified`) yields `None`; per-item lookup trouble
    /// never aborts the audit. The throttle delay applies regardless of
    /// outcome.
    fn release_timestamp_ms(&self, coord: &Coordinate) -> Option<i64> {
        let url = self.descriptor_url(coord);
        let timestamp = match self.client.head(&url).send() {
            Ok(resp) if resp.status().is_success() => resp
                .headers()
                .get(reqwest::header::LAST_MODIFIED)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| match DateTime::parse_from_rfc2822(value) {
                    Ok(date) => Some(date.timestamp_millis()),
                    Err(err) => {
                        debug!("{}: bad Last-Modified {value:?}: {err}", coord.gav());
                        None
                    }
                }),
            Ok(resp) => {
                debug!("{}: registry returned {}", coord.gav(), resp.status());
                None
            }
            Err(err) => {
                debug!("{}: registry request failed: {err}", coord.gav());
                None
            }
        };
        std::thread::sleep(self.config.throttle);
        timestamp
    }
}
