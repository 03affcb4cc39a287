//! Per-coordinate audit outcomes.

use chrono::NaiveDate;
use std::path::PathBuf;

/// Result of auditing a single coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    /// Covered by a `group:artifact` or exact-version exception.
    Excepted,
    /// Release date within the configured window.
    Pass { age_days: i64 },
    /// Older than policy but already present in the vendor store.
    VendoredAlready,
    /// Older than policy and copied into the vendor store this run.
    VendoredNow,
    /// Release date could not be determined from the registry.
    Unknown,
    /// Older than policy and not vendored.
    Violation {
        release_date: NaiveDate,
        age_days: i64,
        detail: ViolationDetail,
    },
}

/// What exactly is missing for a violating coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationDetail {
    /// Vendoring was requested but the local repository lacks the sources.
    MissingLocalArtifacts { jar: PathBuf, pom: PathBuf },
    /// Vendoring was not requested; names the expected vendor destination.
    VendorEntryAbsent { jar: PathBuf },
}
