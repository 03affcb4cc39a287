//! **Dependency age policy audit and vendoring for Maven projects.**
//!
//! `dep-age-audit` enforces a freshness policy over a project's third-party
//! build dependencies: every external artifact must have been released
//! within a configurable age window, unless explicitly excepted or already
//! vendored into a local, file-based Maven repository that allows fully
//! offline builds.
//!
//! One audit run:
//!
//! 1. asks the build tool ([`build_tool`]) to regenerate its dependency
//!    listing, then parses it into a coordinate set ([`parsers`]);
//! 2. loads exception grants ([`policy`]) and skips covered coordinates;
//! 3. resolves each remaining coordinate's release date from Maven Central
//!    through a persistent timestamp cache ([`registry`]);
//! 4. checks violators against, and optionally copies them into, the vendor
//!    store ([`vendor`]);
//! 5. renders a categorized report with a deterministic exit status
//!    ([`audit`]).
//!
//! The library powers the `dep-age-audit` binary; the [`Auditor`] is generic
//! over the [`BuildTool`] adapter and the [`ReleaseDateSource`] so both can
//! be substituted in tests.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // # Errors / # Panics doc sections are filled in where they earn their keep
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod audit;
pub mod build_tool;
pub mod cli;
pub mod error;
pub mod model;
pub mod parsers;
pub mod policy;
pub mod registry;
pub mod vendor;

// Re-export main types for convenience
pub use audit::{exit_codes, AuditConfig, AuditReport, Auditor};
pub use build_tool::{BuildTool, MavenCli};
pub use error::{AuditError, Result};
pub use model::{AuditOutcome, Coordinate, ViolationDetail};
pub use policy::ExceptionSet;
pub use registry::{RegistryClient, RegistryConfig, ReleaseDateSource, TimestampCache};
pub use vendor::VendorStore;
