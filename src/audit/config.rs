//! Audit run configuration.

use std::path::PathBuf;

/// Default Maven command name.
pub const DEFAULT_BUILD_COMMAND: &str = "mvn";
/// Default maximum dependency age in years.
pub const DEFAULT_MAX_AGE_YEARS: u32 = 3;
/// File name the build tool writes its dependency listing to (under each
/// module's `target/` directory).
pub const DEFAULT_LISTING_NAME: &str = "deps-age-audit.txt";
/// Default vendor repository path, relative to the project root.
pub const DEFAULT_VENDOR_REPO: &str = "thirdparty-repo";
/// Default exceptions document path, relative to the project root.
pub const DEFAULT_EXCEPTIONS_PATH: &str = "deps-metadata/age-exceptions.json";
/// Default timestamp cache path, relative to the project root.
pub const DEFAULT_CACHE_PATH: &str = "target/maven-central-timestamps.json";

/// Immutable parameters for one audit run.
///
/// Supplied once at start (from CLI flags) and never mutated.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Root of the project tree to audit
    pub project_root: PathBuf,
    /// Build-tool command name (e.g. `mvn`)
    pub build_command: String,
    /// Maximum dependency age in years
    pub max_age_years: u32,
    /// Audit the full transitive closure instead of direct dependencies only
    pub include_transitive: bool,
    /// Auto-copy violating artifacts from the local repository into the
    /// vendor store
    pub vendor: bool,
    /// Group prefix identifying in-house artifacts, which are never audited.
    /// `None` disables the filter (an empty prefix would match everything).
    pub skip_group_prefix: Option<String>,
    /// Vendor repository root
    pub vendor_repo: PathBuf,
    /// Exceptions document path
    pub exceptions_path: PathBuf,
    /// Timestamp cache path
    pub cache_path: PathBuf,
    /// Dependency listing file name under each module's build-output directory
    pub listing_name: String,
}

impl AuditConfig {
    /// Configuration with all defaults, rooted at `project_root`.
    ///
    /// Relative store/document paths are resolved against the root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            build_command: DEFAULT_BUILD_COMMAND.to_string(),
            max_age_years: DEFAULT_MAX_AGE_YEARS,
            include_transitive: false,
            vendor: false,
            skip_group_prefix: None,
            vendor_repo: project_root.join(DEFAULT_VENDOR_REPO),
            exceptions_path: project_root.join(DEFAULT_EXCEPTIONS_PATH),
            cache_path: project_root.join(DEFAULT_CACHE_PATH),
            listing_name: DEFAULT_LISTING_NAME.to_string(),
            project_root,
        }
    }

    /// The inclusive age limit in days (`years * 365`; leap days ignored).
    #[must_use]
    pub fn max_age_days(&self) -> i64 {
        i64::from(self.max_age_years) * 365
    }

    /// Listing output path relative to a module root, as handed to the build
    /// tool (`target/<listing_name>`).
    #[must_use]
    pub fn listing_output_rel(&self) -> String {
        format!("target/{}", self.listing_name)
    }
}
