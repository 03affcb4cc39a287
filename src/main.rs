//! dep-age-audit: dependency age policy audit and vendoring tool
//!
//! Checks a Maven project's third-party dependencies against a maximum-age
//! policy and optionally vendors violators into a file-based repository.

use anyhow::Result;
use clap::Parser;
use dep_age_audit::audit::{
    AuditConfig, DEFAULT_BUILD_COMMAND, DEFAULT_CACHE_PATH, DEFAULT_EXCEPTIONS_PATH,
    DEFAULT_MAX_AGE_YEARS, DEFAULT_VENDOR_REPO,
};
use dep_age_audit::cli;
use dep_age_audit::registry::{RegistryConfig, MAVEN_CENTRAL_URL};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dep-age-audit")]
#[command(version)]
#[command(about = "Check and vendor dependencies against a maximum-age policy", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Policy satisfied
    2  One or more unvendored violations
    3  No violations, but unresolved release dates remain
    *  A failed build-tool invocation exits with that tool's own code

EXAMPLES:
    # Audit direct dependencies against the default 3-year window
    dep-age-audit

    # Audit the full transitive closure
    dep-age-audit --include-transitive

    # Auto-vendor violating artifacts from the local ~/.m2 cache
    dep-age-audit --vendor")]
struct Cli {
    /// Root of the Maven project tree to audit
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Build tool command
    #[arg(long = "mvn", value_name = "COMMAND", default_value = DEFAULT_BUILD_COMMAND)]
    build_command: String,

    /// Maximum dependency age in years
    #[arg(long, default_value_t = DEFAULT_MAX_AGE_YEARS)]
    max_age_years: u32,

    /// Check transitive dependencies too (default: direct dependencies only)
    #[arg(long)]
    include_transitive: bool,

    /// Vendor repo path (relative paths resolve against the project root)
    #[arg(long, default_value = DEFAULT_VENDOR_REPO)]
    vendor_repo: PathBuf,

    /// Exceptions file
    #[arg(long, default_value = DEFAULT_EXCEPTIONS_PATH)]
    exceptions: PathBuf,

    /// Release timestamp cache path
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    cache: PathBuf,

    /// Skip dependencies whose groupId starts with this in-house prefix
    #[arg(long, value_name = "PREFIX")]
    skip_group_prefix: Option<String>,

    /// Auto-vendor violating dependencies from the local repository into the
    /// vendor repo
    #[arg(long)]
    vendor: bool,

    /// Registry base URL queried for release dates
    #[arg(long, env = "DEP_AGE_AUDIT_REGISTRY", default_value = MAVEN_CENTRAL_URL)]
    registry: String,

    /// Registry request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let project_root = args.project_root;
    let config = AuditConfig {
        build_command: args.build_command,
        max_age_years: args.max_age_years,
        include_transitive: args.include_transitive,
        vendor: args.vendor,
        skip_group_prefix: args.skip_group_prefix,
        vendor_repo: resolve_against(&project_root, args.vendor_repo),
        exceptions_path: resolve_against(&project_root, args.exceptions),
        cache_path: resolve_against(&project_root, args.cache),
        ..AuditConfig::new(project_root)
    };
    let registry = RegistryConfig {
        base_url: args.registry.trim_end_matches('/').to_string(),
        timeout: Duration::from_secs(args.timeout_secs),
        ..RegistryConfig::default()
    };

    let exit_code = cli::run_audit(config, registry)?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// Resolve a possibly-relative flag path against the project root.
fn resolve_against(root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
