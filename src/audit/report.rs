//! Audit report accumulation and rendering.

use crate::model::{AuditOutcome, Coordinate, ViolationDetail};
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::path::Path;

/// Exit codes for CI integration.
pub mod exit_codes {
    /// No violations and no unknown release dates.
    pub const SUCCESS: i32 = 0;
    /// One or more unvendored violations.
    pub const VIOLATIONS: i32 = 2;
    /// No violations, but at least one release date could not be resolved.
    /// Unknowns are provisional failures until excepted or vendored.
    pub const UNKNOWN_RELEASE_DATES: i32 = 3;
}

/// A coordinate satisfied via the vendor store.
#[derive(Debug, Clone)]
pub struct VendoredEntry {
    pub gav: String,
    /// Copied this run, as opposed to found already present.
    pub fresh_copy: bool,
}

/// A coordinate older than policy and not vendored.
#[derive(Debug, Clone)]
pub struct ViolationEntry {
    pub gav: String,
    pub release_date: NaiveDate,
    pub age_days: i64,
    pub detail: ViolationDetail,
}

/// Aggregated outcome of one audit run.
#[derive(Debug, Default)]
pub struct AuditReport {
    /// Third-party coordinates audited (after the in-house filter)
    pub checked: usize,
    pub max_age_years: u32,
    pub max_age_days: i64,
    pub include_transitive: bool,
    pub vendored: Vec<VendoredEntry>,
    pub unknown: Vec<String>,
    pub violations: Vec<ViolationEntry>,
}

impl AuditReport {
    /// Fold one coordinate's outcome into the report buckets.
    ///
    /// Passing and excepted coordinates count toward `checked` but produce
    /// no itemized entry.
    pub fn record(&mut self, coord: &Coordinate, outcome: AuditOutcome) {
        match outcome {
            AuditOutcome::Excepted | AuditOutcome::Pass { .. } => {}
            AuditOutcome::VendoredAlready => self.vendored.push(VendoredEntry {
                gav: coord.gav(),
                fresh_copy: false,
            }),
            AuditOutcome::VendoredNow => self.vendored.push(VendoredEntry {
                gav: coord.gav(),
                fresh_copy: true,
            }),
            AuditOutcome::Unknown => self.unknown.push(coord.gav()),
            AuditOutcome::Violation {
                release_date,
                age_days,
                detail,
            } => self.violations.push(ViolationEntry {
                gav: coord.gav(),
                release_date,
                age_days,
                detail,
            }),
        }
    }

    /// Deterministic process exit status for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if !self.violations.is_empty() {
            exit_codes::VIOLATIONS
        } else if !self.unknown.is_empty() {
            exit_codes::UNKNOWN_RELEASE_DATES
        } else {
            exit_codes::SUCCESS
        }
    }

    /// Render the human-readable report.
    ///
    /// Paths in violation entries are shown relative to `project_root` where
    /// possible. The final line always states the exit condition.
    #[must_use]
    pub fn render(&self, project_root: &Path) -> String {
        let mut out = String::new();

        if self.checked == 0 {
            out.push_str("No third-party dependencies found to check.\n");
            return out;
        }

        out.push('\n');
        let _ = writeln!(out, "Checked third-party deps: {}", self.checked);
        let _ = writeln!(
            out,
            "Max age: {} years ({} days)",
            self.max_age_years, self.max_age_days
        );
        if self.include_transitive {
            out.push_str("Mode: transitive (full closure)\n");
        } else {
            out.push_str("Mode: direct (excludeTransitive=true)\n");
        }

        if !self.vendored.is_empty() {
            out.push_str("\nVendored:\n");
            for entry in &self.vendored {
                let tag = if entry.fresh_copy {
                    "auto-vendored"
                } else {
                    "vendored"
                };
                let _ = writeln!(out, "- {} ({tag})", entry.gav);
            }
        }

        if !self.unknown.is_empty() {
            out.push_str("\nUnknown on Maven Central (manual check required):\n");
            for gav in &self.unknown {
                let _ = writeln!(out, "- {gav}");
            }
        }

        if !self.violations.is_empty() {
            out.push_str("\nViolations (older than policy and not vendored):\n");
            for v in &self.violations {
                let _ = writeln!(out, "- {}", render_violation(v, project_root));
            }
            out.push_str(
                "\nTo vendor one, copy jar+pom into the vendor repo using the same Maven layout,\n\
                 or re-run with: --vendor\n",
            );
            return out;
        }

        if !self.unknown.is_empty() {
            out.push_str(
                "\nFailing due to unknown release dates. Add exceptions or vendor + record metadata.\n",
            );
            return out;
        }

        out.push_str("\nOK: dependency age policy satisfied.\n");
        out
    }
}

fn render_violation(v: &ViolationEntry, project_root: &Path) -> String {
    let prefix = format!(
        "{} released {} ({}d)",
        v.gav,
        v.release_date.format("%Y-%m-%d"),
        v.age_days
    );
    match &v.detail {
        ViolationDetail::MissingLocalArtifacts { jar, pom } => {
            format!(
                "{prefix} - NOT in local repo ({}/{})",
                jar.file_name().unwrap_or_default().to_string_lossy(),
                pom.file_name().unwrap_or_default().to_string_lossy()
            )
        }
        ViolationDetail::VendorEntryAbsent { jar } => {
            let shown = jar.strip_prefix(project_root).unwrap_or(jar);
            format!("{prefix} - vendor missing: {}", shown.display())
        }
    }
}
