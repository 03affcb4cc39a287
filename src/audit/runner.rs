//! Audit orchestration.
//!
//! One run: regenerate the dependency listing, collect coordinates, then for
//! each coordinate not excepted resolve its release date and apply the age
//! policy, consulting the vendor store for violators. The timestamp cache is
//! an explicit value threaded through resolution and persisted exactly once
//! at run end, whatever the policy outcome.

use crate::audit::config::AuditConfig;
use crate::audit::report::AuditReport;
use crate::build_tool::BuildTool;
use crate::error::Result;
use crate::model::{AuditOutcome, Coordinate, ViolationDetail};
use crate::parsers::{collect_dependencies, remove_stale_listings};
use crate::policy::ExceptionSet;
use crate::registry::{resolve_timestamp, ReleaseDateSource, TimestampCache};
use crate::vendor::{artifact_paths, VendorStore};
use chrono::{DateTime, Local, NaiveDate};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Drives one full audit over a build tool and a release-date source.
pub struct Auditor<'a, B, S> {
    config: &'a AuditConfig,
    build_tool: &'a B,
    source: &'a S,
}

impl<'a, B: BuildTool, S: ReleaseDateSource> Auditor<'a, B, S> {
    pub fn new(config: &'a AuditConfig, build_tool: &'a B, source: &'a S) -> Self {
        Self {
            config,
            build_tool,
            source,
        }
    }

    /// Run the audit against today's date.
    pub fn run(&self) -> Result<AuditReport> {
        self.run_for_date(Local::now().date_naive())
    }

    /// Run the audit as of `today`.
    ///
    /// Taking the date explicitly keeps age arithmetic deterministic under
    /// test; [`run`](Self::run) is the production entry point.
    pub fn run_for_date(&self, today: NaiveDate) -> Result<AuditReport> {
        let root = &self.config.project_root;

        // Stale listings from prior runs are worse than the extra build time.
        remove_stale_listings(root, &self.config.listing_name);
        self.build_tool.regenerate_listing(
            root,
            &self.config.listing_output_rel(),
            self.config.include_transitive,
        )?;

        let deps = self.collect_third_party(root);
        if deps.is_empty() {
            info!("no third-party dependencies to check");
            return Ok(AuditReport::default());
        }

        let exceptions = ExceptionSet::load(&self.config.exceptions_path, today);
        debug!("loaded {} exception grants", exceptions.len());

        let mut cache = TimestampCache::load(&self.config.cache_path);
        let outcome = self.evaluate(&deps, &exceptions, &mut cache, today);

        // The cache is flushed whatever happened above; successful lookups
        // must never be repeated by the next run.
        if let Err(persist_err) = cache.persist(&self.config.cache_path) {
            if outcome.is_ok() {
                return Err(persist_err);
            }
            warn!("{persist_err}");
        }
        outcome
    }

    /// Collect listing coordinates, dropping in-house groups.
    fn collect_third_party(&self, root: &std::path::Path) -> BTreeSet<Coordinate> {
        let mut deps = collect_dependencies(root, &self.config.listing_name);
        if let Some(prefix) = &self.config.skip_group_prefix {
            deps.retain(|coord| !coord.group.starts_with(prefix.as_str()));
        }
        deps
    }

    fn evaluate(
        &self,
        deps: &BTreeSet<Coordinate>,
        exceptions: &ExceptionSet,
        cache: &mut TimestampCache,
        today: NaiveDate,
    ) -> Result<AuditReport> {
        let store = VendorStore::new(&self.config.vendor_repo);
        let mut report = AuditReport {
            checked: deps.len(),
            max_age_years: self.config.max_age_years,
            max_age_days: self.config.max_age_days(),
            include_transitive: self.config.include_transitive,
            ..AuditReport::default()
        };
        // Resolved on first vendoring attempt; only then is failure fatal.
        let mut local_repo: Option<PathBuf> = None;

        for coord in deps {
            let outcome =
                self.audit_coordinate(coord, exceptions, cache, &store, &mut local_repo, today)?;
            debug!("{}: {outcome:?}", coord.gav());
            report.record(coord, outcome);
        }

        info!(
            "audit complete: {} checked, {} vendored, {} unknown, {} violations",
            report.checked,
            report.vendored.len(),
            report.unknown.len(),
            report.violations.len()
        );
        Ok(report)
    }

    /// Classify one coordinate, vendoring it along the way when enabled.
    fn audit_coordinate(
        &self,
        coord: &Coordinate,
        exceptions: &ExceptionSet,
        cache: &mut TimestampCache,
        store: &VendorStore,
        local_repo: &mut Option<PathBuf>,
        today: NaiveDate,
    ) -> Result<AuditOutcome> {
        if exceptions.is_excepted(coord) {
            return Ok(AuditOutcome::Excepted);
        }

        let Some(ts) = resolve_timestamp(self.source, cache, coord) else {
            return Ok(AuditOutcome::Unknown);
        };
        let Some(release_date) = DateTime::from_timestamp_millis(ts).map(|dt| dt.date_naive())
        else {
            warn!("{}: cached timestamp {ts} out of range", coord.gav());
            return Ok(AuditOutcome::Unknown);
        };

        let age_days = (today - release_date).num_days();
        if age_days <= self.config.max_age_days() {
            return Ok(AuditOutcome::Pass { age_days });
        }

        if store.contains(coord) {
            return Ok(AuditOutcome::VendoredAlready);
        }

        if self.config.vendor {
            let repo = match local_repo {
                Some(repo) => repo,
                slot => slot.insert(self.build_tool.local_repository(&self.config.project_root)?),
            };
            let sources = artifact_paths(repo, coord);
            if !sources.both_exist() {
                return Ok(AuditOutcome::Violation {
                    release_date,
                    age_days,
                    detail: ViolationDetail::MissingLocalArtifacts {
                        jar: sources.jar,
                        pom: sources.pom,
                    },
                });
            }
            store.copy_in(coord, &sources)?;
            return Ok(AuditOutcome::VendoredNow);
        }

        Ok(AuditOutcome::Violation {
            release_date,
            age_days,
            detail: ViolationDetail::VendorEntryAbsent {
                jar: store.paths(coord).jar,
            },
        })
    }
}
