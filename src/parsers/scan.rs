//! Project-tree scan for dependency listing files.
//!
//! Maven modules each write their listing to `target/<name>`; the scan picks
//! up every file with the configured name whose parent directory is `target`
//! and ignores same-named files elsewhere (checked-in fixtures, docs).
//! Unreadable files or directories are skipped rather than aborting the run.

use crate::model::Coordinate;
use crate::parsers::listing::parse_line;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Maven's canonical build-output directory name.
const BUILD_OUTPUT_DIR: &str = "target";

/// Collect the deduplicated coordinate set from every listing file under `root`.
#[must_use]
pub fn collect_dependencies(root: &Path, listing_name: &str) -> BTreeSet<Coordinate> {
    let mut deps = BTreeSet::new();
    for path in find_listing_files(root, listing_name) {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                debug!("skipping unreadable listing {}: {err}", path.display());
                continue;
            }
        };
        for line in content.lines() {
            if let Some(coord) = parse_line(line) {
                deps.insert(coord);
            }
        }
    }
    deps
}

/// Delete listing files left behind by prior runs.
///
/// Stale input is strictly worse than extra work; per-file delete failures
/// are ignored so one locked file cannot block regeneration.
pub fn remove_stale_listings(root: &Path, listing_name: &str) {
    for path in find_listing_files(root, listing_name) {
        if let Err(err) = fs::remove_file(&path) {
            debug!("could not remove stale listing {}: {err}", path.display());
        }
    }
}

/// Find every file named `listing_name` whose parent directory is `target`.
fn find_listing_files(root: &Path, listing_name: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, &mut |path| {
        let in_build_output =
            path.parent().and_then(Path::file_name) == Some(OsStr::new(BUILD_OUTPUT_DIR));
        if in_build_output && path.file_name() == Some(OsStr::new(listing_name)) {
            found.push(path.to_path_buf());
        }
    });
    found.sort();
    found
}

fn walk(dir: &Path, visit: &mut impl FnMut(&Path)) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("skipping unreadable directory {}: {err}", dir.display());
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, visit);
        } else {
            visit(&path);
        }
    }
}
