//! External build-tool adapter.
//!
//! The audit never resolves the dependency graph itself; it asks the build
//! tool to regenerate its dependency listing and, when vendoring, for the
//! location of its local artifact cache. Both interactions sit behind this
//! trait so the orchestrator can be driven by a test double.

mod maven;

pub use maven::MavenCli;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// The two operations the audit needs from the external build tool.
pub trait BuildTool {
    /// Regenerate the dependency listing for every module, writing it to
    /// `output_rel` (relative to each module's build-output directory),
    /// scoped to runtime dependencies and to the direct or full-transitive
    /// closure per `include_transitive`.
    ///
    /// # Errors
    /// [`AuditError::BuildTool`](crate::AuditError::BuildTool) carrying the
    /// tool's exit code when the invocation fails.
    fn regenerate_listing(
        &self,
        project_root: &Path,
        output_rel: &str,
        include_transitive: bool,
    ) -> Result<()>;

    /// The build tool's machine-local artifact cache root (Maven's
    /// `~/.m2/repository` or an override from settings).
    ///
    /// # Errors
    /// [`AuditError::LocalRepository`](crate::AuditError::LocalRepository)
    /// when the location cannot be determined.
    fn local_repository(&self, project_root: &Path) -> Result<PathBuf>;
}
