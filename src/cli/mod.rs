//! CLI command handler.
//!
//! The handler is invoked by main.rs and returns the desired process exit
//! code; the caller is responsible for `std::process::exit` when it is
//! non-zero. Keeping the logic here makes it testable without a spawned
//! process.

use crate::audit::{AuditConfig, Auditor};
use crate::build_tool::MavenCli;
use crate::error::AuditError;
use crate::registry::{RegistryClient, RegistryConfig};
use anyhow::{Context, Result};

/// Run one full audit, print the report and return the exit code.
///
/// A failed build-tool invocation is not an error at this layer: its exit
/// code is passed through verbatim, as the most informative status the run
/// can produce.
pub fn run_audit(config: AuditConfig, registry: RegistryConfig) -> Result<i32> {
    let build_tool = MavenCli::new(&config.build_command);
    let client = RegistryClient::new(registry).context("cannot build registry client")?;
    let auditor = Auditor::new(&config, &build_tool, &client);

    match auditor.run() {
        Ok(report) => {
            print!("{}", report.render(&config.project_root));
            Ok(report.exit_code())
        }
        Err(AuditError::BuildTool { code }) => {
            tracing::error!("build tool failed; propagating exit code {code}");
            Ok(code)
        }
        Err(err) => Err(err.into()),
    }
}
