//! Maven CLI implementation of the build-tool adapter.

use crate::build_tool::BuildTool;
use crate::error::{AuditError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Shells out to the `mvn` command.
#[derive(Debug, Clone)]
pub struct MavenCli {
    command: String,
}

impl MavenCli {
    /// Use `command` as the Maven executable (usually just `mvn`).
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Build a `Command` for the Maven executable plus `args`.
    ///
    /// Maven is commonly installed as `mvn.cmd` on Windows and
    /// `CreateProcess` cannot execute `.cmd` files directly, so non-`.exe`
    /// commands are wrapped in `cmd.exe /c` there.
    fn command(&self, args: &[&str]) -> Command {
        #[cfg(windows)]
        {
            if !self.command.to_lowercase().ends_with(".exe") {
                let mut cmd = Command::new("cmd.exe");
                cmd.arg("/c").arg(&self.command).args(args);
                return cmd;
            }
        }
        let mut cmd = Command::new(&self.command);
        cmd.args(args);
        cmd
    }
}

impl BuildTool for MavenCli {
    fn regenerate_listing(
        &self,
        project_root: &Path,
        output_rel: &str,
        include_transitive: bool,
    ) -> Result<()> {
        let exclude_transitive = if include_transitive { "false" } else { "true" };
        let output_arg = format!("-DoutputFile={output_rel}");
        let exclude_arg = format!("-DexcludeTransitive={exclude_transitive}");
        let args = [
            "-q",
            "-DskipTests",
            "-Dstyle.color=never",
            "package",
            "dependency:list",
            "-DincludeScope=runtime",
            exclude_arg.as_str(),
            "-DexcludeReactor=false",
            output_arg.as_str(),
        ];
        info!("regenerating dependency listing via {}", self.command);
        debug!("{} {}", self.command, args.join(" "));

        // Output streams stay inherited so build failures are obvious.
        let status = self
            .command(&args)
            .current_dir(project_root)
            .status()
            .map_err(|err| {
                AuditError::config(format!("cannot invoke {}: {err}", self.command))
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(AuditError::BuildTool {
                code: status.code().unwrap_or(1),
            })
        }
    }

    fn local_repository(&self, project_root: &Path) -> Result<PathBuf> {
        let args = [
            "-q",
            "help:evaluate",
            "-Dexpression=settings.localRepository",
            "-DforceStdout",
        ];
        debug!("querying local repository via {}", self.command);
        let output = self
            .command(&args)
            .current_dir(project_root)
            .output()
            .map_err(|err| AuditError::LocalRepository(err.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            return Err(AuditError::LocalRepository(if message.is_empty() {
                format!("help:evaluate exited with {}", output.status)
            } else {
                message.to_string()
            }));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout.trim();
        if path.is_empty() {
            return Err(AuditError::LocalRepository(
                "help:evaluate produced no output".to_string(),
            ));
        }
        Ok(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonexistent_command_is_a_config_error() {
        let maven = MavenCli::new("definitely-not-a-real-mvn-binary");
        let err = maven
            .regenerate_listing(Path::new("."), "target/deps.txt", false)
            .unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
    }

    #[test]
    fn nonexistent_command_fails_local_repository_lookup() {
        let maven = MavenCli::new("definitely-not-a-real-mvn-binary");
        let err = maven.local_repository(Path::new(".")).unwrap_err();
        assert!(matches!(err, AuditError::LocalRepository(_)));
    }
}
