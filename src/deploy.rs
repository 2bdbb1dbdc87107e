use std::path::Path;

use crate::process::ProcessBuilder;

/// Answers whether a version of a package is already published to jsr.
pub trait DeploymentChecker {
    /// Returns `true` when `version` of `package` is already on the registry.
    ///
    /// Never fails: anything that prevents a definite answer counts as
    /// "not deployed", so the publish step still runs and reports the real
    /// problem.
    fn is_deployed(&self, package: &str, version: &str, cwd: &Path) -> bool;
}

/// Asks the `is-it-deployed` npm package, run through `npx`.
///
/// Runs `npx is-it-deployed --package-manager jsr --package-name <name>
/// --package-version <version>`. Exit code 0 means deployed. Output is not
/// parsed.
#[derive(Debug, Clone)]
pub struct IsItDeployed {
    runner: String,
}

impl IsItDeployed {
    pub fn new() -> Self {
        Self::with_runner("npx")
    }

    /// Use a different package runner in place of `npx`.
    fn with_runner(runner: impl Into<String>) -> Self {
        Self {
            runner: runner.into(),
        }
    }

    fn command(&self, package: &str, version: &str, cwd: &Path) -> ProcessBuilder {
        ProcessBuilder::new(self.runner.as_str())
            .args(["is-it-deployed", "--package-manager", "jsr"])
            .args(["--package-name", package])
            .args(["--package-version", version])
            .cwd(cwd)
    }
}

impl Default for IsItDeployed {
    fn default() -> Self {
        Self::new()
    }
}

impl DeploymentChecker for IsItDeployed {
    fn is_deployed(&self, package: &str, version: &str, cwd: &Path) -> bool {
        match self.command(package, version, cwd).status() {
            Ok(status) => {
                tracing::debug!(code = ?status.code(), "is-it-deployed finished");
                status.success()
            }
            Err(e) => {
                tracing::warn!(
                    runner = %self.runner,
                    error = %e,
                    "could not run is-it-deployed, assuming {package}@{version} is not deployed"
                );
                false
            }
        }
    }
}

/// A checker with a preset answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDeploymentStatus(pub bool);

impl DeploymentChecker for FixedDeploymentStatus {
    fn is_deployed(&self, _package: &str, _version: &str, _cwd: &Path) -> bool {
        self.0
    }
}
