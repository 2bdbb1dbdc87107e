use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{ConfigError, ConfigFile, PackageConfig};
use crate::deploy::DeploymentChecker;
use crate::protocol::{DeployInput, InputError};
use crate::publish::{PublishArgs, PublishCommand, PublishError, ToolProbe};
use crate::settings::DATA_FILE_PATH;

/// What one deploy step run was asked to do.
#[derive(Debug, Clone)]
pub struct DeployRequest<'a> {
    /// Directory holding the package config. Relative paths resolve against
    /// the current directory.
    pub package_path: &'a Path,
    /// Arguments forwarded to `jsr publish`.
    pub publish_args: &'a [String],
    /// Location of decaf's deploy step input, `None` when not provided.
    pub data_file_path: Option<&'a Path>,
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The version was already on jsr; nothing was published.
    AlreadyDeployed,
    /// The publish tool ran and succeeded.
    Published { test_mode: bool },
}

/// Anything that ends a run unsuccessfully.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DeployError {
    #[error("cannot resolve package path {}", .path.display())]
    #[diagnostic(help("pass an existing directory with --package-path"))]
    PackagePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Publish(#[from] PublishError),
}

/// Run the deploy step and turn the result into a process exit code.
///
/// Progress goes to stdout. A missing config file is reported as a single
/// line on stdout; every other failure is rendered by miette on stderr. Any
/// failure exits 1, including a publish tool that exited with another code.
pub fn run(
    request: &DeployRequest<'_>,
    checker: &dyn DeploymentChecker,
    probe: &dyn ToolProbe,
) -> ExitCode {
    match execute(request, checker, probe) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "deploy step finished");
            ExitCode::SUCCESS
        }
        Err(DeployError::Config(e @ ConfigError::NotFound(_))) => {
            println!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            ExitCode::FAILURE
        }
    }
}

/// Locate the config, read decaf's input, skip if already deployed, otherwise publish.
pub(crate) fn execute(
    request: &DeployRequest<'_>,
    checker: &dyn DeploymentChecker,
    probe: &dyn ToolProbe,
) -> Result<Outcome, DeployError> {
    let package_dir =
        std::fs::canonicalize(request.package_path).map_err(|source| DeployError::PackagePath {
            path: request.package_path.to_path_buf(),
            source,
        })?;

    let config_file = ConfigFile::locate(&package_dir)
        .ok_or_else(|| ConfigError::NotFound(package_dir.clone()))?;
    tracing::debug!(
        file = config_file.file_name(),
        dir = %package_dir.display(),
        "found config file"
    );

    let input = load_input(request.data_file_path)?;

    println!("Time to deploy to jsr!");
    println!();

    let config = PackageConfig::load(&package_dir.join(config_file.file_name()))?;
    let name = config.name.as_str();
    let version = input.next_version_name.as_str();

    println!("Checking if version {version} of {name} is already deployed...");
    if checker.is_deployed(name, version, &package_dir) {
        println!("✓ Version {version} of {name} is already deployed to jsr");
        println!(
            "Therefore, I'm going to skip publishing to jsr right now. Deploying to jsr complete!"
        );
        return Ok(Outcome::AlreadyDeployed);
    }
    println!("✓ Version {version} has not yet been deployed to jsr. Proceeding to publish...");

    println!("Publishing to jsr...");
    let args = PublishArgs::new(version, request.publish_args, input.test_mode);
    let command = PublishCommand::select(args, probe);
    command.run(&package_dir)?;

    println!("✓ Successfully published {name}@{version} to jsr!");
    if input.test_mode {
        println!("Note: You were in test mode, so no real publishing occurred. 😉");
    }
    Ok(Outcome::Published {
        test_mode: input.test_mode,
    })
}

fn load_input(path: Option<&Path>) -> Result<DeployInput, InputError> {
    let path = path.ok_or(InputError::PathNotSet(DATA_FILE_PATH))?;
    DeployInput::load(path)
}
