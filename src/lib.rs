pub mod config;
pub mod deploy;
pub mod protocol;
pub mod publish;
pub mod settings;

pub(crate) mod cli;
pub(crate) mod process;

pub use cli::args::CommandLine;
pub use cli::deploy::{DeployError, DeployRequest, Outcome};

/// Split a raw command line into `--package-path` and everything else.
///
/// This is the binary's bridge into the argument handling in `cli`: clap
/// parses only [`CommandLine::own`], and [`CommandLine::passthrough`] goes to
/// `jsr publish` as given.
pub fn split_command_line<I>(args: I) -> CommandLine
where
    I: IntoIterator<Item = std::ffi::OsString>,
{
    cli::args::split_package_path(args)
}

/// Run the deploy step: locate the config, check jsr, publish if needed.
///
/// This is the binary entry point. `checker` and `probe` are chosen by the
/// caller, normally from [`settings::Settings`].
pub fn run_deploy(
    request: &DeployRequest<'_>,
    checker: &dyn deploy::DeploymentChecker,
    probe: &dyn publish::ToolProbe,
) -> std::process::ExitCode {
    cli::deploy::run(request, checker, probe)
}
