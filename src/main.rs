use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use decaf_script_jsr::settings::Settings;
use decaf_script_jsr::DeployRequest;
use tracing_subscriber::EnvFilter;

/// decaf deploy step that publishes a package to the JSR registry.
///
/// Only `--package-path` reaches this parser. Every other argument, including
/// `--help`, `--version` and `--`, is forwarded to `jsr publish`.
#[derive(Debug, Parser)]
#[command(name = "decaf-script-jsr", disable_help_flag = true)]
struct Cli {
    /// Directory containing jsr.json, deno.jsonc or deno.json
    #[arg(long, value_name = "DIR", allow_hyphen_values = true)]
    package_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let line = decaf_script_jsr::split_command_line(std::env::args_os());
    let publish_args = match line.passthrough_strings() {
        Ok(args) => args,
        Err(arg) => clap::Error::raw(
            ErrorKind::InvalidUtf8,
            format!("invalid UTF-8 in argument {:?}\n", arg),
        )
        .exit(),
    };
    let cli = Cli::parse_from(line.own);
    let settings = Settings::from_env();

    let checker = settings.deployment_checker();
    let probe = settings.tool_probe();
    let request = DeployRequest {
        package_path: cli.package_path.as_deref().unwrap_or(Path::new(".")),
        publish_args: &publish_args,
        data_file_path: settings.data_file_path.as_deref(),
    };

    decaf_script_jsr::run_deploy(&request, checker.as_ref(), probe.as_ref())
}
