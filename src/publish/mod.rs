mod args;
mod probe;

use std::path::Path;

use crate::process::ProcessBuilder;

pub use args::PublishArgs;
pub use probe::{FixedToolProbe, PathProbe, ToolProbe};

/// The native publishing tool, preferred when installed.
pub const NATIVE_TOOL: &str = "deno";
/// Package runner used when the native tool is missing.
pub const FALLBACK_RUNNER: &str = "npx";
/// npm package that publishes to jsr, run through [`FALLBACK_RUNNER`].
pub const REGISTRY_PACKAGE: &str = "jsr";

/// Errors from running the publish tool.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum PublishError {
    #[error("failed to run `{program}`")]
    #[diagnostic(help("install deno, or node so that `npx jsr` is available"))]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed ({})", describe_code(.code))]
    Failed { command: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// A fully resolved publish invocation: which program, with which arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCommand {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl PublishCommand {
    /// Pick `deno publish ...` when deno is installed, `npx jsr publish ...` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use decaf_script_jsr::publish::{FixedToolProbe, PublishArgs, PublishCommand};
    ///
    /// let args = PublishArgs::new("1.0.0", &[], false);
    /// let command = PublishCommand::select(args, &FixedToolProbe(false));
    /// assert_eq!(command.program, "npx");
    /// assert_eq!(command.args, ["jsr", "publish", "--set-version", "1.0.0"]);
    /// ```
    pub fn select(args: PublishArgs, probe: &dyn ToolProbe) -> Self {
        if probe.is_installed(NATIVE_TOOL) {
            PublishCommand {
                program: NATIVE_TOOL,
                args: args.into_vec(),
            }
        } else {
            tracing::debug!("{NATIVE_TOOL} not installed, falling back to {FALLBACK_RUNNER}");
            let mut args = args.into_vec();
            args.insert(0, REGISTRY_PACKAGE.to_string());
            PublishCommand {
                program: FALLBACK_RUNNER,
                args,
            }
        }
    }

    fn process(&self, cwd: &Path) -> ProcessBuilder {
        ProcessBuilder::new(self.program)
            .args(&self.args)
            .cwd(cwd)
    }

    /// Echo the command to stderr as `> program args...`, then run it in `cwd`.
    ///
    /// Output streams straight through. A non-zero exit is an error.
    pub fn run(&self, cwd: &Path) -> Result<(), PublishError> {
        let process = self.process(cwd);
        eprintln!("> {process}");
        let status = process.status().map_err(|source| PublishError::SpawnError {
            program: self.program.to_string(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(PublishError::Failed {
                command: process.to_string(),
                code: status.code(),
            })
        }
    }
}
