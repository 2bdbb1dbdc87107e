use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

/// Builder for an external process that streams straight to the terminal.
///
/// stdin, stdout and stderr are inherited from this process, so whatever the
/// child prints ends up in the deploy log as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProcessBuilder {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new builder for the given program.
    pub(crate) fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub(crate) fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub(crate) fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the child process.
    pub(crate) fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Run the process to completion and return its exit status.
    ///
    /// Blocks until the child exits. There is no timeout.
    pub(crate) fn status(&self) -> std::io::Result<ExitStatus> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
        tracing::debug!(command = %self, cwd = ?self.cwd, "spawning process");
        cmd.status()
    }
}

/// Renders the command line as a user would type it, e.g. `deno publish --dry-run`.
///
/// Arguments containing whitespace or quotes are single-quoted.
impl fmt::Display for ProcessBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(word: &str) -> String {
    if !word.is_empty() && !word.contains(|c: char| c.is_whitespace() || c == '\'' || c == '"') {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}
