/// Answers whether a program can be run from this host.
pub trait ToolProbe {
    fn is_installed(&self, program: &str) -> bool;
}

/// Looks the program up on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathProbe;

impl ToolProbe for PathProbe {
    fn is_installed(&self, program: &str) -> bool {
        match which::which(program) {
            Ok(path) => {
                tracing::debug!(program, path = %path.display(), "found on PATH");
                true
            }
            Err(e) => {
                tracing::debug!(program, error = %e, "not found on PATH");
                false
            }
        }
    }
}

/// A probe with a preset answer for every program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedToolProbe(pub bool);

impl ToolProbe for FixedToolProbe {
    fn is_installed(&self, _program: &str) -> bool {
        self.0
    }
}
