use std::ffi::{OsStr, OsString};

/// The flag this tool consumes. Everything else goes to `jsr publish`.
pub(crate) const PACKAGE_PATH_FLAG: &str = "--package-path";

/// A raw command line split into this tool's own arguments and the arguments
/// for the publish tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// Program name followed by every `--package-path` occurrence, for clap.
    pub own: Vec<OsString>,
    /// Everything else, untouched and in original order.
    pub passthrough: Vec<OsString>,
}

impl CommandLine {
    /// The passthrough arguments as strings, or the first one that is not
    /// valid UTF-8.
    pub fn passthrough_strings(&self) -> Result<Vec<String>, OsString> {
        self.passthrough
            .iter()
            .map(|arg| arg.clone().into_string())
            .collect()
    }
}

/// Pull every `--package-path <dir>` (or `--package-path=<dir>`) out of the
/// command line, wherever it appears.
///
/// Nothing else is interpreted: `--help`, `--version` and `--` are ordinary
/// passthrough arguments.
pub(crate) fn split_package_path<I>(args: I) -> CommandLine
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut line = CommandLine {
        own: args.next().into_iter().collect(),
        passthrough: Vec::new(),
    };

    while let Some(arg) = args.next() {
        if arg == PACKAGE_PATH_FLAG {
            line.own.push(arg);
            // Missing value is left for clap to report.
            line.own.extend(args.next());
        } else if is_package_path_with_value(&arg) {
            line.own.push(arg);
        } else {
            line.passthrough.push(arg);
        }
    }

    line
}

fn is_package_path_with_value(arg: &OsStr) -> bool {
    arg.to_str()
        .and_then(|arg| arg.strip_prefix(PACKAGE_PATH_FLAG))
        .is_some_and(|tail| tail.starts_with('='))
}
