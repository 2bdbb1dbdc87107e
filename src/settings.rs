use std::ffi::OsString;
use std::path::PathBuf;

use crate::deploy::{DeploymentChecker, FixedDeploymentStatus, IsItDeployed};
use crate::publish::{FixedToolProbe, PathProbe, ToolProbe};

/// Path to the JSON file decaf writes the deploy step input to.
pub const DATA_FILE_PATH: &str = "DATA_FILE_PATH";
/// `"true"`/`"false"` replaces the is-it-deployed check.
pub const DID_ALREADY_DEPLOY: &str = "DECAF_SCRIPT_JSR_DID_ALREADY_DEPLOY";
/// `"true"`/`"false"` replaces the lookup of `deno` on `PATH`.
pub const IS_DENO_INSTALLED: &str = "DECAF_SCRIPT_JSR_IS_DENO_INSTALLED";

/// Environment-derived configuration for one run, read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub data_file_path: Option<PathBuf>,
    pub did_already_deploy: Option<bool>,
    pub is_deno_installed: Option<bool>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let flag = |key: &str| {
            lookup(key)
                .as_deref()
                .and_then(|value| value.to_str())
                .and_then(parse_override)
        };
        Settings {
            data_file_path: lookup(DATA_FILE_PATH)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            did_already_deploy: flag(DID_ALREADY_DEPLOY),
            is_deno_installed: flag(IS_DENO_INSTALLED),
        }
    }

    /// The deployment checker for this run: a fixed answer when overridden,
    /// `npx is-it-deployed` otherwise.
    pub fn deployment_checker(&self) -> Box<dyn DeploymentChecker> {
        match self.did_already_deploy {
            Some(deployed) => {
                tracing::debug!(deployed, "using {DID_ALREADY_DEPLOY} override");
                Box::new(FixedDeploymentStatus(deployed))
            }
            None => Box::new(IsItDeployed::new()),
        }
    }

    /// The tool probe for this run: a fixed answer when overridden, a `PATH`
    /// lookup otherwise.
    pub fn tool_probe(&self) -> Box<dyn ToolProbe> {
        match self.is_deno_installed {
            Some(installed) => {
                tracing::debug!(installed, "using {IS_DENO_INSTALLED} override");
                Box::new(FixedToolProbe(installed))
            }
            None => Box::new(PathProbe),
        }
    }
}

/// Parse an override variable. Only the exact strings `true` and `false` count.
///
/// # Examples
///
/// ```
/// use decaf_script_jsr::settings::parse_override;
///
/// assert_eq!(parse_override("true"), Some(true));
/// assert_eq!(parse_override("false"), Some(false));
/// assert_eq!(parse_override("TRUE"), None);
/// ```
pub fn parse_override(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
