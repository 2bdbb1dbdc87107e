use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A config file that jsr accepts, in lookup priority order.
///
/// See <https://jsr.io/docs/introduction#publishing-jsr-packages>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFile {
    JsrJson,
    DenoJsonc,
    DenoJson,
}

impl ConfigFile {
    /// All candidates, highest priority first.
    pub const ALL: [ConfigFile; 3] = [
        ConfigFile::JsrJson,
        ConfigFile::DenoJsonc,
        ConfigFile::DenoJson,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ConfigFile::JsrJson => "jsr.json",
            ConfigFile::DenoJsonc => "deno.jsonc",
            ConfigFile::DenoJson => "deno.json",
        }
    }

    /// Find the first candidate that exists as a regular file in `dir`.
    pub fn locate(dir: &Path) -> Option<ConfigFile> {
        Self::ALL
            .into_iter()
            .find(|candidate| dir.join(candidate.file_name()).is_file())
    }
}

/// The parts of a jsr/deno config file this tool reads. Other keys, including
/// `version`, are ignored whatever their type.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageConfig {
    pub name: String,
}

/// Errors that can occur when locating or parsing a package config file.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("No {} file found at {}. Exiting.", candidate_list(), .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {message}", .path.display())]
    ParseError { path: PathBuf, message: String },
    #[error("invalid config in {}", .path.display())]
    #[diagnostic(help("the config file must be an object with a string `name` field"))]
    ValidationError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Comma separated candidate file names, in priority order.
fn candidate_list() -> String {
    ConfigFile::ALL
        .iter()
        .map(|c| c.file_name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl PackageConfig {
    /// Load a config from a JSON or JSONC file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse config text. `path` is only used for error messages.
    ///
    /// Comments and trailing commas are accepted, as `deno.jsonc` allows them.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use decaf_script_jsr::config::PackageConfig;
    ///
    /// let config = PackageConfig::parse(
    ///     r#"{
    ///         // the published name
    ///         "name": "@scope/pkg",
    ///         "version": "1.0.0",
    ///     }"#,
    ///     Path::new("deno.jsonc"),
    /// )
    /// .unwrap();
    /// assert_eq!(config.name, "@scope/pkg");
    /// ```
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        // Empty text parses as null and fails validation below.
        let value: serde_json::Value =
            jsonc_parser::parse_to_serde_value(content, &Default::default()).map_err(|e| {
                ConfigError::ParseError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?;
        serde_json::from_value(value).map_err(|source| ConfigError::ValidationError {
            path: path.to_path_buf(),
            source,
        })
    }
}
