use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The input decaf hands to a deploy step.
///
/// decaf writes it as JSON to the file named by `DATA_FILE_PATH`. Field names
/// match the camelCase JSON that decaf writes. Everything else decaf sends
/// (git branch, commit list, last release...) is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeployInput {
    pub next_version_name: String,
    pub test_mode: bool,
}

/// Errors that can occur when reading the deploy step input.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum InputError {
    #[error("environment variable {0} is not set")]
    #[diagnostic(help("decaf-script-jsr is meant to be run by decaf as a deploy step"))]
    PathNotSet(&'static str),
    #[error("failed to read deploy step input: {}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid deploy step input in {}", .path.display())]
    #[diagnostic(help("expected a JSON object with `nextVersionName` and `testMode`"))]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DeployInput {
    /// Load the input from the JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path).map_err(|source| InputError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| InputError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse the input from a JSON string.
    ///
    /// # Examples
    ///
    /// ```
    /// use decaf_script_jsr::protocol::DeployInput;
    ///
    /// let input = DeployInput::parse(r#"{"nextVersionName": "1.2.0", "testMode": true}"#).unwrap();
    /// assert_eq!(input.next_version_name, "1.2.0");
    /// assert!(input.test_mode);
    /// ```
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
