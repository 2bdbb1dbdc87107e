// Shared test helpers for integration tests.
// Used by cli_contract.rs and cli_flows.rs.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

pub const DEFAULT_PACKAGE_NAME: &str = "@test/test-package";

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_decaf-script-jsr"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// A package directory plus the decaf input file pointing at a version.
pub struct TestEnv {
    pub package_dir: TempDir,
    pub data_file: NamedTempFile,
    /// Directory with fake `deno` and `npx` placed first on `PATH`.
    pub bin_dir: TempDir,
}

impl TestEnv {
    pub fn new(version: &str, test_mode: bool) -> Self {
        Self::with_config("deno.json", DEFAULT_PACKAGE_NAME, version, test_mode)
    }

    pub fn with_config(config_file: &str, name: &str, version: &str, test_mode: bool) -> Self {
        let env = Self::without_config(version, test_mode);
        let config = serde_json::json!({
            "name": name,
            "version": "1.0.0",
            "description": "Test package",
            "license": "MIT",
            "exports": "./index.ts"
        });
        std::fs::write(
            env.package_dir.path().join(config_file),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .expect("failed to write config file");
        env
    }

    pub fn without_config(version: &str, test_mode: bool) -> Self {
        let package_dir = TempDir::new().expect("failed to create package dir");
        std::fs::write(
            package_dir.path().join("index.ts"),
            "export const test = true;",
        )
        .unwrap();

        let data_file = NamedTempFile::new().expect("failed to create data file");
        std::fs::write(
            data_file.path(),
            serde_json::json!({
                "nextVersionName": version,
                "testMode": test_mode,
                "gitCurrentBranch": "main"
            })
            .to_string(),
        )
        .unwrap();

        let bin_dir = TempDir::new().expect("failed to create bin dir");
        write_fake_tool(bin_dir.path(), "deno");
        write_fake_tool(bin_dir.path(), "npx");

        TestEnv {
            package_dir,
            data_file,
            bin_dir,
        }
    }

    pub fn package_path(&self) -> &str {
        self.package_dir.path().to_str().unwrap()
    }

    /// Invocations recorded by the fake tools, one line per run.
    pub fn tool_log(&self) -> Vec<String> {
        std::fs::read_to_string(self.bin_dir.path().join("invocations.log"))
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}

/// Writes an executable script that appends `<name> <args>` to
/// `invocations.log` next to it and exits with `$FAKE_TOOL_EXIT` (default 0).
#[cfg(unix)]
fn write_fake_tool(dir: &Path, name: &str) {
    use std::os::unix::fs::PermissionsExt;

    let log = dir.join("invocations.log");
    let path = dir.join(name);
    let script = format!(
        "#!/bin/sh\necho \"{name} $*\" >> '{}'\nexit \"${{FAKE_TOOL_EXIT:-0}}\"\n",
        log.display()
    );
    std::fs::write(&path, script).expect("failed to write fake tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn write_fake_tool(_dir: &Path, _name: &str) {}

/// Options for one binary run.
#[derive(Default)]
pub struct RunOptions<'a> {
    pub already_deployed: Option<bool>,
    pub deno_installed: Option<bool>,
    /// Arguments after `--package-path <dir>`. `None` means `--allow-dirty`.
    pub extra_args: Option<Vec<&'a str>>,
    pub env: Vec<(&'a str, &'a str)>,
}

pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl RunResult {
    /// Commands echoed by the binary before running them (`> ...` lines).
    pub fn commands_executed(&self) -> Vec<String> {
        self.stderr
            .lines()
            .filter_map(|line| line.strip_prefix("> "))
            .map(|line| line.trim().to_string())
            .collect()
    }
}

/// Runs the binary against `env` with `--package-path <package dir>`.
pub fn run_script(env: &TestEnv, options: RunOptions<'_>) -> RunResult {
    let mut args = vec!["--package-path", env.package_path()];
    args.extend(options.extra_args.unwrap_or_else(|| vec!["--allow-dirty"]));

    let mut vars = vec![("DATA_FILE_PATH", env.data_file.path().to_str().unwrap())];
    if let Some(deployed) = options.already_deployed {
        vars.push(("DECAF_SCRIPT_JSR_DID_ALREADY_DEPLOY", bool_str(deployed)));
    }
    if let Some(installed) = options.deno_installed {
        vars.push(("DECAF_SCRIPT_JSR_IS_DENO_INSTALLED", bool_str(installed)));
    }
    vars.extend(options.env);

    run_binary(&args, &vars, Some(env.bin_dir.path()))
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Runs the binary with a clean set of decaf variables.
/// `bin_dir`, when given, is put first on `PATH`.
pub fn run_binary(args: &[&str], vars: &[(&str, &str)], bin_dir: Option<&Path>) -> RunResult {
    let mut cmd = Command::new(binary_path());
    cmd.args(args)
        .env_remove("DATA_FILE_PATH")
        .env_remove("DECAF_SCRIPT_JSR_DID_ALREADY_DEPLOY")
        .env_remove("DECAF_SCRIPT_JSR_IS_DENO_INSTALLED")
        .env_remove("RUST_LOG")
        .env_remove("FAKE_TOOL_EXIT");
    if let Some(dir) = bin_dir {
        let path = std::env::var_os("PATH").unwrap_or_default();
        let mut paths = vec![dir.to_path_buf()];
        paths.extend(std::env::split_paths(&path));
        cmd.env("PATH", std::env::join_paths(paths).unwrap());
    }
    for (key, value) in vars {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("failed to execute binary");
    RunResult {
        stdout: String::from_utf8(output.stdout).expect("stdout not valid UTF-8"),
        stderr: String::from_utf8(output.stderr).expect("stderr not valid UTF-8"),
        exit_code: output.status.code().unwrap_or(-1),
    }
}
