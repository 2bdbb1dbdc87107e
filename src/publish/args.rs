/// Arguments for `jsr publish`, in the order the publish tool receives them.
///
/// `publish --set-version <version> [passthrough...] [--dry-run]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishArgs(Vec<String>);

impl PublishArgs {
    /// Assemble the argument list.
    ///
    /// `passthrough` is forwarded verbatim and in order. `--dry-run` is
    /// appended last only in test mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use decaf_script_jsr::publish::PublishArgs;
    ///
    /// let args = PublishArgs::new("1.2.0", &["--allow-dirty".to_string()], true);
    /// assert_eq!(
    ///     args.as_slice(),
    ///     ["publish", "--set-version", "1.2.0", "--allow-dirty", "--dry-run"]
    /// );
    /// ```
    pub fn new(version: &str, passthrough: &[String], test_mode: bool) -> Self {
        let mut args = vec![
            "publish".to_string(),
            "--set-version".to_string(),
            version.to_string(),
        ];
        args.extend(passthrough.iter().cloned());
        if test_mode {
            args.push("--dry-run".to_string());
        }
        PublishArgs(args)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
