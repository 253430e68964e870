use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{AutoVersionError, Result};
use crate::{process, ui};

/// Executable used when no custom path is configured, resolved via PATH.
pub const DEFAULT_GIT_PATH: &str = "git";

/// Read-only git queries against a working directory, executed by shelling
/// out to the git executable.
///
/// Every invocation goes through an exec-with-fallback policy: the configured
/// path is tried first, and if it fails for any reason (launch failure or
/// non-zero exit) while differing from [DEFAULT_GIT_PATH], the call is
/// retried exactly once on the default path. A failure on the default path is
/// terminal for that call: it is reported and the query degrades to an empty
/// result.
pub struct GitClient {
    git_path: String,
    work_dir: PathBuf,
}

impl GitClient {
    /// Creates a client using the default executable path in the current
    /// working directory.
    pub fn new() -> Self {
        Self::with_path(DEFAULT_GIT_PATH)
    }

    /// Creates a client using a custom git executable path.
    pub fn with_path(git_path: impl Into<String>) -> Self {
        GitClient {
            git_path: git_path.into(),
            work_dir: PathBuf::from("."),
        }
    }

    /// Sets the directory git commands run in. Defaults to the current
    /// working directory.
    pub fn in_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn git_path(&self) -> &str {
        &self.git_path
    }

    pub fn set_git_path(&mut self, git_path: impl Into<String>) {
        self.git_path = git_path.into();
    }

    /// Checks whether a candidate git path is usable.
    ///
    /// Runs `<path> --version` directly (no fallback) and requires the output
    /// to contain `git version`. Never errors; any failure is `false`.
    pub fn validate_path(&self, git_path: &str) -> bool {
        if git_path.trim().is_empty() {
            return false;
        }
        match process::run(git_path, "--version", &self.work_dir) {
            Ok(output) => output.contains("git version"),
            Err(_) => false,
        }
    }

    /// Returns the installed git version string (e.g. "2.43.0"), or `None`
    /// when git is unavailable.
    pub fn version(&self) -> Option<String> {
        let output = process::run(&self.git_path, "--version", &self.work_dir).ok()?;
        Some(output.replace("git version ", "").trim().to_string())
    }

    /// Counts all commits reachable from HEAD.
    ///
    /// An empty or unborn repository (where `rev-list` fails) counts as 0.
    pub fn count_all_commits(&self) -> u32 {
        self.exec("rev-list --count HEAD").trim().parse().unwrap_or(0)
    }

    /// Counts commits between HEAD and the nearest tag matching a glob
    /// pattern, per `git describe` semantics.
    ///
    /// When no tag matches the pattern, falls back to [Self::count_all_commits].
    ///
    /// # Errors
    /// * `MalformedOutput` - describe output lacked the `-<n>-g` distance
    ///   marker (e.g. git itself failed mid-query)
    pub fn count_commits_from_tag(&self, tag_pattern: &str) -> Result<u32> {
        let matched_tags = self.exec(&format!(r#"tag --list "{}""#, tag_pattern));
        if matched_tags.trim().is_empty() {
            return Ok(self.count_all_commits());
        }

        let match_option = if tag_pattern.trim().is_empty() {
            String::new()
        } else {
            format!(r#" --match "{}""#, tag_pattern)
        };
        let output = self.exec(&format!("describe --tags --long{}", match_option));

        let marker = Regex::new(r"-(\d+)-g").expect("distance marker regex");
        let captures = marker.captures(&output).ok_or_else(|| {
            AutoVersionError::malformed(format!(
                "no tag distance marker in describe output: '{}'",
                output.trim()
            ))
        })?;
        captures[1]
            .parse()
            .map_err(|_| AutoVersionError::malformed("tag distance is not a number"))
    }

    /// Returns the hash of a commit, shortened to `length` characters.
    ///
    /// Length 7 matches git's `--format=%h` abbreviation; the full SHA-1 is
    /// 40 characters.
    ///
    /// # Errors
    /// * `ArgumentRange` - `length` exceeds the hash git returned (including
    ///   the empty hash produced when git is unavailable)
    pub fn commit_hash(&self, length: usize, commit: &str) -> Result<String> {
        let hash = self
            .exec(&format!(r#"show "{}" --format=%H -s"#, commit))
            .trim()
            .to_string();
        if length > hash.len() {
            return Err(AutoVersionError::range(format!(
                "hash length (raw: {}, requested: {}) is wrong",
                hash.len(),
                length
            )));
        }
        if length == hash.len() {
            Ok(hash)
        } else {
            Ok(hash[..length].to_string())
        }
    }

    /// Runs a git subcommand through the fallback policy, returning stdout.
    ///
    /// Never errors: a terminal failure is reported and yields an empty
    /// string, which the query layers treat as "no data".
    pub fn exec(&self, commands: &str) -> String {
        self.exec_tracked(commands).0
    }

    /// Fallback-policy core. The bool reports whether the default path was
    /// retried after the configured path failed.
    fn exec_tracked(&self, commands: &str) -> (String, bool) {
        let primary = process::run(&self.git_path, commands, &self.work_dir);
        match primary {
            Ok(output) => (output, false),
            Err(err) if self.git_path == DEFAULT_GIT_PATH => {
                ui::display_error(&format!("git {} failed: {}", commands, err));
                (String::new(), false)
            }
            Err(err) => {
                ui::display_status(&format!(
                    "'{}' failed ({}), retrying with '{}'",
                    self.git_path, err, DEFAULT_GIT_PATH
                ));
                match process::run(DEFAULT_GIT_PATH, commands, &self.work_dir) {
                    Ok(output) => (output, true),
                    Err(retry_err) => {
                        ui::display_error(&format!("git {} failed: {}", commands, retry_err));
                        (String::new(), true)
                    }
                }
            }
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

impl Default for GitClient {
    fn default() -> Self {
        Self::new()
    }
}
