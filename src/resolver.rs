use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AutoVersionError, Result};
use crate::git::GitClient;
use crate::record::VersionRecord;
use crate::ui;

/// Policy selecting how a numbered version field is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NumberingMethod {
    /// Keep the caller-supplied value unchanged.
    #[default]
    None,
    /// Total number of commits reachable from HEAD.
    CountAllCommits,
    /// Number of commits since the nearest tag matching the tag pattern.
    CountCommitsFromTag,
}

impl NumberingMethod {
    /// Whether this method derives the field from the repository rather than
    /// preserving the manual value.
    pub fn is_automated(&self) -> bool {
        *self != NumberingMethod::None
    }
}

impl fmt::Display for NumberingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumberingMethod::None => "none",
            NumberingMethod::CountAllCommits => "count-all-commits",
            NumberingMethod::CountCommitsFromTag => "count-commits-from-tag",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for NumberingMethod {
    type Err = AutoVersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "none" => Ok(NumberingMethod::None),
            "count-all-commits" => Ok(NumberingMethod::CountAllCommits),
            "count-commits-from-tag" => Ok(NumberingMethod::CountCommitsFromTag),
            other => Err(AutoVersionError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Per-field numbering inputs for a resolution pass.
#[derive(Debug, Clone)]
pub struct NumberingPolicy {
    pub patch: NumberingMethod,
    pub ios_build: NumberingMethod,
    pub android_build: NumberingMethod,
    pub tag_pattern: String,
}

/// Applies numbering policies against a [GitClient] to produce concrete
/// version numbers.
pub struct VersionResolver {
    git: GitClient,
}

impl VersionResolver {
    pub fn new(git: GitClient) -> Self {
        VersionResolver { git }
    }

    pub fn git(&self) -> &GitClient {
        &self.git
    }

    /// Resolves a single numbered field.
    ///
    /// `None` always returns `previous` exactly, regardless of git state.
    pub fn resolve_field(
        &self,
        method: NumberingMethod,
        previous: u32,
        tag_pattern: &str,
    ) -> Result<u32> {
        match method {
            NumberingMethod::None => Ok(previous),
            NumberingMethod::CountAllCommits => Ok(self.git.count_all_commits()),
            NumberingMethod::CountCommitsFromTag => self.git.count_commits_from_tag(tag_pattern),
        }
    }

    /// Resolves the three numbered fields of a record independently.
    ///
    /// A failure on one field leaves that field at its previous value and
    /// reports which field broke; the remaining fields still resolve.
    pub fn resolve_record(
        &self,
        policy: &NumberingPolicy,
        major: u32,
        minor: u32,
        previous: &VersionRecord,
    ) -> VersionRecord {
        let patch = self.resolve_or_keep("patch", policy.patch, previous.patch, policy);
        let ios_build = self.resolve_or_keep(
            "iOS build number",
            policy.ios_build,
            previous.ios_build_number,
            policy,
        );
        let android_build = self.resolve_or_keep(
            "Android bundle version code",
            policy.android_build,
            previous.android_bundle_version_code,
            policy,
        );

        VersionRecord {
            major,
            minor,
            patch,
            ios_build_number: ios_build,
            android_bundle_version_code: android_build,
            hash: previous.hash.clone(),
        }
    }

    /// Resolves the commit hash field, or `None` with a diagnostic when the
    /// query fails (missing repository, out-of-range length).
    pub fn resolve_hash(&self, length: usize) -> Option<String> {
        match self.git.commit_hash(length, "HEAD") {
            Ok(hash) => Some(hash),
            Err(e) => {
                ui::display_error(&format!("Failed to get commit hash: {}", e));
                None
            }
        }
    }

    fn resolve_or_keep(
        &self,
        field: &str,
        method: NumberingMethod,
        previous: u32,
        policy: &NumberingPolicy,
    ) -> u32 {
        match self.resolve_field(method, previous, &policy.tag_pattern) {
            Ok(value) => value,
            Err(e) => {
                ui::display_error(&format!(
                    "Failed to get {}: {}\nTry creating a git repository or changing the {} numbering method to none.",
                    field, e, field
                ));
                previous
            }
        }
    }
}
