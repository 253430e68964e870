use serde::{Deserialize, Serialize};

/// The persisted version record: the numbers a build stamps into its
/// artifacts, plus the optional commit hash they were resolved at.
///
/// Fields are resolved independently of each other; a resolution pass always
/// overwrites the whole record, never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct VersionRecord {
    #[serde(default)]
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
    #[serde(default)]
    pub patch: u32,
    #[serde(default)]
    pub ios_build_number: u32,
    #[serde(default)]
    pub android_bundle_version_code: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl VersionRecord {
    /// The `major.minor.patch` display string.
    pub fn bundle_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// The bundle version suffixed with ` (<hash>)` when a hash is present.
    pub fn bundle_version_with_hash(&self) -> String {
        match self.hash.as_deref() {
            Some(hash) if !hash.is_empty() => format!("{} ({})", self.bundle_version(), hash),
            _ => self.bundle_version(),
        }
    }
}
