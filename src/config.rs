use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{AutoVersionError, Result};
use crate::git;
use crate::resolver::{NumberingMethod, NumberingPolicy};

/// Represents the complete configuration for autover.
///
/// Covers the numbering method per field, the tag pattern for tag-relative
/// counting, the git executable path, and where the resolved record is
/// persisted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Previous `major.minor.patch` string; major and minor are always
    /// manual, patch follows `patch_numbering`.
    #[serde(default = "default_bundle_version")]
    pub bundle_version: String,

    #[serde(default)]
    pub patch_numbering: NumberingMethod,

    #[serde(default = "default_build_numbering")]
    pub ios_build_numbering: NumberingMethod,

    #[serde(default = "default_build_numbering")]
    pub android_build_numbering: NumberingMethod,

    /// Glob pattern selecting which tags count as version tags.
    #[serde(default = "default_git_tag_pattern")]
    pub git_tag_pattern: String,

    /// Path to the git executable; just "git" if it is on PATH.
    #[serde(default = "default_git_path")]
    pub git_path: String,

    /// Whether the resolved record is persisted at all.
    #[serde(default = "default_true")]
    pub save_version_data: bool,

    #[serde(default = "default_version_data_path")]
    pub version_data_path: String,

    /// Create a .gitignore excluding the generated record.
    #[serde(default = "default_true")]
    pub create_gitignore: bool,

    #[serde(default = "default_true")]
    pub save_commit_hash: bool,

    /// How many hash characters to save; 7 matches git's own abbreviation.
    #[serde(default = "default_hash_length")]
    pub hash_length: usize,
}

fn default_bundle_version() -> String {
    "0.1.0".to_string()
}

fn default_build_numbering() -> NumberingMethod {
    NumberingMethod::CountAllCommits
}

fn default_git_tag_pattern() -> String {
    "*[0-9].[0-9]*".to_string()
}

fn default_git_path() -> String {
    git::DEFAULT_GIT_PATH.to_string()
}

fn default_version_data_path() -> String {
    "AutoVersioning/Resources/VersionData.toml".to_string()
}

fn default_hash_length() -> usize {
    7
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bundle_version: default_bundle_version(),
            patch_numbering: NumberingMethod::None,
            ios_build_numbering: default_build_numbering(),
            android_build_numbering: default_build_numbering(),
            git_tag_pattern: default_git_tag_pattern(),
            git_path: default_git_path(),
            save_version_data: true,
            version_data_path: default_version_data_path(),
            create_gitignore: true,
            save_commit_hash: true,
            hash_length: default_hash_length(),
        }
    }
}

impl Config {
    /// Whether patch numbering is automated rather than manual.
    pub fn auto_patch_enabled(&self) -> bool {
        self.patch_numbering.is_automated()
    }

    pub fn auto_ios_build_enabled(&self) -> bool {
        self.ios_build_numbering.is_automated()
    }

    pub fn auto_android_build_enabled(&self) -> bool {
        self.android_build_numbering.is_automated()
    }

    /// The per-field numbering inputs for a resolution pass.
    pub fn numbering_policy(&self) -> NumberingPolicy {
        NumberingPolicy {
            patch: self.patch_numbering,
            ios_build: self.ios_build_numbering,
            android_build: self.android_build_numbering,
            tag_pattern: self.git_tag_pattern.clone(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autover.toml` in current directory
/// 3. `.autover.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./autover.toml").exists() {
        fs::read_to_string("./autover.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".autover.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config =
        toml::from_str(&config_str).map_err(|e| AutoVersionError::config(e.to_string()))?;
    Ok(config)
}
