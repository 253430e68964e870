use crate::error::{AutoVersionError, Result};

/// A dotted `major.minor.patch` triple as supplied by the prior-version
/// source (e.g. the project's configured bundle version).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl BundleVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        BundleVersion {
            major,
            minor,
            patch,
        }
    }
}

impl std::fmt::Display for BundleVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parses a dotted version string into a [BundleVersion].
///
/// Missing components default to 0; components beyond the third are ignored.
/// Any non-numeric component is an error; the caller decides how to recover
/// (typically by keeping the previously persisted numbers).
///
/// # Example
/// ```ignore
/// assert_eq!(parse_bundle_version("1.2.3").unwrap(), BundleVersion::new(1, 2, 3));
/// assert_eq!(parse_bundle_version("1.2").unwrap(), BundleVersion::new(1, 2, 0));
/// assert_eq!(parse_bundle_version("1.2.3.4").unwrap(), BundleVersion::new(1, 2, 3));
/// ```
pub fn parse_bundle_version(version: &str) -> Result<BundleVersion> {
    let mut components = version.trim().split('.').map(|part| {
        part.parse::<u32>().map_err(|_| {
            AutoVersionError::config(format!(
                "could not interpret the version number from '{}'",
                version
            ))
        })
    });

    let major = components.next().transpose()?.unwrap_or(0);
    let minor = components.next().transpose()?.unwrap_or(0);
    let patch = components.next().transpose()?.unwrap_or(0);
    Ok(BundleVersion::new(major, minor, patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_triple() {
        assert_eq!(
            parse_bundle_version("1.2.3").unwrap(),
            BundleVersion::new(1, 2, 3)
        );
    }

    #[test]
    fn test_parse_missing_components_default_to_zero() {
        assert_eq!(
            parse_bundle_version("2").unwrap(),
            BundleVersion::new(2, 0, 0)
        );
        assert_eq!(
            parse_bundle_version("1.5").unwrap(),
            BundleVersion::new(1, 5, 0)
        );
    }

    #[test]
    fn test_parse_extra_components_ignored() {
        assert_eq!(
            parse_bundle_version("1.2.3.4.5").unwrap(),
            BundleVersion::new(1, 2, 3)
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(parse_bundle_version("v1.2.3").is_err());
        assert!(parse_bundle_version("1.x.3").is_err());
        assert!(parse_bundle_version("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let version = BundleVersion::new(1, 2, 3);
        assert_eq!(version.to_string(), "1.2.3");
        assert_eq!(parse_bundle_version(&version.to_string()).unwrap(), version);
    }
}
