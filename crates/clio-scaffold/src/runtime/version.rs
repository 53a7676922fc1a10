//! Host runtime version compatibility

use semver::Version;
use std::fmt;

/// Oldest Node.js release the toolchain supports.
///
/// Only `9.x`/`10.x` (rejected) and `13.x` (accepted) are known data points,
/// so the exact boundary still needs confirming.
pub const MINIMUM_SUPPORTED_VERSION: Version = Version::new(12, 0, 0);

/// Leading `major.minor` of a runtime version string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionSpec {
    pub major: u64,
    pub minor: u64,
}

impl VersionSpec {
    /// Parse `13.4`, `v13.4.0`, `12.22.1-nightly` and the like.
    ///
    /// Returns `None` unless both leading components are plain numbers.
    pub fn parse(version_str: &str) -> Option<Self> {
        let trimmed = version_str.trim();
        let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let mut parts = cleaned.split('.');

        let major = parse_component(parts.next()?)?;
        let minor = parse_component(parts.next()?)?;

        Some(Self { major, minor })
    }

    /// Whether this version is at least `minimum` (patch level ignored)
    pub fn meets(&self, minimum: &Version) -> bool {
        Version::new(self.major, self.minor, 0) >= Version::new(minimum.major, minimum.minor, 0)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

fn parse_component(part: &str) -> Option<u64> {
    // The minor component may carry a pre-release tail when no patch is given
    let digits = part.split(['-', '+']).next().unwrap_or(part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Check a runtime version against [`MINIMUM_SUPPORTED_VERSION`]
pub fn is_supported_version(version_str: &str) -> bool {
    is_supported_version_against(version_str, &MINIMUM_SUPPORTED_VERSION)
}

/// Check a runtime version against an explicit minimum.
/// Unparseable versions are never supported.
pub fn is_supported_version_against(version_str: &str, minimum: &Version) -> bool {
    VersionSpec::parse(version_str).is_some_and(|spec| spec.meets(minimum))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_13_4_is_supported() {
        assert!(is_supported_version("13.4"));
    }

    #[test]
    fn test_13_6_is_supported() {
        assert!(is_supported_version("13.6"));
    }

    #[test]
    fn test_10_3_is_not_supported() {
        assert!(!is_supported_version("10.3"));
    }

    #[test]
    fn test_9_6_is_not_supported() {
        assert!(!is_supported_version("9.6"));
    }

    #[test]
    fn test_9_2_is_not_supported() {
        assert!(!is_supported_version("9.2"));
    }

    #[test]
    fn test_node_version_output() {
        // `node --version` prints a leading v and a patch level
        assert!(is_supported_version("v13.4.0"));
        assert!(is_supported_version("v20.11.1\n"));
        assert!(!is_supported_version("v10.24.1"));
    }

    #[test]
    fn test_malformed_versions_are_rejected() {
        for input in ["", "13", "13.", ".4", "abc", "13.x", "x.4", "-1.0", "13 .4"] {
            assert!(!is_supported_version(input), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_prerelease_minor() {
        assert_eq!(
            VersionSpec::parse("14.0-nightly"),
            Some(VersionSpec {
                major: 14,
                minor: 0
            })
        );
    }

    #[test]
    fn test_explicit_minimum() {
        let minimum = Version::new(13, 5, 0);
        assert!(!is_supported_version_against("13.4", &minimum));
        assert!(is_supported_version_against("13.6", &minimum));
        // Patch of the minimum is ignored
        assert!(is_supported_version_against("13.5", &Version::new(13, 5, 9)));
    }

    #[test]
    fn test_is_deterministic_across_threads() {
        let inputs = ["13.4", "13.6", "10.3", "9.6", "9.2"];
        let expected: Vec<bool> = inputs.iter().map(|v| is_supported_version(v)).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        inputs
                            .iter()
                            .map(|v| is_supported_version(v))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
