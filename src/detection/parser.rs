//! Version output parsing.

use crate::installation::UNKNOWN_VERSION;
use crate::DiscoveryError;
use regex::Regex;
use semver::Version;
use std::sync::OnceLock;

/// Dotted numeric version: `major.minor[.patch[.revision]]`.
fn dotted_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?(?:\.(\d+))?$").expect("Invalid regex pattern")
    })
}

/// Parse the version from `--version` output, falling back to the sentinel.
///
/// Version is advisory: any failure yields [`UNKNOWN_VERSION`] rather than
/// an error.
///
/// ```text
/// 1.85.1                                      -> 1.85.1
/// 08ee524518e07c5096ad2dd6a1d0b5b2d5c56c58
/// x64
/// ```
pub fn parse_version(output: &str) -> Version {
    try_parse_version(output).unwrap_or(UNKNOWN_VERSION)
}

/// Parse the version from the first non-empty line of `output`.
///
/// Accepted forms, after trimming surrounding whitespace:
///
/// - full semver, including prerelease tags: `1.86.0-insider`
/// - `major.minor` -> patch 0: `1.85` -> 1.85.0
/// - `major.minor.patch.revision` -> revision dropped: `1.2.3.4` -> 1.2.3
///
/// Only the first line is considered. Editors print the commit hash and
/// architecture on the following lines.
pub fn try_parse_version(output: &str) -> Result<Version, DiscoveryError> {
    let line = output
        .split('\n')
        .map(|l| l.trim_end_matches('\r'))
        .find(|l| !l.is_empty())
        .ok_or(DiscoveryError::ParseError)?
        .trim();

    if let Ok(version) = Version::parse(line) {
        return Ok(version);
    }

    let caps = dotted_version_regex()
        .captures(line)
        .ok_or(DiscoveryError::ParseError)?;
    let component = |i: usize| -> Result<u64, DiscoveryError> {
        caps.get(i)
            .map_or(Ok(0), |m| m.as_str().parse::<u64>())
            .map_err(|_| DiscoveryError::ParseError)
    };

    Ok(Version::new(component(1)?, component(2)?, component(3)?))
}
