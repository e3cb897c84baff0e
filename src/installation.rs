//! Installation records and discovery error types.

use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel version meaning "found, but version unknown".
///
/// Distinct from "not detected": an [`Installation`] carrying this version is
/// still usable, its `--version` output just could not be read.
pub const UNKNOWN_VERSION: Version = Version::new(0, 0, 0);

/// One discovered editor.
///
/// Installations are immutable value objects. The registry hands out copies;
/// nothing inside the crate keeps a mutable reference to a returned record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    /// Human-readable label, e.g. `"Cursor"` or `"Void Editor (code)"`.
    pub display_name: String,

    /// Executable name or absolute path used to invoke the editor.
    ///
    /// Never empty for an installation produced by discovery.
    pub command: String,

    /// Parsed version, or [`UNKNOWN_VERSION`].
    pub version: Version,

    /// Whether the version carries a prerelease tag (insiders builds).
    #[serde(default)]
    pub is_prerelease: bool,
}

impl Installation {
    /// Create an installation record.
    ///
    /// `is_prerelease` is derived from the version's prerelease component.
    ///
    /// # Example
    ///
    /// ```rust
    /// use editor_discovery::Installation;
    /// use semver::Version;
    ///
    /// let inst = Installation::new("Cursor", "cursor", Version::new(0, 42, 3));
    /// assert!(inst.has_known_version());
    /// assert!(!inst.is_prerelease);
    /// ```
    pub fn new(
        display_name: impl Into<String>,
        command: impl Into<String>,
        version: Version,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            command: command.into(),
            is_prerelease: !version.pre.is_empty(),
            version,
        }
    }

    /// `false` when the version is the `0.0.0` sentinel.
    pub fn has_known_version(&self) -> bool {
        self.version != UNKNOWN_VERSION
    }
}

/// Typed failure kinds for discovery.
///
/// Probe failures (`NotFound`, `PermissionDenied`, `Timeout`, `NonZeroExit`,
/// `Io`) mean "this candidate is not available" and are recovered locally.
/// `ParseError` is recovered by substituting [`UNKNOWN_VERSION`]. `Provider`
/// is isolated at the registry boundary.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new failure kinds
/// in future versions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The executable could not be located.
    #[error("executable not found")]
    NotFound,

    /// The executable exists but could not be run.
    #[error("permission denied")]
    PermissionDenied,

    /// The process did not exit within the probe timeout and was killed.
    #[error("probe timed out")]
    Timeout,

    /// The process exited unsuccessfully. `code` is `None` when it was
    /// terminated by a signal.
    #[error("process exited with code {code:?}")]
    NonZeroExit {
        /// Exit code, if any.
        code: Option<i32>,
    },

    /// Version output could not be parsed.
    #[error("failed to parse version output")]
    ParseError,

    /// Any other I/O failure while spawning or waiting.
    #[error("I/O error: {message}")]
    Io {
        /// Underlying error message.
        message: String,
    },

    /// A discovery provider failed during enumeration or matching.
    #[error("provider {provider} failed: {message}")]
    Provider {
        /// Name of the failing provider.
        provider: String,
        /// Description of the failure.
        message: String,
    },
}

impl DiscoveryError {
    pub(crate) fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Io {
                message: err.to_string(),
            },
        }
    }
}
