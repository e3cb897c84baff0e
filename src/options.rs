//! Discovery options configuration.
//!
//! This module provides the [`DiscoveryOptions`] struct for configuring how
//! candidate commands are probed.

use std::time::Duration;

/// Configuration options for editor discovery.
///
/// # Default Behavior
///
/// Each candidate is probed with `--version` and given 2 seconds to exit.
/// Editors that are slow to cold-start (network home directories, first run
/// after an update) may need a longer timeout.
///
/// # Example
///
/// ```rust
/// use editor_discovery::DiscoveryOptions;
/// use std::time::Duration;
///
/// let opts = DiscoveryOptions {
///     timeout: Duration::from_secs(5),
///     ..Default::default()
/// };
/// assert_eq!(opts.version_args, vec!["--version".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Upper bound on how long a single probe may run before it is killed.
    ///
    /// Default: 2 seconds
    pub timeout: Duration,

    /// Arguments passed to each candidate when probing.
    ///
    /// Default: `["--version"]`
    pub version_args: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(2),
            version_args: vec!["--version".to_string()],
        }
    }
}
