//! Memoized command resolution.
//!
//! [`InstallationCache`] owns the discovery state for one editor backend:
//! which candidate command answered, and the version it reported. The state
//! is an explicit object owned by the caller, so two caches never interfere
//! and tests can [`reset`](InstallationCache::reset) between cases.

use crate::detection::{try_parse_version, CommandProbe, SystemProbe};
use crate::installation::UNKNOWN_VERSION;
use crate::{DiscoveryError, DiscoveryOptions};
use semver::Version;
use std::sync::Arc;

/// A command that answered the version probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// The candidate name (or path) exactly as probed.
    pub command: String,

    /// Version parsed from the probe output, or [`UNKNOWN_VERSION`].
    pub version: Version,
}

/// First success wins; `None` until then.
///
/// No list of untried candidates is kept: once a command resolves nothing
/// else is probed, and a pass that resolves nothing rescans every candidate
/// in order, so the leftover list would never be read.
#[derive(Debug, Default)]
struct DiscoveryState {
    resolved: Option<ResolvedCommand>,
}

/// Process-lifetime cache of the discovery scan.
///
/// The scan runs at most once per successful resolution. A pass in which
/// every candidate fails records nothing, so a later call scans again.
///
/// `resolve_command` takes `&mut self`; sharing a cache across threads
/// requires the caller to wrap it (e.g. in a `tokio::sync::Mutex`).
pub struct InstallationCache {
    probe: Arc<dyn CommandProbe>,
    options: DiscoveryOptions,
    state: DiscoveryState,
}

impl InstallationCache {
    /// Create a cache that probes real processes.
    pub fn new(options: DiscoveryOptions) -> Self {
        Self::with_probe(Arc::new(SystemProbe), options)
    }

    /// Create a cache backed by a custom probe.
    pub fn with_probe(probe: Arc<dyn CommandProbe>, options: DiscoveryOptions) -> Self {
        Self {
            probe,
            options,
            state: DiscoveryState::default(),
        }
    }

    /// The options used for every probe.
    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// The resolved command, if a previous pass succeeded.
    pub fn resolved(&self) -> Option<&ResolvedCommand> {
        self.state.resolved.as_ref()
    }

    /// Resolve the first working command among `candidates`.
    ///
    /// Returns the cached result immediately if one exists. Otherwise probes
    /// each candidate in order and stops at the first success; later
    /// candidates are never probed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use editor_discovery::{DiscoveryOptions, InstallationCache};
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() {
    ///     let mut cache = InstallationCache::new(DiscoveryOptions::default());
    ///     if let Some(found) = cache.resolve_command(&["voideditor", "code"]).await {
    ///         println!("using {} ({})", found.command, found.version);
    ///     }
    /// }
    /// ```
    pub async fn resolve_command<S>(&mut self, candidates: &[S]) -> Option<ResolvedCommand>
    where
        S: AsRef<str> + Sync,
    {
        if let Some(resolved) = &self.state.resolved {
            return Some(resolved.clone());
        }

        for candidate in candidates {
            let candidate = candidate.as_ref();
            match self.probe_version(candidate).await {
                Ok(version) => {
                    tracing::info!(command = candidate, %version, "resolved editor command");
                    let resolved = ResolvedCommand {
                        command: candidate.to_string(),
                        version,
                    };
                    self.state.resolved = Some(resolved.clone());
                    return Some(resolved);
                }
                Err(e) => {
                    tracing::debug!(command = candidate, error = %e, "candidate not available");
                }
            }
        }

        let tried: Vec<&str> = candidates.iter().map(AsRef::as_ref).collect();
        tracing::warn!(
            candidates = ?tried,
            "no editor command could be found automatically; a path may need to be set manually"
        );
        None
    }

    /// Probe `command` directly, bypassing and not updating the cache.
    ///
    /// Returns the parsed version (or the sentinel if unparseable) when the
    /// probe succeeds, and the probe's failure kind otherwise.
    pub async fn probe_version(&self, command: &str) -> Result<Version, DiscoveryError> {
        let result = self
            .probe
            .probe(command, &self.options.version_args, self.options.timeout)
            .await;

        if let Some(failure) = result.failure {
            return Err(failure);
        }

        let output = result.output.unwrap_or_default();
        Ok(try_parse_version(&output).unwrap_or_else(|e| {
            tracing::debug!(command, error = %e, "version unknown");
            UNKNOWN_VERSION
        }))
    }

    /// Forget the resolved command so the next call scans again.
    pub fn reset(&mut self) {
        self.state = DiscoveryState::default();
    }
}
