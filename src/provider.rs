//! Discovery providers.
//!
//! A provider is a pluggable source of [`Installation`] records. The built-in
//! [`CommandProvider`] finds an editor by probing candidate command names;
//! hosts can register their own implementations (registry lookups, bundled
//! portable installs, ...) on the [`DiscoveryRegistry`](crate::DiscoveryRegistry).

use crate::detection::{command_stem, CommandProbe};
use crate::{DiscoveryError, DiscoveryOptions, EditorKind, Installation, InstallationCache};
use futures::future::{self, BoxFuture};
use futures::stream::{self, BoxStream, StreamExt};
use std::path::Path;
use std::sync::Arc;

/// Capability interface implemented by every discovery backend.
pub trait DiscoveryProvider: Send {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Detect whether this backend is available, warming any cache.
    ///
    /// Returns `true` if at least one installation can be listed.
    fn probe(&mut self) -> BoxFuture<'_, bool>;

    /// Try to recognise `path_or_command` as one of this backend's editors.
    ///
    /// `Ok(None)` means "not mine". An `Err` is a provider failure; the
    /// registry logs it and moves on to the next provider.
    fn try_match<'a>(
        &'a mut self,
        path_or_command: &'a str,
    ) -> BoxFuture<'a, Result<Option<Installation>, DiscoveryError>>;

    /// Enumerate installations.
    ///
    /// An `Err` item ends this provider's enumeration; items already yielded
    /// stay valid.
    fn list_all(&mut self) -> BoxStream<'_, Result<Installation, DiscoveryError>>;

    /// Drop cached discovery state. Default: nothing cached.
    fn reset(&mut self) {}
}

/// Finds an editor by probing candidate command names with `--version`.
///
/// Resolution precedence for [`try_match`](DiscoveryProvider::try_match):
///
/// - the request must name one of the candidates (by file stem,
///   case-insensitive, ignoring `.exe`/`.cmd`/`.bat`), otherwise it is not a
///   match. Several built-in providers share a registry and every VS Code
///   derivative answers `--version`, so without this filter the first
///   provider would claim every editor. Paths whose stem is not a candidate
///   (`/usr/bin/code-insiders`, a bundle's `Electron` binary) are therefore
///   rejected; register a provider listing that name to accept them.
/// - paths always win: anything with a directory component, rooted
///   (`/opt/void/bin/void`) or relative (`./tools/code`), is probed exactly as
///   given and never consults or updates the cache
/// - bare names always resolve through the cache, so an already resolved
///   command is returned without probing again
pub struct CommandProvider {
    display_name: String,
    candidates: Vec<String>,
    cache: InstallationCache,
}

impl CommandProvider {
    /// Create a provider for an arbitrary editor.
    pub fn new<I, S>(display_name: impl Into<String>, candidates: I, cache: InstallationCache) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            display_name: display_name.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
            cache,
        }
    }

    /// Create a provider for a built-in editor that probes real processes.
    pub fn for_editor(kind: EditorKind, options: DiscoveryOptions) -> Self {
        Self::new(
            kind.display_name(),
            kind.candidate_commands().iter().copied(),
            InstallationCache::new(options),
        )
    }

    /// Create a provider for a built-in editor backed by a custom probe.
    pub fn for_editor_with_probe(
        kind: EditorKind,
        probe: Arc<dyn CommandProbe>,
        options: DiscoveryOptions,
    ) -> Self {
        Self::new(
            kind.display_name(),
            kind.candidate_commands().iter().copied(),
            InstallationCache::with_probe(probe, options),
        )
    }

    /// Candidate command names, in probe order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    fn is_candidate(&self, path_or_command: &str) -> bool {
        let stem = command_stem(path_or_command);
        self.candidates.iter().any(|c| command_stem(c) == stem)
    }

    async fn resolve(&mut self) -> Option<Installation> {
        let resolved = self.cache.resolve_command(&self.candidates).await?;
        Some(Installation::new(
            self.display_name.clone(),
            resolved.command,
            resolved.version,
        ))
    }

    async fn match_path(&self, path: &str) -> Option<Installation> {
        match self.cache.probe_version(path).await {
            Ok(version) => {
                let stem = Path::new(path)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Some(Installation::new(
                    format!("{} ({})", self.display_name, stem),
                    path,
                    version,
                ))
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "failed to verify {} at path", self.display_name);
                None
            }
        }
    }
}

/// `true` for `dir/name` or `/name`, `false` for a bare `name`.
fn has_directory(path_or_command: &str) -> bool {
    Path::new(path_or_command)
        .parent()
        .is_some_and(|dir| !dir.as_os_str().is_empty())
}

impl DiscoveryProvider for CommandProvider {
    fn name(&self) -> &str {
        &self.display_name
    }

    fn probe(&mut self) -> BoxFuture<'_, bool> {
        Box::pin(async move { self.resolve().await.is_some() })
    }

    fn try_match<'a>(
        &'a mut self,
        path_or_command: &'a str,
    ) -> BoxFuture<'a, Result<Option<Installation>, DiscoveryError>> {
        Box::pin(async move {
            if !self.is_candidate(path_or_command) {
                return Ok(None);
            }
            if has_directory(path_or_command) {
                Ok(self.match_path(path_or_command).await)
            } else {
                Ok(self.resolve().await)
            }
        })
    }

    fn list_all(&mut self) -> BoxStream<'_, Result<Installation, DiscoveryError>> {
        stream::once(async move { self.resolve().await })
            .filter_map(|found| future::ready(found.map(Ok::<_, DiscoveryError>)))
            .boxed()
    }

    fn reset(&mut self) {
        self.cache.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::test_support::ScriptedProbe;
    use semver::Version;

    fn void_provider(probe: &Arc<ScriptedProbe>) -> CommandProvider {
        CommandProvider::for_editor_with_probe(
            EditorKind::Void,
            probe.clone(),
            DiscoveryOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_list_all_yields_resolved_installation() {
        let probe = Arc::new(ScriptedProbe::default().with("code", "1.85.1\nhash\nx64\n"));
        let mut provider = void_provider(&probe);

        let found: Vec<_> = provider.list_all().collect().await;
        assert_eq!(
            found,
            vec![Ok(Installation::new("Void Editor", "code", Version::new(1, 85, 1)))]
        );
    }

    #[tokio::test]
    async fn test_list_all_empty_when_nothing_installed() {
        let probe = Arc::new(ScriptedProbe::default());
        let mut provider = void_provider(&probe);

        let found: Vec<_> = provider.list_all().collect().await;
        assert!(found.is_empty());
        assert!(!provider.probe().await);
    }

    #[tokio::test]
    async fn test_try_match_rejects_foreign_commands() {
        let probe = Arc::new(ScriptedProbe::default().with("code", "1.85.1"));
        let mut provider = void_provider(&probe);

        assert_eq!(provider.try_match("cursor").await, Ok(None));
        assert_eq!(provider.try_match("/usr/bin/nvim").await, Ok(None));
        assert_eq!(probe.call_count(), 0);
    }

    #[tokio::test]
    async fn test_try_match_bare_name_uses_cache() {
        let probe = Arc::new(ScriptedProbe::default().with("voideditor", "1.4.0"));
        let mut provider = void_provider(&probe);

        assert!(provider.probe().await);
        let calls_after_probe = probe.call_count();

        let found = provider.try_match("CODE").await.unwrap().unwrap();
        assert_eq!(found.command, "voideditor");
        assert_eq!(found.display_name, "Void Editor");
        assert_eq!(probe.call_count(), calls_after_probe);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_try_match_rooted_path_probes_directly() {
        let probe = Arc::new(
            ScriptedProbe::default()
                .with("code", "1.85.1")
                .with("/opt/void/bin/void", "0.3.0"),
        );
        let mut provider = void_provider(&probe);

        let found = provider.try_match("/opt/void/bin/void").await.unwrap().unwrap();
        assert_eq!(found.command, "/opt/void/bin/void");
        assert_eq!(found.display_name, "Void Editor (void)");
        assert_eq!(found.version, Version::new(0, 3, 0));
        assert_eq!(probe.calls(), vec!["/opt/void/bin/void"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_try_match_rooted_path_failure_is_no_match() {
        let probe = Arc::new(ScriptedProbe::default());
        let mut provider = void_provider(&probe);

        assert_eq!(provider.try_match("/missing/bin/code").await, Ok(None));
    }

    #[tokio::test]
    async fn test_try_match_relative_path_probes_directly() {
        let probe = Arc::new(
            ScriptedProbe::default()
                .with("code", "1.85.1")
                .with("./tools/code", "1.70.0"),
        );
        let mut provider = void_provider(&probe);

        let found = provider.try_match("./tools/code").await.unwrap().unwrap();
        assert_eq!(found.command, "./tools/code");
        assert_eq!(found.display_name, "Void Editor (code)");
        assert_eq!(found.version, Version::new(1, 70, 0));
        assert_eq!(probe.calls(), vec!["./tools/code"]);
    }

    #[tokio::test]
    async fn test_try_match_path_with_foreign_stem_is_rejected() {
        let probe = Arc::new(ScriptedProbe::default().with("/usr/bin/code-insiders", "1.86.0"));
        let mut provider = void_provider(&probe);

        assert_eq!(provider.try_match("/usr/bin/code-insiders").await, Ok(None));
        assert_eq!(probe.call_count(), 0);
    }

    #[test]
    fn test_has_directory() {
        assert!(!has_directory("code"));
        assert!(has_directory("./tools/code"));
        assert!(has_directory("tools/code"));
        assert!(has_directory("/usr/bin/code"));
    }

    #[tokio::test]
    async fn test_reset_clears_cache() {
        let probe = Arc::new(ScriptedProbe::default().with("void", "1.0.0"));
        let mut provider = void_provider(&probe);

        assert!(provider.probe().await);
        provider.reset();
        assert!(provider.probe().await);
        assert_eq!(probe.call_count(), 2);
    }

    #[test]
    fn test_custom_provider_candidates() {
        let provider = CommandProvider::new(
            "Zed",
            ["zed", "zeditor"],
            InstallationCache::new(DiscoveryOptions::default()),
        );
        assert_eq!(provider.name(), "Zed");
        assert_eq!(provider.candidates(), &["zed".to_string(), "zeditor".to_string()]);
        assert!(provider.is_candidate("/usr/bin/zeditor"));
        assert!(!provider.is_candidate("code"));
    }
}
