//! Aggregation of discovery providers.

use crate::{CommandProvider, DiscoveryOptions, DiscoveryProvider, EditorKind, Installation};
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};

/// Ordered list of discovery providers.
///
/// Providers are consulted in registration order. A failing provider never
/// takes its siblings down: enumeration errors end only that provider's
/// results, and match errors count as "no match".
///
/// # Example
///
/// ```rust,no_run
/// use editor_discovery::{DiscoveryOptions, DiscoveryRegistry};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let mut registry = DiscoveryRegistry::with_defaults(DiscoveryOptions::default());
///     for inst in registry.list_installations().await {
///         println!("{} {} -> {}", inst.display_name, inst.version, inst.command);
///     }
/// }
/// ```
#[derive(Default)]
pub struct DiscoveryRegistry {
    providers: Vec<Box<dyn DiscoveryProvider>>,
}

impl DiscoveryRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with a [`CommandProvider`] for every built-in editor, in
    /// [`EditorKind::all`] order.
    pub fn with_defaults(options: DiscoveryOptions) -> Self {
        let mut registry = Self::new();
        for kind in EditorKind::all() {
            registry.register(CommandProvider::for_editor(kind, options.clone()));
        }
        registry
    }

    /// Append a provider at the lowest priority.
    pub fn register(&mut self, provider: impl DiscoveryProvider + 'static) -> &mut Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Provider names, in priority order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Ask every provider to probe up front.
    ///
    /// Returns the number of providers that found something.
    pub async fn initialize(&mut self) -> usize {
        let mut available = 0;
        for provider in &mut self.providers {
            if provider.probe().await {
                available += 1;
            } else {
                tracing::debug!(provider = provider.name(), "provider found nothing");
            }
        }
        available
    }

    /// Lazily enumerate installations from every provider, in priority order.
    ///
    /// Each call starts a fresh enumeration. When a provider yields an error,
    /// the rest of that provider's items are discarded and enumeration
    /// continues with the next provider.
    pub fn installations(&mut self) -> BoxStream<'_, Installation> {
        stream::iter(self.providers.iter_mut())
            .flat_map(|provider| {
                let name = provider.name().to_string();
                provider
                    .list_all()
                    .inspect(move |item| {
                        if let Err(e) = item {
                            tracing::warn!(
                                provider = %name,
                                error = %e,
                                "provider failed during enumeration; skipping its remaining results"
                            );
                        }
                    })
                    .take_while(|item| future::ready(item.is_ok()))
                    .filter_map(|item| future::ready(item.ok()))
            })
            .boxed()
    }

    /// Collect [`installations`](Self::installations) into a vector.
    pub async fn list_installations(&mut self) -> Vec<Installation> {
        self.installations().collect().await
    }

    /// Find the first provider that recognises `path_or_command`.
    ///
    /// Providers are tried in priority order. A provider error is logged and
    /// treated as a non-match.
    pub async fn try_discover(&mut self, path_or_command: &str) -> Option<Installation> {
        for provider in &mut self.providers {
            match provider.try_match(path_or_command).await {
                Ok(Some(installation)) => return Some(installation),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        path_or_command,
                        error = %e,
                        "provider failed to match; trying the next one"
                    );
                }
            }
        }
        None
    }

    /// Drop every provider's cached discovery state.
    pub fn reset(&mut self) {
        for provider in &mut self.providers {
            provider.reset();
        }
    }
}
