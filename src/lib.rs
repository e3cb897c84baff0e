//! # editor-discovery
//!
//! Discovery and launch of externally installed code editors (Cursor,
//! VSCodium, Void and other VS Code derivatives).
//!
//! The crate answers two questions for a host application:
//!
//! - which editor is installed? Candidate commands are probed with
//!   `--version` under a short timeout, and the first that answers is cached
//!   for the life of the [`InstallationCache`].
//! - how do I open `file:line:column` in it? [`LaunchInvoker`] builds the
//!   `--goto` invocation and spawns the editor without waiting.
//!
//! Absence of an editor is not an error: listing simply yields nothing. Only
//! a failed launch produces a diagnostic.
//!
//! ## Features
//!
//! - `EditorKind` enum identifying built-in editor backends
//! - `DiscoveryProvider` trait for pluggable backends, aggregated by
//!   `DiscoveryRegistry` with per-provider failure isolation
//! - `parse_version()` tolerant first-line version parsing
//! - `LaunchInvoker` fire-and-forget launching with injected diagnostics
//!
//! ## Example
//!
//! ```rust,no_run
//! use editor_discovery::{DiscoveryOptions, DiscoveryRegistry, LaunchInvoker};
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut registry = DiscoveryRegistry::with_defaults(DiscoveryOptions::default());
//!
//!     let installations = registry.list_installations().await;
//!     let Some(editor) = installations.first() else {
//!         println!("no supported editor installed");
//!         return;
//!     };
//!
//!     let launcher = LaunchInvoker::new();
//!     launcher.open_installation(editor, Path::new("src/lib.rs"), 12, 4, Some(Path::new(".")));
//! }
//! ```
//!
//! ## Concurrency
//!
//! Everything runs sequentially on the caller's task. Discovery state is
//! mutated through `&mut self`; hosts that share a registry between threads
//! must wrap it in a lock themselves.

mod cache;
mod detection;
mod editor_kind;
mod installation;
mod launch;
mod options;
mod provider;
mod registry;

pub use cache::{InstallationCache, ResolvedCommand};
pub use detection::{parse_version, try_parse_version, CommandProbe, ProbeResult, SystemProbe};
pub use editor_kind::EditorKind;
pub use installation::{DiscoveryError, Installation, UNKNOWN_VERSION};
pub use launch::{
    build_invocation, DiagnosticSink, LaunchError, LaunchInvocation, LaunchInvoker, TracingSink,
};
pub use options::DiscoveryOptions;
pub use provider::{CommandProvider, DiscoveryProvider};
pub use registry::DiscoveryRegistry;
