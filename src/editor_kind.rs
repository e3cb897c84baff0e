//! Editor kind enum identifying the built-in editor backends.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A built-in editor backend.
///
/// Each variant is a VS Code derivative that follows the same command-line
/// conventions (`--version`, `--goto path:line:column`), but ships under
/// different executable names.
///
/// This enum is marked `#[non_exhaustive]`; editors outside this list are
/// supported by registering a custom [`DiscoveryProvider`](crate::DiscoveryProvider).
///
/// # Example
///
/// ```rust
/// use editor_discovery::EditorKind;
///
/// for kind in EditorKind::all() {
///     println!("{}: {:?}", kind.display_name(), kind.candidate_commands());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[non_exhaustive]
pub enum EditorKind {
    /// Cursor (cursor CLI)
    Cursor,
    /// VSCodium (codium CLI)
    VsCodium,
    /// Void editor (void CLI, falling back to the stock `code` launcher)
    Void,
}

impl EditorKind {
    /// Command names to probe, in priority order.
    ///
    /// The first name that answers `--version` successfully wins.
    ///
    /// ```rust
    /// use editor_discovery::EditorKind;
    ///
    /// assert_eq!(EditorKind::Cursor.candidate_commands(), &["cursor"]);
    /// ```
    pub fn candidate_commands(&self) -> &'static [&'static str] {
        match self {
            Self::Cursor => &["cursor"],
            Self::VsCodium => &["codium", "vscodium"],
            Self::Void => &["void", "voideditor", "code"],
        }
    }

    /// Human-readable display name for the editor.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cursor => "Cursor",
            Self::VsCodium => "VSCodium",
            Self::Void => "Void Editor",
        }
    }

    /// Iterator over all built-in editors, in registry priority order.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
