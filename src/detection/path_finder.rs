//! Executable lookup: search path first, then well-known install locations.

use std::path::{Path, PathBuf};

/// System directories checked when a bare name is not on PATH.
///
/// GUI launches (desktop entries, Dock) often run with a trimmed PATH that
/// misses these.
const FALLBACK_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin", "/snap/bin"];

/// macOS app bundles ship their CLI shim inside the bundle.
const MACOS_BUNDLE_BIN_DIRS: &[&str] = &[
    "/Applications/Cursor.app/Contents/Resources/app/bin",
    "/Applications/VSCodium.app/Contents/Resources/app/bin",
    "/Applications/Void.app/Contents/Resources/app/bin",
    "/Applications/Visual Studio Code.app/Contents/Resources/app/bin",
];

/// Find an executable by name or path.
///
/// Rooted paths bypass search-path resolution entirely and are returned only
/// if they exist. Bare names go through the `which` crate (which also knows
/// about `PATHEXT` on Windows, so `code` resolves to `code.cmd`), then the
/// fallback directories, then per-user locations.
///
/// Returns `None` if nothing matches.
pub(crate) fn find_executable(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let as_path = Path::new(name);
    if as_path.is_absolute() {
        return as_path.exists().then(|| as_path.to_path_buf());
    }

    if let Ok(path) = which::which(name) {
        return Some(path);
    }

    for dir in FALLBACK_DIRS.iter().chain(MACOS_BUNDLE_BIN_DIRS) {
        let path = PathBuf::from(dir).join(name);
        if path.is_file() {
            return Some(path);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        for sub in [".local/bin", "bin"] {
            let path = PathBuf::from(&home).join(sub).join(name);
            if path.is_file() {
                return Some(path);
            }
        }
    }

    None
}

/// File stem of a command, lower-cased, without a Windows launcher extension.
///
/// `"/opt/VSCodium/bin/Codium.EXE"` becomes `"codium"`.
pub(crate) fn command_stem(command: &str) -> String {
    let file_name = Path::new(command)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| command.to_string());
    let lower = file_name.to_ascii_lowercase();

    for ext in [".exe", ".cmd", ".bat"] {
        if let Some(stem) = lower.strip_suffix(ext) {
            return stem.to_string();
        }
    }
    lower
}
