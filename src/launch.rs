//! Opening files in a discovered editor.
//!
//! The editor is spawned detached: nothing waits on it or reads its output.
//! Failures are returned as `false` (or a [`LaunchError`] from
//! [`LaunchInvoker::try_open`]) and reported through an injected
//! [`DiagnosticSink`], never raised to the host.

use crate::detection::find_executable;
use crate::Installation;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use thiserror::Error;

/// Receiver for user-facing launch diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Informational message (e.g. the command being run).
    fn info(&self, message: &str);

    /// A launch the user asked for has failed.
    fn error(&self, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Errors that can occur when launching an editor.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No command to run.
    #[error("editor command is not set")]
    EmptyCommand,

    /// The platform refused to start the process.
    #[error("failed to launch {command}: {source}")]
    Spawn {
        /// The command that failed.
        command: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },
}

/// Program and argument vector for one launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchInvocation {
    /// Command as given (name or path).
    pub program: String,
    /// Arguments, one argv entry each. No shell quoting is involved.
    pub args: Vec<OsString>,
}

/// Build the launch arguments for opening `file` in `command`.
///
/// - `line > 0`: `[project] --goto <file>:<line>:<column>`, column as given
/// - `line == 0`: `[project] <file>`
///
/// `project` is prepended only if it is non-empty and an existing directory,
/// so the editor opens the folder first and then navigates within it.
pub fn build_invocation(
    command: &str,
    file: &Path,
    line: u32,
    column: u32,
    project: Option<&Path>,
) -> Result<LaunchInvocation, LaunchError> {
    if command.trim().is_empty() {
        return Err(LaunchError::EmptyCommand);
    }

    let mut args = Vec::with_capacity(3);

    if let Some(folder) = project.filter(|p| !p.as_os_str().is_empty() && p.is_dir()) {
        args.push(folder.as_os_str().to_owned());
    }

    if line > 0 {
        let mut target = file.as_os_str().to_owned();
        target.push(format!(":{line}:{column}"));
        args.push(OsString::from("--goto"));
        args.push(target);
    } else {
        args.push(file.as_os_str().to_owned());
    }

    Ok(LaunchInvocation {
        program: command.to_string(),
        args,
    })
}

/// Launches editors and reports failures to a [`DiagnosticSink`].
///
/// # Example
///
/// ```rust,no_run
/// use editor_discovery::LaunchInvoker;
/// use std::path::Path;
///
/// let launcher = LaunchInvoker::new();
/// let ok = launcher.open("code", Path::new("src/main.rs"), 42, 7, Some(Path::new(".")));
/// if !ok {
///     eprintln!("could not open the editor");
/// }
/// ```
#[derive(Clone)]
pub struct LaunchInvoker {
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for LaunchInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchInvoker {
    /// A launcher that reports through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// A launcher that reports through `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Open `file` at `line`/`column`, returning `false` on any failure.
    ///
    /// A `line` of 0 opens the file without positioning.
    pub fn open(
        &self,
        command: &str,
        file: &Path,
        line: u32,
        column: u32,
        project: Option<&Path>,
    ) -> bool {
        match self.try_open(command, file, line, column, project) {
            Ok(()) => true,
            Err(e) => {
                self.sink.error(&format!("Error opening editor: {e}"));
                false
            }
        }
    }

    /// Open `file` with `installation`'s command.
    pub fn open_installation(
        &self,
        installation: &Installation,
        file: &Path,
        line: u32,
        column: u32,
        project: Option<&Path>,
    ) -> bool {
        self.open(&installation.command, file, line, column, project)
    }

    /// Like [`open`](Self::open), but returns the failure instead of
    /// reporting it.
    pub fn try_open(
        &self,
        command: &str,
        file: &Path,
        line: u32,
        column: u32,
        project: Option<&Path>,
    ) -> Result<(), LaunchError> {
        let invocation = build_invocation(command, file, line, column, project)?;
        self.sink.info(&format!(
            "Opening {} in {}",
            file.display(),
            invocation.program
        ));
        spawn_detached(&invocation)
    }
}

/// Spawn without waiting. The child keeps running after we return and is
/// reaped by a background thread once it exits.
fn spawn_detached(invocation: &LaunchInvocation) -> Result<(), LaunchError> {
    // Resolve through the search path ourselves so Windows `.cmd` shims work.
    let program: PathBuf =
        find_executable(&invocation.program).unwrap_or_else(|| PathBuf::from(&invocation.program));

    Command::new(&program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(reap_in_background)
        .map_err(|source| LaunchError::Spawn {
            command: invocation.program.clone(),
            source,
        })
}

/// Wait on `child` off the caller's thread so it never lingers as a zombie.
fn reap_in_background(mut child: Child) {
    let pid = child.id();
    let spawned = std::thread::Builder::new()
        .name("editor-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => tracing::debug!(pid, %status, "editor launcher exited"),
            Err(e) => tracing::debug!(pid, error = %e, "failed to wait on editor launcher"),
        });
    if let Err(e) = spawned {
        tracing::warn!(pid, error = %e, "could not start reaper thread");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingSink {
        infos: Mutex<Vec<String>>,
        errors: Mutex<Vec<String>>,
    }

    impl DiagnosticSink for RecordingSink {
        fn info(&self, message: &str) {
            self.infos.lock().unwrap().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }

    fn os(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_line_zero_is_bare_path() {
        let inv = build_invocation("code", Path::new("/src/main.rs"), 0, 5, None).unwrap();
        assert_eq!(inv.program, "code");
        assert_eq!(inv.args, os(&["/src/main.rs"]));
    }

    #[test]
    fn test_positive_line_uses_goto() {
        let inv = build_invocation("code", Path::new("/src/main.rs"), 42, 10, None).unwrap();
        assert_eq!(inv.args, os(&["--goto", "/src/main.rs:42:10"]));
    }

    #[test]
    fn test_column_is_passed_through() {
        let inv = build_invocation("code", Path::new("lib.rs"), 3, 0, None).unwrap();
        assert_eq!(inv.args, os(&["--goto", "lib.rs:3:0"]));
    }

    #[test]
    fn test_path_with_spaces_is_single_argument() {
        let inv = build_invocation("code", Path::new("/my project/a b.rs"), 1, 1, None).unwrap();
        assert_eq!(inv.args, os(&["--goto", "/my project/a b.rs:1:1"]));
    }

    #[test]
    fn test_existing_project_folder_is_prepended() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().to_str().unwrap();

        let goto = build_invocation("code", Path::new("a.rs"), 7, 2, Some(dir.path())).unwrap();
        assert_eq!(goto.args, os(&[folder, "--goto", "a.rs:7:2"]));

        let bare = build_invocation("code", Path::new("a.rs"), 0, 0, Some(dir.path())).unwrap();
        assert_eq!(bare.args, os(&[folder, "a.rs"]));
    }

    #[test]
    fn test_missing_or_empty_project_folder_is_ignored() {
        let missing = build_invocation(
            "code",
            Path::new("a.rs"),
            0,
            0,
            Some(Path::new("/definitely/not/a/project")),
        )
        .unwrap();
        assert_eq!(missing.args, os(&["a.rs"]));

        let empty = build_invocation("code", Path::new("a.rs"), 0, 0, Some(Path::new(""))).unwrap();
        assert_eq!(empty.args, os(&["a.rs"]));
    }

    #[test]
    fn test_project_folder_that_is_a_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Cargo.toml");
        std::fs::write(&file, "").unwrap();

        let inv = build_invocation("code", Path::new("a.rs"), 0, 0, Some(&file)).unwrap();
        assert_eq!(inv.args, os(&["a.rs"]));
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let result = build_invocation("  ", Path::new("a.rs"), 1, 1, None);
        assert!(matches!(result, Err(LaunchError::EmptyCommand)));
    }

    #[test]
    fn test_open_empty_command_reports_and_returns_false() {
        let sink = Arc::new(RecordingSink::default());
        let launcher = LaunchInvoker::with_sink(sink.clone());

        assert!(!launcher.open("", Path::new("a.rs"), 1, 1, None));

        let errors = sink.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("editor command is not set"));
    }

    #[test]
    fn test_open_missing_executable_returns_false() {
        let sink = Arc::new(RecordingSink::default());
        let launcher = LaunchInvoker::with_sink(sink.clone());

        let ok = launcher.open(
            "definitely_not_a_real_editor_12345",
            Path::new("a.rs"),
            1,
            1,
            None,
        );

        assert!(!ok);
        let errors = sink.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("definitely_not_a_real_editor_12345"));
    }

    #[test]
    fn test_try_open_spawn_error_kind() {
        let launcher = LaunchInvoker::with_sink(Arc::new(RecordingSink::default()));
        let result = launcher.try_open("/nonexistent/bin/code", Path::new("a.rs"), 0, 0, None);
        assert!(matches!(result, Err(LaunchError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_spawns_without_waiting() {
        let sink = Arc::new(RecordingSink::default());
        let launcher = LaunchInvoker::with_sink(sink.clone());
        let inst = Installation::new("Fake", "true", crate::UNKNOWN_VERSION);

        assert!(launcher.open_installation(&inst, Path::new("a.rs"), 3, 4, None));
        assert!(sink.errors.lock().unwrap().is_empty());
        assert_eq!(sink.infos.lock().unwrap().len(), 1);
    }
}
