//! Bounded, non-interactive probing of candidate executables.

use super::find_executable;
use crate::DiscoveryError;
use futures::future::BoxFuture;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Outcome of one probe.
///
/// Always fully populated; a probe never returns an error or panics.
/// `failure` is the explicit failure kind, `None` on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Exit code, if the process ran to completion and reported one.
    pub exit_code: Option<i32>,

    /// Captured output: stdout, or stderr when stdout was empty.
    pub output: Option<String>,

    /// Why the probe failed, `None` if it succeeded.
    pub failure: Option<DiscoveryError>,
}

impl ProbeResult {
    /// A successful probe with the given output.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            output: Some(output.into()),
            failure: None,
        }
    }

    /// A probe that failed before producing an exit code.
    pub fn failed(failure: DiscoveryError) -> Self {
        Self {
            exit_code: None,
            output: None,
            failure: Some(failure),
        }
    }

    /// `true` if the process started and exited with code 0 in time.
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Capability to run a candidate command and report what happened.
///
/// [`SystemProbe`] is the real implementation. Tests substitute their own to
/// script outcomes and count calls.
pub trait CommandProbe: Send + Sync {
    /// Run `command` with `args`, killing it if it outlives `limit`.
    fn probe<'a>(
        &'a self,
        command: &'a str,
        args: &'a [String],
        limit: Duration,
    ) -> BoxFuture<'a, ProbeResult>;
}

/// Probes by spawning real processes via `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl CommandProbe for SystemProbe {
    fn probe<'a>(
        &'a self,
        command: &'a str,
        args: &'a [String],
        limit: Duration,
    ) -> BoxFuture<'a, ProbeResult> {
        Box::pin(run_probe(command, args, limit))
    }
}

/// Spawn `command` with captured output and no stdin, bounded by `limit`.
///
/// Failure mapping:
/// - `NotFound` if the executable cannot be located (nothing is spawned)
/// - `PermissionDenied` / `Io` if spawning or waiting fails
/// - `Timeout` if it does not exit in time; the child is killed on drop
/// - `NonZeroExit` if it exits unsuccessfully, output is still captured
async fn run_probe(command: &str, args: &[String], limit: Duration) -> ProbeResult {
    let Some(path) = find_executable(command) else {
        tracing::debug!(command, "probe: executable not found");
        return ProbeResult::failed(DiscoveryError::NotFound);
    };

    let mut cmd = Command::new(&path);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(windows)]
    {
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    let output = match timeout(limit, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            tracing::debug!(command, error = %e, "probe: failed to run");
            return ProbeResult::failed(DiscoveryError::from_io(&e));
        }
        Err(_) => {
            tracing::debug!(command, ?limit, "probe: timed out, process killed");
            return ProbeResult::failed(DiscoveryError::Timeout);
        }
    };

    // Some tools write their version to stderr.
    let raw = if !output.stdout.is_empty() {
        output.stdout
    } else {
        output.stderr
    };
    let text = String::from_utf8_lossy(&raw).into_owned();
    let exit_code = output.status.code();

    let failure = if output.status.success() {
        None
    } else {
        Some(DiscoveryError::NonZeroExit { code: exit_code })
    };
    tracing::debug!(command, ?exit_code, succeeded = failure.is_none(), "probe finished");

    ProbeResult {
        exit_code,
        output: Some(text),
        failure,
    }
}
