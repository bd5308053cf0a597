//! Credential gate.
//!
//! Collects the administrator secret once at startup and uses it to set the
//! executable bit on the managed scripts. Authentication failures discard
//! the secret and re-prompt; the operator may cancel at any point. The
//! secret lives in process memory only and is never persisted or logged.

use std::fmt::{Debug, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::{AppError, Result};

/// Opaque administrator secret. `Debug` output is redacted.
pub struct Credential(String);

impl Credential {
    /// Wrap a secret string collected from the operator.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Borrow the raw secret for piping to the privileged command.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Terminal state of the credential gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Every target script is now executable.
    Granted,
    /// The operator cancelled the prompt; protected actions must be
    /// disabled by the caller.
    Cancelled,
}

/// Source of credential submissions.
///
/// The panel implements this with a masked modal prompt; tests script it.
pub trait CredentialPrompt {
    /// Ask the operator for the secret. `Ok(None)` means the prompt was
    /// cancelled or closed. `last_error` carries the failure detail from
    /// the previous attempt, for display.
    ///
    /// # Errors
    ///
    /// Returns an error only when the prompt surface itself fails.
    fn prompt(&mut self, last_error: Option<&str>) -> Result<Option<Credential>>;
}

/// Privileged permission elevation on a single target path.
pub trait PrivilegeRunner {
    /// Set the executable bit on `target` using `secret`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Credential` when the privileged command exits
    /// non-zero (treated as an authentication failure and retried), or any
    /// other variant for non-retryable plumbing failures.
    fn make_executable(&mut self, secret: &Credential, target: &Path) -> Result<()>;
}

/// Runs `sudo -S -k chmod +x <target>` with the secret piped on stdin.
///
/// The exit code is the sole success signal; stderr is captured only for
/// the operator-facing error message. `-k` drops any cached sudo ticket so
/// each attempt genuinely re-authenticates.
pub struct SudoChmod {
    program: String,
}

impl SudoChmod {
    /// Runner using the system `sudo`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "sudo".into(),
        }
    }

    /// Runner invoking an alternative elevation program, for tests.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SudoChmod {
    fn default() -> Self {
        Self::new()
    }
}

impl PrivilegeRunner for SudoChmod {
    fn make_executable(&mut self, secret: &Credential, target: &Path) -> Result<()> {
        let mut child = Command::new(&self.program)
            .arg("-S")
            .arg("-k")
            .arg("chmod")
            .arg("+x")
            .arg(target)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| AppError::Io(format!("cannot spawn {}: {err}", self.program)))?;

        // Best-effort write; the elevation program may exit without reading.
        if let Some(mut stdin) = child.stdin.take() {
            let _ = writeln!(stdin, "{}", secret.expose());
        }

        let output = child
            .wait_with_output()
            .map_err(|err| AppError::Io(format!("elevation process failed: {err}")))?;

        if output.status.success() {
            Ok(())
        } else {
            let detail = String::from_utf8_lossy(&output.stderr);
            let detail = detail.trim();
            Err(AppError::Credential(if detail.is_empty() {
                "authentication failed".into()
            } else {
                detail.to_owned()
            }))
        }
    }
}

/// Run the gate: prompt, elevate each target, retry on authentication
/// failure until success or cancellation.
///
/// # Errors
///
/// Propagates prompt-surface failures and non-retryable runner errors
/// (anything other than `AppError::Credential`).
pub fn obtain_and_apply(
    prompt: &mut dyn CredentialPrompt,
    runner: &mut dyn PrivilegeRunner,
    targets: &[PathBuf],
) -> Result<GateOutcome> {
    let mut last_error: Option<String> = None;

    loop {
        let Some(secret) = prompt.prompt(last_error.as_deref())? else {
            info!("credential prompt cancelled by operator");
            return Ok(GateOutcome::Cancelled);
        };

        match apply_all(&secret, runner, targets) {
            Ok(()) => {
                info!(targets = targets.len(), "scripts made executable");
                return Ok(GateOutcome::Granted);
            }
            Err(AppError::Credential(detail)) => {
                warn!("privilege elevation rejected, discarding secret");
                last_error = Some(detail);
            }
            Err(err) => return Err(err),
        }
    }
}

fn apply_all(
    secret: &Credential,
    runner: &mut dyn PrivilegeRunner,
    targets: &[PathBuf],
) -> Result<()> {
    for target in targets {
        runner.make_executable(secret, target)?;
    }
    Ok(())
}
