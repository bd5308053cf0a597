//! Session controller.
//!
//! Owns the three operator actions (start, start in debug, stop) and the
//! status line they mutate. Scripts are launched as detached processes;
//! the controller never waits on them and has no visibility into their
//! lifetime beyond whether the launch call itself failed.

use std::fmt::{Display, Formatter};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{error, info};

use crate::config::PanelConfig;
use crate::{properties, AppError, Result};

/// Outcome of the last action, rendered in the panel status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// No action taken yet.
    #[default]
    Idle,
    /// The start script was launched successfully.
    Running,
    /// The stop script was launched successfully.
    Stopped,
    /// The start script could not be launched.
    StartFailed,
    /// The stop script could not be launched.
    StopFailed,
}

impl Status {
    /// Human-readable status line text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Waiting",
            Self::Running => "Applications running",
            Self::Stopped => "Applications stopped",
            Self::StartFailed => "Failed to start",
            Self::StopFailed => "Failed to stop",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Flavor of the start action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    /// Launch via the normal start script.
    Normal,
    /// Launch via the debug start script.
    Debug,
}

/// What the operator's URI submission did to the properties file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriChange {
    /// Blank submission: the file was left untouched.
    Unchanged,
    /// The file now carries this URI.
    Updated(String),
}

/// Seam for launching a script as a detached process.
pub trait ScriptLauncher {
    /// Spawn `script` without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Script` when the process cannot be spawned.
    fn launch(&mut self, script: &Path) -> Result<()>;
}

/// Launcher that spawns the script with null stdio and drops the child
/// handle. The launched process outlives the panel.
#[derive(Debug, Default)]
pub struct DetachedLauncher;

impl ScriptLauncher for DetachedLauncher {
    fn launch(&mut self, script: &Path) -> Result<()> {
        if !script.is_file() {
            return Err(AppError::Script(format!(
                "script not found: {}",
                script.display()
            )));
        }

        Command::new(script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|err| {
                AppError::Script(format!("failed to launch {}: {err}", script.display()))
            })
    }
}

/// Drives the start/debug-start/stop actions and tracks [`Status`].
pub struct SessionController<L = DetachedLauncher> {
    config: PanelConfig,
    launcher: L,
    status: Status,
}

impl SessionController<DetachedLauncher> {
    /// Controller launching real detached processes.
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        Self::with_launcher(config, DetachedLauncher)
    }
}

impl<L: ScriptLauncher> SessionController<L> {
    /// Controller with a custom launcher, used by tests.
    #[must_use]
    pub fn with_launcher(config: PanelConfig, launcher: L) -> Self {
        Self {
            config,
            launcher,
            status: Status::default(),
        }
    }

    /// Current status line value.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Current MongoDB URI from the properties file, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Properties` if the file exists but is unreadable.
    pub fn current_uri(&self) -> Result<Option<String>> {
        properties::current_uri(&self.config.properties_path)
    }

    /// Apply the operator's replacement-URI submission.
    ///
    /// A blank submission keeps the file unchanged and does not block the
    /// launch step. Non-blank submissions are validated against the
    /// required scheme before the file is touched.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Properties` on a scheme mismatch or a file
    /// failure; in either case the file keeps its prior bytes.
    pub fn apply_uri_submission(&self, submission: &str) -> Result<UriChange> {
        let candidate = submission.trim();
        if candidate.is_empty() {
            return Ok(UriChange::Unchanged);
        }

        properties::update_uri(&self.config.properties_path, candidate)?;
        info!(key = properties::URI_KEY, "properties file updated");
        Ok(UriChange::Updated(candidate.to_owned()))
    }

    /// Launch the start script (normal or debug) detached.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Script` on launch failure, after setting the
    /// status to [`Status::StartFailed`].
    pub fn start(&mut self, mode: StartMode) -> Result<()> {
        let script = match mode {
            StartMode::Normal => self.config.start_script_path(),
            StartMode::Debug => self.config.debug_script_path(),
        };
        self.run_script(&script, Status::Running, Status::StartFailed)
    }

    /// Launch the stop script detached.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Script` on launch failure, after setting the
    /// status to [`Status::StopFailed`].
    pub fn stop(&mut self) -> Result<()> {
        let script = self.config.stop_script_path();
        self.run_script(&script, Status::Stopped, Status::StopFailed)
    }

    fn run_script(&mut self, script: &Path, ok: Status, failed: Status) -> Result<()> {
        match self.launcher.launch(script) {
            Ok(()) => {
                self.status = ok;
                info!(script = %script.display(), status = %ok, "script launched");
                Ok(())
            }
            Err(err) => {
                self.status = failed;
                error!(script = %script.display(), %err, "script launch failed");
                Err(err)
            }
        }
    }
}
