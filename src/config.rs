//! Panel configuration parsing and validation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{AppError, Result};

fn default_stack_dir() -> PathBuf {
    PathBuf::from(".sysStack")
}

fn default_start_script() -> String {
    "start.sh".into()
}

fn default_stop_script() -> String {
    "stop.sh".into()
}

fn default_debug_script() -> String {
    "start-debug.sh".into()
}

fn default_properties_path() -> PathBuf {
    PathBuf::from("backend/src/main/resources/application.properties")
}

fn default_title() -> String {
    "Stack Management Panel".into()
}

fn default_footer() -> String {
    "stack-panel".into()
}

/// Panel configuration parsed from `stack-panel.toml`.
///
/// Every field has a default matching the conventional stack layout, so a
/// missing config file is equivalent to an empty one.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct PanelConfig {
    /// Directory holding the managed scripts, relative to the working dir.
    #[serde(default = "default_stack_dir")]
    pub stack_dir: PathBuf,
    /// File name of the normal start script inside `stack_dir`.
    #[serde(default = "default_start_script")]
    pub start_script: String,
    /// File name of the stop script inside `stack_dir`.
    #[serde(default = "default_stop_script")]
    pub stop_script: String,
    /// File name of the debug start script inside `stack_dir`.
    #[serde(default = "default_debug_script")]
    pub debug_script: String,
    /// Path to the Spring properties file whose MongoDB URI line is managed.
    #[serde(default = "default_properties_path")]
    pub properties_path: PathBuf,
    /// Title banner shown at the top of the panel.
    #[serde(default = "default_title")]
    pub title: String,
    /// Footer line shown at the bottom of the panel.
    #[serde(default = "default_footer")]
    pub footer: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            stack_dir: default_stack_dir(),
            start_script: default_start_script(),
            stop_script: default_stop_script(),
            debug_script: default_debug_script(),
            properties_path: default_properties_path(),
            title: default_title(),
            footer: default_footer(),
        }
    }
}

impl PanelConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file exists but cannot be read,
    /// contains invalid TOML, or fails validation.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Absolute or working-dir-relative path to the normal start script.
    #[must_use]
    pub fn start_script_path(&self) -> PathBuf {
        self.stack_dir.join(&self.start_script)
    }

    /// Path to the stop script.
    #[must_use]
    pub fn stop_script_path(&self) -> PathBuf {
        self.stack_dir.join(&self.stop_script)
    }

    /// Path to the debug start script.
    #[must_use]
    pub fn debug_script_path(&self) -> PathBuf {
        self.stack_dir.join(&self.debug_script)
    }

    /// All script paths the credential gate must make executable.
    #[must_use]
    pub fn script_paths(&self) -> Vec<PathBuf> {
        vec![
            self.start_script_path(),
            self.stop_script_path(),
            self.debug_script_path(),
        ]
    }

    fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("start_script", &self.start_script),
            ("stop_script", &self.stop_script),
            ("debug_script", &self.debug_script),
        ] {
            if name.is_empty() {
                return Err(AppError::Config(format!("{field} must not be empty")));
            }
            if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
                return Err(AppError::Config(format!(
                    "{field} must be a bare file name, got {name:?}"
                )));
            }
        }

        if self.stack_dir.as_os_str().is_empty() {
            return Err(AppError::Config("stack_dir must not be empty".into()));
        }
        if self.properties_path.as_os_str().is_empty() {
            return Err(AppError::Config("properties_path must not be empty".into()));
        }

        Ok(())
    }
}
