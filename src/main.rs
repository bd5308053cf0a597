#![forbid(unsafe_code)]

//! `stack-panel` — terminal control panel binary.
//!
//! Bootstraps logging and configuration, then hands the terminal to the
//! panel: credential gate first, action loop until the operator quits.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use stack_panel::{panel, AppError, PanelConfig, Result};

#[derive(Debug, Parser)]
#[command(
    name = "stack-panel",
    about = "Terminal control panel for the managed application stack",
    version,
    long_about = None
)]
struct Cli {
    /// Path to the TOML configuration file; missing file means defaults.
    #[arg(long, default_value = "stack-panel.toml")]
    config: PathBuf,

    /// Log file path. The terminal itself belongs to the panel.
    #[arg(long, default_value = "stack-panel.log")]
    log_file: PathBuf,

    /// Override the properties file path from the config.
    #[arg(long)]
    properties: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_file)?;
    info!("stack-panel bootstrap");

    let mut config = PanelConfig::load_or_default(&args.config)?;
    if let Some(properties) = args.properties {
        config.properties_path = properties;
    }
    info!(
        stack_dir = %config.stack_dir.display(),
        properties = %config.properties_path.display(),
        "configuration loaded"
    );

    panel::run(config)
}

fn init_tracing(log_file: &Path) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = File::options()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|err| AppError::Config(format!("cannot open log file: {err}")))?;

    fmt()
        .with_env_filter(env_filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?;

    Ok(())
}
