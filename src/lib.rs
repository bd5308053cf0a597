#![forbid(unsafe_code)]

//! `stack-panel` — terminal control panel for a managed application stack.
//!
//! Starts and stops externally supplied shell scripts, optionally rewriting
//! the MongoDB URI line of a Spring properties file before starting, behind
//! a one-time administrator credential gate.

pub mod config;
pub mod credential;
pub mod errors;
pub mod panel;
pub mod properties;
pub mod session;

pub use config::PanelConfig;
pub use errors::{AppError, Result};
