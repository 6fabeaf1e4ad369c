//! # Search Index Admin
//!
//! Command line front end for the search index gateway. It builds a gateway
//! from environment configuration and runs one gateway operation per
//! invocation.
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency initialization
//! - [`commands`]: Command line definition and command execution

pub mod commands;
pub mod config;

pub use commands::{Cli, Command};
pub use config::{AdminConfig, Dependencies, EngineKind};

use search_index_gateway::GatewayError;
use thiserror::Error;

/// Errors that can occur while running an admin command.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A destructive command was run without confirmation.
    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    /// Failed to read input.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Input or output was not valid JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Gateway or engine error.
    #[error(transparent)]
    GatewayError(#[from] GatewayError),
}

impl AdminError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
