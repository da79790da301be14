//! CLI error types and exit codes.

use thiserror::Error;

use wattview_core::CoreError;

/// Exit codes for scripting.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const VALIDATION: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("{0}")]
    Config(#[from] wattview_config::ConfigError),

    /// Bad selection arguments (unknown server id, unknown VM ip).
    #[error("{message}")]
    Usage { message: String },

    /// Date-range validation failures, one message per line.
    #[error("{message}")]
    Validation { message: String },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(CoreError::BackendUnreachable { .. }) => exit_code::CONNECTION,
            Self::Core(CoreError::ValidationFailed { .. }) | Self::Validation { .. } => {
                exit_code::VALIDATION
            }
            Self::Usage { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}
