//! # GUI Error Types
//!
//! All errors that can occur while configuring or switching screens.

use thiserror::Error;

/// Errors that can occur in the game interface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuiError {
    /// Invalid configuration file contents.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {reason}")]
    ConfigRead {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// A mode asked for a panel the registry doesn't have.
    #[error("panel {0} not registered")]
    UnknownPanel(String),

    /// A mode with this name is already registered.
    #[error("mode {0} already registered")]
    DuplicateMode(String),

    /// No mode with this name was registered.
    #[error("mode {0} not registered")]
    ModeNotRegistered(String),

    /// A mode refused to exit or enter.
    #[error("transition to mode {mode} failed: {reason}")]
    ModeTransition {
        /// Target mode.
        mode: String,
        /// Why it failed.
        reason: String,
    },
}

/// Result type for GUI operations.
pub type GuiResult<T> = Result<T, GuiError>;
