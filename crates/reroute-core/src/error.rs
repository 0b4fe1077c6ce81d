//! Core error types for reroute-core.
//!
//! The permission and sheet surfaces deliberately have no failure path:
//! an unreachable backend reads as an ordinary status value the caller
//! branches on. Errors exist only at the config-persistence and
//! flow-command seams.

use std::path::PathBuf;
use thiserror::Error;

use crate::flow::Screen;
use crate::permission::PermissionKind;

/// Core error type for reroute-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Onboarding flow command errors
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// Platform permission backend errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Config directory could not be resolved or created
    #[error("Config directory unavailable: {0}")]
    DataDirUnavailable(String),
}

/// Onboarding flow command errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    /// Only the location screen offers "Skip for Now".
    #[error("Screen '{0}' cannot be skipped")]
    CannotSkip(Screen),

    /// A permission outcome was applied to a screen that does not gate
    /// on that permission kind.
    #[error("Screen '{screen}' does not gate on the {kind} permission")]
    ScreenMismatch { screen: Screen, kind: PermissionKind },

    /// The flow already reached the main screen.
    #[error("Onboarding flow is already complete")]
    AlreadyComplete,
}

/// Errors surfaced by a [`PermissionProvider`](crate::PermissionProvider)
/// implementation. The controller absorbs these into status values; they
/// never reach the screen layer.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The platform permission API could not be reached.
    #[error("Permission backend unreachable: {0}")]
    Unreachable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
