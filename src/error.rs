//! Error types for the outbound guide.

use uuid::Uuid;

use crate::guide::action::Action;
use crate::guide::step::Step;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised by the decision wizard itself.
///
/// Neither variant is transient: both indicate a caller bug, never a policy
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Action {action} is not valid at step {step}")]
    InvalidAction { step: Step, action: Action },

    #[error("Undefined {catalog} reference: {key}")]
    UndefinedCatalogReference { catalog: &'static str, key: String },
}

/// Raised when the authentication precondition does not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Viewer is not authorized to use the guide")]
    Unauthorized,
}

/// Session registry errors (HTTP host only).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Session {id} not found")]
    NotFound { id: Uuid },

    #[error("Maximum concurrent sessions ({max}) reached")]
    CapacityReached { max: usize },
}

/// Result type alias for the guide.
pub type Result<T> = std::result::Result<T, Error>;
