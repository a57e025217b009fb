//! Core error types.

use crate::action::Action;
use crate::state::StateId;
use thiserror::Error;

/// Errors from the turntable engine.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// The requested action has no transition from the current state.
    /// The resource is left unchanged.
    #[error("{}", .action.rejection_message())]
    InvalidTransition { action: Action, state: StateId },

    /// The track catalog could not supply a track for a vinyl load.
    /// The resource is left unchanged.
    #[error("{reason}")]
    CatalogUnavailable { reason: String },

    /// The transition table failed validation. Raised at startup, never
    /// during request handling.
    #[error("invalid transition table: {reason}")]
    InvalidTable { reason: String },
}

impl CoreError {
    /// Returns a stable error code suitable for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::InvalidTransition { .. } => "INVALID_STATE_TRANSITION",
            CoreError::CatalogUnavailable { .. } => "INTERNAL_ERROR",
            CoreError::InvalidTable { .. } => "INTERNAL_ERROR",
        }
    }
}
