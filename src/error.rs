//! Error types for the annotator
//!
//! The core has few failure modes: most odd inputs (zero-area selections,
//! firing with no listeners, removing unknown annotations) are defined no-ops.
//! What remains are rejected state transitions and malformed host input.

use thiserror::Error;

use crate::models::StateKind;

#[derive(Debug, Error)]
pub enum AnnotatorError {
    /// The input is not legal in the current state; state is unchanged
    #[error("{input} is not allowed while {state}")]
    IllegalTransition { state: StateKind, input: String },

    /// An editor operation was requested while no editor is open
    #[error("No active editor")]
    NoActiveEditor,

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    #[error("Template rendering failed: {0}")]
    Template(#[from] mustache::Error),
}

impl AnnotatorError {
    pub fn illegal(state: StateKind, input: impl Into<String>) -> Self {
        AnnotatorError::IllegalTransition {
            state,
            input: input.into(),
        }
    }
}
