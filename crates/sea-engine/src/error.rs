//! Error types for engine adapter operations.

use thiserror::Error;

/// Errors surfaced by the physics-engine collaborator.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Physics engine unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Capability not supported: {what}")]
    Unsupported { what: &'static str },

    #[error("Native construction failed: {what}")]
    Construction { what: String },

    #[error("Solve failed: {what}")]
    Solve { what: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
