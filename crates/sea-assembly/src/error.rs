//! Error types for model assembly.

use sea_engine::EngineError;
use thiserror::Error;

/// Errors that abort the whole assembly step.
///
/// Per-entity conversion failures are not here: those are recovered
/// locally (entity skipped, warning logged) and reported through
/// [`crate::SkippedEntity`] diagnostics.
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Physics engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("No systems could be converted; nothing to assemble")]
    NoSystems,

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

pub type AssemblyResult<T> = Result<T, AssemblyError>;
