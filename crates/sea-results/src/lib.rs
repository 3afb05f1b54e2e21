//! sea-results: portable analysis result bundle and its interchange
//! encodings.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_bundle_id;
pub use store::{load, load_json, save_binary, save_json};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary encoding error: {0}")]
    Binary(String),

    #[error("Unsupported result format: {extension}")]
    UnsupportedFormat { extension: String },
}
