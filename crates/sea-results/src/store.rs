//! Interchange encodings for result bundles.
//!
//! Two encodings exist: a self-describing JSON document and a binary
//! array-store of the same sections. The loader dispatches on the file
//! extension. When the binary backend is compiled out, binary export
//! falls back to the text encoding automatically.

use crate::types::ResultBundle;
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension used by the binary array-store encoding.
pub const BINARY_EXTENSION: &str = "bin";

/// Write the bundle as a self-describing JSON document.
pub fn save_json(path: &Path, bundle: &ResultBundle) -> ResultsResult<()> {
    let content = serde_json::to_string_pretty(bundle)?;
    fs::write(path, content)?;
    Ok(())
}

/// Read a bundle from a JSON document.
pub fn load_json(path: &Path) -> ResultsResult<ResultBundle> {
    let content = fs::read_to_string(path)?;
    let bundle = serde_json::from_str(&content)?;
    Ok(bundle)
}

/// Write the bundle in the binary array-store encoding.
///
/// Returns the path actually written: with the binary backend compiled
/// out the export falls back to JSON under a rewritten extension.
#[cfg(feature = "binary")]
pub fn save_binary(path: &Path, bundle: &ResultBundle) -> ResultsResult<PathBuf> {
    let bytes = bincode::serialize(bundle).map_err(|e| ResultsError::Binary(e.to_string()))?;
    fs::write(path, bytes)?;
    Ok(path.to_path_buf())
}

#[cfg(not(feature = "binary"))]
pub fn save_binary(path: &Path, bundle: &ResultBundle) -> ResultsResult<PathBuf> {
    tracing::warn!(
        path = %path.display(),
        "binary backend not available, falling back to JSON export"
    );
    let fallback = path.with_extension("json");
    save_json(&fallback, bundle)?;
    Ok(fallback)
}

#[cfg(feature = "binary")]
fn load_binary(path: &Path) -> ResultsResult<ResultBundle> {
    let bytes = fs::read(path)?;
    bincode::deserialize(&bytes).map_err(|e| ResultsError::Binary(e.to_string()))
}

#[cfg(not(feature = "binary"))]
fn load_binary(_path: &Path) -> ResultsResult<ResultBundle> {
    Err(ResultsError::UnsupportedFormat {
        extension: BINARY_EXTENSION.to_string(),
    })
}

/// Load a bundle from either encoding, dispatching on the extension.
pub fn load(path: &Path) -> ResultsResult<ResultBundle> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(BINARY_EXTENSION) => load_binary(path),
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        Some(other) => Err(ResultsError::UnsupportedFormat {
            extension: other.to_string(),
        }),
        None => Err(ResultsError::UnsupportedFormat {
            extension: String::new(),
        }),
    }
}
