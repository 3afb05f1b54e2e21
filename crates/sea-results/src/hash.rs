//! Content-based hashing for bundle identifiers.

use crate::types::ResultBundle;
use sha2::{Digest, Sha256};

/// Stable identifier for a bundle, computed over its canonical JSON
/// document. Equal bundles hash equal, including across an export/load
/// round trip.
pub fn compute_bundle_id(bundle: &ResultBundle) -> String {
    let mut hasher = Sha256::new();
    let document = serde_json::to_string(bundle).unwrap_or_default();
    hasher.update(document.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}
