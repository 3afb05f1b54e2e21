//! sea-post: post-treatment of a solved model.
//!
//! Pulls frequency axis, per-system metadata, modal data, coupling data,
//! energy/response/power arrays and the power-balance matrix out of the
//! solved native model into a self-contained [`sea_results::ResultBundle`],
//! applying engineering-unit conversion on the way. Extraction is
//! best-effort per field: a missing solver capability degrades to an empty
//! field with a warning and a typed diagnostic, never a hard failure.

pub mod diagnostics;
pub mod extract;
pub mod units;

pub use diagnostics::{ExtractionField, ExtractionIssue};
pub use extract::{Extraction, PostTreatment};
pub use units::{Quantity, UnitSelection};
