//! sea-core: stable foundation for seaflow.
//!
//! Contains:
//! - ids (system identifier allocation for the energy-balance model)
//! - dof (wave-type / degree-of-freedom codes)
//! - numeric (float helpers + angular-frequency conversions)
//! - error (shared error types)

pub mod dof;
pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use dof::*;
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
