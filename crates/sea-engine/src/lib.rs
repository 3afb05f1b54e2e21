//! sea-engine: adapter boundary to the external physics engine.
//!
//! The energy-balance solve itself is an external collaborator. This crate
//! defines the trait surface the rest of the workspace programs against:
//! material/system/coupling/load conversion, model construction and solve,
//! and the optional per-system and per-coupling capabilities (modal
//! analysis, coupling-loss-factor access). Capability absence is a typed
//! `None`, never a probe-and-catch.

pub mod adapter;
pub mod axis;
pub mod error;
pub mod shim;

#[cfg(feature = "testkit")]
pub mod testkit;

pub use adapter::*;
pub use axis::{FrequencyAxis, build_axis};
pub use error::{EngineError, EngineResult};
