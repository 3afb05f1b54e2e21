//! sea-assembly: turns the declared entity model into a solver-ready
//! native model, decomposing multi-way junctions into pairwise couplings.

pub mod assemble;
pub mod decompose;
pub mod error;

pub use assemble::{AssembledModel, SkippedEntity, SkippedKind, assemble};
pub use decompose::{CouplingPlan, decompose};
pub use error::{AssemblyError, AssemblyResult};
