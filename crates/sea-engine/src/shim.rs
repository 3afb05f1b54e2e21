//! Compatibility shims for known engine defects.
//!
//! Kept apart from the adapter traits so they can be deleted once the
//! engine ships fixed builds.

use crate::adapter::NativeSystem;
use tracing::debug;

/// Some engine builds construct cavity systems without the
/// wave-bearing-cavity flag, which the solve later reads unconditionally.
/// Ensure the attribute exists on every cavity before model construction.
pub fn apply_cavity_flags(systems: &mut [Box<dyn NativeSystem>]) {
    for system in systems {
        if system.kind().is_cavity() && system.cavity_flag().is_none() {
            debug!(id = %system.id(), "setting missing cavity flag");
            system.set_cavity_flag(false);
        }
    }
}
