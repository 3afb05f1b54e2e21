use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for a subsystem in the energy-balance model.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<SystemId>` to be pointer-optimized
///
/// The first allocated id is 1; id 0 is reserved as the "endpoint
/// unavailable" marker in extracted junction records.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SystemId(NonZeroU32);

impl SystemId {
    /// Create an id from its raw value. Returns `None` for 0.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Raw 1-based value.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemId({})", self.get())
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Monotonic allocator shared by structural elements and acoustic spaces.
///
/// Ids start at 1 and increase by 1 per allocation, never reused and never
/// renumbered, regardless of which entity family requested them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next id. Panics only on `u32` exhaustion.
    pub fn allocate(&mut self) -> SystemId {
        let id = SystemId::new(self.next).expect("allocator starts at 1");
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
