//! Entity registry and system identifier assignment.

use crate::schema::{AcousticSpace, Junction, Load, StructuralElement};
use sea_core::{IdAllocator, SystemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A registered subsystem: structural element or acoustic space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "family")]
pub enum SystemEntity {
    Structure(StructuralElement),
    Space(AcousticSpace),
}

impl SystemEntity {
    pub fn name(&self) -> &str {
        match self {
            SystemEntity::Structure(e) => &e.name,
            SystemEntity::Space(s) => &s.name,
        }
    }
}

/// A subsystem together with its assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisteredSystem {
    pub id: SystemId,
    pub entity: SystemEntity,
}

/// The declared entity model.
///
/// Subsystem ids come from one monotonic allocator shared across both
/// entity families: registering three structures and then two spaces
/// yields ids 1..5 in registration order. Ids are assigned exactly once,
/// at registration, and are never reused or renumbered; entities cannot be
/// removed or edited afterwards.
///
/// Junctions and loads are keyed by name; registering a second entity
/// under an existing name silently replaces the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RegistryData", into = "RegistryData")]
pub struct Registry {
    systems: Vec<RegisteredSystem>,
    junctions: BTreeMap<String, Junction>,
    loads: BTreeMap<String, Load>,
    allocator: IdAllocator,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            junctions: BTreeMap::new(),
            loads: BTreeMap::new(),
            allocator: IdAllocator::new(),
        }
    }

    /// Register a structural element, assigning the next system id.
    pub fn register_structure(&mut self, element: StructuralElement) -> SystemId {
        self.register(SystemEntity::Structure(element))
    }

    /// Register an acoustic space, assigning the next system id.
    pub fn register_space(&mut self, space: AcousticSpace) -> SystemId {
        self.register(SystemEntity::Space(space))
    }

    fn register(&mut self, entity: SystemEntity) -> SystemId {
        let id = self.allocator.allocate();
        self.systems.push(RegisteredSystem { id, entity });
        id
    }

    /// Register a junction under its name, replacing any earlier junction
    /// with the same name.
    pub fn register_junction(&mut self, junction: Junction) -> String {
        let name = junction.name.clone();
        self.junctions.insert(name.clone(), junction);
        name
    }

    /// Register a load under its name, replacing any earlier load with the
    /// same name.
    pub fn register_load(&mut self, load: Load) -> String {
        let name = load.name.clone();
        self.loads.insert(name.clone(), load);
        name
    }

    pub fn systems(&self) -> &[RegisteredSystem] {
        &self.systems
    }

    pub fn system(&self, id: SystemId) -> Option<&RegisteredSystem> {
        self.systems.iter().find(|s| s.id == id)
    }

    pub fn junctions(&self) -> &BTreeMap<String, Junction> {
        &self.junctions
    }

    pub fn loads(&self) -> &BTreeMap<String, Load> {
        &self.loads
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of the registry. The allocator state is not stored; it
/// is rebuilt from the highest assigned id on load, which is sound because
/// ids are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistryData {
    #[serde(default)]
    systems: Vec<RegisteredSystem>,
    #[serde(default)]
    junctions: BTreeMap<String, Junction>,
    #[serde(default)]
    loads: BTreeMap<String, Load>,
}

impl From<RegistryData> for Registry {
    fn from(data: RegistryData) -> Self {
        let mut allocator = IdAllocator::new();
        let max_id = data.systems.iter().map(|s| s.id.get()).max().unwrap_or(0);
        for _ in 0..max_id {
            allocator.allocate();
        }
        Self {
            systems: data.systems,
            junctions: data.junctions,
            loads: data.loads,
            allocator,
        }
    }
}

impl From<Registry> for RegistryData {
    fn from(registry: Registry) -> Self {
        Self {
            systems: registry.systems,
            junctions: registry.junctions,
            loads: registry.loads,
        }
    }
}
