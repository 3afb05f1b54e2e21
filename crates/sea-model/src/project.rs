//! Project container: metadata, materials, registry, analysis settings.

use crate::registry::Registry;
use crate::schema::{FrequencyRange, Material};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current project file format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl ProjectMetadata {
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            name: name.to_string(),
            description: String::new(),
            author: String::new(),
            created: now,
            modified: now,
        }
    }
}

/// The caller-visible project: owns all declared entities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub metadata: ProjectMetadata,
    #[serde(default)]
    pub materials: BTreeMap<String, Material>,
    #[serde(default)]
    pub registry: Registry,
    #[serde(default)]
    pub frequency_range: FrequencyRange,
}

impl Project {
    pub fn new(name: &str) -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: ProjectMetadata::new(name),
            materials: BTreeMap::new(),
            registry: Registry::new(),
            frequency_range: FrequencyRange::default(),
        }
    }

    /// Add a material to the project library, keyed by name.
    pub fn add_material(&mut self, material: Material) -> String {
        let name = material.name.clone();
        self.materials.insert(name.clone(), material);
        self.touch();
        name
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    pub fn set_frequency_range(&mut self, range: FrequencyRange) {
        self.frequency_range = range;
        self.touch();
    }

    fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }
}
