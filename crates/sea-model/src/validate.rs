//! Project validation logic.

use crate::project::Project;
use crate::registry::Registry;
use sea_core::SystemId;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing reference: system {id} in {context}")]
    MissingReference { id: u32, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::project::FORMAT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let range = &project.frequency_range;
    if !(range.f_min > 0.0 && range.f_max > range.f_min) {
        return Err(ValidationError::InvalidValue {
            field: "frequency_range".to_string(),
            value: format!("{}..{}", range.f_min, range.f_max),
            reason: "f_min must be positive and below f_max".to_string(),
        });
    }

    validate_registry(&project.registry)
}

fn validate_registry(registry: &Registry) -> Result<(), ValidationError> {
    let known: HashSet<SystemId> = registry.systems().iter().map(|s| s.id).collect();

    for (name, junction) in registry.junctions() {
        if junction.systems.len() < 2 {
            return Err(ValidationError::InvalidValue {
                field: format!("junction '{name}' systems"),
                value: junction.systems.len().to_string(),
                reason: "a junction couples at least two systems".to_string(),
            });
        }
        for id in &junction.systems {
            if !known.contains(id) {
                return Err(ValidationError::MissingReference {
                    id: id.get(),
                    context: format!("junction '{name}'"),
                });
            }
        }
    }

    for (name, load) in registry.loads() {
        if !known.contains(&load.system) {
            return Err(ValidationError::MissingReference {
                id: load.system.get(),
                context: format!("load '{name}'"),
            });
        }
        if !load.magnitude.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("load '{name}' magnitude"),
                value: load.magnitude.to_string(),
                reason: "magnitude must be finite".to_string(),
            });
        }
        if let Some(spectrum) = &load.spectrum
            && spectrum.iter().any(|v| !v.is_finite())
        {
            return Err(ValidationError::InvalidValue {
                field: format!("load '{name}' spectrum"),
                value: "non-finite sample".to_string(),
                reason: "spectrum samples must be finite".to_string(),
            });
        }
    }

    Ok(())
}
