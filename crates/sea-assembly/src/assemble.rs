//! Model assembly against the physics-engine adapter.

use crate::decompose::decompose;
use crate::error::{AssemblyError, AssemblyResult};
use sea_core::SystemId;
use sea_engine::{EngineError, NativeModel, NativeSystem, PhysicsEngine, build_axis, shim};
use sea_model::Project;
use std::collections::HashSet;
use tracing::{info, warn};

/// What was left out of the assembled model, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntity {
    pub kind: SkippedKind,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkippedKind {
    System,
    Junction,
    Load,
}

/// A solver-ready model handle plus the per-entity conversion diagnostics.
pub struct AssembledModel {
    pub model: Box<dyn NativeModel>,
    pub skipped: Vec<SkippedEntity>,
}

impl AssembledModel {
    /// Run the external solve on the assembled model.
    pub fn solve(&mut self) -> AssemblyResult<()> {
        self.model.solve().map_err(AssemblyError::from)
    }
}

/// Assemble the declared model into a solver-ready native model.
///
/// Entities the engine declines are skipped with a warning; the assembly
/// only fails outright when the engine is unavailable, when no system at
/// all converts, or when native construction itself errors (a conservative
/// policy: no half-built model is ever returned).
pub fn assemble(
    project: &Project,
    engine: &dyn PhysicsEngine,
) -> AssemblyResult<AssembledModel> {
    engine.probe().map_err(|e| match e {
        EngineError::Unavailable { reason } => AssemblyError::EngineUnavailable(reason),
        other => AssemblyError::Engine(other),
    })?;

    let axis = build_axis(engine, &project.frequency_range);
    let ambient = engine.ambient_fluid();

    let mut natives: Vec<Box<dyn NativeSystem>> = Vec::new();
    let mut converted: HashSet<SystemId> = HashSet::new();
    let mut skipped: Vec<SkippedEntity> = Vec::new();

    for registered in project.registry.systems() {
        match engine.system(&registered.entity, registered.id, ambient.as_ref()) {
            Some(native) => {
                converted.insert(registered.id);
                natives.push(native);
            }
            None => {
                warn!(
                    system = registered.entity.name(),
                    id = %registered.id,
                    "engine declined system conversion, skipping"
                );
                skipped.push(SkippedEntity {
                    kind: SkippedKind::System,
                    name: registered.entity.name().to_string(),
                    reason: "engine declined conversion".to_string(),
                });
            }
        }
    }

    if natives.is_empty() {
        return Err(AssemblyError::NoSystems);
    }

    shim::apply_cavity_flags(&mut natives);

    let mut model = engine.model(natives, axis)?;
    let axis = model.axis().clone();

    for (name, junction) in project.registry.junctions() {
        if let Some(missing) = junction.systems.iter().find(|id| !converted.contains(*id)) {
            warn!(
                junction = %name,
                system = %missing,
                "junction references a system that did not convert, skipping"
            );
            skipped.push(SkippedEntity {
                kind: SkippedKind::Junction,
                name: name.clone(),
                reason: format!("participant system {missing} did not convert"),
            });
            continue;
        }

        for plan in decompose(junction) {
            let coupling = {
                let a = resolve(model.as_ref(), plan.a)?;
                let b = resolve(model.as_ref(), plan.b)?;
                engine.coupling(&junction.kind, (a, b))?
            };
            model.add_coupling(&plan.name, coupling);
        }
    }

    for (name, load) in project.registry.loads() {
        if !converted.contains(&load.system) {
            warn!(
                load = %name,
                system = %load.system,
                "load targets a system that did not convert, skipping"
            );
            skipped.push(SkippedEntity {
                kind: SkippedKind::Load,
                name: name.clone(),
                reason: format!("target system {} did not convert", load.system),
            });
            continue;
        }
        match engine.load(load, &axis) {
            Some(native) => model.add_load(name, native),
            None => {
                warn!(load = %name, "engine declined load conversion, skipping");
                skipped.push(SkippedEntity {
                    kind: SkippedKind::Load,
                    name: name.clone(),
                    reason: "engine declined conversion".to_string(),
                });
            }
        }
    }

    info!(
        systems = converted.len(),
        couplings = model.coupling_names().len(),
        loads = model.load_names().len(),
        skipped = skipped.len(),
        "model assembled"
    );

    Ok(AssembledModel { model, skipped })
}

fn resolve(model: &dyn NativeModel, id: SystemId) -> AssemblyResult<&dyn NativeSystem> {
    model.system(id).ok_or_else(|| {
        AssemblyError::Engine(EngineError::Construction {
            what: format!("system {id} missing from native model"),
        })
    })
}
