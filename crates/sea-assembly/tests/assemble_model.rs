use std::collections::BTreeMap;

use sea_assembly::{AssemblyError, SkippedKind, assemble};
use sea_engine::testkit::TestEngine;
use sea_engine::{NativeCoupling, NativeLoad, NativeModel};
use sea_model::{
    AcousticSpace, CavityGeometry, DampingModel, Junction, JunctionKind, Load, LoadKind, Material,
    MaterialKind, Project, StructuralElement, StructuralKind,
};

fn concrete() -> Material {
    Material {
        name: "concrete".to_string(),
        kind: MaterialKind::Solid {
            youngs_modulus: Some(3.8e9),
            poisson_ratio: Some(0.33),
            density: Some(1250.0),
            loss_factor: 0.03,
        },
    }
}

fn plate(name: &str) -> StructuralElement {
    StructuralElement {
        name: name.to_string(),
        kind: StructuralKind::Plate,
        dimensions: BTreeMap::from([
            ("thickness".to_string(), 0.05),
            ("Lx".to_string(), 4.0),
            ("Ly".to_string(), 2.5),
        ]),
        material: concrete(),
        damping_loss_factor: 0.03,
    }
}

fn room(name: &str) -> AcousticSpace {
    AcousticSpace {
        name: name.to_string(),
        geometry: CavityGeometry::Box {
            lx: 3.0,
            ly: 4.0,
            lz: 2.5,
        },
        absorption_area: 8.0,
        damping: vec![DampingModel::Surface],
    }
}

#[test]
fn two_system_junction_keeps_its_name() {
    let mut project = Project::new("pairwise");
    let wall = project.registry.register_structure(plate("wall"));
    let cavity = project.registry.register_space(room("room"));
    project.registry.register_junction(Junction {
        name: "wall_room_junction".to_string(),
        kind: JunctionKind::Area { area: Some(10.0) },
        systems: vec![cavity, wall],
    });

    let engine = TestEngine::new();
    let assembled = assemble(&project, &engine).expect("assembly failed");

    assert_eq!(
        assembled.model.coupling_names(),
        vec!["wall_room_junction".to_string()]
    );
    let coupling = assembled
        .model
        .coupling("wall_room_junction")
        .expect("coupling missing");
    assert_eq!(coupling.endpoints(), Some((cavity, wall)));
    assert!(assembled.skipped.is_empty());
}

#[test]
fn three_system_junction_decomposes_into_a_chain() {
    let mut project = Project::new("chain");
    let a = project.registry.register_structure(plate("a"));
    let b = project.registry.register_structure(plate("b"));
    let c = project.registry.register_structure(plate("c"));
    project.registry.register_junction(Junction {
        name: "corner".to_string(),
        kind: JunctionKind::Line {
            length: Some(2.5),
            angles: None,
        },
        systems: vec![a, b, c],
    });

    let engine = TestEngine::new();
    let assembled = assemble(&project, &engine).expect("assembly failed");

    assert_eq!(
        assembled.model.coupling_names(),
        vec!["corner_0".to_string(), "corner_1".to_string()]
    );
    let first = assembled.model.coupling("corner_0").expect("corner_0");
    let second = assembled.model.coupling("corner_1").expect("corner_1");
    assert_eq!(first.endpoints(), Some((a, b)));
    assert_eq!(second.endpoints(), Some((b, c)));
    // Geometry inherited verbatim by each pair.
    assert_eq!(first.geometry().length, Some(2.5));
    assert_eq!(second.geometry().length, Some(2.5));
}

#[test]
fn empty_model_fails_with_no_systems() {
    let project = Project::new("empty");
    let engine = TestEngine::new();
    assert!(matches!(
        assemble(&project, &engine),
        Err(AssemblyError::NoSystems)
    ));
}

#[test]
fn unavailable_engine_fails_before_assembly() {
    let mut project = Project::new("unavailable");
    project.registry.register_structure(plate("wall"));

    let engine = TestEngine::new().unavailable();
    assert!(matches!(
        assemble(&project, &engine),
        Err(AssemblyError::EngineUnavailable(_))
    ));
}

#[test]
fn declined_system_is_skipped_and_assembly_continues() {
    let mut project = Project::new("partial");
    let wall = project.registry.register_structure(plate("wall"));
    let bad = project.registry.register_structure(plate("cracked"));
    let cavity = project.registry.register_space(room("room"));
    project.registry.register_junction(Junction {
        name: "good".to_string(),
        kind: JunctionKind::Area { area: None },
        systems: vec![cavity, wall],
    });
    project.registry.register_junction(Junction {
        name: "broken".to_string(),
        kind: JunctionKind::Area { area: None },
        systems: vec![cavity, bad],
    });
    project.registry.register_load(Load {
        name: "orphan".to_string(),
        kind: LoadKind::Power,
        system: bad,
        wave_dof: 0,
        magnitude: 1.0,
        spectrum: None,
    });

    let engine = TestEngine::new().declining("cracked");
    let assembled = assemble(&project, &engine).expect("assembly failed");

    assert_eq!(assembled.model.coupling_names(), vec!["good".to_string()]);
    assert!(assembled.model.load_names().is_empty());

    let kinds: Vec<SkippedKind> = assembled.skipped.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SkippedKind::System, SkippedKind::Junction, SkippedKind::Load]
    );
    assert_eq!(assembled.skipped[0].name, "cracked");
}

#[test]
fn all_systems_declined_fails_with_no_systems() {
    let mut project = Project::new("all-declined");
    project.registry.register_structure(plate("wall"));

    let engine = TestEngine::new().declining("wall");
    assert!(matches!(
        assemble(&project, &engine),
        Err(AssemblyError::NoSystems)
    ));
}

#[test]
fn loads_attach_with_flat_spectrum_over_the_axis() {
    let mut project = Project::new("loads");
    let cavity = project.registry.register_space(room("room"));
    project.registry.register_load(Load {
        name: "source".to_string(),
        kind: LoadKind::Power,
        system: cavity,
        wave_dof: 0,
        magnitude: 1e-3,
        spectrum: None,
    });

    let engine = TestEngine::new();
    let mut assembled = assemble(&project, &engine).expect("assembly failed");

    let axis_len = assembled.model.axis().len();
    assert!(axis_len > 0);
    let load = assembled.model.load("source").expect("load missing");
    let spectrum = load.spectrum().expect("spectrum missing");
    assert_eq!(spectrum.len(), axis_len);
    assert!(spectrum.iter().all(|v| *v == 1e-3));

    assembled.solve().expect("solve failed");
}
