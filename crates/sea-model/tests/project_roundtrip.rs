use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sea_model::{
    AcousticSpace, CavityGeometry, DampingModel, FrequencyRange, Junction, JunctionKind, Load,
    LoadKind, Material, MaterialKind, Project, StructuralElement, StructuralKind,
};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn wall_room_project() -> Project {
    let mut project = Project::new("Wall-Room Analysis");
    project.metadata.description = "Sound transmission example".to_string();

    let concrete = Material {
        name: "concrete".to_string(),
        kind: MaterialKind::Solid {
            youngs_modulus: Some(3.8e9),
            poisson_ratio: Some(0.33),
            density: Some(1250.0),
            loss_factor: 0.03,
        },
    };
    project.add_material(concrete.clone());

    let wall = project.registry.register_structure(StructuralElement {
        name: "concrete_wall".to_string(),
        kind: StructuralKind::Plate,
        dimensions: BTreeMap::from([
            ("thickness".to_string(), 0.05),
            ("Lx".to_string(), 4.0),
            ("Ly".to_string(), 2.5),
        ]),
        material: concrete,
        damping_loss_factor: 0.03,
    });

    let room = project.registry.register_space(AcousticSpace {
        name: "room".to_string(),
        geometry: CavityGeometry::Box {
            lx: 3.0,
            ly: 4.0,
            lz: 2.5,
        },
        absorption_area: 8.0,
        damping: vec![DampingModel::Surface],
    });

    project.registry.register_junction(Junction {
        name: "wall_room_junction".to_string(),
        kind: JunctionKind::Area { area: Some(10.0) },
        systems: vec![room, wall],
    });

    project.registry.register_load(Load {
        name: "source".to_string(),
        kind: LoadKind::Power,
        system: room,
        wave_dof: 0,
        magnitude: 1e-3,
        spectrum: None,
    });

    project.set_frequency_range(FrequencyRange {
        f_min: 100.0,
        f_max: 5000.0,
        ..FrequencyRange::default()
    });

    project
}

#[test]
fn json_round_trip_preserves_project() {
    let dir = unique_temp_dir("sea_model_json");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("project.json");

    let project = wall_room_project();
    sea_model::save_json(&path, &project).expect("failed to save project");
    let loaded = sea_model::load_json(&path).expect("failed to load project");

    assert_eq!(loaded, project);
}

#[test]
fn yaml_round_trip_preserves_project() {
    let dir = unique_temp_dir("sea_model_yaml");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("project.yaml");

    let project = wall_room_project();
    sea_model::save_yaml(&path, &project).expect("failed to save project");
    let loaded = sea_model::load_yaml(&path).expect("failed to load project");

    assert_eq!(loaded, project);
}

#[test]
fn save_rejects_invalid_project() {
    let dir = unique_temp_dir("sea_model_invalid");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("project.json");

    let mut project = wall_room_project();
    project.registry.register_junction(Junction {
        name: "dangling".to_string(),
        kind: JunctionKind::Area { area: None },
        systems: vec![
            sea_core::SystemId::new(1).expect("nonzero"),
            sea_core::SystemId::new(42).expect("nonzero"),
        ],
    });

    assert!(sea_model::save_json(&path, &project).is_err());
}
