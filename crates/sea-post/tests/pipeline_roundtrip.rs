//! End-to-end: assemble, solve, extract, export, reload.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sea_assembly::assemble;
use sea_engine::testkit::TestEngine;
use sea_model::{
    AcousticSpace, CavityGeometry, DampingModel, Junction, JunctionKind, Load, LoadKind, Material,
    MaterialKind, Project, StructuralElement, StructuralKind,
};
use sea_post::{PostTreatment, Quantity};
use sea_results::compute_bundle_id;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

#[test]
fn extracted_bundle_survives_export_and_reload() {
    let mut project = Project::new("Pipeline");
    let concrete = Material {
        name: "concrete".to_string(),
        kind: MaterialKind::Solid {
            youngs_modulus: Some(3.8e9),
            poisson_ratio: Some(0.33),
            density: Some(1250.0),
            loss_factor: 0.03,
        },
    };
    let wall = project.registry.register_structure(StructuralElement {
        name: "wall".to_string(),
        kind: StructuralKind::Plate,
        dimensions: BTreeMap::from([("Lx".to_string(), 4.0), ("Ly".to_string(), 2.5)]),
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
        name: "wall_room".to_string(),
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

    let engine = TestEngine::new();
    let mut assembled = assemble(&project, &engine).expect("assembly failed");
    assembled.solve().expect("solve failed");

    let mut post = PostTreatment::new("Pipeline");
    post.units_mut().set(Quantity::Energy, "mJ");
    let extraction = post.process_model(assembled.model.as_ref());
    assert!(extraction.diagnostics.is_empty());

    let dir = unique_temp_dir("sea_pipeline");
    fs::create_dir_all(&dir).expect("failed to create temp dir");

    let json_path = dir.join("results.json");
    sea_results::save_json(&json_path, &extraction.bundle).expect("json export failed");
    let reloaded = sea_results::load(&json_path).expect("json reload failed");
    assert_eq!(reloaded, extraction.bundle);
    assert_eq!(
        compute_bundle_id(&reloaded),
        compute_bundle_id(&extraction.bundle)
    );

    let bin_path = dir.join("results.bin");
    let written =
        sea_results::save_binary(&bin_path, &extraction.bundle).expect("binary export failed");
    let from_binary = sea_results::load(&written).expect("binary reload failed");
    assert_eq!(from_binary, extraction.bundle);
}
