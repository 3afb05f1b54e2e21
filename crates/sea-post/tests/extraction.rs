use std::collections::BTreeMap;

use sea_assembly::assemble;
use sea_engine::NativeModel;
use sea_engine::testkit::TestEngine;
use sea_model::{
    AcousticSpace, CavityGeometry, DampingModel, Junction, JunctionKind, Load, LoadKind, Material,
    MaterialKind, Project, StructuralElement, StructuralKind,
};
use sea_post::{ExtractionField, PostTreatment, Quantity};

fn wall_room_project() -> Project {
    let mut project = Project::new("Wall-Room Analysis");

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

    project
}

fn solved_model(engine: &TestEngine) -> Box<dyn NativeModel> {
    let project = wall_room_project();
    let mut assembled = assemble(&project, engine).expect("assembly failed");
    assembled.solve().expect("solve failed");
    assembled.model
}

#[test]
fn full_extraction_populates_every_section() {
    let engine = TestEngine::new();
    let model = solved_model(&engine);

    let post = PostTreatment::new("Wall-Room Analysis");
    let extraction = post.process_model(model.as_ref());
    let bundle = &extraction.bundle;

    assert!(extraction.diagnostics.is_empty(), "{:?}", extraction.diagnostics);

    let n_freq = bundle.frequency.hz.len();
    assert!(n_freq > 0);
    assert_eq!(bundle.frequency.rad_s.len(), n_freq);
    // Both representations describe the same samples.
    for (hz, rad) in bundle.frequency.hz.iter().zip(&bundle.frequency.rad_s) {
        assert!((rad / hz - core::f64::consts::TAU).abs() < 1e-9);
    }

    assert_eq!(bundle.systems.len(), 2);
    let wall = &bundle.systems["1"];
    assert_eq!(wall.kind, "RectangularPlate");
    assert_eq!(wall.lx, Some(4.0));
    let material = wall.material.as_ref().expect("material missing");
    assert_eq!(material.density, Some(1250.0));
    let room = &bundle.systems["2"];
    assert_eq!(room.kind, "RectangularRoom");
    assert_eq!(room.volume, Some(30.0));

    // Plate carries bending and longitudinal, room carries pressure.
    assert_eq!(
        bundle.modal_data.keys().cloned().collect::<Vec<_>>(),
        vec![
            "sys1_wave3".to_string(),
            "sys1_wave5".to_string(),
            "sys2_wave0".to_string()
        ]
    );
    let dataset = &bundle.modal_data["sys1_wave3"];
    assert_eq!(dataset.system_kind, "plate");
    assert_eq!(dataset.modal_density.len(), n_freq);
    assert_eq!(dataset.modal_overlap.len(), n_freq);
    assert_eq!(dataset.frequency, bundle.frequency.hz);

    let junction = &bundle.junctions["wall_room_junction"];
    assert_eq!((junction.system1_id, junction.system2_id), (2, 1));
    assert_eq!(junction.area, Some(10.0));
    let clf = junction
        .coupling_loss_factor
        .as_ref()
        .expect("clf missing");
    assert_eq!(clf.len(), n_freq);

    let energy = bundle.energy.as_ref().expect("energy missing");
    assert_eq!(energy.shape(), (n_freq, 2));
    assert_eq!(energy.dof_id, vec![1, 2]);

    let power = bundle.power_input.as_ref().expect("power input missing");
    assert_eq!(power.shape(), (n_freq, 1));
    assert_eq!(power.dof_id, vec![2]);

    let matrix = bundle.sea_matrix.as_ref().expect("sea matrix missing");
    assert_eq!(matrix.matrix.len(), n_freq);
    assert_eq!(matrix.frequency, bundle.frequency.hz);
    assert_eq!(matrix.system_ids, vec![1, 2]);

    let load = &bundle.loads["source"];
    assert_eq!(load.name, "source");
    assert_eq!(
        load.spectrum.as_ref().map(Vec::len),
        Some(n_freq)
    );
}

#[test]
fn energy_conversion_is_a_scalar_multiply_from_si() {
    let engine = TestEngine::new();
    let model = solved_model(&engine);

    let base = PostTreatment::new("units");
    let si = base.process_model(model.as_ref());

    let mut milli = PostTreatment::new("units");
    assert!(milli.units_mut().set(Quantity::Energy, "mJ"));
    assert!(milli.units_mut().set(Quantity::Power, "mW"));
    let converted = milli.process_model(model.as_ref());

    assert_eq!(converted.bundle.metadata.units["energy"], "mJ");

    let si_energy = si.bundle.energy.as_ref().expect("energy missing");
    let mj_energy = converted.bundle.energy.as_ref().expect("energy missing");
    for (row_si, row_mj) in si_energy.data.iter().zip(&mj_energy.data) {
        for (a, b) in row_si.iter().zip(row_mj) {
            assert_eq!(*b, a * 1000.0);
        }
    }

    let si_power = si.bundle.power_input.as_ref().expect("power missing");
    let mw_power = converted.bundle.power_input.as_ref().expect("power missing");
    for (row_si, row_mw) in si_power.data.iter().zip(&mw_power.data) {
        for (a, b) in row_si.iter().zip(row_mw) {
            assert_eq!(*b, a * 1000.0);
        }
    }
}

#[test]
fn response_conversion_only_touches_velocity_columns() {
    let engine = TestEngine::new();
    let model = solved_model(&engine);

    let si = PostTreatment::new("response").process_model(model.as_ref());

    let mut post = PostTreatment::new("response");
    assert!(post.units_mut().set(Quantity::Velocity, "mm/s"));
    let converted = post.process_model(model.as_ref());

    let si_block = si.bundle.result.as_ref().expect("response missing");
    let mm_block = converted.bundle.result.as_ref().expect("response missing");
    for (column, dof_type) in si_block.dof_type.iter().enumerate() {
        let expected = if *dof_type == 7 { 1000.0 } else { 1.0 };
        for (row_si, row_mm) in si_block.data.iter().zip(&mm_block.data) {
            assert_eq!(row_mm[column], row_si[column] * expected);
        }
    }
}

#[test]
fn power_balance_snapshot_drops_imaginary_part() {
    let engine = TestEngine::new();
    let model = solved_model(&engine);

    let extraction = PostTreatment::new("matrix").process_model(model.as_ref());
    let snapshot = extraction
        .bundle
        .sea_matrix
        .as_ref()
        .expect("sea matrix missing");
    let native = model.power_balance().expect("power balance missing");

    for (f, matrix) in native.matrices.iter().enumerate() {
        for i in 0..matrix.nrows() {
            for j in 0..matrix.ncols() {
                assert_ne!(matrix[(i, j)].im, 0.0);
                assert_eq!(snapshot.matrix[f][i][j], matrix[(i, j)].re);
            }
        }
    }
}

#[test]
fn missing_modal_capability_degrades_with_diagnostics() {
    let engine = TestEngine::new().without_modal();
    let model = solved_model(&engine);

    let extraction = PostTreatment::new("degraded").process_model(model.as_ref());

    assert!(extraction.bundle.modal_data.is_empty());
    let modal_issues: Vec<_> = extraction
        .diagnostics
        .iter()
        .filter(|i| i.field == ExtractionField::ModalData)
        .collect();
    assert_eq!(modal_issues.len(), 2);
    // Other sections still populate.
    assert!(extraction.bundle.energy.is_some());
    assert_eq!(extraction.bundle.systems.len(), 2);
}

#[test]
fn missing_clf_and_endpoints_degrade_per_junction() {
    let engine = TestEngine::new().without_clf().without_endpoints();
    let model = solved_model(&engine);

    let extraction = PostTreatment::new("degraded").process_model(model.as_ref());
    let junction = &extraction.bundle.junctions["wall_room_junction"];

    assert_eq!((junction.system1_id, junction.system2_id), (0, 0));
    assert!(junction.coupling_loss_factor.is_none());
    assert!(
        extraction
            .diagnostics
            .iter()
            .any(|i| i.field == ExtractionField::Junctions)
    );
}

#[test]
fn unsolved_model_yields_empty_result_arrays_with_diagnostics() {
    let engine = TestEngine::new();
    let project = wall_room_project();
    let assembled = assemble(&project, &engine).expect("assembly failed");

    let extraction = PostTreatment::new("unsolved").process_model(assembled.model.as_ref());

    assert!(extraction.bundle.energy.is_none());
    assert!(extraction.bundle.result.is_none());
    assert!(extraction.bundle.power_input.is_none());
    assert!(extraction.bundle.sea_matrix.is_none());
    for field in [
        ExtractionField::Energy,
        ExtractionField::Response,
        ExtractionField::PowerInput,
        ExtractionField::PowerBalance,
    ] {
        assert!(
            extraction.diagnostics.iter().any(|i| i.field == field),
            "missing diagnostic for {field:?}"
        );
    }
    // Structure of the model still extracts.
    assert_eq!(extraction.bundle.systems.len(), 2);
    assert!(!extraction.bundle.modal_data.is_empty());
}

#[test]
fn without_power_balance_only_that_field_is_empty() {
    let engine = TestEngine::new().without_power_balance();
    let model = solved_model(&engine);

    let extraction = PostTreatment::new("no-matrix").process_model(model.as_ref());
    assert!(extraction.bundle.sea_matrix.is_none());
    assert!(extraction.bundle.energy.is_some());
    assert_eq!(extraction.diagnostics.len(), 1);
    assert_eq!(
        extraction.diagnostics[0].field,
        ExtractionField::PowerBalance
    );
}
