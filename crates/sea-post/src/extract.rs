//! Extraction of solved-model state into a result bundle.

use crate::diagnostics::{ExtractionField, ExtractionIssue};
use crate::units::{Quantity, UnitSelection};
use sea_core::WaveKind;
use sea_engine::{
    ModalAnalysis, NativeCoupling, NativeLoad, NativeModel, NativeSystem, SpectralData,
};
use sea_results::{
    FrequencyBlock, JunctionRecord, LoadRecord, MaterialRecord, ModalDataset,
    PowerBalanceSnapshot, ResultBundle, SpectralBlock, SystemRecord,
};
use tracing::warn;

/// A populated (possibly partial) bundle plus what was left out and why.
pub struct Extraction {
    pub bundle: ResultBundle,
    pub diagnostics: Vec<ExtractionIssue>,
}

/// Post-treatment of a solved model.
///
/// Every extraction step is independent; a step that finds its solver
/// capability missing leaves its field empty, records a diagnostic and
/// lets the others proceed. Each `process_model` call re-extracts from
/// the solver's SI arrays, so changing units between calls can never
/// compound conversions.
pub struct PostTreatment {
    project_name: String,
    units: UnitSelection,
}

impl PostTreatment {
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            units: UnitSelection::default(),
        }
    }

    pub fn units(&self) -> &UnitSelection {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut UnitSelection {
        &mut self.units
    }

    /// Extract everything the solved model exposes.
    pub fn process_model(&self, model: &dyn NativeModel) -> Extraction {
        let mut bundle = ResultBundle::new(&self.project_name);
        bundle.metadata.units = self.units.labels();
        let mut issues = Vec::new();

        self.extract_frequency(model, &mut bundle, &mut issues);
        self.extract_systems(model, &mut bundle);
        self.extract_modal_data(model, &mut bundle, &mut issues);
        self.extract_junctions(model, &mut bundle, &mut issues);
        self.extract_energy(model, &mut bundle, &mut issues);
        self.extract_response(model, &mut bundle, &mut issues);
        self.extract_power_input(model, &mut bundle, &mut issues);
        self.extract_power_balance(model, &mut bundle, &mut issues);
        self.extract_loads(model, &mut bundle);

        Extraction {
            bundle,
            diagnostics: issues,
        }
    }

    fn extract_frequency(
        &self,
        model: &dyn NativeModel,
        bundle: &mut ResultBundle,
        issues: &mut Vec<ExtractionIssue>,
    ) {
        let axis = model.axis();
        if axis.is_empty() {
            note(issues, ExtractionField::Frequency, "frequency axis is empty");
            return;
        }
        bundle.frequency = FrequencyBlock {
            hz: axis.hz(),
            rad_s: axis.omega().to_vec(),
        };
    }

    fn extract_systems(&self, model: &dyn NativeModel, bundle: &mut ResultBundle) {
        for id in model.system_ids() {
            let Some(system) = model.system(id) else {
                continue;
            };
            let geometry = system.geometry();
            let record = SystemRecord {
                id: id.get(),
                kind: system.type_name(),
                lx: geometry.lx,
                ly: geometry.ly,
                lz: geometry.lz,
                volume: geometry.volume,
                area: geometry.area,
                material: system.material_info().map(|m| MaterialRecord {
                    kind: m.kind,
                    density: m.density,
                    youngs_modulus: m.youngs_modulus,
                }),
            };
            bundle.systems.insert(id.get().to_string(), record);
        }
    }

    fn extract_modal_data(
        &self,
        model: &dyn NativeModel,
        bundle: &mut ResultBundle,
        issues: &mut Vec<ExtractionIssue>,
    ) {
        let omega = bundle.frequency.rad_s.clone();
        let hz = bundle.frequency.hz.clone();

        for id in model.system_ids() {
            let Some(system) = model.system(id) else {
                continue;
            };
            let Some(modal) = system.modal() else {
                note(
                    issues,
                    ExtractionField::ModalData,
                    format!("system {id} does not support modal analysis"),
                );
                continue;
            };

            let mut waves = modal.wave_kinds();
            if waves.is_empty() {
                waves = vec![WaveKind::Bending.code()];
            }

            for wave in waves {
                let density = match modal.modal_density(&omega, wave) {
                    Ok(values) => values,
                    Err(e) => {
                        note(
                            issues,
                            ExtractionField::ModalData,
                            format!("modal density for system {id} wave {wave}: {e}"),
                        );
                        continue;
                    }
                };
                let overlap = match modal.modal_overlap(&omega, wave) {
                    Ok(values) => values,
                    Err(e) => {
                        note(
                            issues,
                            ExtractionField::ModalData,
                            format!("modal overlap for system {id} wave {wave}: {e}"),
                        );
                        vec![0.0; density.len()]
                    }
                };
                bundle.modal_data.insert(
                    format!("sys{}_wave{}", id.get(), wave),
                    ModalDataset {
                        system_id: id.get(),
                        system_name: system.type_name(),
                        system_kind: system.kind().label().to_string(),
                        wave_type: wave,
                        modal_density: density,
                        modal_overlap: overlap,
                        frequency: hz.clone(),
                    },
                );
            }
        }
    }

    fn extract_junctions(
        &self,
        model: &dyn NativeModel,
        bundle: &mut ResultBundle,
        issues: &mut Vec<ExtractionIssue>,
    ) {
        for name in model.coupling_names() {
            let Some(coupling) = model.coupling(&name) else {
                continue;
            };
            let (system1_id, system2_id) = coupling
                .endpoints()
                .map(|(a, b)| (a.get(), b.get()))
                .unwrap_or((0, 0));
            let geometry = coupling.geometry();

            // Coupling loss factors are physically real-valued; any
            // residual imaginary numerical noise is discarded here.
            let coupling_loss_factor = match coupling.coupling_loss_factor() {
                Some(matrix) => Some(
                    (0..matrix.nrows())
                        .map(|r| (0..matrix.ncols()).map(|c| matrix[(r, c)].re).collect())
                        .collect(),
                ),
                None => {
                    note(
                        issues,
                        ExtractionField::Junctions,
                        format!("coupling loss factor unavailable for '{name}'"),
                    );
                    None
                }
            };

            bundle.junctions.insert(
                name.clone(),
                JunctionRecord {
                    junction_name: name.clone(),
                    junction_kind: coupling.kind_label(),
                    system1_id,
                    system2_id,
                    area: geometry.area,
                    length: geometry.length,
                    angles: geometry.angles,
                    coupling_loss_factor,
                },
            );
        }
    }

    fn extract_energy(
        &self,
        model: &dyn NativeModel,
        bundle: &mut ResultBundle,
        issues: &mut Vec<ExtractionIssue>,
    ) {
        match model.energy() {
            Some(data) => {
                let factor = self.units.factor(Quantity::Energy);
                bundle.energy = Some(convert_block(&data, |_| factor));
            }
            None => note(
                issues,
                ExtractionField::Energy,
                "solver did not report energy results",
            ),
        }
    }

    fn extract_response(
        &self,
        model: &dyn NativeModel,
        bundle: &mut ResultBundle,
        issues: &mut Vec<ExtractionIssue>,
    ) {
        match model.response() {
            Some(data) => {
                // Only velocity-typed columns take the velocity unit;
                // pressure columns stay in Pa.
                let velocity_factor = self.units.factor(Quantity::Velocity);
                let dof_type = data.dof_type.clone();
                bundle.result = Some(convert_block(&data, |column| {
                    if dof_type.get(column).copied() == Some(WaveKind::Velocity.code()) {
                        velocity_factor
                    } else {
                        1.0
                    }
                }));
            }
            None => note(
                issues,
                ExtractionField::Response,
                "solver did not report response results",
            ),
        }
    }

    fn extract_power_input(
        &self,
        model: &dyn NativeModel,
        bundle: &mut ResultBundle,
        issues: &mut Vec<ExtractionIssue>,
    ) {
        match model.power_input() {
            Some(data) => {
                let factor = self.units.factor(Quantity::Power);
                bundle.power_input = Some(convert_block(&data, |_| factor));
            }
            None => note(
                issues,
                ExtractionField::PowerInput,
                "solver did not report power input",
            ),
        }
    }

    fn extract_power_balance(
        &self,
        model: &dyn NativeModel,
        bundle: &mut ResultBundle,
        issues: &mut Vec<ExtractionIssue>,
    ) {
        match model.power_balance() {
            Some(balance) => {
                // Real part only; the imaginary component does not survive
                // export and callers wanting it must keep the model handle.
                let matrix = balance
                    .matrices
                    .iter()
                    .map(|m| {
                        (0..m.nrows())
                            .map(|i| (0..m.ncols()).map(|j| m[(i, j)].re).collect())
                            .collect()
                    })
                    .collect();
                let frequency = bundle.frequency.hz.clone();
                bundle.sea_matrix = Some(PowerBalanceSnapshot {
                    matrix,
                    frequency,
                    system_ids: balance.system_ids,
                    system_kinds: balance.system_kinds,
                });
            }
            None => note(
                issues,
                ExtractionField::PowerBalance,
                "power-balance matrix unavailable",
            ),
        }
    }

    fn extract_loads(&self, model: &dyn NativeModel, bundle: &mut ResultBundle) {
        for name in model.load_names() {
            let Some(load) = model.load(&name) else {
                continue;
            };
            bundle.loads.insert(
                name.clone(),
                LoadRecord {
                    name: name.clone(),
                    dof: load.dof_label(),
                    spectrum: load.spectrum(),
                },
            );
        }
    }
}

fn note(issues: &mut Vec<ExtractionIssue>, field: ExtractionField, reason: impl Into<String>) {
    let issue = ExtractionIssue::new(field, reason);
    warn!(field = issue.field.label(), reason = %issue.reason, "extraction degraded");
    issues.push(issue);
}

fn convert_block(data: &SpectralData, factor: impl Fn(usize) -> f64) -> SpectralBlock {
    let rows = data.data.nrows();
    let cols = data.data.ncols();
    let converted = (0..rows)
        .map(|r| (0..cols).map(|c| data.data[(r, c)].re * factor(c)).collect())
        .collect();
    SpectralBlock {
        data: converted,
        dof_id: data.dof_id.clone(),
        dof_type: data.dof_type.clone(),
    }
}
