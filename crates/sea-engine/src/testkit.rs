//! Deterministic in-memory engine for tests.
//!
//! Implements the full adapter surface with closed-form arrays so that
//! assembly and extraction can be exercised without the real physics
//! engine. Capability switches let tests reproduce the degraded paths
//! (engine missing, no modal analysis, no CLF access, no endpoint ids,
//! no power-balance matrix, no band axis).

use crate::adapter::*;
use crate::axis::FrequencyAxis;
use crate::error::{EngineError, EngineResult};
use nalgebra::{Complex, DMatrix};
use sea_core::{SystemId, TWO_PI};
use sea_model::{
    CavityGeometry, FrequencyRange, JunctionKind, Load, Material, MaterialKind, StructuralKind,
    SystemEntity,
};
use std::cell::Cell;
use std::collections::BTreeMap;

/// Capability-switchable reference engine.
pub struct TestEngine {
    available: bool,
    modal: bool,
    clf: bool,
    endpoints: bool,
    power_balance: bool,
    band_axis: bool,
    declined: Vec<String>,
    // Couplings are built after the model; remember the axis length so
    // their CLF matrices line up with the frequency axis.
    axis_len: Cell<usize>,
}

impl TestEngine {
    pub fn new() -> Self {
        Self {
            available: true,
            modal: true,
            clf: true,
            endpoints: true,
            power_balance: true,
            band_axis: true,
            declined: Vec::new(),
            axis_len: Cell::new(0),
        }
    }

    /// Simulate a missing engine installation.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn without_modal(mut self) -> Self {
        self.modal = false;
        self
    }

    pub fn without_clf(mut self) -> Self {
        self.clf = false;
        self
    }

    pub fn without_endpoints(mut self) -> Self {
        self.endpoints = false;
        self
    }

    pub fn without_power_balance(mut self) -> Self {
        self.power_balance = false;
        self
    }

    pub fn without_band_axis(mut self) -> Self {
        self.band_axis = false;
        self
    }

    /// Refuse to convert the named entity.
    pub fn declining(mut self, name: &str) -> Self {
        self.declined.push(name.to_string());
        self
    }
}

impl Default for TestEngine {
    fn default() -> Self {
        Self::new()
    }
}

struct TkMaterial {
    kind_label: &'static str,
    density: f64,
}

impl NativeMaterial for TkMaterial {
    fn kind_label(&self) -> &'static str {
        self.kind_label
    }

    fn density(&self) -> Option<f64> {
        Some(self.density)
    }
}

struct TkSystem {
    id: SystemId,
    kind: SystemKind,
    geometry: SystemGeometry,
    material_info: Option<MaterialInfo>,
    cavity_flag: Option<bool>,
    damping: f64,
    modal: bool,
}

impl TkSystem {
    fn modal_scale(&self) -> f64 {
        self.geometry
            .area
            .or(self.geometry.volume)
            .unwrap_or(1.0)
    }
}

impl NativeSystem for TkSystem {
    fn id(&self) -> SystemId {
        self.id
    }

    fn kind(&self) -> SystemKind {
        self.kind
    }

    fn type_name(&self) -> String {
        match self.kind {
            SystemKind::Plate => "RectangularPlate",
            SystemKind::Beam => "Beam",
            SystemKind::Cavity => "Acoustic3DSystem",
            SystemKind::Room => "RectangularRoom",
        }
        .to_string()
    }

    fn geometry(&self) -> SystemGeometry {
        self.geometry
    }

    fn material_info(&self) -> Option<MaterialInfo> {
        self.material_info.clone()
    }

    fn cavity_flag(&self) -> Option<bool> {
        self.cavity_flag
    }

    fn set_cavity_flag(&mut self, value: bool) {
        self.cavity_flag = Some(value);
    }

    fn modal(&self) -> Option<&dyn ModalAnalysis> {
        self.modal.then_some(self as &dyn ModalAnalysis)
    }
}

impl ModalAnalysis for TkSystem {
    fn wave_kinds(&self) -> Vec<u32> {
        match self.kind {
            SystemKind::Plate => vec![3, 5],
            SystemKind::Beam => vec![3],
            SystemKind::Cavity | SystemKind::Room => vec![0],
        }
    }

    fn modal_density(&self, omega: &[f64], wave_dof: u32) -> EngineResult<Vec<f64>> {
        let scale = self.modal_scale() * 0.01 * (wave_dof as f64 + 1.0);
        Ok(omega.iter().map(|w| scale / w.sqrt()).collect())
    }

    fn modal_overlap(&self, omega: &[f64], wave_dof: u32) -> EngineResult<Vec<f64>> {
        let density = self.modal_density(omega, wave_dof)?;
        Ok(density
            .iter()
            .zip(omega)
            .map(|(n, w)| n * self.damping * w)
            .collect())
    }
}

struct TkCoupling {
    label: String,
    endpoints: Option<(SystemId, SystemId)>,
    geometry: CouplingGeometry,
    clf: Option<DMatrix<Complex<f64>>>,
}

impl NativeCoupling for TkCoupling {
    fn kind_label(&self) -> String {
        self.label.clone()
    }

    fn endpoints(&self) -> Option<(SystemId, SystemId)> {
        self.endpoints
    }

    fn geometry(&self) -> CouplingGeometry {
        self.geometry.clone()
    }

    fn coupling_loss_factor(&self) -> Option<DMatrix<Complex<f64>>> {
        self.clf.clone()
    }
}

struct TkLoad {
    name: String,
    system: SystemId,
    wave_dof: u32,
    dof_label: String,
    spectrum: Vec<f64>,
}

impl NativeLoad for TkLoad {
    fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> SystemId {
        self.system
    }

    fn wave_dof(&self) -> u32 {
        self.wave_dof
    }

    fn dof_label(&self) -> String {
        self.dof_label.clone()
    }

    fn spectrum(&self) -> Option<Vec<f64>> {
        Some(self.spectrum.clone())
    }
}

impl PhysicsEngine for TestEngine {
    fn probe(&self) -> EngineResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(EngineError::Unavailable {
                reason: "test engine configured as missing".to_string(),
            })
        }
    }

    fn ambient_fluid(&self) -> Box<dyn NativeMaterial> {
        Box::new(TkMaterial {
            kind_label: "fluid",
            density: 1.208,
        })
    }

    fn material(&self, material: &Material) -> Option<Box<dyn NativeMaterial>> {
        if self.declined.contains(&material.name) {
            return None;
        }
        let native = match &material.kind {
            MaterialKind::Fluid { density, .. } => TkMaterial {
                kind_label: "fluid",
                density: density.unwrap_or(1.208),
            },
            MaterialKind::Solid { density, .. } => TkMaterial {
                kind_label: "solid",
                density: density.unwrap_or(7800.0),
            },
            MaterialKind::EquivalentFluid { density, .. } => TkMaterial {
                kind_label: "equivalent_fluid",
                density: density.unwrap_or(1.208),
            },
        };
        Some(Box::new(native))
    }

    fn system(
        &self,
        entity: &SystemEntity,
        id: SystemId,
        _ambient: &dyn NativeMaterial,
    ) -> Option<Box<dyn NativeSystem>> {
        if self.declined.contains(&entity.name().to_string()) {
            return None;
        }
        let system = match entity {
            SystemEntity::Structure(element) => {
                self.material(&element.material)?;
                let (density, youngs_modulus) = match &element.material.kind {
                    MaterialKind::Solid {
                        density,
                        youngs_modulus,
                        ..
                    } => (density.unwrap_or(7800.0), youngs_modulus.unwrap_or(210e9)),
                    _ => return None,
                };
                let lx = element.dimension_or("Lx", 1.0);
                let ly = element.dimension_or("Ly", 1.0);
                let kind = match element.kind {
                    StructuralKind::Plate => SystemKind::Plate,
                    StructuralKind::Beam => SystemKind::Beam,
                };
                TkSystem {
                    id,
                    kind,
                    geometry: SystemGeometry {
                        lx: Some(lx),
                        ly: Some(ly),
                        lz: None,
                        volume: None,
                        area: Some(lx * ly),
                    },
                    material_info: Some(MaterialInfo {
                        kind: "solid".to_string(),
                        density: Some(density),
                        youngs_modulus: Some(youngs_modulus),
                    }),
                    cavity_flag: None,
                    damping: element.damping_loss_factor,
                    modal: self.modal,
                }
            }
            SystemEntity::Space(space) => {
                let (kind, lx, ly, lz) = match space.geometry {
                    CavityGeometry::Box { lx, ly, lz } => {
                        (SystemKind::Room, Some(lx), Some(ly), Some(lz))
                    }
                    CavityGeometry::Free { .. } => (SystemKind::Cavity, None, None, None),
                };
                TkSystem {
                    id,
                    kind,
                    geometry: SystemGeometry {
                        lx,
                        ly,
                        lz,
                        volume: Some(space.geometry.volume()),
                        area: Some(space.geometry.surface_area()),
                    },
                    material_info: None,
                    // Reproduce the engine defect the shim papers over.
                    cavity_flag: None,
                    damping: 0.01,
                    modal: self.modal,
                }
            }
        };
        Some(Box::new(system))
    }

    fn coupling(
        &self,
        kind: &JunctionKind,
        pair: (&dyn NativeSystem, &dyn NativeSystem),
    ) -> EngineResult<Box<dyn NativeCoupling>> {
        let (a, b) = pair;
        let geometry = match kind {
            JunctionKind::Area { area } => CouplingGeometry {
                area: *area,
                ..CouplingGeometry::default()
            },
            JunctionKind::Line { length, angles } => CouplingGeometry {
                length: *length,
                angles: angles.clone(),
                ..CouplingGeometry::default()
            },
            JunctionKind::SemiInfinite => CouplingGeometry::default(),
        };
        let rows = self.axis_len.get().max(1);
        let clf = self.clf.then(|| {
            let strength = 1e-2 * (a.id().get() + b.id().get()) as f64;
            DMatrix::from_fn(rows, 2, |r, c| {
                Complex::new(strength / (r + c + 1) as f64, 1e-15)
            })
        });
        Ok(Box::new(TkCoupling {
            label: kind.label().to_string(),
            endpoints: self.endpoints.then_some((a.id(), b.id())),
            geometry,
            clf,
        }))
    }

    fn load(&self, load: &Load, axis: &FrequencyAxis) -> Option<Box<dyn NativeLoad>> {
        if self.declined.contains(&load.name) {
            return None;
        }
        let spectrum = match &load.spectrum {
            Some(values) => values.clone(),
            None => vec![load.magnitude; axis.len()],
        };
        Some(Box::new(TkLoad {
            name: load.name.clone(),
            system: load.system,
            wave_dof: load.wave_dof,
            dof_label: format!("{} at system {}", load.kind.label(), load.system),
            spectrum,
        }))
    }

    fn model(
        &self,
        systems: Vec<Box<dyn NativeSystem>>,
        axis: FrequencyAxis,
    ) -> EngineResult<Box<dyn NativeModel>> {
        if axis.is_empty() {
            return Err(EngineError::Construction {
                what: "empty frequency axis".to_string(),
            });
        }
        self.axis_len.set(axis.len());
        let systems: BTreeMap<u32, Box<dyn NativeSystem>> =
            systems.into_iter().map(|s| (s.id().get(), s)).collect();
        Ok(Box::new(TkModel {
            axis,
            systems,
            couplings: Vec::new(),
            loads: Vec::new(),
            solved: false,
            power_balance: self.power_balance,
        }))
    }

    fn band_axis(&self, range: &FrequencyRange) -> Option<FrequencyAxis> {
        if !self.band_axis {
            return None;
        }
        // Nominal band centers f_c = 1000 * 2^(n/d) clipped to the range.
        let per_octave = match range.bands {
            sea_model::BandSpacing::ThirdOctave => 3.0,
            sea_model::BandSpacing::Octave => 1.0,
            sea_model::BandSpacing::Linear => return None,
        };
        let lo = (per_octave * (range.f_min / 1000.0).log2()).ceil() as i32;
        let hi = (per_octave * (range.f_max / 1000.0).log2()).floor() as i32;
        let omega: Vec<f64> = (lo..=hi)
            .map(|n| 1000.0 * 2f64.powf(n as f64 / per_octave) * TWO_PI)
            .collect();
        (!omega.is_empty()).then(|| FrequencyAxis::from_omega(omega))
    }
}

struct TkModel {
    axis: FrequencyAxis,
    systems: BTreeMap<u32, Box<dyn NativeSystem>>,
    couplings: Vec<(String, Box<dyn NativeCoupling>)>,
    loads: Vec<(String, Box<dyn NativeLoad>)>,
    solved: bool,
    power_balance: bool,
}

impl TkModel {
    fn spectral(&self, base: f64, structural_dof: u32) -> SpectralData {
        let n_freq = self.axis.len();
        let ids: Vec<u32> = self.systems.keys().copied().collect();
        let data = DMatrix::from_fn(n_freq, ids.len(), |r, c| {
            Complex::new(base * (c + 1) as f64 / (r + 1) as f64, 0.0)
        });
        let dof_type = self
            .systems
            .values()
            .map(|s| {
                if s.kind().is_cavity() {
                    0
                } else {
                    structural_dof
                }
            })
            .collect();
        SpectralData {
            data,
            dof_id: ids,
            dof_type,
        }
    }
}

impl NativeModel for TkModel {
    fn add_coupling(&mut self, name: &str, coupling: Box<dyn NativeCoupling>) {
        self.couplings.push((name.to_string(), coupling));
    }

    fn add_load(&mut self, name: &str, load: Box<dyn NativeLoad>) {
        self.loads.push((name.to_string(), load));
    }

    fn solve(&mut self) -> EngineResult<()> {
        if self.systems.is_empty() {
            return Err(EngineError::Solve {
                what: "no systems in model".to_string(),
            });
        }
        self.solved = true;
        Ok(())
    }

    fn axis(&self) -> &FrequencyAxis {
        &self.axis
    }

    fn system_ids(&self) -> Vec<SystemId> {
        self.systems
            .keys()
            .filter_map(|raw| SystemId::new(*raw))
            .collect()
    }

    fn system(&self, id: SystemId) -> Option<&dyn NativeSystem> {
        self.systems.get(&id.get()).map(|s| s.as_ref())
    }

    fn coupling_names(&self) -> Vec<String> {
        self.couplings.iter().map(|(n, _)| n.clone()).collect()
    }

    fn coupling(&self, name: &str) -> Option<&dyn NativeCoupling> {
        self.couplings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_ref())
    }

    fn load_names(&self) -> Vec<String> {
        self.loads.iter().map(|(n, _)| n.clone()).collect()
    }

    fn load(&self, name: &str) -> Option<&dyn NativeLoad> {
        self.loads
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, l)| l.as_ref())
    }

    fn energy(&self) -> Option<SpectralData> {
        self.solved.then(|| self.spectral(1e-3, 3))
    }

    fn response(&self) -> Option<SpectralData> {
        self.solved.then(|| self.spectral(1e-2, 7))
    }

    fn power_input(&self) -> Option<SpectralData> {
        if !self.solved || self.loads.is_empty() {
            return None;
        }
        let n_freq = self.axis.len();
        let columns: Vec<Vec<f64>> = self
            .loads
            .iter()
            .map(|(_, load)| load.spectrum().unwrap_or_else(|| vec![0.0; n_freq]))
            .collect();
        let data = DMatrix::from_fn(n_freq, columns.len(), |r, c| {
            Complex::new(columns[c].get(r).copied().unwrap_or(0.0), 0.0)
        });
        Some(SpectralData {
            data,
            dof_id: self.loads.iter().map(|(_, l)| l.target().get()).collect(),
            dof_type: self.loads.iter().map(|(_, l)| l.wave_dof()).collect(),
        })
    }

    fn power_balance(&self) -> Option<PowerBalanceMatrix> {
        if !self.power_balance || !self.solved {
            return None;
        }
        let n = self.systems.len();
        let matrices = (0..self.axis.len())
            .map(|f| {
                DMatrix::from_fn(n, n, |i, j| {
                    if i == j {
                        Complex::new(1e-2 * (i + 1) as f64 * (f + 1) as f64, 1e-14)
                    } else {
                        Complex::new(-1e-3 * (i + j) as f64, 1e-14)
                    }
                })
            })
            .collect();
        Some(PowerBalanceMatrix {
            matrices,
            system_ids: self.systems.keys().copied().collect(),
            system_kinds: self
                .systems
                .values()
                .map(|s| s.kind().label().to_string())
                .collect(),
        })
    }
}
