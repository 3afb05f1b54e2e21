//! Trait surface consumed from the physics engine.
//!
//! Everything here is synchronous. Conversions that the engine may decline
//! return `Option`; constructions that can fail hard return `EngineResult`.

use crate::axis::FrequencyAxis;
use crate::error::EngineResult;
use nalgebra::{Complex, DMatrix};
use sea_core::SystemId;
use sea_model::{FrequencyRange, JunctionKind, Load, Material, SystemEntity};

/// Solver-side classification of a converted subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemKind {
    Plate,
    Beam,
    Cavity,
    Room,
}

impl SystemKind {
    pub fn label(self) -> &'static str {
        match self {
            SystemKind::Plate => "plate",
            SystemKind::Beam => "beam",
            SystemKind::Cavity => "cavity",
            SystemKind::Room => "room",
        }
    }

    pub fn is_cavity(self) -> bool {
        matches!(self, SystemKind::Cavity | SystemKind::Room)
    }
}

/// Geometric attributes a native system may expose. Whatever the engine
/// does not carry for a given system stays `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SystemGeometry {
    pub lx: Option<f64>,
    pub ly: Option<f64>,
    pub lz: Option<f64>,
    pub volume: Option<f64>,
    pub area: Option<f64>,
}

/// Material properties readable back from a native system.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialInfo {
    pub kind: String,
    pub density: Option<f64>,
    pub youngs_modulus: Option<f64>,
}

/// Geometry parameters readable back from a native coupling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CouplingGeometry {
    pub area: Option<f64>,
    pub length: Option<f64>,
    pub angles: Option<Vec<f64>>,
}

/// A result block as the solver reports it: a complex-valued array with a
/// parallel degree-of-freedom labeling (an id and a type code per column).
#[derive(Clone, Debug)]
pub struct SpectralData {
    /// Rows follow the frequency axis, columns follow the DOF labels.
    pub data: DMatrix<Complex<f64>>,
    pub dof_id: Vec<u32>,
    pub dof_type: Vec<u32>,
}

/// The solved power-balance matrix: one complex matrix per frequency
/// sample, indexed by the system id/kind lists.
#[derive(Clone, Debug)]
pub struct PowerBalanceMatrix {
    pub matrices: Vec<DMatrix<Complex<f64>>>,
    pub system_ids: Vec<u32>,
    pub system_kinds: Vec<String>,
}

/// Opaque solver-native material.
pub trait NativeMaterial {
    fn kind_label(&self) -> &'static str;
    fn density(&self) -> Option<f64>;
}

/// Per-system modal capabilities. Systems that cannot do modal analysis
/// simply do not hand this out.
pub trait ModalAnalysis {
    /// Wave DOF codes this system carries. An empty list means discovery
    /// failed; the caller falls back to bending.
    fn wave_kinds(&self) -> Vec<u32>;

    /// Modal density over the angular-frequency axis for one wave DOF.
    fn modal_density(&self, omega: &[f64], wave_dof: u32) -> EngineResult<Vec<f64>>;

    /// Modal overlap over the angular-frequency axis for one wave DOF.
    fn modal_overlap(&self, omega: &[f64], wave_dof: u32) -> EngineResult<Vec<f64>>;
}

/// A converted subsystem held by the native model.
pub trait NativeSystem {
    fn id(&self) -> SystemId;
    fn kind(&self) -> SystemKind;

    /// Solver-side type name reported in extracted metadata.
    fn type_name(&self) -> String {
        self.kind().label().to_string()
    }
    fn geometry(&self) -> SystemGeometry;
    fn material_info(&self) -> Option<MaterialInfo>;

    /// The wave-bearing-cavity flag some engine builds leave unset on
    /// cavity objects. `None` means the attribute is missing entirely.
    fn cavity_flag(&self) -> Option<bool>;
    fn set_cavity_flag(&mut self, value: bool);

    /// Optional modal capability.
    fn modal(&self) -> Option<&dyn ModalAnalysis>;
}

/// A pairwise coupling held by the native model.
pub trait NativeCoupling {
    fn kind_label(&self) -> String;

    /// Endpoint system ids, where the engine exposes them.
    fn endpoints(&self) -> Option<(SystemId, SystemId)>;

    fn geometry(&self) -> CouplingGeometry;

    /// Per-frequency coupling-loss-factor matrix, where supported.
    fn coupling_loss_factor(&self) -> Option<DMatrix<Complex<f64>>>;
}

/// A converted excitation held by the native model.
pub trait NativeLoad {
    fn name(&self) -> &str;
    /// The subsystem the excitation targets.
    fn target(&self) -> SystemId;
    /// The wave DOF code the excitation targets.
    fn wave_dof(&self) -> u32;
    fn dof_label(&self) -> String;
    fn spectrum(&self) -> Option<Vec<f64>>;
}

/// The assembled (and, after `solve`, solved) native model.
pub trait NativeModel {
    fn add_coupling(&mut self, name: &str, coupling: Box<dyn NativeCoupling>);
    fn add_load(&mut self, name: &str, load: Box<dyn NativeLoad>);

    /// Assemble and invert the power-balance matrix. External work; this
    /// crate only relays success or failure.
    fn solve(&mut self) -> EngineResult<()>;

    fn axis(&self) -> &FrequencyAxis;

    /// Ids of the systems the model holds, in ascending order.
    fn system_ids(&self) -> Vec<SystemId>;
    fn system(&self, id: SystemId) -> Option<&dyn NativeSystem>;

    fn coupling_names(&self) -> Vec<String>;
    fn coupling(&self, name: &str) -> Option<&dyn NativeCoupling>;

    fn load_names(&self) -> Vec<String>;
    fn load(&self, name: &str) -> Option<&dyn NativeLoad>;

    /// Per-system energy results, if the solve produced them.
    fn energy(&self) -> Option<SpectralData>;
    /// Generic response results (velocity, pressure), if produced.
    fn response(&self) -> Option<SpectralData>;
    /// Injected power per load DOF, if produced.
    fn power_input(&self) -> Option<SpectralData>;
    /// The full power-balance matrix, if the engine exposes it.
    fn power_balance(&self) -> Option<PowerBalanceMatrix>;
}

/// The physics-engine collaborator.
pub trait PhysicsEngine {
    /// Capability check. Failure means the engine cannot be located or
    /// initialized; assembly must not start.
    fn probe(&self) -> EngineResult<()>;

    /// Default ambient fluid used by acoustic spaces that do not declare
    /// their own medium.
    fn ambient_fluid(&self) -> Box<dyn NativeMaterial>;

    /// Material conversion. `None` means the engine declined the record.
    fn material(&self, material: &Material) -> Option<Box<dyn NativeMaterial>>;

    /// System conversion, dispatching on the entity's declared kind.
    /// `None` means conversion failed and the entity should be skipped.
    fn system(
        &self,
        entity: &SystemEntity,
        id: SystemId,
        ambient: &dyn NativeMaterial,
    ) -> Option<Box<dyn NativeSystem>>;

    /// Pairwise coupling construction of the given kind and geometry.
    fn coupling(
        &self,
        kind: &JunctionKind,
        pair: (&dyn NativeSystem, &dyn NativeSystem),
    ) -> EngineResult<Box<dyn NativeCoupling>>;

    /// Load conversion against the shared frequency axis. `None` means
    /// the record could not be converted.
    fn load(&self, load: &Load, axis: &FrequencyAxis) -> Option<Box<dyn NativeLoad>>;

    /// Model construction from the full converted system set.
    fn model(
        &self,
        systems: Vec<Box<dyn NativeSystem>>,
        axis: FrequencyAxis,
    ) -> EngineResult<Box<dyn NativeModel>>;

    /// Banded axis construction, where the engine provides it.
    fn band_axis(&self, range: &FrequencyRange) -> Option<FrequencyAxis>;
}
