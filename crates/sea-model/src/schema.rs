//! Entity record definitions.
//!
//! Every entity family carries a closed, tagged kind enum; dispatch is an
//! exhaustive match, so an unrecognized kind is a deserialization error
//! rather than a failure deep inside assembly.

use sea_core::SystemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A physical medium, solid, or porous-absorber definition.
///
/// Unset optional properties fall back to the physics engine's defaults
/// at conversion time (ambient air, mild steel, glass-wool absorber).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MaterialKind {
    Fluid {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        density: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed_of_sound: Option<f64>,
        #[serde(default)]
        loss_factor: f64,
    },
    Solid {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        youngs_modulus: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        poisson_ratio: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        density: Option<f64>,
        #[serde(default)]
        loss_factor: f64,
    },
    EquivalentFluid {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        porosity: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flow_resistivity: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tortuosity: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        density: Option<f64>,
    },
}

/// A plate or beam subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructuralElement {
    pub name: String,
    pub kind: StructuralKind,
    /// Named dimension -> length in meters (e.g. "thickness", "Lx", "Ly").
    #[serde(default)]
    pub dimensions: BTreeMap<String, f64>,
    pub material: Material,
    #[serde(default = "default_damping_loss_factor")]
    pub damping_loss_factor: f64,
}

impl StructuralElement {
    /// Named dimension with a fallback used when the caller left it unset.
    pub fn dimension_or(&self, name: &str, fallback: f64) -> f64 {
        self.dimensions.get(name).copied().unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum StructuralKind {
    Plate,
    Beam,
}

fn default_damping_loss_factor() -> f64 {
    0.01
}

/// A cavity or room subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcousticSpace {
    pub name: String,
    pub geometry: CavityGeometry,
    #[serde(default)]
    pub absorption_area: f64,
    #[serde(default = "default_damping_models")]
    pub damping: Vec<DampingModel>,
}

/// Cavity geometry, either a rectangular box or free-form bulk values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CavityGeometry {
    Box { lx: f64, ly: f64, lz: f64 },
    Free {
        volume: f64,
        surface_area: f64,
        perimeter: f64,
    },
}

impl CavityGeometry {
    pub fn volume(&self) -> f64 {
        match *self {
            CavityGeometry::Box { lx, ly, lz } => lx * ly * lz,
            CavityGeometry::Free { volume, .. } => volume,
        }
    }

    pub fn surface_area(&self) -> f64 {
        match *self {
            CavityGeometry::Box { lx, ly, lz } => 2.0 * (lx * ly + ly * lz + lx * lz),
            CavityGeometry::Free { surface_area, .. } => surface_area,
        }
    }

    pub fn perimeter(&self) -> f64 {
        match *self {
            CavityGeometry::Box { lx, ly, lz } => 4.0 * (lx + ly + lz),
            CavityGeometry::Free { perimeter, .. } => perimeter,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DampingModel {
    Surface,
    Cavity,
}

fn default_damping_models() -> Vec<DampingModel> {
    vec![DampingModel::Surface]
}

/// A declared coupling between two or more subsystems.
///
/// The participant tuple is ordered; order matters for the pairwise
/// decomposition of junctions with more than two participants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Junction {
    pub name: String,
    pub kind: JunctionKind,
    pub systems: Vec<SystemId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum JunctionKind {
    Area {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        area: Option<f64>,
    },
    Line {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        angles: Option<Vec<f64>>,
    },
    SemiInfinite,
}

impl JunctionKind {
    pub fn label(&self) -> &'static str {
        match self {
            JunctionKind::Area { .. } => "area",
            JunctionKind::Line { .. } => "line",
            JunctionKind::SemiInfinite => "semi_infinite",
        }
    }
}

/// An excitation applied to one subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Load {
    pub name: String,
    pub kind: LoadKind,
    pub system: SystemId,
    /// Engine-side wave DOF code the excitation targets.
    #[serde(default)]
    pub wave_dof: u32,
    #[serde(default = "default_magnitude")]
    pub magnitude: f64,
    /// Explicit spectrum over the frequency axis. Absent means a flat
    /// spectrum of `magnitude`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectrum: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum LoadKind {
    Power,
}

impl LoadKind {
    pub fn label(&self) -> &'static str {
        match self {
            LoadKind::Power => "power",
        }
    }
}

fn default_magnitude() -> f64 {
    1.0
}

/// Frequency range specification for the analysis axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrequencyRange {
    pub f_min: f64,
    pub f_max: f64,
    #[serde(default)]
    pub bands: BandSpacing,
    #[serde(default = "default_num_points")]
    pub num_points: usize,
}

impl Default for FrequencyRange {
    fn default() -> Self {
        Self {
            f_min: 20.0,
            f_max: 10_000.0,
            bands: BandSpacing::default(),
            num_points: default_num_points(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BandSpacing {
    #[default]
    ThirdOctave,
    Octave,
    Linear,
}

fn default_num_points() -> usize {
    100
}
