//! Result bundle data types.
//!
//! The bundle owns every array it reports; nothing here borrows from the
//! solver, so the solved model can be discarded once extraction is done.
//! A bundle is built once per extraction and is immutable afterwards apart
//! from being exported and reloaded. In particular the frequency block,
//! once populated, is never re-assigned.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultBundle {
    pub metadata: BundleMetadata,
    pub frequency: FrequencyBlock,
    #[serde(default)]
    pub systems: BTreeMap<String, SystemRecord>,
    #[serde(default)]
    pub modal_data: BTreeMap<String, ModalDataset>,
    #[serde(default)]
    pub junctions: BTreeMap<String, JunctionRecord>,
    #[serde(default)]
    pub loads: BTreeMap<String, LoadRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<SpectralBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<SpectralBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_input: Option<SpectralBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_matrix: Option<PowerBalanceSnapshot>,
}

impl ResultBundle {
    pub fn new(project_name: &str) -> Self {
        Self {
            metadata: BundleMetadata {
                project_name: project_name.to_string(),
                analysis_type: "SEA".to_string(),
                export_format: EXPORT_FORMAT.to_string(),
                units: BTreeMap::new(),
            },
            frequency: FrequencyBlock::default(),
            systems: BTreeMap::new(),
            modal_data: BTreeMap::new(),
            junctions: BTreeMap::new(),
            loads: BTreeMap::new(),
            energy: None,
            result: None,
            power_input: None,
            sea_matrix: None,
        }
    }

    pub fn summary(&self) -> BundleSummary {
        let hz = &self.frequency.hz;
        BundleSummary {
            project: self.metadata.project_name.clone(),
            frequency_bands: hz.len(),
            frequency_range_hz: match (hz.first(), hz.last()) {
                (Some(lo), Some(hi)) => Some((*lo, *hi)),
                _ => None,
            },
            num_systems: self.systems.len(),
            num_junctions: self.junctions.len(),
            num_modal_datasets: self.modal_data.len(),
            has_energy: self.energy.is_some(),
            has_sea_matrix: self.sea_matrix.is_some(),
            units: self.metadata.units.clone(),
        }
    }
}

/// Version tag written into every exported document.
pub const EXPORT_FORMAT: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundleMetadata {
    pub project_name: String,
    pub analysis_type: String,
    pub export_format: String,
    /// Engineering unit chosen per quantity (e.g. "energy" -> "mJ").
    #[serde(default)]
    pub units: BTreeMap<String, String>,
}

/// The analysis frequency axis in both representations, always populated
/// together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FrequencyBlock {
    pub hz: Vec<f64>,
    pub rad_s: Vec<f64>,
}

/// Per-system metadata: kind plus whichever geometric and material
/// attributes the solver exposed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemRecord {
    pub id: u32,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ly: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialRecord {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youngs_modulus: Option<f64>,
}

/// Modal properties for one system and one wave type, keyed
/// `"sys{id}_wave{type}"` in the bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModalDataset {
    pub system_id: u32,
    pub system_name: String,
    pub system_kind: String,
    pub wave_type: u32,
    /// Modes per unit frequency, one sample per axis point.
    pub modal_density: Vec<f64>,
    /// Dimensionless, one sample per axis point.
    pub modal_overlap: Vec<f64>,
    /// Axis in Hz, repeated here so the dataset is self-contained.
    pub frequency: Vec<f64>,
}

/// Extracted coupling data. Endpoint ids are 0 when the engine does not
/// expose identifiable endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JunctionRecord {
    pub junction_name: String,
    pub junction_kind: String,
    pub system1_id: u32,
    pub system2_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angles: Option<Vec<f64>>,
    /// Per-frequency coupling-loss-factor matrix, real part only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_loss_factor: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadRecord {
    pub name: String,
    pub dof: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spectrum: Option<Vec<f64>>,
}

/// A result array with its parallel degree-of-freedom labels: one id and
/// one type code per column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpectralBlock {
    pub data: Vec<Vec<f64>>,
    pub dof_id: Vec<u32>,
    pub dof_type: Vec<u32>,
}

impl SpectralBlock {
    /// (rows, columns) of the data array.
    pub fn shape(&self) -> (usize, usize) {
        let rows = self.data.len();
        let cols = self.data.first().map(Vec::len).unwrap_or(0);
        (rows, cols)
    }
}

/// Snapshot of the power-balance matrix, real part only; the imaginary
/// component is lost on export by design. Callers that need the full
/// complex matrix must keep the solved model handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PowerBalanceSnapshot {
    /// matrix[f][i][j]: real part at frequency sample f.
    pub matrix: Vec<Vec<Vec<f64>>>,
    /// Axis in Hz the matrix is indexed by.
    pub frequency: Vec<f64>,
    pub system_ids: Vec<u32>,
    pub system_kinds: Vec<String>,
}

/// Quick counts for operators, mirroring what the CLI prints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundleSummary {
    pub project: String,
    pub frequency_bands: usize,
    pub frequency_range_hz: Option<(f64, f64)>,
    pub num_systems: usize,
    pub num_junctions: usize,
    pub num_modal_datasets: usize,
    pub has_energy: bool,
    pub has_sea_matrix: bool,
    pub units: BTreeMap<String, String>,
}
