//! Engineering unit selection and conversion factors.
//!
//! Conversion is a pure scalar multiply applied once per extraction, always
//! against the solver's SI arrays. Selecting a unit the table does not
//! know keeps the previous selection and logs a warning; it never fails.

use std::collections::BTreeMap;
use tracing::warn;

/// Quantities with a configurable output unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantity {
    Energy,
    Power,
    Velocity,
    Pressure,
    Length,
    Area,
}

impl Quantity {
    pub fn key(self) -> &'static str {
        match self {
            Quantity::Energy => "energy",
            Quantity::Power => "power",
            Quantity::Velocity => "velocity",
            Quantity::Pressure => "pressure",
            Quantity::Length => "length",
            Quantity::Area => "area",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "energy" => Some(Quantity::Energy),
            "power" => Some(Quantity::Power),
            "velocity" => Some(Quantity::Velocity),
            "pressure" => Some(Quantity::Pressure),
            "length" => Some(Quantity::Length),
            "area" => Some(Quantity::Area),
            _ => None,
        }
    }

    /// Recognized units and their multipliers from the SI base.
    fn table(self) -> &'static [(&'static str, f64)] {
        match self {
            Quantity::Energy => &[("J", 1.0), ("mJ", 1e3), ("uJ", 1e6)],
            Quantity::Power => &[("W", 1.0), ("mW", 1e3), ("uW", 1e6)],
            Quantity::Velocity => &[("m/s", 1.0), ("mm/s", 1e3), ("um/s", 1e6)],
            Quantity::Pressure => &[("Pa", 1.0), ("uPa", 1e6)],
            Quantity::Length => &[("m", 1.0), ("mm", 1e3), ("um", 1e6)],
            Quantity::Area => &[("m²", 1.0), ("cm²", 1e4), ("mm²", 1e6)],
        }
    }

    const ALL: [Quantity; 6] = [
        Quantity::Energy,
        Quantity::Power,
        Quantity::Velocity,
        Quantity::Pressure,
        Quantity::Length,
        Quantity::Area,
    ];
}

/// The active unit per quantity. Defaults to SI base units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSelection {
    selected: BTreeMap<Quantity, &'static str>,
}

impl Default for UnitSelection {
    fn default() -> Self {
        let selected = Quantity::ALL
            .iter()
            .map(|q| (*q, q.table()[0].0))
            .collect();
        Self { selected }
    }
}

impl UnitSelection {
    /// Select a unit for a quantity. Returns whether the request was
    /// accepted; an unrecognized unit keeps the previous selection.
    pub fn set(&mut self, quantity: Quantity, unit: &str) -> bool {
        match quantity.table().iter().find(|(name, _)| *name == unit) {
            Some((canonical, _)) => {
                self.selected.insert(quantity, canonical);
                true
            }
            None => {
                warn!(
                    quantity = quantity.key(),
                    unit, "ignoring invalid unit, keeping previous selection"
                );
                false
            }
        }
    }

    /// String-keyed variant for callers driven by configuration input.
    pub fn set_by_key(&mut self, quantity: &str, unit: &str) -> bool {
        match Quantity::from_key(quantity) {
            Some(q) => self.set(q, unit),
            None => {
                warn!(quantity, unit, "ignoring unknown quantity");
                false
            }
        }
    }

    /// The unit currently selected for a quantity.
    pub fn unit(&self, quantity: Quantity) -> &'static str {
        self.selected
            .get(&quantity)
            .copied()
            .unwrap_or_else(|| quantity.table()[0].0)
    }

    /// Multiplier from the solver's SI base to the selected unit.
    pub fn factor(&self, quantity: Quantity) -> f64 {
        let unit = self.unit(quantity);
        quantity
            .table()
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| *factor)
            .unwrap_or(1.0)
    }

    /// Quantity-key -> unit labels, as stored in bundle metadata.
    pub fn labels(&self) -> BTreeMap<String, String> {
        self.selected
            .iter()
            .map(|(q, unit)| (q.key().to_string(), unit.to_string()))
            .collect()
    }
}
