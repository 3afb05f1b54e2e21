//! Frequency axis construction policy.

use crate::adapter::PhysicsEngine;
use sea_core::{TWO_PI, rad_to_hz};
use sea_model::{BandSpacing, FrequencyRange};
use tracing::warn;

/// The analysis frequency axis, stored in angular frequency (rad/s).
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyAxis {
    omega: Vec<f64>,
}

impl FrequencyAxis {
    pub fn from_omega(omega: Vec<f64>) -> Self {
        Self { omega }
    }

    /// Angular-frequency samples (rad/s).
    pub fn omega(&self) -> &[f64] {
        &self.omega
    }

    /// The same samples in Hz.
    pub fn hz(&self) -> Vec<f64> {
        self.omega.iter().copied().map(rad_to_hz).collect()
    }

    pub fn len(&self) -> usize {
        self.omega.len()
    }

    pub fn is_empty(&self) -> bool {
        self.omega.is_empty()
    }
}

/// Build the analysis axis for a declared range.
///
/// Banded spacings come from the engine when it offers a band axis;
/// otherwise (and for linear spacing) the axis is computed here. The
/// log-spaced fallback keeps post-treatment usable when the engine cannot
/// produce band centers.
pub fn build_axis(engine: &dyn PhysicsEngine, range: &FrequencyRange) -> FrequencyAxis {
    match range.bands {
        BandSpacing::ThirdOctave | BandSpacing::Octave => {
            engine.band_axis(range).unwrap_or_else(|| {
                warn!(
                    f_min = range.f_min,
                    f_max = range.f_max,
                    "engine band axis unavailable, using log-spaced fallback"
                );
                log_axis(range)
            })
        }
        BandSpacing::Linear => linear_axis(range),
    }
}

fn linear_axis(range: &FrequencyRange) -> FrequencyAxis {
    let n = range.num_points.max(2);
    let step = (range.f_max - range.f_min) / (n - 1) as f64;
    let omega = (0..n)
        .map(|i| (range.f_min + step * i as f64) * TWO_PI)
        .collect();
    FrequencyAxis::from_omega(omega)
}

fn log_axis(range: &FrequencyRange) -> FrequencyAxis {
    let n = range.num_points.max(2);
    let lo = range.f_min.log10();
    let hi = range.f_max.log10();
    let step = (hi - lo) / (n - 1) as f64;
    let omega = (0..n)
        .map(|i| 10f64.powf(lo + step * i as f64) * TWO_PI)
        .collect();
    FrequencyAxis::from_omega(omega)
}
