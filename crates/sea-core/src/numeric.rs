use crate::CoreError;

/// Floating point type used throughout the system
pub type Real = f64;

pub const TWO_PI: Real = 2.0 * core::f64::consts::PI;

/// Convert an angular-frequency sample (rad/s) to Hz.
pub fn rad_to_hz(omega: Real) -> Real {
    omega / TWO_PI
}

/// Convert a frequency sample (Hz) to rad/s.
pub fn hz_to_rad(f: Real) -> Real {
    f * TWO_PI
}

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rad_hz_round_trip() {
        let tol = Tolerances::default();
        for f in [20.0, 100.0, 1000.0, 10_000.0] {
            assert!(nearly_equal(rad_to_hz(hz_to_rad(f)), f, tol));
        }
        assert!(nearly_equal(rad_to_hz(TWO_PI * 50.0), 50.0, tol));
    }

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }
}
