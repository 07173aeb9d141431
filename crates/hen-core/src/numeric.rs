use crate::HenError;

/// Floating point type used throughout the engine.
pub type Real = f64;

/// One tolerance for everything.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
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

/// Round to 4 decimals. Interval-boundary and border comparisons are done
/// on rounded values so that shifted temperatures that should coincide do.
pub fn round4(v: Real) -> Real {
    (v * 1e4).round() / 1e4
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HenError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HenError::invalid_input(format!(
            "non-finite value for {what}: {v}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn round4_snaps_shifted_temperatures() {
        assert_eq!(round4(89.999_999_99), 90.0);
        assert_eq!(round4(90.000_05), 90.0001);
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "dt").unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }
}
