use crate::VrError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Absolute + relative tolerance pair for float comparisons.
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

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, VrError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(VrError::NonFinite { what, value: v })
    }
}

/// Rejects NaN/Inf and strictly negative values.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, VrError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(VrError::InvalidArg { what });
    }
    Ok(v)
}

/// Rejects NaN/Inf, zero and negative values.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, VrError> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(VrError::InvalidArg { what });
    }
    Ok(v)
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
        assert!(nearly_equal(222.09, 222.09 + 1e-10, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_allows_zero() {
        assert_eq!(ensure_non_negative(0.0, "rate"), Ok(0.0));
        assert!(ensure_non_negative(-1e-9, "rate").is_err());
        assert!(ensure_non_negative(Real::INFINITY, "rate").is_err());
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0.0, "dt").is_err());
        assert_eq!(ensure_positive(0.01, "dt"), Ok(0.01));
    }

    mod proptests {
        use crate::numeric::{Tolerances, nearly_equal};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn nearly_equal_is_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
                let tol = Tolerances::default();
                prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
            }
        }
    }
}
