use crate::RpError;

/// Floating point type used throughout system
pub type Real = f64;

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

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RpError::NonFinite { what, value: v })
    }
}

/// Non-finite values collapse to zero; everything else passes through.
#[inline]
pub fn finite_or_zero(v: Real) -> Real {
    if v.is_finite() { v } else { 0.0 }
}

/// `part / whole * 100`, or zero when `whole` is not a positive finite number.
#[inline]
pub fn percent_of(part: Real, whole: Real) -> Real {
    if whole.is_finite() && whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
