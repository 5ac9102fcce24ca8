//! Escape-time mathematics: grid → plane mapping, the quadratic step and
//! the per-point classifier.
//!
//! Everything here is pure. The classifier never panics: a point whose
//! arithmetic leaves the finite range comes back as [`Escape::Blank`].

use crate::core::{
    complex::Complex,
    constants::{
        C_IMAG_BASE, C_IMAG_WOBBLE, C_REAL_BASE, C_REAL_WOBBLE, ESCAPE_RADIUS, IMAG_DRIFT,
        MAX_ITERATIONS, REAL_DRIFT,
    },
};

/// Map cell `(x, y)` of a `width × height` grid to the complex plane at time `t`.
///
/// The centring terms use integer (floor) division. When `width < 4` or
/// `height < 4` the scale is zero and the result is non-finite.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn map_cell(x: usize, y: usize, width: usize, height: usize, t: f64) -> Complex {
    let re = (x as f64 - (width / 2) as f64) / (width / 4) as f64 + t * REAL_DRIFT;
    let im = (y as f64 - (height / 2) as f64) / (height / 4) as f64 + t * IMAG_DRIFT;
    Complex::new(re, im)
}

/// Recurrence constant `c(t)`.
#[inline]
#[must_use]
pub fn julia_constant(t: f64) -> Complex {
    Complex::new(
        C_REAL_BASE + C_REAL_WOBBLE * t.sin(),
        C_IMAG_BASE + C_IMAG_WOBBLE * t.cos(),
    )
}

/// One application of `z ← z² + c(t)`.
#[inline]
#[must_use]
pub fn step(z: Complex, t: f64) -> Complex {
    step_with(z, julia_constant(t))
}

/// Same as [`step`] with `c` already computed for the frame.
#[inline]
#[must_use]
pub fn step_with(z: Complex, c: Complex) -> Complex {
    z.square().add(c)
}

/// Outcome of iterating one point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Escape {
    /// `|z| > 2` was first seen at this iteration slot (0-based, `< 30`).
    After(u32),
    /// Stayed bounded for every slot.
    Converged,
    /// Arithmetic left the finite range; draw nothing.
    Blank,
}

impl Escape {
    /// Normalised escape speed: `i / 30`, or `1.0` when converged.
    /// `None` for a blank cell.
    #[inline]
    #[must_use]
    pub fn fraction(self) -> Option<f64> {
        match self {
            Self::After(i) => Some(f64::from(i) / f64::from(MAX_ITERATIONS)),
            Self::Converged => Some(1.0),
            Self::Blank => None,
        }
    }
}

/// Classify `z0` at time `t`.
#[inline]
#[must_use]
pub fn classify(z0: Complex, t: f64) -> Escape {
    classify_with(z0, julia_constant(t))
}

/// Check-then-step: slot `i` tests the current value and only then
/// transforms it, so slot 0 sees the untouched seed.
#[must_use]
pub fn classify_with(z0: Complex, c: Complex) -> Escape {
    if !c.is_finite() {
        return Escape::Blank;
    }
    let mut z = z0;
    for i in 0..MAX_ITERATIONS {
        if !z.is_finite() {
            return Escape::Blank;
        }
        if z.norm() > ESCAPE_RADIUS {
            return Escape::After(i);
        }
        z = step_with(z, c);
    }
    Escape::Converged
}
