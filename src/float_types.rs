//! Scalar precision selection and shared numeric constants.

use core::str::FromStr;
use std::sync::OnceLock;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Default geometric tolerance for degeneracy checks (zero-length edges,
/// unnormalizable axes) where a compile-time constant is preferable to the
/// runtime cell.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Default geometric tolerance for degeneracy checks (zero-length edges,
/// unnormalizable axes) where a compile-time constant is preferable to the
/// runtime cell.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-9;

/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

/// Lazily-initialized tolerance used across the crate.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `SCULPT_BOUNDARY_TOLERANCE`
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
fn default_tolerance() -> Real {
    EPSILON
}

/// Returns the current tolerance value.
/// If not set yet, it tries `SCULPT_BOUNDARY_TOLERANCE` (parsed as the
/// active `Real`) and falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("SCULPT_BOUNDARY_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `sculpt_boundary::float_types::set_tolerance(1e-6);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}
