//! Brush strength curves and boundary distance-remapping policies.

use crate::float_types::Real;

/// The user brush curve: a monotonic map from a normalized distance to a
/// strength in `[0, 1]`. Evaluated as `f(x, x_max)` with `p = 1 − x/x_max`
/// clamped into `[0, 1]`, so strength is `1` at the boundary and falls to
/// `0` at `x_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FalloffShape {
    /// Hermite smoothstep, `3p² − 2p³`.
    #[default]
    Smooth,
    /// `p`
    Linear,
    /// `p²`
    Sharp,
    /// `√p`
    Root,
    /// Quarter circle, `√(2p − p²)`.
    Sphere,
    /// `p⁴`
    InverseSquare,
    /// `1` everywhere inside `x_max`.
    Constant,
}

impl FalloffShape {
    /// Evaluate the curve at distance `x` of maximum `x_max`.
    /// Degenerate `x_max ≤ 0` yields full strength.
    pub fn evaluate(&self, x: Real, x_max: Real) -> Real {
        if x_max <= 0.0 {
            return 1.0;
        }
        let p = (1.0 - x / x_max).clamp(0.0, 1.0);
        match self {
            FalloffShape::Smooth => p * p * (3.0 - 2.0 * p),
            FalloffShape::Linear => p,
            FalloffShape::Sharp => p * p,
            FalloffShape::Root => p.sqrt(),
            FalloffShape::Sphere => (2.0 * p - p * p).max(0.0).sqrt(),
            FalloffShape::InverseSquare => p * p * p * p,
            FalloffShape::Constant => 1.0,
        }
    }
}

/// How the along-boundary distance from a vertex's origin remaps into the
/// second falloff evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryFalloff {
    /// No distance remapping; every origin contributes equally. The
    /// along-boundary distance field is not even allocated.
    #[default]
    Constant,
    /// Distance used as-is against the brush radius.
    Radius,
    /// Ping-pong: distance folds back every `radius` along the boundary.
    Loop,
    /// Like [`BoundaryFalloff::Loop`], but the multiplier's sign flips on
    /// every second period, alternating the deformation direction.
    LoopInvert,
}

impl BoundaryFalloff {
    /// Whether this policy needs the along-boundary distance field.
    #[inline]
    pub const fn needs_distance(&self) -> bool {
        !matches!(self, BoundaryFalloff::Constant)
    }

    /// Remap an along-boundary distance `d` into `(remapped, direction)`;
    /// `direction` is `±1` and multiplies the final strength.
    pub fn remap(&self, d: Real, radius: Real) -> (Real, Real) {
        match self {
            BoundaryFalloff::Constant => (0.0, 1.0),
            BoundaryFalloff::Radius => (d, 1.0),
            BoundaryFalloff::Loop | BoundaryFalloff::LoopInvert => {
                if radius <= 0.0 {
                    return (0.0, 1.0);
                }
                let period = (d / radius).floor() as i64;
                let m = d % radius;
                let folded = if period % 2 == 0 { m } else { radius - m };
                let direction = if matches!(self, BoundaryFalloff::LoopInvert) && period % 2 == 1
                {
                    -1.0
                } else {
                    1.0
                };
                (folded, direction)
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shapes_are_bounded_and_monotonic() {
        let shapes = [
            FalloffShape::Smooth,
            FalloffShape::Linear,
            FalloffShape::Sharp,
            FalloffShape::Root,
            FalloffShape::Sphere,
            FalloffShape::InverseSquare,
            FalloffShape::Constant,
        ];
        for shape in shapes {
            let mut previous = shape.evaluate(0.0, 10.0);
            assert!((0.0..=1.0).contains(&previous));
            for step in 1..=20 {
                let value = shape.evaluate(step as Real * 0.5, 10.0);
                assert!((0.0..=1.0).contains(&value), "{:?} out of range", shape);
                assert!(
                    value <= previous + 1e-12,
                    "{:?} should be non-increasing in x",
                    shape
                );
                previous = value;
            }
        }
    }

    #[test]
    fn smooth_endpoints() {
        assert!((FalloffShape::Smooth.evaluate(0.0, 4.0) - 1.0).abs() < 1e-12);
        assert!(FalloffShape::Smooth.evaluate(4.0, 4.0).abs() < 1e-12);
    }

    #[test]
    fn loop_falloff_ping_pongs() {
        let radius = 2.0;
        // First period: identity. Second period: folds back.
        let (d0, s0) = BoundaryFalloff::Loop.remap(0.5, radius);
        let (d1, s1) = BoundaryFalloff::Loop.remap(2.5, radius);
        assert!((d0 - 0.5).abs() < 1e-12 && s0 == 1.0);
        assert!((d1 - 1.5).abs() < 1e-12 && s1 == 1.0);
    }

    #[test]
    fn loop_invert_alternates_sign() {
        let radius = 2.0;
        let (_, s0) = BoundaryFalloff::LoopInvert.remap(0.5, radius);
        let (_, s1) = BoundaryFalloff::LoopInvert.remap(2.5, radius);
        let (_, s2) = BoundaryFalloff::LoopInvert.remap(4.5, radius);
        assert_eq!(s0, 1.0);
        assert_eq!(s1, -1.0);
        assert_eq!(s2, 1.0);
    }
}
