//! Falloff assignment: convert propagation steps and along-boundary
//! distances into per-vertex strength factors.

use crate::boundary::propagation::EditInfo;
use crate::errors::BoundaryError;
use crate::falloff::{BoundaryFalloff, FalloffShape};
use crate::float_types::Real;

/// Assign `strength` for every reached vertex.
///
/// The brush curve is first evaluated at `(steps, max_steps)`. Vertices
/// whose origin is the symmetry anchor itself stop there: they always follow
/// the anchor's motion directly and skip distance remapping. Everyone else,
/// under a distance-carrying policy, multiplies in a second curve evaluation
/// of the remapped along-boundary distance of their origin ([`BoundaryFalloff::LoopInvert`]
/// can flip the factor's sign, alternating the deformation direction along
/// the boundary).
pub(crate) fn assign_strength(
    edit_info: &mut [EditInfo],
    max_steps: i32,
    distance: Option<&[Real]>,
    initial_vertex: usize,
    radius: Real,
    curve: FalloffShape,
    policy: BoundaryFalloff,
) -> Result<(), BoundaryError> {
    if policy.needs_distance() && distance.is_none() {
        return Err(BoundaryError::MissingDistanceField);
    }
    for info in edit_info.iter_mut() {
        if !info.is_reached() {
            continue;
        }
        let mut strength = curve.evaluate(info.steps as Real, max_steps as Real);
        if info.origin != initial_vertex
            && policy.needs_distance()
            && let Some(distance) = distance
        {
            let (remapped, direction) = policy.remap(distance[info.origin], radius);
            strength *= direction * curve.evaluate(remapped, radius);
        }
        info.strength = strength;
    }
    Ok(())
}
