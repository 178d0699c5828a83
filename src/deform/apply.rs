//! Per-stroke-step deformation appliers.
//!
//! Every applier is an idempotent overwrite: the new position of a vertex is
//! a pure function of its pre-stroke snapshot position, the precomputed
//! per-vertex data, and the current stroke sample. Updates are gathered
//! read-only and written afterwards, so the gather may run data-parallel.

use crate::boundary::BoundaryDataset;
use crate::deform::DeformData;
use crate::float_types::{Real, tolerance};
use crate::mesh::SculptMesh;
use crate::stroke::{BoundaryBrush, StrokeStep};
use crate::symmetry::vertex_matches_symmetry_area;
use nalgebra::{Point3, Rotation3, Unit, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Rotate `position` around the `(pivot, axis)` frame by `angle` radians.
fn rotate_around(
    position: Point3<Real>,
    pivot: Point3<Real>,
    axis: Vector3<Real>,
    angle: Real,
) -> Option<Point3<Real>> {
    let axis = Unit::try_new(axis, tolerance())?;
    let rotation = Rotation3::from_axis_angle(&axis, angle);
    Some(pivot + rotation * (position - pivot))
}

impl BoundaryDataset {
    /// Apply one stroke step to every affected vertex, writing through the
    /// deform-target indirection. `orig_positions` is the pre-stroke
    /// snapshot (owned by the caller); positions are always recomputed from
    /// it, never incremented, so reapplying with the same sample is a no-op.
    ///
    /// Precompute must have run for this pass; with [`DeformData::None`]
    /// nothing moves.
    #[cfg(not(feature = "parallel"))]
    pub fn apply_step<M: SculptMesh>(
        &self,
        mesh: &mut M,
        orig_positions: &[Point3<Real>],
        brush: &BoundaryBrush,
        step: &StrokeStep,
    ) {
        if step.radius <= 0.0 {
            return;
        }
        let displacement = step.displacement();
        let updates: Vec<(usize, Point3<Real>)> = (0..mesh.vertex_count())
            .filter_map(|vertex| {
                self.deform_vertex(mesh, orig_positions, brush, step, displacement, vertex)
                    .map(|position| (vertex, position))
            })
            .collect();
        for (vertex, position) in updates {
            *mesh.deform_position_mut(vertex) = position;
        }
    }

    /// Apply one stroke step to every affected vertex, writing through the
    /// deform-target indirection. `orig_positions` is the pre-stroke
    /// snapshot (owned by the caller); positions are always recomputed from
    /// it, never incremented, so reapplying with the same sample is a no-op.
    ///
    /// Precompute must have run for this pass; with [`DeformData::None`]
    /// nothing moves. The gather phase runs on the rayon pool: each vertex
    /// depends only on read-only precomputed data and its own snapshot
    /// position, so no synchronization is needed.
    #[cfg(feature = "parallel")]
    pub fn apply_step<M: SculptMesh + Sync>(
        &self,
        mesh: &mut M,
        orig_positions: &[Point3<Real>],
        brush: &BoundaryBrush,
        step: &StrokeStep,
    ) {
        if step.radius <= 0.0 {
            return;
        }
        let displacement = step.displacement();
        let updates: Vec<(usize, Point3<Real>)> = (0..mesh.vertex_count())
            .into_par_iter()
            .filter_map(|vertex| {
                self.deform_vertex(mesh, orig_positions, brush, step, displacement, vertex)
                    .map(|position| (vertex, position))
            })
            .collect();
        for (vertex, position) in updates {
            *mesh.deform_position_mut(vertex) = position;
        }
    }

    /// The per-vertex deformation core shared by both gather variants.
    /// Returns the vertex's new position, or `None` when it is skipped
    /// (unreached, wrong symmetry area, zero weight, degenerate frame).
    fn deform_vertex<M: SculptMesh + ?Sized>(
        &self,
        mesh: &M,
        orig_positions: &[Point3<Real>],
        brush: &BoundaryBrush,
        step: &StrokeStep,
        displacement: Real,
        vertex: usize,
    ) -> Option<Point3<Real>> {
        let info = self.edit_info[vertex];
        if !info.is_reached() {
            return None;
        }
        let orig = orig_positions[vertex];
        // Only the mirrored half this pass owns may move.
        if !vertex_matches_symmetry_area(&orig, &self.initial_vertex_position, step.symmetry) {
            return None;
        }
        let weight = (1.0 - mesh.mask(vertex))
            * mesh.automask_factor(vertex)
            * info.strength
            * brush.strength;
        if weight == 0.0 {
            return None;
        }

        match &self.deform {
            DeformData::None => None,
            DeformData::Bend {
                pivot_positions,
                pivot_axes,
            } => rotate_around(
                orig,
                pivot_positions[vertex],
                pivot_axes[vertex],
                step.rotation_angle(displacement) * weight,
            ),
            DeformData::Twist { pivot, axis } => rotate_around(
                orig,
                *pivot,
                *axis,
                step.rotation_angle(displacement) * weight,
            ),
            DeformData::Slide { directions } => {
                Some(orig + directions[vertex] * displacement * weight)
            },
            DeformData::Inflate => Some(orig + mesh.normal(vertex) * displacement * weight),
            DeformData::Grab => Some(orig + step.grab_delta * weight),
            DeformData::Circle { origins, radii } => {
                let ring = info.steps as usize;
                let origin = origins[ring];
                let spoke = orig - origin;
                if spoke.norm() <= tolerance() {
                    return None;
                }
                let target = origin + spoke.normalize() * radii[ring];
                // Scale by the normalized displacement so a still stroke
                // leaves the ring untouched.
                let blend = weight * (displacement / step.radius).clamp(0.0, 1.0);
                Some(orig + (target - orig) * blend)
            },
            DeformData::Smooth => {
                let mut scratch = Vec::new();
                mesh.neighbors(vertex, &mut scratch);
                let mut average = Vector3::zeros();
                let mut total = 0;
                for neighbor in &scratch {
                    if self.edit_info[neighbor.vertex].steps == info.steps {
                        average += mesh.position(neighbor.vertex).coords;
                        total += 1;
                    }
                }
                if total == 0 {
                    return None;
                }
                average /= total as Real;
                let current = mesh.position(vertex);
                let blend = weight * (displacement / step.radius).clamp(0.0, 1.0);
                Some(current + (Point3::from(average) - current) * blend)
            },
        }
    }
}
