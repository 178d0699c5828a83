//! Propagation field: ring-at-a-time expansion of the boundary into the
//! mesh interior, assigning every reached vertex an origin boundary vertex
//! and a step count.

use crate::float_types::Real;
use crate::mesh::SculptMesh;
use nalgebra::Point3;

/// Sentinel step count for vertices the propagation never reached.
pub const STEPS_NONE: i32 = -1;

/// Sentinel origin for vertices the propagation never reached.
pub const ORIGIN_NONE: usize = usize::MAX;

/// Per-mesh-vertex propagation record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditInfo {
    /// The boundary vertex this vertex inherits deformation data from.
    pub origin: usize,
    /// Breadth-first expansion steps from the boundary; [`STEPS_NONE`] when
    /// unreached.
    pub steps: i32,
    /// Falloff strength factor, assigned after propagation.
    pub strength: Real,
}

impl EditInfo {
    #[inline]
    pub(crate) const fn unreached() -> Self {
        EditInfo {
            origin: ORIGIN_NONE,
            steps: STEPS_NONE,
            strength: 0.0,
        }
    }

    /// Whether the propagation reached this vertex.
    #[inline]
    pub const fn is_reached(&self) -> bool {
        self.steps != STEPS_NONE
    }
}

pub(crate) struct PropagationField {
    pub edit_info: Vec<EditInfo>,
    pub max_propagation_steps: i32,
    pub pivot_vertex: usize,
    pub initial_pivot_position: Point3<Real>,
}

/// Expand from every boundary vertex one ring at a time. A neighbor is
/// absorbed only if visible and not yet absorbed; it copies the expanding
/// vertex's origin and takes one more step (seam duplicates copy without
/// incrementing).
///
/// The stop condition is the cumulative geometric distance travelled along
/// the lineage of `initial_vertex` (the symmetry anchor): once it exceeds
/// `effective_radius` the expansion ends, and so does an empty frontier.
/// While following that lineage, the first vertex each ring absorbs from it
/// is recorded as the pivot, so the pivot tracks the far end of the anchor's
/// reach and anchors the mirrored-pass checks in the appliers.
pub(crate) fn build<M: SculptMesh + ?Sized>(
    mesh: &M,
    verts: &[usize],
    initial_vertex: usize,
    effective_radius: Real,
) -> PropagationField {
    let count = mesh.vertex_count();
    let mut edit_info = vec![EditInfo::unreached(); count];

    let mut current = Vec::with_capacity(verts.len());
    for &vertex in verts {
        edit_info[vertex] = EditInfo {
            origin: vertex,
            steps: 0,
            strength: 0.0,
        };
        current.push(vertex);
    }

    let mut max_propagation_steps = 0;
    let mut accumulated = 0.0;
    let mut pivot_vertex = initial_vertex;
    let mut initial_pivot_position = mesh.position(initial_vertex);
    let mut scratch = Vec::new();

    while !current.is_empty() && accumulated <= effective_radius {
        let mut next = Vec::new();
        let mut pivot_found_this_ring = false;
        for &from in &current {
            let from_info = edit_info[from];
            let from_position = mesh.position(from);
            mesh.neighbors(from, &mut scratch);
            for neighbor in &scratch {
                let neighbor = *neighbor;
                if !mesh.is_visible(neighbor.vertex) || edit_info[neighbor.vertex].is_reached()
                {
                    continue;
                }
                let steps = if neighbor.is_duplicate {
                    from_info.steps
                } else {
                    from_info.steps + 1
                };
                edit_info[neighbor.vertex] = EditInfo {
                    origin: from_info.origin,
                    steps,
                    strength: 0.0,
                };
                max_propagation_steps = max_propagation_steps.max(steps);

                // Follow the anchor's lineage one path step per ring: the
                // first vertex absorbed from it becomes the pivot and its
                // edge extends the accumulated path length.
                if from_info.origin == initial_vertex && !pivot_found_this_ring {
                    accumulated += (mesh.position(neighbor.vertex) - from_position).norm();
                    pivot_vertex = neighbor.vertex;
                    initial_pivot_position = mesh.position(neighbor.vertex);
                    pivot_found_this_ring = true;
                }

                next.push(neighbor.vertex);
            }
        }
        current = next;
    }

    PropagationField {
        edit_info,
        max_propagation_steps,
        pivot_vertex,
        initial_pivot_position,
    }
}
