//! Capability interface to the surrounding mesh/editing system.
//!
//! The deformation engine never owns mesh topology: it reads positions,
//! normals, connectivity and per-vertex sculpt attributes through
//! [`SculptMesh`] and writes positions back through the deform-target
//! indirection. [`topology::Topology`] is a self-contained implementation
//! for embedders (and tests) without their own mesh representation.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

pub mod topology;

pub use topology::Topology;

/// One adjacency entry yielded by [`SculptMesh::neighbors`].
///
/// Grid-based mesh representations store the same surface point under
/// several vertex handles along grid seams; such entries carry
/// `is_duplicate = true` so that graph traversals can propagate data across
/// the seam without counting it as a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub vertex: usize,
    pub is_duplicate: bool,
}

impl Neighbor {
    #[inline]
    pub const fn new(vertex: usize) -> Self {
        Neighbor {
            vertex,
            is_duplicate: false,
        }
    }

    #[inline]
    pub const fn duplicate(vertex: usize) -> Self {
        Neighbor {
            vertex,
            is_duplicate: true,
        }
    }
}

/// Read/write access to the sculpted mesh, as seen by the boundary engine.
///
/// Vertices are addressed by `usize` handles stable for the duration of one
/// stroke. Implementations backed by an external editor are expected to
/// route [`SculptMesh::deform_position_mut`] to whichever buffer the current
/// deform target selects (live positions, a shape key, ...).
pub trait SculptMesh {
    /// Number of vertices; handles are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Current position of a vertex.
    fn position(&self, vertex: usize) -> Point3<Real>;

    /// Unit surface normal of a vertex.
    fn normal(&self, vertex: usize) -> Vector3<Real>;

    /// Whether the vertex is visible (hidden vertices are never deformed and
    /// never traversed).
    fn is_visible(&self, vertex: usize) -> bool;

    /// Whether the vertex lies on an open mesh boundary (an edge with
    /// exactly one adjacent face).
    fn is_boundary(&self, vertex: usize) -> bool;

    /// Sculpt mask in `[0, 1]`; `1` fully protects the vertex.
    fn mask(&self, vertex: usize) -> Real;

    /// Automasking factor in `[0, 1]` from prior sculpting state.
    fn automask_factor(&self, vertex: usize) -> Real;

    /// Append all neighbors of `vertex` to `out` (which is cleared first).
    /// Duplicate-aware: seam twins are flagged, see [`Neighbor`].
    fn neighbors(&self, vertex: usize, out: &mut Vec<Neighbor>);

    /// The mutable position slot selected by the current deform target.
    fn deform_position_mut(&mut self, vertex: usize) -> &mut Point3<Real>;
}
