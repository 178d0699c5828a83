//! Boundary dataset: everything one symmetry pass of one stroke knows about
//! the open boundary under the cursor.
//!
//! The dataset is built lazily at the first stroke step of a pass (only when
//! an editable boundary exists within the radius), mutated once by the
//! deformation precompute stage, then read-only for every subsequent stroke
//! step until the pass ends.

use crate::deform::DeformData;
use crate::errors::BoundaryError;
use crate::float_types::Real;
use crate::mesh::SculptMesh;
use crate::stroke::BoundaryBrush;
use nalgebra::{Point3, Vector3};

pub mod collector;
pub mod falloff;
pub mod geodesic;
pub mod locator;
pub mod propagation;

pub use propagation::{EditInfo, ORIGIN_NONE, STEPS_NONE};

/// The central entity of the engine; see module docs for its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryDataset {
    /// Collected boundary chain; `verts[0]` is the seed used for the
    /// along-chain distance field.
    pub(crate) verts: Vec<usize>,
    /// Adjacent chain pairs for preview/diagnostics.
    pub(crate) edges: Vec<(usize, usize)>,
    pub(crate) forms_loop: bool,
    /// Along-chain distance from the seed per mesh vertex; only allocated
    /// when the falloff policy reads it.
    pub(crate) distance: Option<Vec<Real>>,
    /// Radius-bounded geodesic distance to the nearest boundary vertex;
    /// `Real::MAX` outside the influence radius.
    pub(crate) boundary_dist: Vec<Real>,
    /// Smoothed tangential direction field of the geodesic distance.
    pub(crate) boundary_tangent: Vec<Vector3<Real>>,
    /// Closest boundary vertex per mesh vertex, where reached.
    pub(crate) boundary_closest: Vec<Option<usize>>,
    /// Per-mesh-vertex propagation record.
    pub(crate) edit_info: Vec<EditInfo>,
    /// Highest step count the expansion reached.
    pub(crate) max_propagation_steps: i32,
    /// The seed boundary vertex; symmetry anchor of this pass.
    pub(crate) initial_vertex: usize,
    pub(crate) initial_vertex_position: Point3<Real>,
    /// Far end of the anchor's propagation lineage.
    pub(crate) pivot_vertex: usize,
    pub(crate) initial_pivot_position: Point3<Real>,
    /// Radius scaled by the brush's boundary offset; bounds the geodesic and
    /// propagation stages.
    pub(crate) effective_radius: Real,
    /// Mode-specific precomputed payload; [`DeformData::None`] until
    /// [`BoundaryDataset::precompute`] runs.
    pub(crate) deform: DeformData,
}

impl BoundaryDataset {
    /// Build the dataset for one symmetry pass: locate the nearest editable
    /// boundary to `initial_vertex` within `radius`, collect the chain, and
    /// compute the geodesic, propagation and falloff fields.
    ///
    /// Returns `Ok(None)` when no editable boundary is in reach — a normal
    /// negative result; the caller does nothing this stroke step.
    pub fn init<M: SculptMesh + ?Sized>(
        mesh: &M,
        brush: &BoundaryBrush,
        initial_vertex: usize,
        radius: Real,
    ) -> Result<Option<Self>, BoundaryError> {
        let count = mesh.vertex_count();
        if initial_vertex >= count {
            return Err(BoundaryError::VertexOutOfRange {
                vertex: initial_vertex,
                count,
            });
        }

        let Some(seed) = locator::closest_boundary_vertex(mesh, initial_vertex, radius) else {
            return Ok(None);
        };

        let effective_radius = radius * brush.boundary_offset;
        let collected = collector::collect(mesh, seed, brush.falloff.needs_distance());
        let (boundary_dist, boundary_closest) =
            geodesic::multi_source_distance(mesh, &collected.verts, effective_radius);
        let boundary_tangent = geodesic::tangent_field(mesh, &boundary_dist);
        let field = propagation::build(mesh, &collected.verts, seed, effective_radius);

        let mut dataset = BoundaryDataset {
            verts: collected.verts,
            edges: collected.edges,
            forms_loop: collected.forms_loop,
            distance: collected.distance,
            boundary_dist,
            boundary_tangent,
            boundary_closest,
            edit_info: field.edit_info,
            max_propagation_steps: field.max_propagation_steps,
            initial_vertex: seed,
            initial_vertex_position: mesh.position(seed),
            pivot_vertex: field.pivot_vertex,
            initial_pivot_position: field.initial_pivot_position,
            effective_radius,
            deform: DeformData::None,
        };

        falloff::assign_strength(
            &mut dataset.edit_info,
            dataset.max_propagation_steps,
            dataset.distance.as_deref(),
            seed,
            radius,
            brush.curve,
            brush.falloff,
        )?;

        debug_assert!(
            dataset.validate(mesh).is_ok(),
            "propagation field failed validation"
        );
        Ok(Some(dataset))
    }

    /// Check the propagation invariants: every reached vertex's origin was
    /// itself reached at step 0 and lies in the chain, and every vertex at
    /// step `k > 0` has a same-origin neighbor one step closer (path
    /// continuity). A violation means the field would corrupt geometry.
    pub fn validate<M: SculptMesh + ?Sized>(&self, mesh: &M) -> Result<(), BoundaryError> {
        let mut scratch = Vec::new();
        for (vertex, info) in self.edit_info.iter().enumerate() {
            if !info.is_reached() {
                continue;
            }
            if info.origin >= self.edit_info.len()
                || self.edit_info[info.origin].steps != 0
            {
                return Err(BoundaryError::InconsistentPropagation {
                    vertex,
                    origin: info.origin,
                });
            }
            if info.steps > 0 {
                mesh.neighbors(vertex, &mut scratch);
                let continuous = scratch.iter().any(|neighbor| {
                    let other = self.edit_info[neighbor.vertex];
                    other.origin == info.origin
                        && (other.steps == info.steps - 1
                            || (neighbor.is_duplicate && other.steps == info.steps))
                });
                if !continuous {
                    return Err(BoundaryError::InconsistentPropagation {
                        vertex,
                        origin: info.origin,
                    });
                }
            }
        }
        Ok(())
    }

    /// The collected boundary chain, seed first.
    pub fn verts(&self) -> &[usize] {
        &self.verts
    }

    /// Preview edges of the chain; includes the closing edge when the chain
    /// forms a loop.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Whether the collected chain closes on itself.
    pub const fn forms_loop(&self) -> bool {
        self.forms_loop
    }

    /// The seed boundary vertex; symmetry anchor of this pass.
    pub const fn initial_vertex(&self) -> usize {
        self.initial_vertex
    }

    /// Far end of the anchor's propagation lineage.
    pub const fn pivot_vertex(&self) -> usize {
        self.pivot_vertex
    }

    /// Highest propagation step the expansion reached.
    pub const fn max_propagation_steps(&self) -> i32 {
        self.max_propagation_steps
    }

    /// Propagation record of one vertex.
    pub fn edit_info(&self, vertex: usize) -> EditInfo {
        self.edit_info[vertex]
    }

    /// Geodesic distance of a vertex to the nearest boundary vertex;
    /// `Real::MAX` outside the influence radius.
    pub fn boundary_distance(&self, vertex: usize) -> Real {
        self.boundary_dist[vertex]
    }

    /// Closest boundary vertex, where the geodesic stage reached.
    pub fn boundary_closest(&self, vertex: usize) -> Option<usize> {
        self.boundary_closest[vertex]
    }

    /// Smoothed boundary tangent direction; zero where undefined.
    pub fn boundary_tangent(&self, vertex: usize) -> Vector3<Real> {
        self.boundary_tangent[vertex]
    }

    /// The precomputed mode payload ([`DeformData::None`] before
    /// [`BoundaryDataset::precompute`] runs).
    pub const fn deform_data(&self) -> &DeformData {
        &self.deform
    }
}
