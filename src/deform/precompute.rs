//! Per-stroke deformation precompute: derive mode-specific auxiliary
//! vectors and pivots from the propagation field, once per symmetry pass.

use crate::boundary::BoundaryDataset;
use crate::deform::{DeformData, DeformMode};
use crate::float_types::{Real, tolerance};
use crate::mesh::SculptMesh;
use nalgebra::{Point3, Vector3};

/// Remove from `direction` its component along `axis` and renormalize.
/// Returns `None` when the rejection degenerates.
fn reject_normalized(direction: Vector3<Real>, axis: &Vector3<Real>) -> Option<Vector3<Real>> {
    let rejected = direction - axis * direction.dot(axis);
    (rejected.norm() > tolerance()).then(|| rejected.normalize())
}

impl BoundaryDataset {
    /// Derive the auxiliary data for `mode`. Runs once per pass, before any
    /// applier; `radius` is the brush radius of the stroke.
    pub fn precompute<M: SculptMesh + ?Sized>(
        &mut self,
        mesh: &M,
        mode: DeformMode,
        radius: Real,
    ) {
        self.deform = match mode {
            DeformMode::Bend => self.bend_data(mesh, radius),
            DeformMode::Slide => self.slide_data(mesh),
            DeformMode::Twist => self.twist_data(mesh),
            DeformMode::Circle => self.circle_data(mesh),
            // Inflate and Grab need only the per-vertex normal / the raw
            // stroke delta; Smooth reads live neighbor positions.
            DeformMode::Inflate => DeformData::Inflate,
            DeformMode::Grab => DeformData::Grab,
            DeformMode::Smooth => DeformData::Smooth,
        };
    }

    /// Bend frames: for every outermost-ring vertex, an axis along the
    /// boundary (origin direction × surface normal, with the origin
    /// direction first rejected against the boundary tangent when one is
    /// defined) and a pivot pushed `radius` outward from the vertex within
    /// its surface tangent plane. Origins whose outermost-ring member
    /// degenerated inherit the frame of the nearest outer-ring vertex by
    /// direct geometric search (quadratic in the ring size, which stays
    /// small relative to the mesh). Interior vertices copy the pivot from
    /// their origin but recompute the axis from their own tangent/normal so
    /// the rotation stays visually consistent across the field.
    fn bend_data<M: SculptMesh + ?Sized>(&self, mesh: &M, radius: Real) -> DeformData {
        let count = mesh.vertex_count();
        let mut pivot_positions = vec![Point3::origin(); count];
        let mut pivot_axes = vec![Vector3::zeros(); count];
        let mut has_frame = vec![false; count];
        let mut donors: Vec<usize> = Vec::new();

        for vertex in 0..count {
            let info = self.edit_info[vertex];
            if info.steps != self.max_propagation_steps {
                continue;
            }
            let position = mesh.position(vertex);
            let toward_origin = mesh.position(info.origin) - position;
            if toward_origin.norm() <= tolerance() {
                continue;
            }
            let mut direction = toward_origin.normalize();
            let tangent = self.boundary_tangent[vertex];
            if tangent.norm_squared() > tolerance()
                && let Some(snapped) = reject_normalized(direction, &tangent)
            {
                direction = snapped;
            }
            let normal = mesh.normal(vertex);
            let axis = direction.cross(&normal);
            if axis.norm() <= tolerance() {
                continue;
            }
            let Some(outward) = reject_normalized(-direction, &normal) else {
                continue;
            };
            pivot_positions[info.origin] = position + outward * radius;
            pivot_axes[info.origin] = axis.normalize();
            has_frame[info.origin] = true;
            donors.push(vertex);
        }

        // Isolated origins borrow the frame of the nearest outer-ring vertex.
        for vertex in 0..count {
            let info = self.edit_info[vertex];
            if !info.is_reached() || has_frame[info.origin] {
                continue;
            }
            let origin_position = mesh.position(info.origin);
            let nearest = donors.iter().copied().min_by(|&a, &b| {
                let da = (mesh.position(a) - origin_position).norm_squared();
                let db = (mesh.position(b) - origin_position).norm_squared();
                da.total_cmp(&db)
            });
            if let Some(donor) = nearest {
                let donor_origin = self.edit_info[donor].origin;
                pivot_positions[info.origin] = pivot_positions[donor_origin];
                pivot_axes[info.origin] = pivot_axes[donor_origin];
                has_frame[info.origin] = true;
            }
        }

        for vertex in 0..count {
            let info = self.edit_info[vertex];
            if !info.is_reached() || info.steps == 0 || !has_frame[info.origin] {
                continue;
            }
            pivot_positions[vertex] = pivot_positions[info.origin];
            pivot_axes[vertex] = pivot_axes[info.origin];
            // Recompute the local axis where a tangent frame exists.
            let tangent = self.boundary_tangent[vertex];
            if tangent.norm_squared() <= tolerance() {
                continue;
            }
            let toward_origin = mesh.position(info.origin) - mesh.position(vertex);
            if toward_origin.norm() <= tolerance() {
                continue;
            }
            if let Some(direction) = reject_normalized(toward_origin.normalize(), &tangent) {
                let axis = direction.cross(&mesh.normal(vertex));
                if axis.norm() > tolerance() {
                    pivot_axes[vertex] = axis.normalize();
                }
            }
        }

        DeformData::Bend {
            pivot_positions,
            pivot_axes,
        }
    }

    /// Per-origin slide direction: from the outermost-ring vertex toward its
    /// origin, copied to all descendants of that origin.
    fn slide_data<M: SculptMesh + ?Sized>(&self, mesh: &M) -> DeformData {
        let count = mesh.vertex_count();
        let mut directions = vec![Vector3::zeros(); count];

        for vertex in 0..count {
            let info = self.edit_info[vertex];
            if info.steps != self.max_propagation_steps {
                continue;
            }
            let toward_origin = mesh.position(info.origin) - mesh.position(vertex);
            if toward_origin.norm() > tolerance() {
                directions[info.origin] = toward_origin.normalize();
            }
        }
        for vertex in 0..count {
            let info = self.edit_info[vertex];
            if info.is_reached() && info.steps > 0 {
                directions[vertex] = directions[info.origin];
            }
        }

        DeformData::Slide { directions }
    }

    /// One global rotation frame: pivot at the boundary centroid, axis the
    /// loop normal (Newell's method) for closed boundaries, otherwise the
    /// vector from the pivot vertex to the symmetry anchor.
    fn twist_data<M: SculptMesh + ?Sized>(&self, mesh: &M) -> DeformData {
        let mut pivot = Vector3::zeros();
        for &vertex in &self.verts {
            pivot += mesh.position(vertex).coords;
        }
        pivot /= self.verts.len() as Real;

        let axis = if self.forms_loop {
            // **Mathematical Foundation: Newell's Method**
            // n = Σᵢ (pᵢ - pᵢ₊₁) × (pᵢ + pᵢ₊₁), robust for non-planar loops.
            let mut normal = Vector3::zeros();
            for i in 0..self.verts.len() {
                let p = mesh.position(self.verts[i]).coords;
                let q = mesh.position(self.verts[(i + 1) % self.verts.len()]).coords;
                normal.x += (p.y - q.y) * (p.z + q.z);
                normal.y += (p.z - q.z) * (p.x + q.x);
                normal.z += (p.x - q.x) * (p.y + q.y);
            }
            normal
        } else {
            mesh.position(self.initial_vertex) - mesh.position(self.pivot_vertex)
        };

        let axis = if axis.norm() > tolerance() {
            axis.normalize()
        } else {
            Vector3::z()
        };

        DeformData::Twist {
            pivot: Point3::from(pivot),
            axis,
        }
    }

    /// Per-ring circle: for each propagation step, the centroid of the
    /// ring's vertices and their average distance to it.
    fn circle_data<M: SculptMesh + ?Sized>(&self, mesh: &M) -> DeformData {
        let rings = (self.max_propagation_steps + 1).max(1) as usize;
        let mut origins = vec![Vector3::zeros(); rings];
        let mut radii = vec![0.0; rings];
        let mut totals = vec![0usize; rings];

        for (vertex, info) in self.edit_info.iter().enumerate() {
            if !info.is_reached() {
                continue;
            }
            let ring = info.steps as usize;
            origins[ring] += mesh.position(vertex).coords;
            totals[ring] += 1;
        }
        for ring in 0..rings {
            if totals[ring] > 0 {
                origins[ring] /= totals[ring] as Real;
            }
        }
        for (vertex, info) in self.edit_info.iter().enumerate() {
            if !info.is_reached() {
                continue;
            }
            let ring = info.steps as usize;
            radii[ring] += (mesh.position(vertex).coords - origins[ring]).norm();
        }
        for ring in 0..rings {
            if totals[ring] > 0 {
                radii[ring] /= totals[ring] as Real;
            }
        }

        DeformData::Circle {
            origins: origins.into_iter().map(Point3::from).collect(),
            radii,
        }
    }
}
