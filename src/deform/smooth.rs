//! Autosmooth pass: strength-gated relaxation of the region near the
//! boundary, run after the applier each stroke step.

use crate::boundary::BoundaryDataset;
use crate::float_types::{EPSILON, Real};
use crate::mesh::SculptMesh;
use crate::stroke::BoundaryBrush;
use nalgebra::{Point3, Vector3};

impl BoundaryDataset {
    /// Relax every vertex within the geodesic influence region toward the
    /// tangent-plane projection of its neighborhood average.
    ///
    /// The autosmooth strength in `[0, 1]` splits into `floor(strength·4)`
    /// full iterations plus one fractional final iteration; each iteration
    /// scales the blend by the brush curve of the vertex's boundary distance
    /// over the effective radius. Iterations run over the already-smoothed
    /// positions of the previous one.
    pub fn autosmooth<M: SculptMesh + ?Sized>(&self, mesh: &mut M, brush: &BoundaryBrush) {
        if brush.autosmooth <= 0.0 {
            return;
        }
        let total = brush.autosmooth.clamp(0.0, 1.0) * 4.0;
        let full_iterations = total.floor() as usize;
        let fractional = total - full_iterations as Real;

        let mut scratch = Vec::new();
        for iteration in 0..=full_iterations {
            let iteration_weight = if iteration == full_iterations {
                fractional
            } else {
                1.0
            };
            if iteration_weight <= 0.0 {
                continue;
            }

            let mut updates: Vec<(usize, Point3<Real>)> = Vec::new();
            for vertex in 0..mesh.vertex_count() {
                if self.boundary_dist[vertex] == Real::MAX || !mesh.is_visible(vertex) {
                    continue;
                }
                let falloff = brush
                    .curve
                    .evaluate(self.boundary_dist[vertex], self.effective_radius);
                let blend = iteration_weight * falloff * (1.0 - mesh.mask(vertex));
                if blend <= 0.0 {
                    continue;
                }

                let current = mesh.position(vertex);
                let mut average = Vector3::zeros();
                let mut total_neighbors = 0;
                mesh.neighbors(vertex, &mut scratch);
                for neighbor in &scratch {
                    if !mesh.is_visible(neighbor.vertex) {
                        continue;
                    }
                    average += mesh.position(neighbor.vertex).coords;
                    total_neighbors += 1;
                }
                if total_neighbors == 0 {
                    continue;
                }
                average /= total_neighbors as Real;

                // Project the Laplacian into the tangent plane so the
                // relaxation slides along the surface instead of shrinking it.
                let normal = mesh.normal(vertex);
                let mut laplacian = Point3::from(average) - current;
                if normal.norm_squared() > EPSILON {
                    laplacian -= normal * laplacian.dot(&normal);
                }
                updates.push((vertex, current + laplacian * blend));
            }
            for (vertex, position) in updates {
                *mesh.deform_position_mut(vertex) = position;
            }
        }
    }
}
