//! A self-contained adjacency-list mesh implementing [`SculptMesh`].

use crate::float_types::{EPSILON, Real, TAU};
use crate::mesh::{Neighbor, SculptMesh};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

/// Concrete mesh representation: flat per-vertex arrays plus adjacency
/// lists. Built from a triangle soup or assembled by hand; boundary flags
/// are derived from face incidence (an edge with exactly one face marks both
/// endpoints as boundary).
#[derive(Debug, Clone)]
pub struct Topology {
    pub positions: Vec<Point3<Real>>,
    pub normals: Vec<Vector3<Real>>,
    pub adjacency: Vec<Vec<Neighbor>>,
    pub boundary: Vec<bool>,
    pub visible: Vec<bool>,
    pub mask: Vec<Real>,
    pub automask: Vec<Real>,
}

impl Topology {
    /// Build from a triangle index list over `positions`.
    ///
    /// Vertex normals are area-weighted face-normal averages. Boundary
    /// detection counts face incidence per undirected edge.
    pub fn from_triangles(positions: Vec<Point3<Real>>, triangles: &[[usize; 3]]) -> Self {
        let n = positions.len();
        let mut normals = vec![Vector3::zeros(); n];
        let mut edge_faces: HashMap<(usize, usize), usize> = HashMap::new();
        let mut adjacency_sets: Vec<Vec<usize>> = vec![Vec::new(); n];

        for tri in triangles {
            let [a, b, c] = *tri;
            // Area-weighted normal: the cross product's magnitude is 2A.
            let face_normal =
                (positions[b] - positions[a]).cross(&(positions[c] - positions[a]));
            for &v in tri {
                normals[v] += face_normal;
            }
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let key = (u.min(v), u.max(v));
                *edge_faces.entry(key).or_insert(0) += 1;
                if !adjacency_sets[u].contains(&v) {
                    adjacency_sets[u].push(v);
                }
                if !adjacency_sets[v].contains(&u) {
                    adjacency_sets[v].push(u);
                }
            }
        }

        let mut boundary = vec![false; n];
        for (&(u, v), &face_count) in &edge_faces {
            if face_count == 1 {
                boundary[u] = true;
                boundary[v] = true;
            }
        }

        for normal in &mut normals {
            let len = normal.norm();
            if len > EPSILON {
                *normal /= len;
            } else {
                *normal = Vector3::z();
            }
        }

        let adjacency = adjacency_sets
            .into_iter()
            .map(|list| list.into_iter().map(Neighbor::new).collect())
            .collect();

        Topology {
            positions,
            normals,
            adjacency,
            boundary,
            visible: vec![true; n],
            mask: vec![0.0; n],
            automask: vec![1.0; n],
        }
    }

    /// An `nx × ny` planar grid in the z = 0 plane with `spacing` between
    /// adjacent vertices. Every border vertex is an open-boundary vertex.
    /// Vertex `(i, j)` has index `j * nx + i`.
    pub fn grid(nx: usize, ny: usize, spacing: Real) -> Self {
        let mut positions = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                positions.push(Point3::new(i as Real * spacing, j as Real * spacing, 0.0));
            }
        }
        let mut triangles = Vec::with_capacity((nx - 1) * (ny - 1) * 2);
        for j in 0..ny - 1 {
            for i in 0..nx - 1 {
                let v00 = j * nx + i;
                let v10 = v00 + 1;
                let v01 = v00 + nx;
                let v11 = v01 + 1;
                triangles.push([v00, v10, v11]);
                triangles.push([v00, v11, v01]);
            }
        }
        Self::from_triangles(positions, &triangles)
    }

    /// An open tube: `rings` rings of `segments` vertices each, closed
    /// around its circumference and open at both ends, so the first and last
    /// rings form two closed boundary loops. Ring `r`, segment `s` has index
    /// `r * segments + s`.
    pub fn tube(segments: usize, rings: usize, radius: Real, ring_height: Real) -> Self {
        let mut positions = Vec::with_capacity(segments * rings);
        for r in 0..rings {
            for s in 0..segments {
                let angle = TAU * s as Real / segments as Real;
                positions.push(Point3::new(
                    radius * angle.cos(),
                    radius * angle.sin(),
                    r as Real * ring_height,
                ));
            }
        }
        let mut triangles = Vec::with_capacity(segments * (rings - 1) * 2);
        for r in 0..rings - 1 {
            for s in 0..segments {
                let s_next = (s + 1) % segments;
                let v00 = r * segments + s;
                let v10 = r * segments + s_next;
                let v01 = v00 + segments;
                let v11 = v10 + segments;
                triangles.push([v00, v10, v11]);
                triangles.push([v00, v11, v01]);
            }
        }
        Self::from_triangles(positions, &triangles)
    }

    /// Register `a` and `b` as seam twins: each appears in the other's
    /// adjacency flagged as a duplicate, so traversals cross the seam
    /// without incrementing their step counts.
    pub fn link_duplicates(&mut self, a: usize, b: usize) {
        self.adjacency[a].push(Neighbor::duplicate(b));
        self.adjacency[b].push(Neighbor::duplicate(a));
    }
}

impl SculptMesh for Topology {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, vertex: usize) -> Point3<Real> {
        self.positions[vertex]
    }

    fn normal(&self, vertex: usize) -> Vector3<Real> {
        self.normals[vertex]
    }

    fn is_visible(&self, vertex: usize) -> bool {
        self.visible[vertex]
    }

    fn is_boundary(&self, vertex: usize) -> bool {
        self.boundary[vertex]
    }

    fn mask(&self, vertex: usize) -> Real {
        self.mask[vertex]
    }

    fn automask_factor(&self, vertex: usize) -> Real {
        self.automask[vertex]
    }

    fn neighbors(&self, vertex: usize, out: &mut Vec<Neighbor>) {
        out.clear();
        out.extend_from_slice(&self.adjacency[vertex]);
    }

    fn deform_position_mut(&mut self, vertex: usize) -> &mut Point3<Real> {
        &mut self.positions[vertex]
    }
}
