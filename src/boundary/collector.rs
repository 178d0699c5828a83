//! Boundary chain collection: walk the open boundary from a confirmed seed,
//! gathering the loop/chain, its along-chain distances and preview edges.

use crate::boundary::locator::is_editable_boundary_vertex;
use crate::float_types::Real;
use crate::mesh::SculptMesh;
use std::collections::VecDeque;

/// Growable-array reservation step; boundaries are usually small but grid
/// seams can run long.
const VERTS_RESERVE: usize = 300;

const NO_PARENT: usize = usize::MAX;

pub(crate) struct CollectedBoundary {
    pub verts: Vec<usize>,
    pub edges: Vec<(usize, usize)>,
    pub forms_loop: bool,
    /// Cumulative edge-length distance along the chain from the seed, per
    /// mesh vertex (meaningful only for entries of `verts`). Absent when the
    /// selected falloff never reads it.
    pub distance: Option<Vec<Real>>,
}

/// Flood-fill strictly along the boundary starting at `seed` (which must be
/// a confirmed editable boundary vertex).
///
/// Only vertices passing the editability check enter the chain, so the walk
/// terminates naturally at ambiguous corners and non-manifold seams; the
/// radius plays no role here. The fill expands away from the seed in both
/// directions at once; when one front revisits a vertex the other front
/// already claimed, the chain closes on itself: `forms_loop` is set and the
/// closing preview edge is added.
pub(crate) fn collect<M: SculptMesh + ?Sized>(
    mesh: &M,
    seed: usize,
    needs_distance: bool,
) -> CollectedBoundary {
    let mut verts = Vec::with_capacity(VERTS_RESERVE);
    let mut edges = Vec::with_capacity(VERTS_RESERVE);
    let mut distance = needs_distance.then(|| vec![0.0; mesh.vertex_count()]);

    let mut visited = vec![false; mesh.vertex_count()];
    visited[seed] = true;
    verts.push(seed);

    let mut queue = VecDeque::new();
    queue.push_back((seed, NO_PARENT));

    let mut scratch = Vec::new();
    let mut check_scratch = Vec::new();
    let mut parents = vec![NO_PARENT; mesh.vertex_count()];
    let mut forms_loop = false;

    while let Some((from, parent)) = queue.pop_front() {
        let from_position = mesh.position(from);
        mesh.neighbors(from, &mut scratch);
        for neighbor in &scratch {
            let neighbor = *neighbor;
            if !mesh.is_visible(neighbor.vertex) || !mesh.is_boundary(neighbor.vertex) {
                continue;
            }
            if visited[neighbor.vertex] {
                // Revisiting a vertex the opposite front already claimed
                // closes the chain into a loop.
                if !forms_loop
                    && neighbor.vertex != parent
                    && parents[neighbor.vertex] != from
                    && verts.len() > 2
                {
                    forms_loop = true;
                    edges.push((from, neighbor.vertex));
                }
                continue;
            }
            if !is_editable_boundary_vertex(mesh, neighbor.vertex, &mut check_scratch) {
                // Ambiguous corner or non-manifold seam: never accepted into
                // the chain, and the branch ends here.
                visited[neighbor.vertex] = true;
                continue;
            }
            visited[neighbor.vertex] = true;
            parents[neighbor.vertex] = from;
            verts.push(neighbor.vertex);
            edges.push((from, neighbor.vertex));
            if let Some(distance) = distance.as_mut() {
                // Seam duplicates share the coordinate: zero added length.
                let edge_length = if neighbor.is_duplicate {
                    0.0
                } else {
                    (mesh.position(neighbor.vertex) - from_position).norm()
                };
                distance[neighbor.vertex] = distance[from] + edge_length;
            }
            queue.push_back((neighbor.vertex, from));
        }
    }

    CollectedBoundary {
        verts,
        edges,
        forms_loop,
        distance,
    }
}
