//! Nearest open-boundary vertex search.

use crate::float_types::Real;
use crate::mesh::{Neighbor, SculptMesh};
use std::collections::VecDeque;

/// A boundary vertex qualifies as an editable seed only if it is visible,
/// has more than 2 live neighbors, and at most 2 of its neighbors are
/// themselves boundary vertices. Two or fewer live neighbors marks an
/// ambiguous corner; more than two boundary neighbors marks non-manifold
/// boundary geometry. Both are rejected so the deformation never anchors on
/// unpredictable topology.
///
/// Known approximation: a genuine manifold point with exactly 3
/// boundary-adjacent neighbors is rejected too.
pub(crate) fn is_editable_boundary_vertex<M: SculptMesh + ?Sized>(
    mesh: &M,
    vertex: usize,
    scratch: &mut Vec<Neighbor>,
) -> bool {
    if !mesh.is_visible(vertex) {
        return false;
    }
    mesh.neighbors(vertex, scratch);
    let mut live_neighbors = 0;
    let mut boundary_neighbors = 0;
    for neighbor in scratch.iter() {
        if !mesh.is_visible(neighbor.vertex) {
            continue;
        }
        live_neighbors += 1;
        if mesh.is_boundary(neighbor.vertex) {
            boundary_neighbors += 1;
        }
    }
    live_neighbors > 2 && boundary_neighbors <= 2
}

/// Find the open-boundary vertex closest to `query` by flood-fill step
/// count, or `None` when no editable boundary vertex lies within `radius`
/// (cumulative edge length) or the query vertex itself fails the
/// editability check.
///
/// A negative result is normal, not an error: the caller simply does
/// nothing for this stroke step.
pub(crate) fn closest_boundary_vertex<M: SculptMesh + ?Sized>(
    mesh: &M,
    query: usize,
    radius: Real,
) -> Option<usize> {
    let mut scratch = Vec::new();
    if !is_editable_boundary_vertex(mesh, query, &mut scratch) {
        return None;
    }
    if mesh.is_boundary(query) {
        return Some(query);
    }

    struct Visit {
        vertex: usize,
        steps: u32,
        travelled: Real,
    }

    let mut visited = vec![false; mesh.vertex_count()];
    visited[query] = true;
    let mut queue = VecDeque::new();
    queue.push_back(Visit {
        vertex: query,
        steps: 0,
        travelled: 0.0,
    });

    let mut best: Option<(u32, usize)> = None;
    // Separate scratch for the editability check so it cannot clobber the
    // list currently being iterated.
    let mut check_scratch = Vec::new();
    while let Some(visit) = queue.pop_front() {
        let position = mesh.position(visit.vertex);
        mesh.neighbors(visit.vertex, &mut scratch);
        for neighbor in &scratch {
            let neighbor = *neighbor;
            if visited[neighbor.vertex] || !mesh.is_visible(neighbor.vertex) {
                continue;
            }
            let travelled = visit.travelled
                + (mesh.position(neighbor.vertex) - position).norm();
            if travelled > radius {
                continue;
            }
            // Seam duplicates carry the step count across unchanged.
            let steps = if neighbor.is_duplicate {
                visit.steps
            } else {
                visit.steps + 1
            };
            visited[neighbor.vertex] = true;

            if mesh.is_boundary(neighbor.vertex)
                && is_editable_boundary_vertex(mesh, neighbor.vertex, &mut check_scratch)
                && best.is_none_or(|(best_steps, _)| steps < best_steps)
            {
                best = Some((steps, neighbor.vertex));
            }

            queue.push_back(Visit {
                vertex: neighbor.vertex,
                steps,
                travelled,
            });
        }
    }

    best.map(|(_, vertex)| vertex)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mesh::Topology;

    #[test]
    fn boundary_query_returns_itself() {
        let grid = Topology::grid(6, 6, 1.0);
        // Border midpoint: boundary and editable.
        let v = 3; // (3, 0)
        assert!(grid.is_boundary(v));
        assert_eq!(closest_boundary_vertex(&grid, v, 3.0), Some(v));
    }

    #[test]
    fn interior_query_walks_to_nearest_border() {
        let grid = Topology::grid(7, 7, 1.0);
        let v = 2 * 7 + 3; // (3, 2): two rows up from the bottom border
        let found = closest_boundary_vertex(&grid, v, 5.0).expect("boundary within radius");
        assert!(grid.is_boundary(found));
        // Bottom border is the closest chain (2 steps).
        assert!(found < 7, "expected a bottom-row vertex, got {}", found);
    }

    #[test]
    fn radius_bounds_the_search() {
        let grid = Topology::grid(9, 9, 1.0);
        let center = 4 * 9 + 4;
        assert_eq!(closest_boundary_vertex(&grid, center, 1.5), None);
        assert!(closest_boundary_vertex(&grid, center, 10.0).is_some());
    }

    #[test]
    fn hidden_query_is_rejected() {
        let mut grid = Topology::grid(5, 5, 1.0);
        let center = 2 * 5 + 2;
        grid.visible[center] = false;
        assert_eq!(closest_boundary_vertex(&grid, center, 10.0), None);
    }
}
