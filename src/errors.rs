//! Dataset validation errors.

use std::fmt::Display;

/// All the possible consistency issues we might encounter while building or
/// validating a boundary dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundaryError {
    /// (InconsistentPropagation) A reached vertex records an origin that was
    /// never itself reached at propagation step 0. The propagation field is
    /// corrupt and must not be used for deformation.
    InconsistentPropagation { vertex: usize, origin: usize },
    /// (MissingDistanceField) The selected falloff policy needs the
    /// along-boundary distance field, but the dataset was built without one.
    MissingDistanceField,
    /// (VertexOutOfRange) A vertex handle past the mesh's vertex count was
    /// passed in by the caller.
    VertexOutOfRange { vertex: usize, count: usize },
}

impl Display for BoundaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryError::InconsistentPropagation { vertex, origin } => write!(
                f,
                "(InconsistentPropagation) vertex {} inherits from origin {} which was never reached at step 0",
                vertex, origin
            ),
            BoundaryError::MissingDistanceField => write!(
                f,
                "(MissingDistanceField) falloff policy requires the boundary distance field"
            ),
            BoundaryError::VertexOutOfRange { vertex, count } => write!(
                f,
                "(VertexOutOfRange) vertex {} is out of range (vertex count = {})",
                vertex, count
            ),
        }
    }
}
