//! Deformation modes: per-stroke precomputed payloads and the per-step
//! appliers that move vertices.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

mod apply;
mod precompute;
mod smooth;

/// The geometric operator a boundary stroke applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeformMode {
    /// Rotate vertices around per-origin pivots whose axes run along the
    /// boundary.
    #[default]
    Bend,
    /// Slide vertices toward (or away from) their origin boundary vertex.
    Slide,
    /// Push vertices along their own normals.
    Inflate,
    /// Drag vertices by the raw stroke delta.
    Grab,
    /// Rotate the whole influence region around one global axis.
    Twist,
    /// Relax vertices toward same-ring neighbor averages.
    Smooth,
    /// Contract each propagation ring onto a circle.
    Circle,
}

/// Mode-specific auxiliary data, derived once per symmetry pass from the
/// propagation field. One variant per mode keeps the applier dispatch
/// exhaustive at compile time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DeformData {
    /// Not precomputed yet; appliers refuse to run.
    #[default]
    None,
    /// Per-mesh-vertex rotation frames (entries at origin indices double as
    /// the per-origin storage the descendants copy from).
    Bend {
        pivot_positions: Vec<Point3<Real>>,
        pivot_axes: Vec<Vector3<Real>>,
    },
    /// Per-mesh-vertex slide direction, inherited from the origin.
    Slide { directions: Vec<Vector3<Real>> },
    /// One shared rotation frame for the whole region.
    Twist {
        pivot: Point3<Real>,
        axis: Vector3<Real>,
    },
    /// Per-propagation-ring circle origin and radius, indexed by step.
    Circle {
        origins: Vec<Point3<Real>>,
        radii: Vec<Real>,
    },
    Inflate,
    Grab,
    Smooth,
}

impl DeformData {
    /// The mode this payload belongs to, if precomputed.
    pub const fn mode(&self) -> Option<DeformMode> {
        match self {
            DeformData::None => None,
            DeformData::Bend { .. } => Some(DeformMode::Bend),
            DeformData::Slide { .. } => Some(DeformMode::Slide),
            DeformData::Twist { .. } => Some(DeformMode::Twist),
            DeformData::Circle { .. } => Some(DeformMode::Circle),
            DeformData::Inflate => Some(DeformMode::Inflate),
            DeformData::Grab => Some(DeformMode::Grab),
            DeformData::Smooth => Some(DeformMode::Smooth),
        }
    }
}
