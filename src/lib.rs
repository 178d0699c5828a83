//! Boundary-driven **mesh deformation engine** for interactive sculpting
//! brushes: given a vertex near an open mesh boundary, locate the nearest
//! boundary loop, propagate a bounded influence field from it into the mesh
//! interior, and apply one of several geometric deformation operators whose
//! strength decays with distance from the boundary.
//!
//! The engine never owns mesh topology: the surrounding editor exposes
//! positions, normals, connectivity and sculpt attributes through
//! [`mesh::SculptMesh`], and the engine writes positions back through the
//! same trait's deform-target indirection.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for multithreading the appliers
//!
//! # Pipeline
//! [`BoundaryDataset::init`] (locate → collect → propagate → falloff) →
//! [`BoundaryDataset::precompute`] once per symmetry pass →
//! [`BoundaryDataset::apply_step`] per stroke update → optional autosmooth.
//! [`stroke::BoundaryStroke`] drives the whole pipeline across up to 8
//! mirror symmetry passes.

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod boundary;
pub mod deform;
pub mod errors;
pub mod falloff;
pub mod float_types;
pub mod mesh;
pub mod stroke;
pub mod symmetry;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use boundary::BoundaryDataset;
pub use deform::{DeformData, DeformMode};
pub use errors::BoundaryError;
pub use falloff::{BoundaryFalloff, FalloffShape};
pub use mesh::{Neighbor, SculptMesh, Topology};
pub use stroke::{BoundaryBrush, BoundaryStroke, StrokeStep};
