//! Stroke-level orchestration: brush settings, per-update stroke samples,
//! and the per-symmetry-pass dataset cache.

use crate::boundary::BoundaryDataset;
use crate::deform::DeformMode;
use crate::errors::BoundaryError;
use crate::falloff::{BoundaryFalloff, FalloffShape};
use crate::float_types::{EPSILON, PI, Real};
use crate::mesh::SculptMesh;
use crate::symmetry::{PASS_COUNT, SymmetryFlags};
use nalgebra::{Point3, Vector3};

/// Boundary brush settings, fixed for the duration of a stroke.
#[derive(Debug, Clone)]
pub struct BoundaryBrush {
    pub deform_mode: DeformMode,
    /// Distance-remapping policy along the boundary.
    pub falloff: BoundaryFalloff,
    /// Strength curve evaluated over propagation steps and remapped
    /// distances.
    pub curve: FalloffShape,
    /// Scales the brush radius into the effective radius bounding the
    /// geodesic and propagation stages.
    pub boundary_offset: Real,
    /// Overall brush strength in `[0, 1]`.
    pub strength: Real,
    /// Autosmooth strength in `[0, 1]`; `0` disables the pass.
    pub autosmooth: Real,
}

impl Default for BoundaryBrush {
    fn default() -> Self {
        BoundaryBrush {
            deform_mode: DeformMode::Bend,
            falloff: BoundaryFalloff::Constant,
            curve: FalloffShape::Smooth,
            boundary_offset: 1.0,
            strength: 1.0,
            autosmooth: 0.0,
        }
    }
}

/// One stroke update, as sampled by the input system for one symmetry pass.
#[derive(Debug, Clone)]
pub struct StrokeStep {
    /// Drag accumulated since the stroke started, already mirrored for this
    /// pass.
    pub grab_delta: Vector3<Real>,
    /// Initial contact point; anchors the displacement reference plane.
    pub initial_location: Point3<Real>,
    /// Surface normal at the initial contact point.
    pub initial_normal: Vector3<Real>,
    /// Brush radius in object units.
    pub radius: Real,
    /// Inverted stroke: rotation angles snap to 0.1π increments.
    pub invert: bool,
    /// Enabled mirror planes; appliers only move vertices in the pass's
    /// symmetry area.
    pub symmetry: SymmetryFlags,
}

impl StrokeStep {
    /// Signed displacement magnitude: the accumulated drag projected onto
    /// the reference plane normal anchored at the initial contact point.
    pub fn displacement(&self) -> Real {
        let length = self.initial_normal.norm();
        if length <= EPSILON {
            return 0.0;
        }
        self.grab_delta.dot(&self.initial_normal) / length
    }

    /// Rotation angle for bend/twist: `displacement / radius · π`, snapped
    /// to 0.1π increments when the stroke is inverted.
    pub fn rotation_angle(&self, displacement: Real) -> Real {
        let mut factor = displacement / self.radius;
        if self.invert {
            factor = (factor * 10.0).floor() / 10.0;
        }
        factor * PI
    }
}

/// Owns one stroke's pre-stroke snapshot and the lazily built boundary
/// dataset of each mirror symmetry pass. Datasets are torn down
/// deterministically on [`BoundaryStroke::cancel`] / [`BoundaryStroke::finish`],
/// never stashed in ambient state.
#[derive(Debug)]
pub struct BoundaryStroke {
    pub brush: BoundaryBrush,
    passes: Vec<Option<BoundaryDataset>>,
    snapshot: Vec<Point3<Real>>,
}

impl BoundaryStroke {
    /// Capture the pre-stroke position snapshot and start with no datasets;
    /// each pass builds its own on first touch.
    pub fn begin<M: SculptMesh + ?Sized>(mesh: &M, brush: BoundaryBrush) -> Self {
        let snapshot = (0..mesh.vertex_count()).map(|v| mesh.position(v)).collect();
        BoundaryStroke {
            brush,
            passes: (0..PASS_COUNT).map(|_| None).collect(),
            snapshot,
        }
    }

    /// The dataset of a pass, once built (for preview rendering).
    pub fn dataset(&self, pass: usize) -> Option<&BoundaryDataset> {
        self.passes.get(pass).and_then(Option::as_ref)
    }

    /// The pre-stroke snapshot captured by [`BoundaryStroke::begin`].
    pub fn snapshot(&self) -> &[Point3<Real>] {
        &self.snapshot
    }

    /// Run one stroke update for one symmetry pass: lazily init + precompute
    /// the pass's dataset from `seed` (the vertex under the mirrored
    /// cursor), then apply the deformation and the optional autosmooth.
    ///
    /// Returns `Ok(false)` when no editable boundary is within reach — the
    /// step is a no-op, never an error.
    #[cfg(not(feature = "parallel"))]
    pub fn step_pass<M: SculptMesh>(
        &mut self,
        mesh: &mut M,
        pass: usize,
        seed: usize,
        step: &StrokeStep,
    ) -> Result<bool, BoundaryError> {
        self.ensure_pass(mesh, pass, seed, step.radius)?;
        let Some(dataset) = self.passes.get(pass).and_then(Option::as_ref) else {
            return Ok(false);
        };
        dataset.apply_step(mesh, &self.snapshot, &self.brush, step);
        dataset.autosmooth(mesh, &self.brush);
        Ok(true)
    }

    /// Run one stroke update for one symmetry pass: lazily init + precompute
    /// the pass's dataset from `seed` (the vertex under the mirrored
    /// cursor), then apply the deformation and the optional autosmooth.
    ///
    /// Returns `Ok(false)` when no editable boundary is within reach — the
    /// step is a no-op, never an error. Distinct passes are independent;
    /// within one, the applier gathers on the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn step_pass<M: SculptMesh + Sync>(
        &mut self,
        mesh: &mut M,
        pass: usize,
        seed: usize,
        step: &StrokeStep,
    ) -> Result<bool, BoundaryError> {
        self.ensure_pass(mesh, pass, seed, step.radius)?;
        let Some(dataset) = self.passes.get(pass).and_then(Option::as_ref) else {
            return Ok(false);
        };
        dataset.apply_step(mesh, &self.snapshot, &self.brush, step);
        dataset.autosmooth(mesh, &self.brush);
        Ok(true)
    }

    fn ensure_pass<M: SculptMesh + ?Sized>(
        &mut self,
        mesh: &M,
        pass: usize,
        seed: usize,
        radius: Real,
    ) -> Result<(), BoundaryError> {
        if pass >= self.passes.len() || self.passes[pass].is_some() {
            return Ok(());
        }
        if let Some(mut dataset) = BoundaryDataset::init(mesh, &self.brush, seed, radius)? {
            dataset.precompute(mesh, self.brush.deform_mode, radius);
            self.passes[pass] = Some(dataset);
        }
        Ok(())
    }

    /// Abort the stroke: restore every vertex from the pre-stroke snapshot
    /// and discard all datasets. Writes are idempotent overwrites, so no
    /// partial-state repair is needed.
    pub fn cancel<M: SculptMesh + ?Sized>(&mut self, mesh: &mut M) {
        for (vertex, &position) in self.snapshot.iter().enumerate() {
            *mesh.deform_position_mut(vertex) = position;
        }
        for pass in &mut self.passes {
            *pass = None;
        }
    }

    /// End the stroke, dropping the snapshot and every pass's dataset.
    pub fn finish(self) {}
}
