//! End-to-end deformation behavior: one dataset per scenario, one stroke
//! step applied, geometry checked against the pre-stroke snapshot.

use approx::assert_relative_eq;
use sculpt_boundary::float_types::{PI, Real};
use sculpt_boundary::{
    BoundaryBrush, BoundaryDataset, BoundaryStroke, DeformData, DeformMode, StrokeStep, Topology,
};

use nalgebra::{Point3, Vector3};

fn step_at(mesh: &Topology, seed: usize, radius: Real, grab_delta: Vector3<Real>) -> StrokeStep {
    StrokeStep {
        grab_delta,
        initial_location: mesh.positions[seed],
        initial_normal: Vector3::z(),
        radius,
        invert: false,
        symmetry: 0,
    }
}

#[test]
fn zero_drag_is_identity_for_every_mode() {
    let modes = [
        DeformMode::Bend,
        DeformMode::Slide,
        DeformMode::Inflate,
        DeformMode::Grab,
        DeformMode::Twist,
        DeformMode::Smooth,
        DeformMode::Circle,
    ];
    for mode in modes {
        let mut grid = Topology::grid(10, 10, 1.0);
        let brush = BoundaryBrush {
            deform_mode: mode,
            ..BoundaryBrush::default()
        };
        let step = step_at(&grid, 4, 3.0, Vector3::zeros());
        let mut stroke = BoundaryStroke::begin(&grid, brush);
        let touched = stroke.step_pass(&mut grid, 0, 4, &step).unwrap();
        assert!(touched, "{:?}: boundary is under the cursor", mode);
        for (vertex, &original) in stroke.snapshot().iter().enumerate() {
            assert_relative_eq!(grid.positions[vertex], original, epsilon = 1e-6);
        }
    }
}

#[test]
fn grab_drags_the_anchor_by_the_full_delta() {
    let mut grid = Topology::grid(10, 10, 1.0);
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Grab,
        ..BoundaryBrush::default()
    };
    let step = step_at(&grid, 4, 3.0, Vector3::new(0.0, 0.0, 0.5));
    let mut stroke = BoundaryStroke::begin(&grid, brush);
    stroke.step_pass(&mut grid, 0, 4, &step).unwrap();
    // The seed is at full strength, so it follows the drag exactly.
    assert_relative_eq!(grid.positions[4].z, 0.5, epsilon = 1e-9);
    // A vertex far outside the propagation field never moves.
    assert_relative_eq!(grid.positions[5 * 10 + 5].z, 0.0, epsilon = 1e-12);
}

#[test]
fn inflate_pushes_along_normals_with_decaying_strength() {
    let mut grid = Topology::grid(10, 10, 1.0);
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Inflate,
        ..BoundaryBrush::default()
    };
    let step = step_at(&grid, 4, 3.0, Vector3::new(0.0, 0.0, 1.0));
    let mut stroke = BoundaryStroke::begin(&grid, brush);
    stroke.step_pass(&mut grid, 0, 4, &step).unwrap();
    // Full displacement on the boundary, a partial one a ring further in.
    assert_relative_eq!(grid.positions[4].z, 1.0, epsilon = 1e-9);
    let inner = grid.positions[10 + 4].z;
    assert!(inner > 0.0 && inner < 1.0, "inner ring got {}", inner);
}

#[test]
fn slide_moves_vertices_toward_their_origin() {
    let mut grid = Topology::grid(10, 10, 1.0);
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Slide,
        ..BoundaryBrush::default()
    };
    let step = step_at(&grid, 4, 3.0, Vector3::new(0.0, 0.0, 1.0));
    let mut stroke = BoundaryStroke::begin(&grid, brush);
    let before = grid.positions[10 + 4];
    stroke.step_pass(&mut grid, 0, 4, &step).unwrap();
    // Vertex (4, 1) descends from the bottom boundary row; positive drag
    // slides it toward the boundary, so its y drops and it stays in-plane.
    let after = grid.positions[10 + 4];
    assert!(after.y < before.y, "expected slide toward y = 0, got {}", after.y);
    assert_relative_eq!(after.z, 0.0, epsilon = 1e-9);
}

#[test]
fn twist_frame_sits_on_the_loop() {
    let tube = Topology::tube(16, 6, 1.0, 0.4);
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Twist,
        ..BoundaryBrush::default()
    };
    let mut dataset = BoundaryDataset::init(&tube, &brush, 0, 4.0)
        .unwrap()
        .expect("ring under the cursor");
    dataset.precompute(&tube, DeformMode::Twist, 4.0);
    match dataset.deform_data() {
        DeformData::Twist { pivot, axis } => {
            // Closed planar ring in z = 0: centroid pivot, Newell axis ±z.
            assert_relative_eq!(*pivot, Point3::new(0.0, 0.0, 0.0), epsilon = 1e-6);
            assert!(axis.z.abs() > 0.99, "loop normal should be ±z, got {:?}", axis);
        },
        other => panic!("expected twist data, got {:?}", other),
    }
}

#[test]
fn twist_rotates_without_changing_ring_radii() {
    let mut tube = Topology::tube(16, 6, 1.0, 0.4);
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Twist,
        ..BoundaryBrush::default()
    };
    let mut dataset = BoundaryDataset::init(&tube, &brush, 0, 4.0)
        .unwrap()
        .expect("ring under the cursor");
    dataset.precompute(&tube, DeformMode::Twist, 4.0);
    let snapshot = tube.positions.clone();
    // Drag along the reference normal to produce a nonzero rotation angle.
    let step = StrokeStep {
        grab_delta: Vector3::new(0.0, 0.0, 1.0),
        initial_location: tube.positions[0],
        initial_normal: Vector3::z(),
        radius: 4.0,
        invert: false,
        symmetry: 0,
    };
    dataset.apply_step(&mut tube, &snapshot, &brush, &step);
    let moved = tube.positions[0];
    assert!((moved - snapshot[0]).norm() > 1e-3, "seed should rotate");
    // Rotation around the tube axis preserves the radial distance.
    assert_relative_eq!(moved.coords.xy().norm(), 1.0, epsilon = 1e-6);
    assert_relative_eq!(moved.z, snapshot[0].z, epsilon = 1e-6);
}

#[test]
fn circle_pulls_an_outlier_back_onto_the_ring() {
    let mut tube = Topology::tube(12, 5, 1.0, 0.5);
    // Push one seed-ring vertex radially off the circle.
    tube.positions[1].x *= 1.4;
    tube.positions[1].y *= 1.4;
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Circle,
        ..BoundaryBrush::default()
    };
    let mut dataset = BoundaryDataset::init(&tube, &brush, 0, 3.0)
        .unwrap()
        .expect("ring under the cursor");
    dataset.precompute(&tube, DeformMode::Circle, 3.0);
    let snapshot = tube.positions.clone();
    // Saturate the displacement so the blend is the bare falloff weight.
    let step = StrokeStep {
        grab_delta: Vector3::new(0.0, 0.0, 3.0),
        initial_location: tube.positions[0],
        initial_normal: Vector3::z(),
        radius: 3.0,
        invert: false,
        symmetry: 0,
    };
    dataset.apply_step(&mut tube, &snapshot, &brush, &step);
    let before = snapshot[1].coords.xy().norm();
    let after = tube.positions[1].coords.xy().norm();
    assert!(
        after < before - 0.2,
        "outlier should contract toward the ring radius: {} -> {}",
        before,
        after
    );
}

#[test]
fn smooth_relaxes_an_outlier_toward_its_ring_neighbors() {
    let mut tube = Topology::tube(12, 5, 1.0, 0.5);
    // Perturb a second-ring vertex radially.
    tube.positions[12].x *= 1.5;
    tube.positions[12].y *= 1.5;
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Smooth,
        ..BoundaryBrush::default()
    };
    let mut dataset = BoundaryDataset::init(&tube, &brush, 0, 3.0)
        .unwrap()
        .expect("ring under the cursor");
    dataset.precompute(&tube, DeformMode::Smooth, 3.0);
    let snapshot = tube.positions.clone();
    let step = StrokeStep {
        grab_delta: Vector3::new(0.0, 0.0, 3.0),
        initial_location: tube.positions[0],
        initial_normal: Vector3::z(),
        radius: 3.0,
        invert: false,
        symmetry: 0,
    };
    dataset.apply_step(&mut tube, &snapshot, &brush, &step);
    let before = snapshot[12].coords.xy().norm();
    let after = tube.positions[12].coords.xy().norm();
    assert!(
        after < before,
        "outlier should relax toward its ring neighbors: {} -> {}",
        before,
        after
    );
}

#[test]
fn bend_rotates_the_influence_region() {
    let mut grid = Topology::grid(10, 10, 1.0);
    let brush = BoundaryBrush::default(); // Bend
    let step = step_at(&grid, 4, 3.0, Vector3::new(0.0, 0.0, 1.0));
    let mut stroke = BoundaryStroke::begin(&grid, brush);
    stroke.step_pass(&mut grid, 0, 4, &step).unwrap();
    // The seed rotates out of the grid plane; far vertices stay put.
    assert!(grid.positions[4].z.abs() > 1e-3, "seed should leave the plane");
    assert_relative_eq!(grid.positions[5 * 10 + 5].z, 0.0, epsilon = 1e-12);
}

#[test]
fn symmetry_area_limits_motion_to_the_anchor_side() {
    let mut grid = Topology::grid(9, 9, 1.0);
    // Center the grid on the mirror plane x = 0.
    for position in &mut grid.positions {
        position.x -= 4.0;
        position.y -= 4.0;
    }
    let seed = 6; // (6, 0): bottom boundary row at x = +2
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Grab,
        ..BoundaryBrush::default()
    };
    let mut dataset = BoundaryDataset::init(&grid, &brush, seed, 3.0)
        .unwrap()
        .expect("boundary under the cursor");
    dataset.precompute(&grid, DeformMode::Grab, 3.0);
    let snapshot = grid.positions.clone();
    let step = StrokeStep {
        grab_delta: Vector3::new(0.0, 0.0, 1.0),
        initial_location: grid.positions[seed],
        initial_normal: Vector3::z(),
        radius: 3.0,
        invert: false,
        symmetry: 0b001, // X mirror enabled
    };
    dataset.apply_step(&mut grid, &snapshot, &brush, &step);
    assert!(grid.positions[seed].z > 0.5, "anchor side moves");
    for (vertex, position) in grid.positions.iter().enumerate() {
        if snapshot[vertex].x < 0.0 {
            assert_relative_eq!(*position, snapshot[vertex], epsilon = 1e-12);
        }
    }
}

#[test]
fn masked_vertices_never_move() {
    let mut grid = Topology::grid(8, 8, 1.0);
    grid.mask[3] = 1.0;
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Grab,
        ..BoundaryBrush::default()
    };
    let step = step_at(&grid, 4, 3.0, Vector3::new(0.0, 0.0, 1.0));
    let mut stroke = BoundaryStroke::begin(&grid, brush);
    stroke.step_pass(&mut grid, 0, 4, &step).unwrap();
    assert_relative_eq!(grid.positions[3].z, 0.0, epsilon = 1e-12);
    assert!(grid.positions[4].z > 0.5, "unmasked neighbor still moves");
}

#[test]
fn cancel_restores_the_snapshot() {
    let mut grid = Topology::grid(8, 8, 1.0);
    let original = grid.positions.clone();
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Grab,
        ..BoundaryBrush::default()
    };
    let step = step_at(&grid, 4, 3.0, Vector3::new(0.3, -0.2, 1.0));
    let mut stroke = BoundaryStroke::begin(&grid, brush);
    stroke.step_pass(&mut grid, 0, 4, &step).unwrap();
    assert!((grid.positions[4] - original[4]).norm() > 0.5);
    stroke.cancel(&mut grid);
    for (vertex, &position) in original.iter().enumerate() {
        assert_relative_eq!(grid.positions[vertex], position, epsilon = 1e-12);
    }
}

#[test]
fn step_without_boundary_in_reach_is_a_no_op() {
    let mut grid = Topology::grid(15, 15, 1.0);
    let center = 7 * 15 + 7;
    let brush = BoundaryBrush {
        deform_mode: DeformMode::Grab,
        ..BoundaryBrush::default()
    };
    let step = step_at(&grid, center, 2.0, Vector3::new(0.0, 0.0, 1.0));
    let mut stroke = BoundaryStroke::begin(&grid, brush);
    let touched = stroke.step_pass(&mut grid, 0, center, &step).unwrap();
    assert!(!touched);
    for (vertex, &original) in stroke.snapshot().iter().enumerate() {
        assert_relative_eq!(grid.positions[vertex], original, epsilon = 1e-12);
    }
}

#[test]
fn autosmooth_relaxes_in_plane_noise() {
    let mut grid = Topology::grid(10, 10, 1.0);
    // In-plane perturbation; the normal-projected Laplacian can correct it.
    grid.positions[10 + 4].x += 0.3;
    let brush = BoundaryBrush {
        autosmooth: 0.5,
        ..BoundaryBrush::default()
    };
    let dataset = BoundaryDataset::init(&grid, &brush, 4, 3.0)
        .unwrap()
        .expect("boundary under the cursor");
    dataset.autosmooth(&mut grid, &brush);
    let offset = (grid.positions[10 + 4].x - 4.0).abs();
    assert!(offset < 0.3, "relaxation should shrink the offset, got {}", offset);
}

#[test]
fn inverted_strokes_snap_rotation_angles() {
    let step = StrokeStep {
        grab_delta: Vector3::zeros(),
        initial_location: Point3::origin(),
        initial_normal: Vector3::z(),
        radius: 1.0,
        invert: true,
        symmetry: 0,
    };
    // 0.55 of the radius snaps down to the 0.5π increment.
    assert_relative_eq!(step.rotation_angle(0.55), 0.5 * PI, epsilon = 1e-9);
    let free = StrokeStep { invert: false, ..step };
    assert_relative_eq!(free.rotation_angle(0.55), 0.55 * PI, epsilon = 1e-9);
}
