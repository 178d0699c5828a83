//! Mirror-symmetry passes and the per-pass symmetry-area test.

use crate::float_types::Real;
use nalgebra::Point3;

/// X/Y/Z mirror planes as a bitmask (bit 0 = X, bit 1 = Y, bit 2 = Z).
pub type SymmetryFlags = u8;

/// Maximum number of mirrored repetitions of a stroke (all three planes
/// enabled).
pub const PASS_COUNT: usize = 8;

/// Mirror a position for symmetry pass `pass` (each set bit of `pass` flips
/// the corresponding axis). Pass 0 is the identity.
pub fn mirror_position(mut position: Point3<Real>, pass: usize) -> Point3<Real> {
    for axis in 0..3 {
        if pass & (1 << axis) != 0 {
            position[axis] = -position[axis];
        }
    }
    position
}

/// Whether `position` lies in the same symmetry area as `anchor` for the
/// enabled mirror planes: for every enabled axis the two must sit on the
/// same side of the mirror plane. Anchors exactly on a plane claim the
/// non-positive side.
pub fn vertex_matches_symmetry_area(
    position: &Point3<Real>,
    anchor: &Point3<Real>,
    flags: SymmetryFlags,
) -> bool {
    for axis in 0..3 {
        if flags & (1 << axis) == 0 {
            continue;
        }
        if anchor[axis] == 0.0 && position[axis] > 0.0 {
            return false;
        }
        if anchor[axis] * position[axis] < 0.0 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mirror_pass_flips_enabled_axes() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(mirror_position(p, 0), p);
        assert_eq!(mirror_position(p, 0b001), Point3::new(-1.0, 2.0, 3.0));
        assert_eq!(mirror_position(p, 0b101), Point3::new(-1.0, 2.0, -3.0));
    }

    #[test]
    fn symmetry_area_same_side_only() {
        let anchor = Point3::new(1.0, 0.5, 0.0);
        let same = Point3::new(2.0, 0.1, -5.0);
        let other = Point3::new(-2.0, 0.1, 0.0);
        assert!(vertex_matches_symmetry_area(&same, &anchor, 0b011));
        assert!(!vertex_matches_symmetry_area(&other, &anchor, 0b001));
        // Disabled axes never reject.
        assert!(vertex_matches_symmetry_area(&other, &anchor, 0b010));
    }
}
