//! # 2D rigid body transforms
//!
//! Places points expressed in a local frame (an obstacle's contour, a
//! sensor's mount offset, a scan point) into a parent frame. The rotation is
//! applied first, then the translation, with angles measured anticlockwise
//! from the frame's X axis.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Rotation2, Vector2};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Rotate every point by `angle_rad` about the local origin, then translate
/// it by `origin_m`.
pub fn homogeneous_transform(
    points_m: &[Vector2<f64>],
    origin_m: &Vector2<f64>,
    angle_rad: f64,
) -> Vec<Vector2<f64>> {
    let rot = Rotation2::new(angle_rad);

    points_m.iter().map(|p| rot * p + origin_m).collect()
}

/// Transform a single point, see [`homogeneous_transform`].
pub fn transform_point(
    point_m: &Vector2<f64>,
    origin_m: &Vector2<f64>,
    angle_rad: f64,
) -> Vector2<f64> {
    Rotation2::new(angle_rad) * point_m + origin_m
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: &[Vector2<f64>], b: &[Vector2<f64>]) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(b.iter()) {
            assert!((p - q).norm() < 1e-9, "{:?} != {:?}", p, q);
        }
    }

    #[test]
    fn test_rotate_then_translate() {
        let pts = vec![Vector2::new(1.0, 0.0), Vector2::new(0.0, 2.0)];

        let out = homogeneous_transform(&pts, &Vector2::new(10.0, -1.0), FRAC_PI_2);

        assert_close(
            &out,
            &[Vector2::new(10.0, 0.0), Vector2::new(8.0, -1.0)],
        );
    }

    #[test]
    fn test_round_trip() {
        let pts = vec![
            Vector2::new(2.0, 2.0),
            Vector2::new(-2.0, 2.0),
            Vector2::new(-2.0, -2.0),
            Vector2::new(13.5, -0.25),
            Vector2::new(0.0, 0.0),
        ];
        let zero = Vector2::zeros();

        let mut theta = -PI;
        while theta <= PI {
            let there = homogeneous_transform(&pts, &zero, theta);
            let back = homogeneous_transform(&there, &zero, -theta);
            assert_close(&back, &pts);

            theta += 0.1;
        }
    }

    #[test]
    fn test_single_point_matches_batch() {
        let p = Vector2::new(3.0, -4.0);
        let origin = Vector2::new(1.0, 1.0);

        assert_close(
            &[transform_point(&p, &origin, 0.7)],
            &homogeneous_transform(&[p], &origin, 0.7),
        );
    }
}
