//! # Path
//!
//! This module defines the course followed by the pursuit controller, and the query interface
//! the controller uses to read it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use sim_util::maths::wrap_pi;

// Internal
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Queries the pursuit controller makes against a course.
///
/// Indexes passed to the query functions must be less than `num_points()`.
pub trait Course {
    /// Number of points making up the course.
    fn num_points(&self) -> usize;

    /// Index of the course point closest to the pose.
    fn nearest_point_index(&self, pose: &Pose) -> usize;

    /// Position of the point at `index`.
    fn point_m(&self, index: usize) -> Vector2<f64>;

    /// Distance from the pose to the point at `index`.
    fn distance_from_pose_m(&self, pose: &Pose, index: usize) -> f64;

    /// Difference between the bearing from the pose to the point at `index` and the pose's
    /// heading, in the range (-pi, pi].
    fn angle_difference_rad(&self, pose: &Pose, index: usize) -> f64;

    /// Total length of the course along its points.
    fn length_m(&self) -> f64;

    /// Highest speed demanded anywhere on the course.
    fn max_speed_ms(&self) -> f64;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A path defining the desired trajectory of the vehicle.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Path {
    pub points_m: Vec<Vector2<f64>>,

    /// Speed the vehicle should travel the path at
    pub target_speed_ms: f64,
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("A path needs at least 2 points, got {0}")]
    NotEnoughPoints(usize),

    #[error("Point separation must be positive, got {0} m")]
    InvalidSeparation(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a path from a set of points.
    pub fn new(points_m: Vec<Vector2<f64>>, target_speed_ms: f64) -> Result<Self, PathError> {
        if points_m.len() < 2 {
            return Err(PathError::NotEnoughPoints(points_m.len()));
        }

        Ok(Self {
            points_m,
            target_speed_ms,
        })
    }

    /// Produces a direct path between the two position vectors, with each point in the path having
    /// at most the given separation.
    pub fn direct(
        from: Vector2<f64>,
        to: Vector2<f64>,
        point_sep_m: f64,
        target_speed_ms: f64,
    ) -> Result<Self, PathError> {
        let mut points_m = vec![from];
        push_segment(&mut points_m, from, to, point_sep_m)?;

        Self::new(points_m, target_speed_ms)
    }

    /// Produces a path passing through each of the waypoints in turn, densified so that
    /// neighbouring points are at most `point_sep_m` apart.
    pub fn from_waypoints(
        waypoints_m: &[Vector2<f64>],
        point_sep_m: f64,
        target_speed_ms: f64,
    ) -> Result<Self, PathError> {
        if waypoints_m.len() < 2 {
            return Err(PathError::NotEnoughPoints(waypoints_m.len()));
        }

        let mut points_m = vec![waypoints_m[0]];
        for pair in waypoints_m.windows(2) {
            push_segment(&mut points_m, pair[0], pair[1], point_sep_m)?;
        }

        Self::new(points_m, target_speed_ms)
    }
}

impl Course for Path {
    fn num_points(&self) -> usize {
        self.points_m.len()
    }

    fn nearest_point_index(&self, pose: &Pose) -> usize {
        self.points_m
            .iter()
            .map(|p| (p - pose.position_m).norm_squared())
            .enumerate()
            .fold((0, std::f64::INFINITY), |best, (i, d)| {
                if d < best.1 {
                    (i, d)
                } else {
                    best
                }
            })
            .0
    }

    fn point_m(&self, index: usize) -> Vector2<f64> {
        self.points_m[index]
    }

    fn distance_from_pose_m(&self, pose: &Pose, index: usize) -> f64 {
        pose.distance_to(&self.points_m[index])
    }

    fn angle_difference_rad(&self, pose: &Pose, index: usize) -> f64 {
        wrap_pi(pose.bearing_to(&self.points_m[index]) - pose.heading_rad)
    }

    fn length_m(&self) -> f64 {
        self.points_m
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }

    fn max_speed_ms(&self) -> f64 {
        self.target_speed_ms
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Append the points from `from` (exclusive) to `to` (inclusive) with at most `point_sep_m`
/// between them.
fn push_segment(
    points_m: &mut Vec<Vector2<f64>>,
    from: Vector2<f64>,
    to: Vector2<f64>,
    point_sep_m: f64,
) -> Result<(), PathError> {
    if !(point_sep_m > 0.0) {
        return Err(PathError::InvalidSeparation(point_sep_m));
    }

    let diff_vec = to - from;
    let dist = diff_vec.norm();

    // Regular spacing no larger than the separation, always ending on `to`
    let num_steps = (dist / point_sep_m).ceil().max(1.0) as usize;
    let delta = diff_vec / num_steps as f64;

    for i in 1..num_steps {
        points_m.push(from + delta * i as f64);
    }
    points_m.push(to);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_direct() {
        let path = Path::direct(Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0), 0.5, 5.0)
            .unwrap();

        assert_eq!(path.num_points(), 21);
        assert_eq!(path.point_m(20), Vector2::new(10.0, 0.0));
        assert!((path.length_m() - 10.0).abs() < 1e-9);
        assert_eq!(path.max_speed_ms(), 5.0);

        assert!(matches!(
            Path::direct(Vector2::zeros(), Vector2::new(1.0, 0.0), 0.0, 1.0),
            Err(PathError::InvalidSeparation(_))
        ));
    }

    #[test]
    fn test_waypoints() {
        let path = Path::from_waypoints(
            &[
                Vector2::new(0.0, 0.0),
                Vector2::new(4.0, 0.0),
                Vector2::new(4.0, 3.0),
            ],
            1.0,
            2.0,
        )
        .unwrap();

        // 0..4 along x then 1..3 along y
        assert_eq!(path.num_points(), 8);
        assert!((path.length_m() - 7.0).abs() < 1e-9);

        assert!(matches!(
            Path::from_waypoints(&[Vector2::zeros()], 1.0, 2.0),
            Err(PathError::NotEnoughPoints(1))
        ));
    }

    #[test]
    fn test_queries() {
        let path = Path::direct(Vector2::new(0.0, 0.0), Vector2::new(10.0, 0.0), 1.0, 5.0)
            .unwrap();

        let pose = Pose::new(3.2, 1.0, 0.0, 0.0);
        assert_eq!(path.nearest_point_index(&pose), 3);
        assert!((path.distance_from_pose_m(&pose, 3) - (0.04f64 + 1.0).sqrt()).abs() < 1e-9);

        // Point straight ahead of a pose facing +x has no angle difference
        let pose = Pose::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(path.angle_difference_rad(&pose, 5), 0.0);

        // Facing +y the same point is a quarter turn to the right
        let pose = Pose::new(0.0, 0.0, FRAC_PI_2, 0.0);
        assert!((path.angle_difference_rad(&pose, 5) + FRAC_PI_2).abs() < 1e-12);

        // Facing -x the difference wraps into (-pi, pi]
        let pose = Pose::new(0.0, 0.0, -PI + 0.1, 0.0);
        let diff = path.angle_difference_rad(&pose, 5);
        assert!(diff > -PI && diff <= PI);
        assert!((diff - (PI - 0.1)).abs() < 1e-12);
    }
}
