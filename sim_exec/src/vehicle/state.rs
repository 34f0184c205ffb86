//! Vehicle kinematic state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::Serialize;

use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematic state of a body moving on the plane.
///
/// Updates are applied with a simple bicycle model driven by longitudinal
/// acceleration and yaw rate. Each update produces a new state, the previous
/// one is left untouched.
#[derive(Debug, Copy, Clone, Default, Serialize, PartialEq)]
pub struct State {
    pose: Pose,
}

/// The trail of positions visited by the vehicle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StateHistory {
    points_m: Vec<Vector2<f64>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    /// Advance the state by one time step.
    ///
    /// Heading and speed are integrated first, and the position is then moved
    /// along the new heading at the new speed.
    pub fn update(&self, accel_ms2: f64, yaw_rate_rads: f64, dt_s: f64) -> Self {
        let heading_rad = self.pose.heading_rad + yaw_rate_rads * dt_s;
        let speed_ms = self.pose.speed_ms + accel_ms2 * dt_s;

        let step_m = Vector2::new(heading_rad.cos(), heading_rad.sin()) * speed_ms * dt_s;

        Self {
            pose: Pose {
                position_m: self.pose.position_m + step_m,
                heading_rad,
                speed_ms,
            },
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Speed in kilometers per hour, for display.
    pub fn speed_kmph(&self) -> f64 {
        self.pose.speed_ms * 3.6
    }
}

impl StateHistory {
    pub fn new(start_m: Vector2<f64>) -> Self {
        Self {
            points_m: vec![start_m],
        }
    }

    /// Append a newly visited position.
    pub fn push(&mut self, point_m: Vector2<f64>) {
        self.points_m.push(point_m);
    }

    pub fn points_m(&self) -> &[Vector2<f64>] {
        &self.points_m
    }

    /// Total distance travelled along the trail.
    pub fn distance_travelled_m(&self) -> f64 {
        self.points_m
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_straight_line() {
        let s0 = State::new(Pose::new(0.0, 0.0, 0.0, 0.0));

        // Accelerate to 2 m/s then coast for a second
        let s1 = s0.update(2.0, 0.0, 1.0);
        let s2 = s1.update(0.0, 0.0, 1.0);

        assert_eq!(s1.pose().speed_ms, 2.0);
        assert_eq!(s1.pose().x_m(), 2.0);
        assert_eq!(s2.pose().x_m(), 4.0);
        assert_eq!(s2.pose().y_m(), 0.0);

        // Original state untouched
        assert_eq!(s0.pose().speed_ms, 0.0);
    }

    #[test]
    fn test_turning() {
        let s = State::new(Pose::new(0.0, 0.0, 0.0, 1.0)).update(0.0, FRAC_PI_2, 1.0);

        assert!((s.pose().heading_rad - FRAC_PI_2).abs() < 1e-12);
        assert!(s.pose().x_m().abs() < 1e-12);
        assert!((s.pose().y_m() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_history() {
        let mut h = StateHistory::new(Vector2::new(0.0, 0.0));
        h.push(Vector2::new(3.0, 4.0));
        h.push(Vector2::new(3.0, 5.0));

        assert_eq!(h.points_m().len(), 3);
        assert!((h.distance_travelled_m() - 6.0).abs() < 1e-12);
    }
}
