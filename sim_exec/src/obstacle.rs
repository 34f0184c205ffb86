//! # Obstacles
//!
//! Rectangular bodies moving with constant acceleration and yaw rate commands. The range sensor
//! only consumes their world-frame contours, re-read every cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::Deserialize;
use sim_util::transform::homogeneous_transform;

use crate::{loc::Pose, vehicle::State};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Description of an obstacle as loaded from the parameter file.
#[derive(Deserialize, Debug, Clone)]
pub struct ObstacleParams {
    pub x_m: f64,
    pub y_m: f64,
    pub heading_rad: f64,

    #[serde(default)]
    pub speed_ms: f64,

    #[serde(default)]
    pub accel_ms2: f64,

    #[serde(default)]
    pub yaw_rate_rads: f64,

    /// Half of the obstacle's length along its own X axis
    pub half_length_m: f64,

    /// Half of the obstacle's width along its own Y axis
    pub half_width_m: f64,
}

/// A single rectangular obstacle.
#[derive(Debug, Clone)]
pub struct Obstacle {
    state: State,
    accel_ms2: f64,
    yaw_rate_rads: f64,

    /// Contour vertices in the obstacle's own frame
    contour_m: Vec<Vector2<f64>>,
}

/// The set of obstacles present in the simulation.
#[derive(Debug, Clone, Default)]
pub struct ObstacleList {
    obstacles: Vec<Obstacle>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Obstacle {
    /// Create a stationary obstacle.
    pub fn new(pose: Pose, half_length_m: f64, half_width_m: f64) -> Self {
        let l = half_length_m;
        let w = half_width_m;

        Self {
            state: State::new(pose),
            accel_ms2: 0.0,
            yaw_rate_rads: 0.0,
            contour_m: vec![
                Vector2::new(l, w),
                Vector2::new(-l, w),
                Vector2::new(-l, -w),
                Vector2::new(l, -w),
            ],
        }
    }

    /// Set the constant commands the obstacle will move under.
    pub fn with_motion(mut self, accel_ms2: f64, yaw_rate_rads: f64) -> Self {
        self.accel_ms2 = accel_ms2;
        self.yaw_rate_rads = yaw_rate_rads;
        self
    }

    /// Move the obstacle by one time step.
    pub fn update(&mut self, dt_s: f64) {
        self.state = self.state.update(self.accel_ms2, self.yaw_rate_rads, dt_s);
    }

    pub fn pose(&self) -> &Pose {
        self.state.pose()
    }

    /// The closed contour of the obstacle in the world frame.
    ///
    /// The last vertex joins back onto the first, it is not repeated.
    pub fn vertices(&self) -> Vec<Vector2<f64>> {
        let pose = self.state.pose();
        homogeneous_transform(&self.contour_m, &pose.position_m, pose.heading_rad)
    }
}

impl From<&ObstacleParams> for Obstacle {
    fn from(p: &ObstacleParams) -> Self {
        Obstacle::new(
            Pose::new(p.x_m, p.y_m, p.heading_rad, p.speed_ms),
            p.half_length_m,
            p.half_width_m,
        )
        .with_motion(p.accel_ms2, p.yaw_rate_rads)
    }
}

impl ObstacleList {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Move every obstacle by one time step.
    pub fn update(&mut self, dt_s: f64) {
        for o in self.obstacles.iter_mut() {
            o.update(dt_s);
        }
    }

    /// World-frame contours of every obstacle.
    pub fn contours(&self) -> Vec<Vec<Vector2<f64>>> {
        self.obstacles.iter().map(Obstacle::vertices).collect()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_vertices() {
        let o = Obstacle::new(Pose::new(10.0, 5.0, FRAC_PI_2, 0.0), 2.0, 1.0);

        let v = o.vertices();
        assert_eq!(v.len(), 4);

        // (2, 1) rotated a quarter turn is (-1, 2)
        assert!((v[0] - Vector2::new(9.0, 7.0)).norm() < 1e-9);
        assert!((v[2] - Vector2::new(11.0, 3.0)).norm() < 1e-9);
    }

    #[test]
    fn test_moving_obstacle() {
        let params = ObstacleParams {
            x_m: 0.0,
            y_m: 0.0,
            heading_rad: 0.0,
            speed_ms: 1.0,
            accel_ms2: 0.0,
            yaw_rate_rads: 0.0,
            half_length_m: 1.0,
            half_width_m: 1.0,
        };
        let mut list = ObstacleList::new(vec![Obstacle::from(&params)]);

        for _ in 0..10 {
            list.update(0.5);
        }

        let o = list.iter().next().unwrap();
        assert!((o.pose().x_m() - 5.0).abs() < 1e-9);
        assert_eq!(list.contours()[0].len(), 4);
    }
}
