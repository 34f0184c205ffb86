//! # Localisation module
//!
//! Provides the pose of the ego vehicle in the world frame. The pose is owned by the vehicle
//! state and is read-only to perception and control.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position, heading and speed in the world frame) of the vehicle.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Pose {
    /// The position in the world frame
    pub position_m: Vector2<f64>,

    /// The heading of the vehicle, anticlockwise from the world X axis
    pub heading_rad: f64,

    /// Forward speed of the vehicle
    pub speed_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64, speed_ms: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            heading_rad,
            speed_ms,
        }
    }

    pub fn x_m(&self) -> f64 {
        self.position_m[0]
    }

    pub fn y_m(&self) -> f64 {
        self.position_m[1]
    }

    /// Bearing from the pose to the given point, measured in the world frame.
    pub fn bearing_to(&self, point_m: &Vector2<f64>) -> f64 {
        let diff = point_m - self.position_m;
        diff[1].atan2(diff[0])
    }

    /// Straight line distance from the pose to the given point.
    pub fn distance_to(&self, point_m: &Vector2<f64>) -> f64 {
        (point_m - self.position_m).norm()
    }
}
