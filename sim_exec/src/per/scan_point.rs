//! A single range sensor measurement

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::Serialize;
use sim_util::transform::transform_point;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One measurement reported by the range sensor.
///
/// The bearing is relative to the vehicle's heading and the position is in the sensor frame.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ScanPoint {
    distance_m: f64,
    angle_rad: f64,
    point_m: Vector2<f64>,
}

/// All points produced by one scan.
pub type PointCloud = Vec<ScanPoint>;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScanPoint {
    /// Build a point from a range and bearing.
    pub fn new(distance_m: f64, angle_rad: f64) -> Self {
        Self {
            distance_m,
            angle_rad,
            point_m: Vector2::new(distance_m * angle_rad.cos(), distance_m * angle_rad.sin()),
        }
    }

    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn angle_rad(&self) -> f64 {
        self.angle_rad
    }

    pub fn x_m(&self) -> f64 {
        self.point_m[0]
    }

    pub fn y_m(&self) -> f64 {
        self.point_m[1]
    }

    /// Position of the point in the world frame, given the sensor's world position and the
    /// vehicle's heading.
    pub fn global_position_m(&self, sensor_m: &Vector2<f64>, heading_rad: f64) -> Vector2<f64> {
        transform_point(&self.point_m, sensor_m, heading_rad)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_scan_point() {
        let p = ScanPoint::new(2.0, FRAC_PI_2);
        assert!(p.x_m().abs() < 1e-12);
        assert!((p.y_m() - 2.0).abs() < 1e-12);

        // Sensor at (1, 1) facing +y, a point on the sensor's left is on the world's -x side
        let g = p.global_position_m(&Vector2::new(1.0, 1.0), FRAC_PI_2);
        assert!((g - Vector2::new(-1.0, 1.0)).norm() < 1e-9);
    }
}
