//! Range sensor parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::Deserialize;
use sim_util::transform::transform_point;

// Internal
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the omnidirectional range sensor
#[derive(Deserialize, Debug, Clone)]
pub struct LidarParams {
    /// Width of one bearing bin
    pub angular_resolution_rad: f64,

    /// Closest range the sensor reports
    pub min_range_m: f64,

    /// Farthest range the sensor reports
    pub max_range_m: f64,

    /// Standard deviation of the noise added to each bearing
    pub angle_std_rad: f64,

    /// Standard deviation of the range noise as a fraction of the true range
    pub dist_std_rate: f64,

    /// Mounting position forward of the vehicle origin
    pub mount_lon_m: f64,

    /// Mounting position left of the vehicle origin
    pub mount_lat_m: f64,

    /// Interpolation step along each contour edge, as a fraction of the edge
    pub contour_sample_step: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LidarParams {
    /// Position of the sensor in the world frame when the vehicle is at `pose`.
    pub fn global_position_m(&self, pose: &Pose) -> Vector2<f64> {
        transform_point(
            &Vector2::new(self.mount_lon_m, self.mount_lat_m),
            &pose.position_m,
            pose.heading_rad,
        )
    }

    /// Number of bearing bins needed to cover a full revolution.
    pub fn num_bins(&self) -> usize {
        (std::f64::consts::TAU / self.angular_resolution_rad).ceil() as usize + 1
    }

    /// True if a range lies within the sensor's limits.
    pub fn in_range(&self, distance_m: f64) -> bool {
        self.min_range_m <= distance_m && distance_m <= self.max_range_m
    }
}

impl Default for LidarParams {
    fn default() -> Self {
        Self {
            angular_resolution_rad: 2f64.to_radians(),
            min_range_m: 0.5,
            max_range_m: 40.0,
            angle_std_rad: 0.005,
            dist_std_rate: 0.005,
            mount_lon_m: 0.0,
            mount_lat_m: 0.0,
            contour_sample_step: 0.008,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_global_position() {
        let params = LidarParams {
            mount_lon_m: 1.5,
            mount_lat_m: 0.0,
            ..Default::default()
        };

        let pos = params.global_position_m(&Pose::new(2.0, 3.0, FRAC_PI_2, 0.0));
        assert!((pos - Vector2::new(2.0, 4.5)).norm() < 1e-9);
    }

    #[test]
    fn test_num_bins() {
        let params = LidarParams {
            angular_resolution_rad: FRAC_PI_2,
            ..Default::default()
        };
        assert_eq!(params.num_bins(), 5);
    }

    #[test]
    fn test_in_range() {
        let params = LidarParams::default();
        assert!(params.in_range(0.5));
        assert!(params.in_range(40.0));
        assert!(!params.in_range(0.49));
        assert!(!params.in_range(40.01));
    }
}
