//! # Simulation Executable Parameters
//!
//! This module provide parameters for the simulation executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::obstacle::ObstacleParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct SimExecParams {
    /// Period of one simulation cycle
    pub cycle_period_s: f64,

    /// Simulated time after which the run stops, even if the course is not finished
    pub max_duration_s: f64,

    /// Seed for the sensor noise. If not given the noise is seeded from system entropy.
    pub noise_seed: Option<u64>,

    /// Starting pose of the vehicle as `[x_m, y_m, heading_rad]`
    pub start_pose: [f64; 3],

    /// Waypoints the course passes through, as `[x_m, y_m]` pairs
    pub course_waypoints_m: Vec<[f64; 2]>,

    /// Maximum separation between neighbouring course points
    pub course_point_sep_m: f64,

    /// Speed to drive the course at
    pub course_speed_ms: f64,

    /// Obstacles placed in the world
    #[serde(default)]
    pub obstacles: Vec<ObstacleParams>,
}
