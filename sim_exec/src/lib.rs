//! # Pursuit simulation library.
//!
//! This library allows other crates in the workspace (and the `sim_exec` binary) to access the
//! perception, control and vehicle models of the simulation.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Localisation - the pose of the ego vehicle
pub mod loc;

/// Obstacles - polygonal bodies the range sensor can see
pub mod obstacle;

/// Paths - the course the vehicle is asked to follow
pub mod path;

/// Perception - omnidirectional range sensor model producing point clouds
pub mod per;

/// Pursuit control - converts the course into acceleration, steering and yaw rate demands
pub mod pursuit_ctrl;

/// Simulation frame driver - steps perception, control and the vehicle each cycle
pub mod sim;

/// Vehicle specification and kinematic state
pub mod vehicle;

/// Parameters for the simulation executable
pub mod params;
