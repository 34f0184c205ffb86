//! # Pursuit control module
//!
//! Pursuit control is responsible for keeping the vehicle on the target course. It does this by
//! chasing a target point a short distance ahead of the vehicle along the course, using the pure
//! pursuit steering law. Independently it commands a speed that follows a trapezoidal profile
//! sized to the length of the course.
//!
//! The look-ahead distance grows with speed:
//!
//! ```text
//! look_ahead = forward_gain * speed + min_look_ahead
//! ```
//!
//! The target point is the first course point, starting from the one nearest the vehicle, that
//! is at least the look-ahead distance away. The target index never moves backwards.
//!
//! The steering demand is the curvature needed for a bicycle model to reach the target point:
//!
//! ```text
//! steer = atan2(2 * wheel_base * sin(heading_error), look_ahead)
//! ```
//!
//! and the yaw rate demand follows kinematically from the steering angle and current speed. The
//! acceleration demand is proportional to the error between the profile speed and the current
//! speed.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod params;
pub mod profile;
pub mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::Params;
pub use profile::*;
pub use state::*;
