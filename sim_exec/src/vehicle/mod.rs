//! # Vehicle module
//!
//! Describes the ego vehicle: its fixed specification, its kinematic state, and the trail of
//! positions it has visited.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod spec;
mod state;

pub use spec::*;
pub use state::*;
