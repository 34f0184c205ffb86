//! Pursuit control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for pursuit control
#[derive(Deserialize, Debug, Clone)]
pub struct Params {
    /// Look-ahead distance when the vehicle is stationary
    pub min_look_ahead_m: f64,

    /// Additional look-ahead distance per unit of speed
    pub look_forward_gain_s: f64,

    /// Speed controller proportional gain
    pub speed_k_p: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            min_look_ahead_m: 2.0,
            look_forward_gain_s: 0.3,
            speed_k_p: 1.0,
        }
    }
}
