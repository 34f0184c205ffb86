//! Vehicle specification

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Fixed physical parameters of the vehicle.
#[derive(Deserialize, Debug, Clone)]
pub struct VehicleSpec {
    /// Distance between the front and rear axles
    pub wheel_base_m: f64,

    /// Maximum magnitude of acceleration the vehicle can produce
    pub max_accel_ms2: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum VehicleError {
    #[error("Wheel base must be positive, got {0} m")]
    InvalidWheelBase(f64),

    #[error("Maximum acceleration must be positive, got {0} m/s^2")]
    InvalidMaxAccel(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VehicleSpec {
    /// Check that the specification describes a physical vehicle.
    pub fn validate(&self) -> Result<(), VehicleError> {
        if !(self.wheel_base_m > 0.0) {
            return Err(VehicleError::InvalidWheelBase(self.wheel_base_m));
        }
        if !(self.max_accel_ms2 > 0.0) {
            return Err(VehicleError::InvalidMaxAccel(self.max_accel_ms2));
        }

        Ok(())
    }
}

impl Default for VehicleSpec {
    fn default() -> Self {
        Self {
            wheel_base_m: 2.2,
            max_accel_ms2: 1.0,
        }
    }
}
