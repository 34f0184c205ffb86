//! Trapezoidal speed profile

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A symmetric accelerate, cruise, decelerate speed schedule.
///
/// The phase durations are fixed at construction from the course length. If the course is
/// shorter than the distance needed to reach and lose the maximum speed the cruise duration is
/// negative, and the profile goes straight from accelerating to decelerating.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SpeedProfile {
    pub max_speed_ms: f64,
    pub max_accel_ms2: f64,
    pub accel_time_s: f64,
    pub decel_time_s: f64,
    pub const_time_s: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The phase of the profile at a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedPhase {
    Accel,
    Const,
    Decel,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SpeedProfile {
    /// Size the profile to a course.
    ///
    /// Both `max_speed_ms` and `max_accel_ms2` must be positive, which is checked by the
    /// controller before building the profile.
    pub fn new(max_speed_ms: f64, max_accel_ms2: f64, distance_m: f64) -> Self {
        let accel_time_s = max_speed_ms / max_accel_ms2;
        let decel_time_s = accel_time_s;

        let accel_dist_m = max_speed_ms * accel_time_s / 2.0;
        let decel_dist_m = max_speed_ms * decel_time_s / 2.0;
        let const_time_s = (distance_m - accel_dist_m - decel_dist_m) / max_speed_ms;

        Self {
            max_speed_ms,
            max_accel_ms2,
            accel_time_s,
            decel_time_s,
            const_time_s,
        }
    }

    /// Which phase the profile is in at `elapsed_s`.
    pub fn phase(&self, elapsed_s: f64) -> SpeedPhase {
        if elapsed_s <= self.accel_time_s {
            SpeedPhase::Accel
        } else if elapsed_s <= self.accel_time_s + self.const_time_s {
            SpeedPhase::Const
        } else {
            SpeedPhase::Decel
        }
    }

    /// The speed to target over the next `dt_s`, given the previous target and the time elapsed
    /// so far.
    pub fn next_speed_ms(&self, prev_speed_ms: f64, elapsed_s: f64, dt_s: f64) -> f64 {
        match self.phase(elapsed_s) {
            SpeedPhase::Accel => {
                (prev_speed_ms + self.max_accel_ms2 * dt_s).min(self.max_speed_ms)
            }
            SpeedPhase::Const => self.max_speed_ms,
            SpeedPhase::Decel => (prev_speed_ms - self.max_accel_ms2 * dt_s).max(0.0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_phase_times() {
        let p = SpeedProfile::new(5.0, 1.0, 50.0);

        assert_eq!(p.accel_time_s, 5.0);
        assert_eq!(p.decel_time_s, 5.0);
        assert_eq!(p.const_time_s, 5.0);

        assert_eq!(p.phase(0.0), SpeedPhase::Accel);
        assert_eq!(p.phase(5.0), SpeedPhase::Accel);
        assert_eq!(p.phase(5.1), SpeedPhase::Const);
        assert_eq!(p.phase(10.0), SpeedPhase::Const);
        assert_eq!(p.phase(10.1), SpeedPhase::Decel);
    }

    #[test]
    fn test_short_course_skips_cruise() {
        let p = SpeedProfile::new(5.0, 1.0, 5.0);

        assert_eq!(p.const_time_s, -4.0);
        assert_eq!(p.phase(5.0), SpeedPhase::Accel);
        assert_eq!(p.phase(5.5), SpeedPhase::Decel);
    }

    #[test]
    fn test_next_speed_clamps() {
        let p = SpeedProfile::new(5.0, 1.0, 50.0);

        assert_eq!(p.next_speed_ms(4.5, 4.0, 1.0), 5.0);
        assert_eq!(p.next_speed_ms(2.0, 7.0, 1.0), 5.0);
        assert_eq!(p.next_speed_ms(0.5, 20.0, 1.0), 0.0);
    }
}
