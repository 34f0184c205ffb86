//! Pursuit control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace, warn};
use nalgebra::Vector2;
use serde::Serialize;
use sim_util::params;

// Internal
use super::*;
use crate::{
    loc::Pose,
    path::{Course, Path},
    vehicle::VehicleSpec,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Maximum speed used to size the profile when no course is set
const NO_COURSE_MAX_SPEED_MS: f64 = 5.0;

/// Course length used to size the profile when no course is set
const NO_COURSE_DISTANCE_M: f64 = 10.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Pure pursuit path tracking controller.
pub struct PursuitCtrl<C: Course = Path> {
    params: Params,

    wheel_base_m: f64,

    /// Speed schedule sized to the course
    profile: SpeedProfile,

    /// The course to follow. Without one the controller is inert.
    course: Option<C>,

    state: PursuitState,
}

/// Everything the controller carries from one cycle to the next, along with the demands it
/// produced on the last cycle.
#[derive(Debug, Default, Copy, Clone, Serialize, PartialEq)]
pub struct PursuitState {
    /// Distance ahead at which the target point is chosen
    pub look_ahead_m: f64,

    /// Index of the current target point on the course
    pub target_index: usize,

    /// Speed demanded by the speed profile
    pub target_speed_ms: f64,

    /// Acceleration demand
    pub target_accel_ms2: f64,

    /// Steering angle demand
    pub target_steer_rad: f64,

    /// Yaw rate demand
    pub target_yaw_rate_rads: f64,

    /// Time the controller has been running for
    pub elapsed_time_s: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur when creating the controller.
#[derive(Debug, thiserror::Error)]
pub enum PursuitCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(params::LoadError),

    #[error("Maximum acceleration must be positive, got {0} m/s^2")]
    InvalidMaxAccel(f64),

    #[error("Wheel base must be positive, got {0} m")]
    InvalidWheelBase(f64),

    #[error("Course maximum speed must be positive, got {0} m/s")]
    InvalidMaxSpeed(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C: Course> PursuitCtrl<C> {
    /// Initialise the controller from a parameter file.
    ///
    /// The path is relative to the params directory.
    pub fn init(
        params_path: &str,
        spec: &VehicleSpec,
        course: Option<C>,
    ) -> Result<Self, PursuitCtrlError> {
        let params = params::load(params_path).map_err(PursuitCtrlError::ParamLoadError)?;

        Self::new(params, spec, course)
    }

    /// Create a new controller.
    ///
    /// The speed profile is sized to the course here, and never changes afterwards.
    pub fn new(
        params: Params,
        spec: &VehicleSpec,
        course: Option<C>,
    ) -> Result<Self, PursuitCtrlError> {
        if !(spec.max_accel_ms2 > 0.0) {
            return Err(PursuitCtrlError::InvalidMaxAccel(spec.max_accel_ms2));
        }
        if !(spec.wheel_base_m > 0.0) {
            return Err(PursuitCtrlError::InvalidWheelBase(spec.wheel_base_m));
        }

        let (max_speed_ms, distance_m) = match course {
            Some(ref c) => (c.max_speed_ms(), c.length_m()),
            None => (NO_COURSE_MAX_SPEED_MS, NO_COURSE_DISTANCE_M),
        };
        if !(max_speed_ms > 0.0) {
            return Err(PursuitCtrlError::InvalidMaxSpeed(max_speed_ms));
        }

        let profile = SpeedProfile::new(max_speed_ms, spec.max_accel_ms2, distance_m);

        debug!(
            "PursuitCtrl speed profile: accel {:.2} s, const {:.2} s, decel {:.2} s up to {:.2} m/s",
            profile.accel_time_s, profile.const_time_s, profile.decel_time_s, max_speed_ms
        );
        if profile.const_time_s < 0.0 {
            warn!(
                "Course of {:.2} m is too short to reach {:.2} m/s, the speed profile will \
                decelerate straight after accelerating",
                distance_m, max_speed_ms
            );
        }

        let state = PursuitState {
            look_ahead_m: params.min_look_ahead_m,
            ..Default::default()
        };

        Ok(Self {
            params,
            wheel_base_m: spec.wheel_base_m,
            profile,
            course,
            state,
        })
    }

    /// Process one control cycle, storing and returning the new state.
    ///
    /// Without a course this does nothing.
    pub fn update(&mut self, pose: &Pose, dt_s: f64) -> PursuitState {
        self.state = self.step(&self.state, pose, dt_s);

        trace!(
            "PursuitCtrl target {} accel {:.3} steer {:.3} yaw rate {:.3}",
            self.state.target_index,
            self.state.target_accel_ms2,
            self.state.target_steer_rad,
            self.state.target_yaw_rate_rads
        );

        self.state
    }

    /// Calculate the state following `prev` for a vehicle at `pose`, without modifying the
    /// controller.
    pub fn step(&self, prev: &PursuitState, pose: &Pose, dt_s: f64) -> PursuitState {
        let course = match self.course {
            Some(ref c) => c,
            None => return *prev,
        };

        let look_ahead_m =
            self.params.look_forward_gain_s * pose.speed_ms + self.params.min_look_ahead_m;

        let target_index = self.find_target_index(course, pose, look_ahead_m, prev.target_index);

        let target_speed_ms =
            self.profile
                .next_speed_ms(prev.target_speed_ms, prev.elapsed_time_s, dt_s);

        let target_accel_ms2 = self.params.speed_k_p * (target_speed_ms - pose.speed_ms);

        let head_err_rad = course.angle_difference_rad(pose, target_index);
        let target_steer_rad =
            (2.0 * self.wheel_base_m * head_err_rad.sin()).atan2(look_ahead_m);

        let target_yaw_rate_rads = pose.speed_ms * target_steer_rad.tan() / self.wheel_base_m;

        PursuitState {
            look_ahead_m,
            target_index,
            target_speed_ms,
            target_accel_ms2,
            target_steer_rad,
            target_yaw_rate_rads,
            elapsed_time_s: prev.elapsed_time_s + dt_s,
        }
    }

    /// Walk forward from the point nearest the pose (or the previous target, if further along)
    /// until a point at least `look_ahead_m` away is found, stopping at the end of the course.
    fn find_target_index(
        &self,
        course: &C,
        pose: &Pose,
        look_ahead_m: f64,
        prev_index: usize,
    ) -> usize {
        let last_index = course.num_points().saturating_sub(1);

        let mut index = course.nearest_point_index(pose).max(prev_index).min(last_index);

        while index < last_index && look_ahead_m > course.distance_from_pose_m(pose, index) {
            index += 1;
        }

        index
    }

    pub fn state(&self) -> &PursuitState {
        &self.state
    }

    pub fn profile(&self) -> &SpeedProfile {
        &self.profile
    }

    pub fn course(&self) -> Option<&C> {
        self.course.as_ref()
    }

    pub fn target_accel_ms2(&self) -> f64 {
        self.state.target_accel_ms2
    }

    pub fn target_steer_rad(&self) -> f64 {
        self.state.target_steer_rad
    }

    pub fn target_yaw_rate_rads(&self) -> f64 {
        self.state.target_yaw_rate_rads
    }

    pub fn target_index(&self) -> usize {
        self.state.target_index
    }

    /// Position of the current target point, if there is a course.
    pub fn target_point_m(&self) -> Option<Vector2<f64>> {
        self.course
            .as_ref()
            .map(|c| c.point_m(self.state.target_index))
    }

    /// True once the target is the last point of the course and the profile has brought the
    /// demanded speed down to zero.
    pub fn is_finished(&self) -> bool {
        match self.course {
            Some(ref c) => {
                self.state.target_index + 1 >= c.num_points()
                    && self.state.target_speed_ms == 0.0
                    && self.state.elapsed_time_s > 0.0
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vehicle::State;
    use std::f64::consts::FRAC_PI_2;

    fn straight_course(length_m: f64, speed_ms: f64) -> Path {
        Path::direct(
            Vector2::new(0.0, 0.0),
            Vector2::new(length_m, 0.0),
            0.5,
            speed_ms,
        )
        .unwrap()
    }

    fn spec() -> VehicleSpec {
        VehicleSpec {
            wheel_base_m: 2.0,
            max_accel_ms2: 1.0,
        }
    }

    #[test]
    fn test_invalid_config() {
        let bad_accel = VehicleSpec {
            max_accel_ms2: 0.0,
            ..spec()
        };
        assert!(matches!(
            PursuitCtrl::<Path>::new(Params::default(), &bad_accel, None),
            Err(PursuitCtrlError::InvalidMaxAccel(_))
        ));

        let bad_wheel_base = VehicleSpec {
            wheel_base_m: 0.0,
            ..spec()
        };
        assert!(matches!(
            PursuitCtrl::<Path>::new(Params::default(), &bad_wheel_base, None),
            Err(PursuitCtrlError::InvalidWheelBase(_))
        ));

        assert!(matches!(
            PursuitCtrl::new(Params::default(), &spec(), Some(straight_course(10.0, 0.0))),
            Err(PursuitCtrlError::InvalidMaxSpeed(_))
        ));
    }

    #[test]
    fn test_speed_profile_boundary() {
        let mut ctrl =
            PursuitCtrl::new(Params::default(), &spec(), Some(straight_course(50.0, 5.0)))
                .unwrap();
        let pose = Pose::new(0.0, 0.0, 0.0, 0.0);

        assert_eq!(ctrl.state().elapsed_time_s, 0.0);
        assert_eq!(ctrl.state().target_speed_ms, 0.0);

        let s = ctrl.update(&pose, 1.0);
        assert_eq!(s.target_speed_ms, 1.0);
        assert_eq!(s.target_accel_ms2, 1.0);

        // Run until the decel phase begins
        let p = *ctrl.profile();
        while ctrl.state().elapsed_time_s <= p.accel_time_s + p.const_time_s {
            ctrl.update(&pose, 1.0);
        }
        assert_eq!(ctrl.state().target_speed_ms, 5.0);

        // Strictly decreasing to zero, then held there
        let mut prev = ctrl.state().target_speed_ms;
        while prev > 0.0 {
            let s = ctrl.update(&pose, 1.0);
            assert!(s.target_speed_ms < prev);
            prev = s.target_speed_ms;
        }
        for _ in 0..5 {
            assert_eq!(ctrl.update(&pose, 1.0).target_speed_ms, 0.0);
        }
    }

    #[test]
    fn test_short_course_profile() {
        let mut ctrl =
            PursuitCtrl::new(Params::default(), &spec(), Some(straight_course(5.0, 5.0)))
                .unwrap();
        let pose = Pose::new(0.0, 0.0, 0.0, 0.0);

        assert!(ctrl.profile().const_time_s < 0.0);

        // Accelerates up to the maximum, then immediately starts slowing
        for _ in 0..6 {
            ctrl.update(&pose, 1.0);
        }
        assert_eq!(ctrl.state().target_speed_ms, 5.0);
        assert_eq!(ctrl.update(&pose, 1.0).target_speed_ms, 4.0);
    }

    #[test]
    fn test_straight_ahead_no_steer() {
        for wheel_base_m in [1.0, 2.5, 4.0].iter() {
            let spec = VehicleSpec {
                wheel_base_m: *wheel_base_m,
                max_accel_ms2: 1.0,
            };
            let mut ctrl =
                PursuitCtrl::new(Params::default(), &spec, Some(straight_course(50.0, 5.0)))
                    .unwrap();

            for speed_ms in [0.0, 3.0, 10.0].iter() {
                let s = ctrl.update(&Pose::new(1.0, 0.0, 0.0, *speed_ms), 0.1);
                assert_eq!(s.target_steer_rad, 0.0);
                assert_eq!(s.target_yaw_rate_rads, 0.0);
            }
        }
    }

    #[test]
    fn test_steers_towards_course() {
        let mut ctrl =
            PursuitCtrl::new(Params::default(), &spec(), Some(straight_course(50.0, 5.0)))
                .unwrap();

        // Vehicle to the right of the course (below it) must steer left
        let s = ctrl.update(&Pose::new(5.0, -1.0, 0.0, 2.0), 0.1);
        assert!(s.target_steer_rad > 0.0);
        assert!(s.target_yaw_rate_rads > 0.0);

        // And facing away to the left must steer right
        let s = ctrl.update(&Pose::new(5.0, 0.0, FRAC_PI_2 / 2.0, 2.0), 0.1);
        assert!(s.target_steer_rad < 0.0);
    }

    #[test]
    fn test_look_ahead_grows_with_speed() {
        let mut ctrl =
            PursuitCtrl::new(Params::default(), &spec(), Some(straight_course(50.0, 5.0)))
                .unwrap();

        let slow = ctrl.update(&Pose::new(0.0, 0.0, 0.0, 0.0), 0.1);
        assert_eq!(slow.look_ahead_m, 2.0);
        assert_eq!(slow.target_index, 4);

        let fast = ctrl.update(&Pose::new(0.0, 0.0, 0.0, 10.0), 0.1);
        assert!((fast.look_ahead_m - 5.0).abs() < 1e-12);
        assert!(fast.target_index == 10 || fast.target_index == 11);
    }

    #[test]
    fn test_target_stops_at_course_end() {
        let mut ctrl =
            PursuitCtrl::new(Params::default(), &spec(), Some(straight_course(10.0, 5.0)))
                .unwrap();

        let s = ctrl.update(&Pose::new(9.5, 0.0, 0.0, 1.0), 0.1);
        assert_eq!(s.target_index, 20);
        assert_eq!(ctrl.target_point_m(), Some(Vector2::new(10.0, 0.0)));

        // Past the end it keeps tracking the final point
        let s = ctrl.update(&Pose::new(12.0, 0.0, 0.0, 1.0), 0.1);
        assert_eq!(s.target_index, 20);
    }

    #[test]
    fn test_index_monotonic_along_course() {
        let course = Path::from_waypoints(
            &[
                Vector2::new(0.0, 0.0),
                Vector2::new(20.0, 0.0),
                Vector2::new(30.0, 10.0),
                Vector2::new(30.0, 30.0),
            ],
            0.5,
            4.0,
        )
        .unwrap();
        let num_points = course.num_points();

        let spec = spec();
        let mut ctrl = PursuitCtrl::new(Params::default(), &spec, Some(course)).unwrap();
        let mut state = State::new(Pose::new(0.0, 0.0, 0.0, 0.0));

        let dt_s = 0.1;
        let mut prev_index = 0;
        for _ in 0..600 {
            let s = ctrl.update(state.pose(), dt_s);
            assert!(s.target_index >= prev_index);
            prev_index = s.target_index;

            state = state.update(s.target_accel_ms2, s.target_yaw_rate_rads, dt_s);
        }

        // Made it most of the way round
        assert!(prev_index > num_points / 2);
    }

    #[test]
    fn test_no_course_is_inert() {
        let mut ctrl = PursuitCtrl::<Path>::new(Params::default(), &spec(), None).unwrap();

        for i in 0..20 {
            let s = ctrl.update(&Pose::new(i as f64, 2.0, 0.3, 3.0), 0.1);

            assert_eq!(s.target_accel_ms2, 0.0);
            assert_eq!(s.target_steer_rad, 0.0);
            assert_eq!(s.target_yaw_rate_rads, 0.0);
            assert_eq!(s.target_index, 0);
            assert_eq!(s.elapsed_time_s, 0.0);
        }

        assert_eq!(ctrl.target_point_m(), None);
        assert!(!ctrl.is_finished());
    }

    #[test]
    fn test_step_is_pure() {
        let ctrl =
            PursuitCtrl::new(Params::default(), &spec(), Some(straight_course(50.0, 5.0)))
                .unwrap();
        let pose = Pose::new(0.0, 0.5, 0.1, 1.0);

        let a = ctrl.step(ctrl.state(), &pose, 0.1);
        let b = ctrl.step(ctrl.state(), &pose, 0.1);

        assert_eq!(a, b);
        assert_eq!(ctrl.state().elapsed_time_s, 0.0);
        assert_eq!(a.elapsed_time_s, 0.1);
    }
}
