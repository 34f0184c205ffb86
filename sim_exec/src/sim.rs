//! # Simulation frame driver
//!
//! Steps the closed loop once per cycle: the range sensor scans the obstacles from the current
//! pose, the controller computes its demands, the vehicle state is advanced with those demands,
//! and finally the obstacles move.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use crate::{
    loc::Pose,
    obstacle::ObstacleList,
    path::Path,
    per::{NoiseSource, OmniLidar, SeededNoise},
    pursuit_ctrl::PursuitCtrl,
    vehicle::{State, StateHistory},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Speed below which the vehicle is considered to be at rest
pub const STOPPED_SPEED_MS: f64 = 0.05;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The simulated world: the ego vehicle, its sensor and controller, and the obstacles.
pub struct Simulation<N: NoiseSource = SeededNoise> {
    state: State,
    history: StateHistory,
    obstacles: ObstacleList,

    lidar: Option<OmniLidar<N>>,
    ctrl: Option<PursuitCtrl<Path>>,

    time_s: f64,
}

/// Summary of one simulation cycle.
///
/// The report is flat so that it can be written straight into a CSV archive.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FrameReport {
    pub time_s: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub heading_rad: f64,
    pub speed_ms: f64,
    pub target_index: usize,
    pub target_speed_ms: f64,
    pub target_accel_ms2: f64,
    pub target_steer_rad: f64,
    pub target_yaw_rate_rads: f64,
    pub num_scan_points: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<N: NoiseSource> Simulation<N> {
    /// Create a simulation with no sensor and no controller.
    pub fn new(start: Pose, obstacles: ObstacleList) -> Self {
        Self {
            state: State::new(start),
            history: StateHistory::new(start.position_m),
            obstacles,
            lidar: None,
            ctrl: None,
            time_s: 0.0,
        }
    }

    /// Mount a range sensor on the vehicle.
    pub fn with_lidar(mut self, mut lidar: OmniLidar<N>) -> Self {
        lidar.install(self.state.pose());
        self.lidar = Some(lidar);
        self
    }

    /// Give the vehicle a controller. Without one the vehicle never moves.
    pub fn with_controller(mut self, ctrl: PursuitCtrl<Path>) -> Self {
        self.ctrl = Some(ctrl);
        self
    }

    /// Advance the simulation by one cycle.
    pub fn tick(&mut self, dt_s: f64) -> FrameReport {
        let pose = *self.state.pose();

        if let Some(ref mut lidar) = self.lidar {
            lidar.update(&pose, &self.obstacles.contours());
        }

        if let Some(ref mut ctrl) = self.ctrl {
            let demands = ctrl.update(&pose, dt_s);

            self.state = self.state.update(
                demands.target_accel_ms2,
                demands.target_yaw_rate_rads,
                dt_s,
            );
            self.history.push(self.state.pose().position_m);
        }

        self.obstacles.update(dt_s);
        self.time_s += dt_s;

        let report = self.report();
        trace!("Frame {:?}", report);

        report
    }

    /// Report on the current state of the simulation.
    pub fn report(&self) -> FrameReport {
        let pose = self.state.pose();
        let demands = self.ctrl.as_ref().map(|c| *c.state()).unwrap_or_default();

        FrameReport {
            time_s: self.time_s,
            x_m: pose.x_m(),
            y_m: pose.y_m(),
            heading_rad: pose.heading_rad,
            speed_ms: pose.speed_ms,
            target_index: demands.target_index,
            target_speed_ms: demands.target_speed_ms,
            target_accel_ms2: demands.target_accel_ms2,
            target_steer_rad: demands.target_steer_rad,
            target_yaw_rate_rads: demands.target_yaw_rate_rads,
            num_scan_points: self.lidar.as_ref().map_or(0, |l| l.point_cloud().len()),
        }
    }

    /// True once the controller has brought the vehicle to rest at the end of its course.
    ///
    /// The speed loop lags the profile, so the vehicle is still rolling when the profile first
    /// demands zero speed.
    pub fn is_finished(&self) -> bool {
        self.ctrl.as_ref().map_or(false, |c| c.is_finished())
            && self.state.pose().speed_ms.abs() < STOPPED_SPEED_MS
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn obstacles(&self) -> &ObstacleList {
        &self.obstacles
    }

    pub fn lidar(&self) -> Option<&OmniLidar<N>> {
        self.lidar.as_ref()
    }

    pub fn controller(&self) -> Option<&PursuitCtrl<Path>> {
        self.ctrl.as_ref()
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }
}
