//! # Simulation Executable
//!
//! Runs the closed loop between the range sensor, the pursuit controller and the vehicle at a
//! fixed cycle period, archiving a summary of every cycle into the session directory.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use color_eyre::{eyre::WrapErr, Result};
use log::{debug, info};
use nalgebra::Vector2;

use sim_lib::{
    loc::Pose,
    obstacle::{Obstacle, ObstacleList},
    params::SimExecParams,
    path::{Course, Path},
    per::{LidarParams, OmniLidar, SeededNoise},
    pursuit_ctrl::PursuitCtrl,
    sim::Simulation,
    vehicle::VehicleSpec,
};
use sim_util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    let session = Session::new("sim_exec", "sessions").wrap_err("Failed to create the session")?;

    logger_init(LevelFilter::Debug, Some(&session)).wrap_err("Failed to initialise logging")?;

    info!("Pursuit Simulation\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: SimExecParams =
        sim_util::params::load("sim_exec.toml").wrap_err("Could not load exec params")?;
    let vehicle_spec: VehicleSpec =
        sim_util::params::load("vehicle.toml").wrap_err("Could not load vehicle spec")?;
    let lidar_params: LidarParams =
        sim_util::params::load("lidar.toml").wrap_err("Could not load lidar params")?;

    vehicle_spec
        .validate()
        .wrap_err("Invalid vehicle specification")?;

    // ---- MODULE INIT ----

    let waypoints: Vec<Vector2<f64>> = exec_params
        .course_waypoints_m
        .iter()
        .map(|p| Vector2::new(p[0], p[1]))
        .collect();
    let course = Path::from_waypoints(
        &waypoints,
        exec_params.course_point_sep_m,
        exec_params.course_speed_ms,
    )
    .wrap_err("Failed to build the course")?;
    info!(
        "Course of {} points, {:.2} m long",
        course.num_points(),
        course.length_m()
    );

    let ctrl = PursuitCtrl::init("pursuit_ctrl.toml", &vehicle_spec, Some(course))
        .wrap_err("Failed to initialise PursuitCtrl")?;
    info!("PursuitCtrl init complete");

    let noise = match exec_params.noise_seed {
        Some(seed) => SeededNoise::new(seed),
        None => SeededNoise::from_entropy(),
    };
    let lidar = OmniLidar::new(lidar_params, noise).wrap_err("Failed to initialise the lidar")?;
    info!("Lidar init complete");

    let obstacles = ObstacleList::new(exec_params.obstacles.iter().map(Obstacle::from).collect());
    info!("{} obstacles placed", obstacles.len());

    let [x_m, y_m, heading_rad] = exec_params.start_pose;
    let mut sim = Simulation::new(Pose::new(x_m, y_m, heading_rad, 0.0), obstacles)
        .with_lidar(lidar)
        .with_controller(ctrl);

    let mut frame_arch =
        Archiver::from_path(&session, "frames.csv").wrap_err("Failed to create frame archive")?;

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    while sim.time_s() < exec_params.max_duration_s {
        let report = sim.tick(exec_params.cycle_period_s);

        frame_arch
            .serialise(report)
            .wrap_err("Failed to archive frame")?;

        debug!(
            "t = {:6.2} s, pos = ({:7.2}, {:7.2}), speed = {:5.2} m/s, {} scan points",
            report.time_s, report.x_m, report.y_m, report.speed_ms, report.num_scan_points
        );

        if sim.is_finished() {
            info!("Course finished after {:.2} s", report.time_s);
            break;
        }
    }

    // ---- SUMMARY ----

    let pose = sim.state().pose();
    info!(
        "Final pose: ({:.2}, {:.2}) heading {:.3} rad, speed {:.2} km/h",
        pose.x_m(),
        pose.y_m(),
        pose.heading_rad,
        sim.state().speed_kmph()
    );
    info!(
        "Travelled {:.2} m over {} cycles",
        sim.history().distance_travelled_m(),
        frame_arch.num_records()
    );

    Ok(())
}
