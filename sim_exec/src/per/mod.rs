//! # Perception module
//!
//! Models an omnidirectional range sensor (a 2D lidar) mounted on the vehicle. Each cycle the
//! sensor looks at the contours of every obstacle and reports a point cloud of what it can see.
//!
//! A scan works in three stages:
//!
//! 1. Every obstacle contour is densified by interpolating along each of its edges, including
//!    the edge joining the last vertex back onto the first.
//! 2. Each sample is converted into a range and a bearing relative to the vehicle's heading, and
//!    binned by bearing at the sensor's angular resolution. Only the closest range in each bin is
//!    kept, which is what makes nearer surfaces occlude farther ones.
//! 3. Bins whose closest range is inside the sensor's range limits produce a point. The bearing
//!    and range of that point are perturbed with Gaussian noise, the range noise growing linearly
//!    with the true range.
//!
//! Each scan replaces the previous point cloud entirely.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod bins;
pub mod lidar;
pub mod noise;
pub mod params;
pub mod scan_point;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use bins::RangeBins;
pub use lidar::*;
pub use noise::{NoNoise, NoiseSource, SeededNoise};
pub use params::LidarParams;
pub use scan_point::{PointCloud, ScanPoint};
