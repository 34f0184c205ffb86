//! Omnidirectional lidar state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use nalgebra::Vector2;

// Internal
use super::{LidarParams, NoiseSource, PointCloud, RangeBins, ScanPoint, SeededNoise};
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An omnidirectional range sensor.
///
/// The sensor is generic over its noise source so that scans can be made deterministic.
pub struct OmniLidar<N: NoiseSource = SeededNoise> {
    params: LidarParams,

    /// Number of bearing bins in one revolution
    num_bins: usize,

    /// Interpolation fractions used along every contour edge
    sample_deltas: Vec<f64>,

    noise: N,

    /// Position of the sensor in the world frame at the last update
    global_position_m: Vector2<f64>,

    /// Points produced by the last update
    point_cloud: PointCloud,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Configuration errors raised when constructing the sensor.
#[derive(Debug, thiserror::Error)]
pub enum LidarError {
    #[error("Angular resolution must be positive, got {0} rad")]
    InvalidAngularResolution(f64),

    #[error("Invalid range limits [{0}, {1}] m")]
    InvalidRange(f64, f64),

    #[error("Contour sample step must be in (0, 1], got {0}")]
    InvalidSampleStep(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<N: NoiseSource> OmniLidar<N> {
    /// Create a new sensor, validating its parameters.
    pub fn new(params: LidarParams, noise: N) -> Result<Self, LidarError> {
        let reso = params.angular_resolution_rad;
        if !(reso > 0.0) || !reso.is_finite() {
            return Err(LidarError::InvalidAngularResolution(reso));
        }

        if !(params.min_range_m >= 0.0) || !(params.max_range_m >= params.min_range_m) {
            return Err(LidarError::InvalidRange(
                params.min_range_m,
                params.max_range_m,
            ));
        }

        let step = params.contour_sample_step;
        if !(step > 0.0 && step <= 1.0) {
            return Err(LidarError::InvalidSampleStep(step));
        }

        let sample_deltas: Vec<f64> = (0..)
            .map(|k| k as f64 * step)
            .take_while(|d| *d < 1.0)
            .collect();

        let num_bins = params.num_bins();

        debug!(
            "Lidar created with {} bearing bins and {} samples per contour edge",
            num_bins,
            sample_deltas.len()
        );

        Ok(Self {
            params,
            num_bins,
            sample_deltas,
            noise,
            global_position_m: Vector2::zeros(),
            point_cloud: PointCloud::new(),
        })
    }

    /// Place the sensor on the vehicle at the given pose without scanning.
    pub fn install(&mut self, pose: &Pose) {
        self.global_position_m = self.params.global_position_m(pose);
    }

    /// Scan the given obstacle contours from the vehicle pose, replacing the point cloud.
    pub fn update<C>(&mut self, pose: &Pose, contours: &[C])
    where
        C: AsRef<[Vector2<f64>]>,
    {
        self.install(pose);

        let bins = self.observe(pose, contours);
        self.point_cloud = self.sample_cloud(&bins);

        trace!(
            "Scan from ({:.3}, {:.3}): {} obstacles, {} points",
            self.global_position_m[0],
            self.global_position_m[1],
            contours.len(),
            self.point_cloud.len()
        );
    }

    /// Bin every contour by bearing, keeping the closest range in each bin.
    ///
    /// Each contour is binned on its own and the results merged, so that the order of the
    /// contours does not matter.
    pub fn observe<C>(&self, pose: &Pose, contours: &[C]) -> RangeBins
    where
        C: AsRef<[Vector2<f64>]>,
    {
        let sensor_m = self.params.global_position_m(pose);
        let mut bins = self.empty_bins();

        for c in contours {
            bins.merge(&self.observe_contour(&sensor_m, pose.heading_rad, c.as_ref()));
        }

        bins
    }

    /// Turn the occupied, in-range bins into noisy scan points.
    pub fn sample_cloud(&mut self, bins: &RangeBins) -> PointCloud {
        let params = &self.params;
        let noise = &mut self.noise;

        bins.occupied()
            .filter(|(_, dist_m)| params.in_range(*dist_m))
            .map(|(i, dist_m)| {
                let angle_rad = bins.bin_angle_rad(i) + noise.gaussian(params.angle_std_rad);
                let dist_m = dist_m + noise.gaussian(params.dist_std_rate * dist_m);

                ScanPoint::new(dist_m, angle_rad)
            })
            .collect()
    }

    /// Points produced by the last update.
    pub fn point_cloud(&self) -> &PointCloud {
        &self.point_cloud
    }

    /// World position of the sensor at the last update.
    pub fn global_position_m(&self) -> Vector2<f64> {
        self.global_position_m
    }

    pub fn params(&self) -> &LidarParams {
        &self.params
    }

    /// Bin a single contour as seen from `sensor_m`, bearings relative to `heading_rad`.
    fn observe_contour(
        &self,
        sensor_m: &Vector2<f64>,
        heading_rad: f64,
        contour_m: &[Vector2<f64>],
    ) -> RangeBins {
        let mut bins = self.empty_bins();

        for p in self.densify(contour_m) {
            let diff = p - sensor_m;
            let angle_rad = diff[1].atan2(diff[0]) - heading_rad;

            bins.observe(angle_rad, diff.norm());
        }

        bins
    }

    /// Interpolate along every edge of a closed contour, including the edge from the last
    /// vertex back to the first.
    fn densify(&self, contour_m: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
        let n = contour_m.len();
        let mut samples = Vec::with_capacity(n * self.sample_deltas.len());

        for i in 0..n {
            let a = contour_m[i];
            let b = contour_m[(i + 1) % n];

            samples.extend(self.sample_deltas.iter().map(|d| a * (1.0 - d) + b * *d));
        }

        samples
    }

    fn empty_bins(&self) -> RangeBins {
        RangeBins::new(self.params.angular_resolution_rad, self.num_bins)
    }
}
