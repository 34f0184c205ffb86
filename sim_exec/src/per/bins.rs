//! Bearing bins holding the closest range seen along each ray direction.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use sim_util::maths::{map_2pi_to_pi, map_to_2pi};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Closest observed range for each discretised bearing.
///
/// Bin `i` is centred on the bearing `i * resolution`. A bin with no observation holds `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBins {
    resolution_rad: f64,
    ranges_m: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RangeBins {
    /// Create an empty set of `num_bins` bins.
    ///
    /// `resolution_rad` must be positive, this is checked when the sensor is constructed.
    pub fn new(resolution_rad: f64, num_bins: usize) -> Self {
        Self {
            resolution_rad,
            ranges_m: vec![None; num_bins],
        }
    }

    /// Index of the bin a bearing falls in.
    pub fn bin_index(&self, angle_rad: f64) -> usize {
        let id = (map_to_2pi(angle_rad) / self.resolution_rad).round() as usize;
        id % self.ranges_m.len()
    }

    /// Centre bearing of a bin, in the range (-pi, pi].
    pub fn bin_angle_rad(&self, index: usize) -> f64 {
        map_2pi_to_pi(index as f64 * self.resolution_rad)
    }

    /// Record an observation, keeping it only if it is closer than anything already seen at
    /// this bearing.
    pub fn observe(&mut self, angle_rad: f64, distance_m: f64) {
        let i = self.bin_index(angle_rad);

        if self.ranges_m[i].map_or(true, |r| distance_m < r) {
            self.ranges_m[i] = Some(distance_m);
        }
    }

    /// Combine with another set of bins by keeping the closest range in each bin.
    ///
    /// Both sets must have been built with the same resolution and number of bins.
    pub fn merge(&mut self, other: &RangeBins) {
        for (a, b) in self.ranges_m.iter_mut().zip(other.ranges_m.iter()) {
            if let Some(rb) = *b {
                if a.map_or(true, |ra| rb < ra) {
                    *a = Some(rb);
                }
            }
        }
    }

    /// Closest range observed in a bin.
    pub fn range_m(&self, index: usize) -> Option<f64> {
        self.ranges_m.get(index).copied().flatten()
    }

    /// Iterate over the occupied bins, yielding the bin index and closest range.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.ranges_m
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.map(|r| (i, r)))
    }

    pub fn num_bins(&self) -> usize {
        self.ranges_m.len()
    }
}
