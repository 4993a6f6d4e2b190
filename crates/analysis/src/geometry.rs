//! Roofline ceiling geometry for external renderers.
//!
//! The core does not draw anything, but the ceiling math belongs here: one
//! ceiling per (memory level, compute roof) pair, a sloped bandwidth line
//! capped by the flat compute roof, meeting at the ridge point.

use roofscope_model::{ComputeRoof, MemoryLevel, RooflineConfig};
use serde::{Deserialize, Serialize};

/// One roofline ceiling: a memory-bandwidth slope capped by a compute roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ceiling {
    pub memory_level: String,
    pub compute_roof: String,
    /// Peak bandwidth of the level in GB/s.
    pub peak_bandwidth: f64,
    /// Peak throughput of the roof in GFLOP/s.
    pub peak_flops: f64,
    /// Arithmetic intensity (FLOP/byte) where the slope meets the roof.
    pub ridge_point: f64,
}

impl Ceiling {
    pub fn new(level: &MemoryLevel, roof: &ComputeRoof) -> Self {
        Self {
            memory_level: level.name.clone(),
            compute_roof: roof.name.clone(),
            peak_bandwidth: level.peak_bandwidth,
            peak_flops: roof.peak_flops,
            ridge_point: roof.peak_flops / level.peak_bandwidth,
        }
    }

    /// Attainable GFLOP/s at the given arithmetic intensity.
    pub fn attainable(&self, intensity: f64) -> f64 {
        (intensity * self.peak_bandwidth).min(self.peak_flops)
    }
}

/// All ceilings of a config, in (level, roof) declaration order.
pub fn ceilings(config: &RooflineConfig) -> Vec<Ceiling> {
    config
        .memory_levels
        .iter()
        .flat_map(|level| {
            config
                .compute_roofs
                .iter()
                .map(move |roof| Ceiling::new(level, roof))
        })
        .collect()
}
