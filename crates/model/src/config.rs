//! Assembled roofline model structures.

use crate::spec::OutputOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the roofline a resource sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Memory,
    Compute,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Memory => write!(f, "memory level"),
            ResourceKind::Compute => write!(f, "compute type"),
        }
    }
}

/// One stage of the memory hierarchy (e.g. "DRAM", "L2").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryLevel {
    pub name: String,
    /// Peak bandwidth in GB/s.
    pub peak_bandwidth: f64,
    /// Measured bandwidth in GB/s; `None` means not measured at this level.
    pub measured_bandwidth: Option<f64>,
}

impl MemoryLevel {
    /// Measured-to-peak bandwidth ratio, if this level was measured.
    pub fn ratio(&self) -> Option<f64> {
        self.measured_bandwidth.map(|m| m / self.peak_bandwidth)
    }
}

/// Peak achievable throughput for one compute category (e.g. "DP", "TENSOR").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeRoof {
    pub name: String,
    /// Peak throughput in GFLOP/s.
    pub peak_flops: f64,
}

/// One resolved achieved-performance figure for a compute roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// References a [`ComputeRoof`] by name.
    pub compute_name: String,
    /// Achieved GFLOP/s.
    pub flops: f64,
}

/// A measured value exceeding its nominal peak beyond tolerance.
///
/// Hardware counters can legitimately report above-nominal figures, so this
/// is surfaced as a warning attached to the config rather than a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyWarning {
    pub kind: ResourceKind,
    pub name: String,
    pub measured: f64,
    pub peak: f64,
}

impl fmt::Display for AnomalyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: measured {:.2} exceeds peak {:.2}",
            self.kind, self.name, self.measured, self.peak
        )
    }
}

/// The assembled, immutable roofline model.
///
/// Built once per analysis request by [`crate::builder::build_config`] and
/// never mutated afterwards; consumed by the bottleneck analyzer and by
/// external renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RooflineConfig {
    /// Hierarchy order: outermost (e.g. DRAM) to innermost (e.g. L1).
    pub memory_levels: Vec<MemoryLevel>,
    pub compute_roofs: Vec<ComputeRoof>,
    pub measurements: Vec<Measurement>,
    /// True iff exactly one level and one roof were declared, or forced.
    pub simple_mode: bool,
    pub num_cores: usize,
    pub topology: String,
    pub cpu_name: String,
    pub app_name: String,
    /// Renderer options, carried through uninterpreted.
    pub output: OutputOptions,
    /// Anomalous-but-not-fatal findings from validation.
    pub warnings: Vec<AnomalyWarning>,
}

impl RooflineConfig {
    pub fn memory_level(&self, name: &str) -> Option<&MemoryLevel> {
        self.memory_levels.iter().find(|l| l.name == name)
    }

    pub fn compute_roof(&self, name: &str) -> Option<&ComputeRoof> {
        self.compute_roofs.iter().find(|r| r.name == name)
    }

    /// Memory levels that carry measured bandwidth data.
    pub fn measured_levels(&self) -> impl Iterator<Item = &MemoryLevel> {
        self.memory_levels
            .iter()
            .filter(|l| l.measured_bandwidth.is_some())
    }
}
