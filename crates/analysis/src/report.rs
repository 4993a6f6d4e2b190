//! Structured analysis results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The resource identified as most limiting achieved performance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name")]
pub enum Resource {
    /// A specific memory level, e.g. "DRAM" or "L2".
    Memory(String),
    /// A compute roof, e.g. "DP".
    Compute(String),
}

impl Resource {
    pub fn name(&self) -> &str {
        match self {
            Resource::Memory(name) | Resource::Compute(name) => name,
        }
    }

    pub fn is_memory(&self) -> bool {
        matches!(self, Resource::Memory(_))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Memory(name) => write!(f, "memory level {}", name),
            Resource::Compute(name) => write!(f, "compute type {}", name),
        }
    }
}

/// Bottleneck classification for one measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementVerdict {
    /// Compute roof the measurement belongs to.
    pub compute_name: String,
    /// Achieved GFLOP/s.
    pub flops: f64,
    /// The most-constrained resource for this measurement.
    pub bottleneck: Resource,
    /// Measured-to-peak ratio of the bottleneck resource.
    pub ratio: f64,
    /// Set when no memory level carried measured data and the classification
    /// degraded to compute-only.
    pub low_confidence: bool,
    /// Human-readable verdict line.
    pub summary: String,
}

/// Aggregate verdict across all measurements of a config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallVerdict {
    pub bottleneck: Resource,
    pub ratio: f64,
    pub summary: String,
}

/// Complete analysis result for one config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub app_name: String,
    pub cpu_name: String,
    pub verdicts: Vec<MeasurementVerdict>,
    pub overall: OverallVerdict,
}

impl AnalysisReport {
    /// Save report to JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load report from JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let report = serde_json::from_str(&json)?;
        Ok(report)
    }
}
