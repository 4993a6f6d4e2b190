//! Raw roofline specification: the caller-facing input side of the model.
//!
//! A [`RooflineSpec`] is assembled either through the chained builder methods
//! or deserialized from JSON. Declaration order is preserved (vectors, not
//! maps) because the memory hierarchy is ordered outermost-to-innermost.

use serde::{Deserialize, Serialize};

/// One declared memory level: peak bandwidth plus optional measured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryLevelSpec {
    pub name: String,
    /// Peak bandwidth in GB/s.
    pub peak: f64,
    /// Measured bandwidth in GB/s, if this level was measured.
    #[serde(default)]
    pub measured: Option<f64>,
}

/// One declared compute type: peak throughput plus optional measured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeRoofSpec {
    pub name: String,
    /// Peak throughput in GFLOP/s.
    pub peak: f64,
    /// Individually measured GFLOP/s, if available.
    #[serde(default)]
    pub measured: Option<f64>,
}

/// A measured value that aggregates several compute types because the
/// hardware counter could not separate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedGroup {
    /// Compute type names covered by this counter.
    pub members: Vec<String>,
    /// Aggregate achieved GFLOP/s, assigned to every member.
    pub measured_flops: f64,
}

/// Raw specification for one roofline build request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RooflineSpec {
    #[serde(default)]
    pub memory: Vec<MemoryLevelSpec>,
    #[serde(default)]
    pub compute: Vec<ComputeRoofSpec>,
    /// Single aggregate figure applied to every compute type that lacks an
    /// individual measurement. Mutually exclusive with `combined_groups`.
    #[serde(default)]
    pub combined_flops: Option<f64>,
    #[serde(default)]
    pub combined_groups: Vec<CombinedGroup>,
    pub num_cores: usize,
    #[serde(default)]
    pub topology: String,
    #[serde(default)]
    pub cpu_name: String,
    #[serde(default)]
    pub app_name: String,
}

impl RooflineSpec {
    pub fn new(app_name: &str, cpu_name: &str) -> Self {
        Self {
            memory: Vec::new(),
            compute: Vec::new(),
            combined_flops: None,
            combined_groups: Vec::new(),
            num_cores: 1,
            topology: String::new(),
            cpu_name: cpu_name.to_string(),
            app_name: app_name.to_string(),
        }
    }

    pub fn num_cores(mut self, num_cores: usize) -> Self {
        self.num_cores = num_cores;
        self
    }

    pub fn topology(mut self, topology: &str) -> Self {
        self.topology = topology.to_string();
        self
    }

    /// Declare a memory level. Call order defines hierarchy order,
    /// outermost first.
    pub fn memory(mut self, name: &str, peak: f64, measured: Option<f64>) -> Self {
        self.memory.push(MemoryLevelSpec {
            name: name.to_string(),
            peak,
            measured,
        });
        self
    }

    /// Declare a compute type, optionally with an individual measurement.
    pub fn compute(mut self, name: &str, peak: f64, measured: Option<f64>) -> Self {
        self.compute.push(ComputeRoofSpec {
            name: name.to_string(),
            peak,
            measured,
        });
        self
    }

    /// Supply one aggregate measurement covering all unmeasured compute types.
    pub fn combined_flops(mut self, flops: f64) -> Self {
        self.combined_flops = Some(flops);
        self
    }

    /// Supply an aggregate measurement covering a specific group of compute
    /// types.
    pub fn combined_group(mut self, members: &[&str], measured_flops: f64) -> Self {
        self.combined_groups.push(CombinedGroup {
            members: members.iter().map(|m| m.to_string()).collect(),
            measured_flops,
        });
        self
    }
}

/// Table rendering format, passed through to the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Ascii,
    #[default]
    Markdown,
    Org,
    Csv,
}

/// Plot file format, passed through to the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    #[default]
    Png,
    Pdf,
    Svg,
}

/// Presentation options carried on the config, uninterpreted by the core.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Force simple-mode presentation even for hierarchical specs.
    #[serde(default)]
    pub force_simple: bool,
    #[serde(default)]
    pub table_format: TableFormat,
    #[serde(default)]
    pub plot_format: PlotFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_declaration_order() {
        let spec = RooflineSpec::new("app", "cpu")
            .memory("DRAM", 96.42, Some(21.89))
            .memory("L3", 480.0, Some(125.0))
            .memory("L2", 1312.0, Some(185.0))
            .memory("L1", 3200.0, Some(890.0))
            .compute("DP", 1404.9, Some(720.0))
            .compute("SP", 2809.0, Some(1440.0));

        let names: Vec<&str> = spec.memory.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["DRAM", "L3", "L2", "L1"]);
        assert_eq!(spec.compute[0].name, "DP");
        assert_eq!(spec.compute[1].name, "SP");
    }

    #[test]
    fn test_spec_from_json() {
        let json = r#"{
            "memory": [
                {"name": "DRAM", "peak": 204.8, "measured": 180.5}
            ],
            "compute": [
                {"name": "DP", "peak": 2150.4, "measured": 1245.2}
            ],
            "num_cores": 64,
            "topology": "Dual Socket",
            "cpu_name": "AMD EPYC 7713",
            "app_name": "Test App"
        }"#;
        let spec: RooflineSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.memory.len(), 1);
        assert_eq!(spec.memory[0].measured, Some(180.5));
        assert_eq!(spec.num_cores, 64);
        assert!(spec.combined_flops.is_none());
        assert!(spec.combined_groups.is_empty());
    }

    #[test]
    fn test_output_options_defaults() {
        let opts = OutputOptions::default();
        assert!(!opts.force_simple);
        assert_eq!(opts.table_format, TableFormat::Markdown);
        assert_eq!(opts.plot_format, PlotFormat::Png);
    }

    #[test]
    fn test_format_serde_lowercase() {
        let json = serde_json::to_string(&TableFormat::Org).unwrap();
        assert_eq!(json, "\"org\"");
        let parsed: PlotFormat = serde_json::from_str("\"svg\"").unwrap();
        assert_eq!(parsed, PlotFormat::Svg);
    }
}
