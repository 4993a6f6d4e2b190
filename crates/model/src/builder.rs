//! Validation and assembly of the immutable [`RooflineConfig`].

use crate::config::{
    AnomalyWarning, ComputeRoof, Measurement, MemoryLevel, ResourceKind, RooflineConfig,
};
use crate::error::SpecError;
use crate::resolve::resolve_measurements;
use crate::spec::{OutputOptions, RooflineSpec};
use tracing::{debug, warn};

/// Measured values may exceed their nominal peak by this factor before being
/// flagged as anomalous. Hardware counters can report above-nominal figures
/// on some platforms, so the check warns instead of failing.
pub const OVER_PEAK_TOLERANCE: f64 = 1.05;

/// Validate a raw specification and assemble the read-only config.
///
/// Fail-fast: the first validation error aborts the build and no partially
/// valid config is ever returned. Over-peak measurements are the one
/// exception, collected as [`AnomalyWarning`]s on the config.
pub fn build_config(
    spec: &RooflineSpec,
    opts: &OutputOptions,
) -> Result<RooflineConfig, SpecError> {
    if spec.memory.is_empty() {
        return Err(SpecError::EmptyMemory);
    }
    if spec.compute.is_empty() {
        return Err(SpecError::EmptyCompute);
    }
    if spec.num_cores == 0 {
        return Err(SpecError::InvalidNumCores);
    }

    check_unique(
        ResourceKind::Memory,
        spec.memory.iter().map(|l| l.name.as_str()),
    )?;
    check_unique(
        ResourceKind::Compute,
        spec.compute.iter().map(|r| r.name.as_str()),
    )?;

    let mut warnings = Vec::new();

    for level in &spec.memory {
        check_peak(ResourceKind::Memory, &level.name, level.peak)?;
        if let Some(measured) = level.measured {
            check_measured(ResourceKind::Memory, &level.name, measured)?;
            note_over_peak(
                ResourceKind::Memory,
                &level.name,
                measured,
                level.peak,
                &mut warnings,
            );
        }
    }

    for roof in &spec.compute {
        check_peak(ResourceKind::Compute, &roof.name, roof.peak)?;
        if let Some(measured) = roof.measured {
            check_measured(ResourceKind::Compute, &roof.name, measured)?;
        }
    }
    if let Some(flops) = spec.combined_flops {
        check_measured(ResourceKind::Compute, "combined_flops", flops)?;
    }
    for group in &spec.combined_groups {
        check_measured(
            ResourceKind::Compute,
            &group.members.join("+"),
            group.measured_flops,
        )?;
    }

    let measurements = resolve_measurements(spec)?;

    // Every resolved measurement must reference a declared compute roof, and
    // over-peak achieved figures are flagged against that roof's peak.
    for measurement in &measurements {
        let roof = spec
            .compute
            .iter()
            .find(|r| r.name == measurement.compute_name)
            .ok_or_else(|| SpecError::UnknownCompute(measurement.compute_name.clone()))?;
        note_over_peak(
            ResourceKind::Compute,
            &roof.name,
            measurement.flops,
            roof.peak,
            &mut warnings,
        );
    }

    let simple_mode = opts.force_simple || (spec.memory.len() == 1 && spec.compute.len() == 1);

    debug!(
        memory_levels = spec.memory.len(),
        compute_roofs = spec.compute.len(),
        measurements = measurements.len(),
        simple_mode,
        app = %spec.app_name,
        "assembled roofline config"
    );

    Ok(RooflineConfig {
        memory_levels: spec
            .memory
            .iter()
            .map(|l| MemoryLevel {
                name: l.name.clone(),
                peak_bandwidth: l.peak,
                measured_bandwidth: l.measured,
            })
            .collect(),
        compute_roofs: spec
            .compute
            .iter()
            .map(|r| ComputeRoof {
                name: r.name.clone(),
                peak_flops: r.peak,
            })
            .collect(),
        measurements,
        simple_mode,
        num_cores: spec.num_cores,
        topology: spec.topology.clone(),
        cpu_name: spec.cpu_name.clone(),
        app_name: spec.app_name.clone(),
        output: *opts,
        warnings,
    })
}

fn check_unique<'a>(
    kind: ResourceKind,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), SpecError> {
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if seen.contains(&name) {
            return Err(SpecError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
        seen.push(name);
    }
    Ok(())
}

fn check_peak(kind: ResourceKind, name: &str, value: f64) -> Result<(), SpecError> {
    // `!(value > 0.0)` also rejects NaN.
    if !(value > 0.0) || !value.is_finite() {
        return Err(SpecError::NonPositivePeak {
            kind,
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_measured(kind: ResourceKind, name: &str, value: f64) -> Result<(), SpecError> {
    if !(value >= 0.0) || !value.is_finite() {
        return Err(SpecError::InvalidMeasured {
            kind,
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

fn note_over_peak(
    kind: ResourceKind,
    name: &str,
    measured: f64,
    peak: f64,
    warnings: &mut Vec<AnomalyWarning>,
) {
    if measured > peak * OVER_PEAK_TOLERANCE {
        warn!(
            %kind,
            name,
            measured,
            peak,
            "measured value exceeds nominal peak beyond tolerance"
        );
        warnings.push(AnomalyWarning {
            kind,
            name: name.to_string(),
            measured,
            peak,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_spec() -> RooflineSpec {
        RooflineSpec::new("Test App", "AMD EPYC 7713")
            .num_cores(64)
            .topology("Dual Socket")
            .memory("DRAM", 204.8, Some(180.5))
            .compute("DP", 2150.4, Some(1245.2))
    }

    #[test]
    fn test_simple_mode_derived() {
        let config = build_config(&simple_spec(), &OutputOptions::default()).unwrap();
        assert!(config.simple_mode);
        assert_eq!(config.memory_levels.len(), 1);
        assert_eq!(config.compute_roofs.len(), 1);
        assert_eq!(config.measurements.len(), 1);
        assert_eq!(config.measurements[0].flops, 1245.2);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_hierarchical_mode_derived() {
        let spec = RooflineSpec::new("app", "cpu")
            .num_cores(24)
            .memory("DRAM", 96.42, Some(21.89))
            .memory("L2", 1312.0, Some(185.0))
            .compute("DP", 1404.9, None)
            .compute("SP", 2809.0, None)
            .combined_flops(720.0);
        let config = build_config(&spec, &OutputOptions::default()).unwrap();
        assert!(!config.simple_mode);
        assert_eq!(config.measurements.len(), 2);
        assert!(config.measurements.iter().all(|m| m.flops == 720.0));
    }

    #[test]
    fn test_force_simple_overrides_mode() {
        let spec = RooflineSpec::new("app", "cpu")
            .num_cores(24)
            .memory("DRAM", 96.42, Some(21.89))
            .memory("L2", 1312.0, Some(185.0))
            .compute("DP", 1404.9, Some(720.0));
        let opts = OutputOptions {
            force_simple: true,
            ..OutputOptions::default()
        };
        let config = build_config(&spec, &opts).unwrap();
        assert!(config.simple_mode);
    }

    #[test]
    fn test_empty_collections_rejected() {
        let no_memory = RooflineSpec::new("app", "cpu").compute("DP", 1.0, None);
        assert!(matches!(
            build_config(&no_memory, &OutputOptions::default()),
            Err(SpecError::EmptyMemory)
        ));

        let no_compute = RooflineSpec::new("app", "cpu").memory("DRAM", 1.0, None);
        assert!(matches!(
            build_config(&no_compute, &OutputOptions::default()),
            Err(SpecError::EmptyCompute)
        ));
    }

    #[test]
    fn test_non_positive_peak_rejected() {
        let spec = RooflineSpec::new("app", "cpu")
            .memory("DRAM", 0.0, None)
            .compute("DP", 2150.4, None);
        assert!(matches!(
            build_config(&spec, &OutputOptions::default()),
            Err(SpecError::NonPositivePeak { .. })
        ));
    }

    #[test]
    fn test_negative_measured_rejected() {
        let spec = RooflineSpec::new("app", "cpu")
            .memory("DRAM", 204.8, Some(-1.0))
            .compute("DP", 2150.4, None);
        assert!(matches!(
            build_config(&spec, &OutputOptions::default()),
            Err(SpecError::InvalidMeasured { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let spec = RooflineSpec::new("app", "cpu")
            .memory("DRAM", 204.8, None)
            .memory("DRAM", 96.42, None)
            .compute("DP", 2150.4, None);
        assert!(matches!(
            build_config(&spec, &OutputOptions::default()),
            Err(SpecError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_zero_cores_rejected() {
        let spec = simple_spec().num_cores(0);
        assert!(matches!(
            build_config(&spec, &OutputOptions::default()),
            Err(SpecError::InvalidNumCores)
        ));
    }

    #[test]
    fn test_over_peak_measurement_warns_not_fails() {
        let spec = RooflineSpec::new("app", "cpu")
            .num_cores(64)
            .memory("DRAM", 100.0, Some(120.0))
            .compute("DP", 2150.4, Some(1245.2));
        let config = build_config(&spec, &OutputOptions::default()).unwrap();
        assert_eq!(config.warnings.len(), 1);
        assert_eq!(config.warnings[0].name, "DRAM");
    }

    #[test]
    fn test_over_peak_within_tolerance_is_clean() {
        // 4% over peak stays inside the 5% tolerance.
        let spec = RooflineSpec::new("app", "cpu")
            .num_cores(64)
            .memory("DRAM", 100.0, Some(104.0))
            .compute("DP", 2150.4, Some(1245.2));
        let config = build_config(&spec, &OutputOptions::default()).unwrap();
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_metadata_carried_through() {
        let config = build_config(&simple_spec(), &OutputOptions::default()).unwrap();
        assert_eq!(config.num_cores, 64);
        assert_eq!(config.topology, "Dual Socket");
        assert_eq!(config.cpu_name, "AMD EPYC 7713");
        assert_eq!(config.app_name, "Test App");
    }

    #[test]
    fn test_level_order_matches_insertion() {
        let spec = RooflineSpec::new("app", "cpu")
            .num_cores(24)
            .memory("DRAM", 96.42, None)
            .memory("L3", 480.0, None)
            .memory("L2", 1312.0, None)
            .memory("L1", 3200.0, None)
            .compute("DP", 1404.9, Some(720.0));
        let config = build_config(&spec, &OutputOptions::default()).unwrap();
        let names: Vec<&str> = config
            .memory_levels
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["DRAM", "L3", "L2", "L1"]);
    }
}
