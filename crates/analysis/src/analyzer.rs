//! Bottleneck classification.
//!
//! The model carries no byte counts, so arithmetic intensity cannot be
//! computed directly. Instead each resource is compared against its own
//! peak: the resource running furthest below peak, relative to peak, is the
//! one most likely limiting achieved performance.

use crate::error::AnalysisError;
use crate::report::{AnalysisReport, MeasurementVerdict, OverallVerdict, Resource};
use roofscope_model::{MemoryLevel, RooflineConfig};
use tracing::debug;

/// Classify every measurement of a config and derive the overall verdict.
///
/// Tie rules: memory levels beat compute on exact ties, and among tied
/// memory levels the innermost (closest to the processor, last declared)
/// wins, since cache-level bottlenecks are the more actionable diagnosis.
pub fn analyze(config: &RooflineConfig) -> Result<AnalysisReport, AnalysisError> {
    if config.measurements.is_empty() {
        return Err(AnalysisError::NoMeasurements);
    }

    // Innermost-first scan so exact ties keep the level closest to the
    // processor. Levels without measured bandwidth carry no evidence.
    let best_memory: Option<(&MemoryLevel, f64)> = {
        let mut best = None;
        for level in config.memory_levels.iter().rev() {
            let Some(ratio) = level.ratio() else { continue };
            match best {
                Some((_, best_ratio)) if ratio >= best_ratio => {}
                _ => best = Some((level, ratio)),
            }
        }
        best
    };

    let mut verdicts = Vec::with_capacity(config.measurements.len());
    for measurement in &config.measurements {
        let roof = config
            .compute_roof(&measurement.compute_name)
            .ok_or_else(|| AnalysisError::UnknownCompute(measurement.compute_name.clone()))?;
        let compute_ratio = measurement.flops / roof.peak_flops;

        let verdict = match best_memory {
            // Compute wins only when strictly lower; memory takes ties.
            Some((_, memory_ratio)) if compute_ratio < memory_ratio => MeasurementVerdict {
                compute_name: roof.name.clone(),
                flops: measurement.flops,
                bottleneck: Resource::Compute(roof.name.clone()),
                ratio: compute_ratio,
                low_confidence: false,
                summary: format!(
                    "{}: compute-bound ({:.1}% of peak {} throughput)",
                    roof.name,
                    compute_ratio * 100.0,
                    roof.name
                ),
            },
            Some((level, memory_ratio)) => MeasurementVerdict {
                compute_name: roof.name.clone(),
                flops: measurement.flops,
                bottleneck: Resource::Memory(level.name.clone()),
                ratio: memory_ratio,
                low_confidence: false,
                summary: format!(
                    "{}: memory-bound at {} ({:.1}% of peak bandwidth)",
                    roof.name,
                    level.name,
                    memory_ratio * 100.0
                ),
            },
            None => MeasurementVerdict {
                compute_name: roof.name.clone(),
                flops: measurement.flops,
                bottleneck: Resource::Compute(roof.name.clone()),
                ratio: compute_ratio,
                low_confidence: true,
                summary: format!(
                    "{}: compute-bound ({:.1}% of peak {} throughput) [no memory measurements]",
                    roof.name,
                    compute_ratio * 100.0,
                    roof.name
                ),
            },
        };
        debug!(
            compute = %verdict.compute_name,
            bottleneck = %verdict.bottleneck,
            ratio = verdict.ratio,
            "classified measurement"
        );
        verdicts.push(verdict);
    }

    let overall = overall_verdict(config, &verdicts, best_memory);

    Ok(AnalysisReport {
        app_name: config.app_name.clone(),
        cpu_name: config.cpu_name.clone(),
        verdicts,
        overall,
    })
}

/// Globally lowest ratio across all measurements and memory levels, with the
/// same memory-over-compute tie rule as per-measurement classification.
fn overall_verdict(
    config: &RooflineConfig,
    verdicts: &[MeasurementVerdict],
    best_memory: Option<(&MemoryLevel, f64)>,
) -> OverallVerdict {
    let best_compute = verdicts
        .iter()
        .filter_map(|v| {
            // Recompute rather than reuse v.ratio: a memory-bound verdict
            // carries the memory ratio, not the compute ratio.
            let roof = config.compute_roof(&v.compute_name)?;
            Some((v.compute_name.clone(), v.flops / roof.peak_flops))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let (bottleneck, ratio, low_confidence) = match (best_memory, best_compute) {
        (Some((level, memory_ratio)), Some((compute_name, compute_ratio))) => {
            if compute_ratio < memory_ratio {
                (Resource::Compute(compute_name), compute_ratio, false)
            } else {
                (Resource::Memory(level.name.clone()), memory_ratio, false)
            }
        }
        (None, Some((compute_name, compute_ratio))) => {
            (Resource::Compute(compute_name), compute_ratio, true)
        }
        // Unreachable in practice: analyze() requires measurements, so a
        // compute candidate always exists.
        (Some((level, memory_ratio)), None) => {
            (Resource::Memory(level.name.clone()), memory_ratio, false)
        }
        (None, None) => (Resource::Compute(String::new()), 0.0, true),
    };

    let bound = if bottleneck.is_memory() {
        "memory-bound"
    } else {
        "compute-bound"
    };
    let mut summary = format!(
        "{} is {} at {} ({:.1}% of peak)",
        config.app_name,
        bound,
        bottleneck.name(),
        ratio * 100.0
    );
    if low_confidence {
        summary.push_str(" [no memory measurements]");
    }

    OverallVerdict {
        bottleneck,
        ratio,
        summary,
    }
}
