//! Measurement resolution: reconciling individual and combined counter data.
//!
//! Three mutually-exclusive-by-precedence sources feed the final measurement
//! list: individually measured compute types, a single `combined_flops`
//! scalar, or explicit combined groups. At most one aggregate mechanism may
//! be active per build request.

use crate::config::Measurement;
use crate::error::SpecError;
use crate::spec::{CombinedGroup, RooflineSpec};

/// The aggregate measurement mechanism in effect for one build request.
enum CombinedSource<'a> {
    None,
    Scalar(f64),
    Groups(&'a [CombinedGroup]),
}

fn combined_source(spec: &RooflineSpec) -> Result<CombinedSource<'_>, SpecError> {
    match (spec.combined_flops, spec.combined_groups.is_empty()) {
        (Some(_), false) => Err(SpecError::ConflictingCombined),
        (Some(flops), true) => Ok(CombinedSource::Scalar(flops)),
        (None, false) => Ok(CombinedSource::Groups(&spec.combined_groups)),
        (None, true) => Ok(CombinedSource::None),
    }
}

/// Produce the flat, ordered measurement list for a specification.
///
/// Individually measured compute types come first, in declaration order;
/// combined-assigned measurements follow. A combined scalar is assigned
/// verbatim to every unmeasured compute type (hardware counters that cannot
/// distinguish operation types report one figure for all of them, not a
/// split). Pure function of the spec; no validation of peaks happens here.
pub fn resolve_measurements(spec: &RooflineSpec) -> Result<Vec<Measurement>, SpecError> {
    let source = combined_source(spec)?;

    let mut measurements = Vec::with_capacity(spec.compute.len());
    for roof in &spec.compute {
        if let Some(flops) = roof.measured {
            measurements.push(Measurement {
                compute_name: roof.name.clone(),
                flops,
            });
        }
    }

    match source {
        CombinedSource::None => {}
        CombinedSource::Scalar(flops) => {
            for roof in spec.compute.iter().filter(|r| r.measured.is_none()) {
                measurements.push(Measurement {
                    compute_name: roof.name.clone(),
                    flops,
                });
            }
        }
        CombinedSource::Groups(groups) => {
            for group in groups {
                for member in &group.members {
                    let roof = spec
                        .compute
                        .iter()
                        .find(|r| r.name == *member)
                        .ok_or_else(|| SpecError::UnknownCompute(member.clone()))?;
                    // An individual measurement takes precedence over the
                    // group figure for the same compute type.
                    if roof.measured.is_some() {
                        continue;
                    }
                    measurements.push(Measurement {
                        compute_name: member.clone(),
                        flops: group.measured_flops,
                    });
                }
            }
        }
    }

    Ok(measurements)
}
