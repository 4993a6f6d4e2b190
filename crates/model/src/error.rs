//! Error types for specification validation.

use crate::config::ResourceKind;
use thiserror::Error;

/// Errors produced while validating a roofline specification.
///
/// All variants are deterministic functions of the input data; callers must
/// correct the specification and rebuild rather than retry.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("specification declares no memory levels")]
    EmptyMemory,

    #[error("specification declares no compute types")]
    EmptyCompute,

    #[error("duplicate {kind} name: {name}")]
    DuplicateName { kind: ResourceKind, name: String },

    #[error("{kind} {name} has non-positive peak value {value}")]
    NonPositivePeak {
        kind: ResourceKind,
        name: String,
        value: f64,
    },

    #[error("{kind} {name} has invalid measured value {value}")]
    InvalidMeasured {
        kind: ResourceKind,
        name: String,
        value: f64,
    },

    #[error("measurement references unknown compute type: {0}")]
    UnknownCompute(String),

    #[error("combined_flops and combined_groups cannot be used in the same specification")]
    ConflictingCombined,

    #[error("num_cores must be a positive integer")]
    InvalidNumCores,
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, SpecError>;
