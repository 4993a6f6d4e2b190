//! Error types for bottleneck analysis.

use thiserror::Error;

/// Errors produced while analyzing a roofline config.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The config carries no measurements; there is nothing to classify.
    #[error("configuration has no measurements to analyze")]
    NoMeasurements,

    /// A measurement references a compute roof the config does not declare.
    /// The builder guarantees this cannot happen for configs it produced.
    #[error("measurement references unknown compute type: {0}")]
    UnknownCompute(String),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, AnalysisError>;
