//! Bottleneck analysis for assembled roofline configs.
//!
//! Consumes the immutable `RooflineConfig` produced by `roofscope-model` and
//! determines, per measurement and overall, whether achieved performance is
//! bound by a memory level or by compute throughput. Also exposes the
//! roofline ceiling geometry an external renderer needs to draw the plot.
//!
//! # Key Components
//!
//! - [`analyzer::analyze`]: per-measurement and overall classification
//! - [`report::AnalysisReport`]: structured verdicts with JSON save/load
//! - [`geometry::ceilings`]: ridge points and attainable-performance curves

pub mod analyzer;
pub mod error;
pub mod geometry;
pub mod report;

pub use analyzer::analyze;
pub use error::AnalysisError;
pub use geometry::{ceilings, Ceiling};
pub use report::{AnalysisReport, MeasurementVerdict, OverallVerdict, Resource};
