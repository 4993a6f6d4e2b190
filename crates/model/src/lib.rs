//! Roofline model construction for RoofScope.
//!
//! Turns a caller-supplied set of named memory levels and compute types,
//! possibly with combined (aggregated) measurements, into a validated,
//! immutable [`RooflineConfig`].
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────┐     ┌────────────────────┐     ┌──────────────────┐
//! │  RooflineSpec    │────▶│  resolve + build   │────▶│  RooflineConfig  │
//! │  (raw, mutable)  │     │  (validation pass) │     │  (read-only)     │
//! └──────────────────┘     └────────────────────┘     └──────────────────┘
//! ```
//!
//! # Key Components
//!
//! - [`spec::RooflineSpec`]: raw specification with chained builder methods
//! - [`resolve::resolve_measurements`]: reconciles individual and combined
//!   counter data into one flat measurement list
//! - [`builder::build_config`]: fail-fast validation and assembly
//! - [`config::RooflineConfig`]: the assembled model, never mutated after
//!   construction

pub mod builder;
pub mod config;
pub mod error;
pub mod resolve;
pub mod spec;

pub use builder::{build_config, OVER_PEAK_TOLERANCE};
pub use config::{
    AnomalyWarning, ComputeRoof, Measurement, MemoryLevel, ResourceKind, RooflineConfig,
};
pub use error::SpecError;
pub use resolve::resolve_measurements;
pub use spec::{
    CombinedGroup, ComputeRoofSpec, MemoryLevelSpec, OutputOptions, PlotFormat, RooflineSpec,
    TableFormat,
};
