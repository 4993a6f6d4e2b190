//! RoofScope developer toolkit: CLI entry points.

pub mod cli;

pub use cli::{run_cli, sample_spec, Cli};
