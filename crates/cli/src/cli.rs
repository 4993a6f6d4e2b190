//! CLI wiring for the RoofScope toolkit.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roofscope_analysis::analyze;
use roofscope_model::{build_config, OutputOptions, PlotFormat, RooflineSpec, TableFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "roofscope", about = "Roofline model construction and bottleneck analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum TableFormatArg {
    Ascii,
    Markdown,
    Org,
    Csv,
}

impl From<TableFormatArg> for TableFormat {
    fn from(value: TableFormatArg) -> TableFormat {
        match value {
            TableFormatArg::Ascii => TableFormat::Ascii,
            TableFormatArg::Markdown => TableFormat::Markdown,
            TableFormatArg::Org => TableFormat::Org,
            TableFormatArg::Csv => TableFormat::Csv,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum PlotFormatArg {
    Png,
    Pdf,
    Svg,
}

impl From<PlotFormatArg> for PlotFormat {
    fn from(value: PlotFormatArg) -> PlotFormat {
        match value {
            PlotFormatArg::Png => PlotFormat::Png,
            PlotFormatArg::Pdf => PlotFormat::Pdf,
            PlotFormatArg::Svg => PlotFormat::Svg,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the model from a JSON specification and classify bottlenecks.
    Analyze {
        #[arg(long)]
        spec: PathBuf,
        /// Write the analysis report as JSON.
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "markdown")]
        table_format: TableFormatArg,
        #[arg(long, value_enum, default_value = "png")]
        plot_format: PlotFormatArg,
        #[arg(long, default_value_t = false)]
        force_simple: bool,
    },
    /// Validate a JSON specification without running the analysis.
    Validate {
        #[arg(long)]
        spec: PathBuf,
        #[arg(long, default_value_t = false)]
        force_simple: bool,
    },
    /// Print a sample specification to stdout.
    Sample,
}

pub fn run_cli(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    match cli.command {
        Command::Analyze {
            spec,
            output,
            table_format,
            plot_format,
            force_simple,
        } => {
            let spec = load_spec(&spec)?;
            let opts = OutputOptions {
                force_simple,
                table_format: table_format.into(),
                plot_format: plot_format.into(),
            };
            let config = build_config(&spec, &opts)?;
            info!(
                memory_levels = config.memory_levels.len(),
                compute_roofs = config.compute_roofs.len(),
                measurements = config.measurements.len(),
                simple_mode = config.simple_mode,
                "roofline config assembled"
            );
            for warning in &config.warnings {
                eprintln!("warning: {}", warning);
            }

            let report = analyze(&config)?;
            println!(
                "{} on {} ({} cores, {})",
                config.app_name, config.cpu_name, config.num_cores, config.topology
            );
            for verdict in &report.verdicts {
                println!("- {}", verdict.summary);
            }
            println!("{}", report.overall.summary);

            if let Some(path) = output {
                report.save(&path)?;
                info!(path = %path.display(), "analysis report written");
            }
        }
        Command::Validate { spec, force_simple } => {
            let spec = load_spec(&spec)?;
            let opts = OutputOptions {
                force_simple,
                ..OutputOptions::default()
            };
            let config = build_config(&spec, &opts)?;
            println!(
                "valid: {} memory level(s), {} compute type(s), {} measurement(s), {} mode",
                config.memory_levels.len(),
                config.compute_roofs.len(),
                config.measurements.len(),
                if config.simple_mode {
                    "simple"
                } else {
                    "hierarchical"
                }
            );
            for warning in &config.warnings {
                println!("warning: {}", warning);
            }
        }
        Command::Sample => {
            println!("{}", serde_json::to_string_pretty(&sample_spec())?);
        }
    }
    Ok(())
}

fn load_spec(path: &Path) -> Result<RooflineSpec> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    let spec = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse spec file {}", path.display()))?;
    Ok(spec)
}

/// The dual-socket EPYC reference specification.
pub fn sample_spec() -> RooflineSpec {
    RooflineSpec::new("My Application", "AMD EPYC 7713")
        .num_cores(64)
        .topology("Dual Socket")
        .memory("DRAM", 204.8, Some(180.5))
        .compute("DP", 2150.4, Some(1245.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_spec_roundtrips_through_json() {
        let json = serde_json::to_string_pretty(&sample_spec()).unwrap();
        let parsed: RooflineSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_spec());
    }

    #[test]
    fn test_format_arg_conversions() {
        assert_eq!(TableFormat::from(TableFormatArg::Csv), TableFormat::Csv);
        assert_eq!(PlotFormat::from(PlotFormatArg::Pdf), PlotFormat::Pdf);
    }

    #[test]
    fn test_cli_parses_analyze_command() {
        let cli = Cli::try_parse_from([
            "roofscope",
            "analyze",
            "--spec",
            "spec.json",
            "--table-format",
            "csv",
            "--force-simple",
        ])
        .unwrap();
        match cli.command {
            Command::Analyze {
                spec, force_simple, ..
            } => {
                assert_eq!(spec, PathBuf::from("spec.json"));
                assert!(force_simple);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
