//! motion-bench CLI
//!
//! - `motion-bench analyze <files..>` - Throughput table over result documents
//! - `motion-bench sample poses` - Print random poses
//! - `motion-bench sample configs` - Print random joint configurations

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use motion_bench::analysis::summarize_file;
use motion_bench::output::{json, terminal, yaml};
use motion_bench::{AxisBounds, Error, RandomSampler, Result};

/// Benchmark tooling for collision checking and kinematics
#[derive(Parser)]
#[command(name = "motion-bench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare throughput of result documents
    Analyze {
        /// Result files (YAML or JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Generate benchmark inputs
    #[command(subcommand)]
    Sample(SampleCommand),
}

#[derive(Subcommand)]
enum SampleCommand {
    /// Uniform random poses inside an axis-aligned box
    Poses {
        #[command(flatten)]
        common: SampleArgs,

        /// Sample from the cube [0, extent]^3
        #[arg(long, default_value_t = 2.0, conflicts_with = "bounds")]
        extent: f64,

        /// Explicit box as xmin,xmax,ymin,ymax,zmin,zmax
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        bounds: Option<Vec<f64>>,
    },

    /// Uniform random joint configurations
    Configs {
        #[command(flatten)]
        common: SampleArgs,

        /// Lower joint limits, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        lower: Vec<f64>,

        /// Upper joint limits, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        upper: Vec<f64>,
    },
}

#[derive(Args)]
struct SampleArgs {
    /// Number of samples
    #[arg(short, long, default_value_t = 10)]
    count: usize,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print JSON instead of YAML
    #[arg(long)]
    json: bool,
}

impl SampleArgs {
    fn sampler(&self) -> RandomSampler {
        match self.seed {
            Some(seed) => RandomSampler::with_seed(seed),
            None => RandomSampler::new(),
        }
    }

    fn print<T: Serialize>(&self, values: &T) -> Result<()> {
        let text = if self.json {
            json::to_json_pretty(values)?
        } else {
            yaml::to_yaml(values)?
        };
        println!("{}", text.trim_end());
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Analyze { files } => {
            let summaries = files
                .iter()
                .map(|path| summarize_file(path))
                .collect::<Result<Vec<_>>>()?;
            print!("{}", terminal::format_comparison(&summaries));
        }
        Commands::Sample(SampleCommand::Poses {
            common,
            extent,
            bounds,
        }) => {
            let bounds = match bounds.as_deref() {
                Some(&[xmin, xmax, ymin, ymax, zmin, zmax]) => {
                    AxisBounds::new(xmin, xmax, ymin, ymax, zmin, zmax)
                }
                Some(values) => {
                    return Err(Error::InvalidBounds(format!(
                        "--bounds needs 6 values, got {}",
                        values.len()
                    )))
                }
                None => AxisBounds::cube(extent),
            };
            let poses = common.sampler().generate_poses(common.count, &bounds)?;
            common.print(&poses)?;
        }
        Commands::Sample(SampleCommand::Configs {
            common,
            lower,
            upper,
        }) => {
            let configs = common
                .sampler()
                .generate_joint_configurations(common.count, &lower, &upper)?;
            common.print(&configs)?;
        }
    }
    Ok(())
}
