//! cnp-ternary CLI - C:N:P normalization, ternary projection and drift

use clap::{Parser, Subcommand};
use cnp_ternary::{ReferenceRatio, TernaryPoint};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use output::OutputFormat;

/// C:N:P stoichiometry normalization and drift tool.
#[derive(Parser)]
#[command(name = "cnp-ternary")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize C, N, P concentrations (mg/l) to percentage shares
    Normalize {
        /// Carbon concentrations, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        carbon: Vec<f64>,

        /// Nitrogen concentrations, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        nitrogen: Vec<f64>,

        /// Phosphorus concentrations, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        phosphorus: Vec<f64>,

        /// Reference ratio: redfield, godwin-cotner or C:N:P
        #[arg(long, default_value = "redfield")]
        ratio: ReferenceRatio,

        /// Also print the projected x, y coordinates
        #[arg(long)]
        project: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Project ternary points (a,b,c) to Cartesian coordinates
    Project {
        /// Point as a,b,c (repeatable)
        #[arg(long = "point", required = true, allow_hyphen_values = true)]
        points: Vec<TernaryPoint>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Cyclic perimeter of an ordered sequence of ternary points
    Perimeter {
        /// Point as a,b,c (repeatable, in cycle order)
        #[arg(long = "point", required = true, allow_hyphen_values = true)]
        points: Vec<TernaryPoint>,

        /// Show every edge of the closed polygon
        #[arg(long)]
        edges: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the named reference ratios
    Ratios,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Normalize { carbon, nitrogen, phosphorus, ratio, project, format } => {
            commands::normalize::run(&carbon, &nitrogen, &phosphorus, &ratio, project, format)
        }
        Commands::Project { points, format } => commands::project::run(&points, format),
        Commands::Perimeter { points, edges, format } => {
            commands::perimeter::run(&points, edges, format)
        }
        Commands::Ratios => commands::ratios::run(),
    }
}
