mod generate;
mod inspect;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use data_sandbox::writer::AppendMode;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "data-sandbox")]
#[command(version)]
#[command(
    about = "Generate synthetic cost center, employee and working time datasets as Parquet files",
    long_about = None
)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate datasets into an output directory
    Generate {
        /// Output directory (created if missing)
        output_dir: PathBuf,

        /// Base row count (cost centers) [default: 1000]
        #[arg(short = 'n', long)]
        num_rows: Option<u64>,

        /// Random seed [default: 42]
        #[arg(short, long)]
        seed: Option<u64>,

        /// Rows per batch [default: 1000000]
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Employee rows per base row [default: 50]
        #[arg(long)]
        worker_multiplier: Option<u64>,

        /// Working time rows per base row [default: 1000]
        #[arg(long)]
        time_multiplier: Option<u64>,

        /// Only generate specific datasets (comma-separated: cost_centers, employees, working_time)
        #[arg(short, long)]
        datasets: Option<String>,

        /// How batches after the first are written: rewrite, stream [default: rewrite]
        #[arg(long)]
        append_mode: Option<AppendMode>,

        /// YAML config file with defaults and per-dataset settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show the plan without writing files
        #[arg(long)]
        dry_run: bool,

        /// Show progress bars while writing
        #[arg(short, long)]
        progress: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show rows, column types and distinct value counts of a generated file
    Inspect {
        /// Parquet file to inspect
        file: PathBuf,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            output_dir,
            num_rows,
            seed,
            batch_size,
            worker_multiplier,
            time_multiplier,
            datasets,
            append_mode,
            config,
            dry_run,
            progress,
            json,
        } => generate::run(generate::GenerateArgs {
            output_dir,
            num_rows,
            seed,
            batch_size,
            worker_multiplier,
            time_multiplier,
            datasets,
            append_mode,
            config,
            dry_run,
            progress,
            json,
        }),
        Commands::Inspect { file, json } => inspect::run(file, json),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "data-sandbox",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
