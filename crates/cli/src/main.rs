mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use popsimu_sim::sweep::default_threads;

use args::{ConfigsArgs, RunArgs, SimulateArgs};
use commands::{configs, run, simulate};

/// popsimu: Moran-model simulator of sequence populations
///
/// Evolves populations of fixed-length sequences under point mutation and
/// fragment transfer, and measures their pairwise diversity over time.
#[derive(Parser, Debug)]
#[command(name = "popsimu")]
#[command(author, version, about = "Simulates sequence diversity under mutation and transfer", long_about = None)]
struct Cli {
    /// Number of worker threads
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 'j', long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Expand a parameter block into a configuration array.
    ///
    /// Every configuration runs for 10·size² generations.
    Configs(ConfigsArgs),

    /// Sweep the parameter sets of a config file.
    ///
    /// One block yields one job per combination; several blocks yield one
    /// two-population job per pair of blocks.
    Simulate(SimulateArgs),

    /// Run every configuration of an array written by `configs`.
    Run(RunArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }
    let threads = cli.threads.unwrap_or_else(default_threads);

    match cli.command {
        Commands::Configs(args) => configs::create_configs(&args),
        Commands::Simulate(args) => simulate::simulate(&args, threads),
        Commands::Run(args) => run::run_configs(&args, threads),
    }
}
