use anyhow::{Context, Result};
use log::info;
use popsimu_sim::storage::read_config_set;
use popsimu_sim::sweep::jobs_from_configs;

use super::execute;
use crate::args::RunArgs;
use crate::printing::{print_config_overview, print_summary};

pub fn run_configs(args: &RunArgs, threads: usize) -> Result<()> {
    println!("🧬 popsimu - Running Configurations");
    println!("===================================\n");

    let configs = read_config_set(&args.configs)
        .with_context(|| format!("Failed to read configurations from {}", args.configs.display()))?;
    print_config_overview(&configs);

    let jobs = jobs_from_configs(configs);
    let settings = args.execution.settings(threads);

    info!("Running {} configuration(s) from {}", jobs.len(), args.configs.display());
    let stats = execute(jobs, &settings, &args.output, !args.execution.no_progress)?;
    print_summary(&stats, &args.output);
    Ok(())
}
