use anyhow::{Context, Result};
use log::info;
use popsimu_sim::sweep::{build_jobs, ParameterSet};

use super::execute;
use crate::args::SimulateArgs;
use crate::printing::{print_parameter_set, print_plan, print_summary};

pub fn simulate(args: &SimulateArgs, threads: usize) -> Result<()> {
    println!("🧬 popsimu - Parameter Sweep");
    println!("============================\n");

    let config_path = args.config_path();
    let sets = ParameterSet::load_all(&config_path)
        .with_context(|| format!("Failed to load parameters from {}", config_path.display()))?;
    for (index, set) in sets.iter().enumerate() {
        print_parameter_set(Some(index), set);
    }

    let plan = args.plan();
    let jobs = build_jobs(&sets, plan).context("Invalid parameter sets")?;
    let settings = args.execution.settings(threads);
    let output = args.output_path();
    print_plan(&plan, &settings, jobs.len(), &output);

    info!("Sweeping {} job(s) from {}", jobs.len(), config_path.display());
    let stats = execute(jobs, &settings, &output, !args.execution.no_progress)?;
    print_summary(&stats, &output);
    Ok(())
}
