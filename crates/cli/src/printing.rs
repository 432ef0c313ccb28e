use popsimu_sim::simulation::Config;
use popsimu_sim::storage::RecorderStats;
use popsimu_sim::sweep::{GenerationPlan, ParameterSet, RunSettings};
use std::path::Path;

pub fn print_parameter_set(index: Option<usize>, set: &ParameterSet) {
    match index {
        Some(i) => println!("\n📋 Parameter Set {i}"),
        None => println!("\n📋 Parameter Set"),
    }
    for line in set.to_string().lines() {
        println!("  • {line}");
    }
    println!("  • Combinations: {}", set.combinations());
}

pub fn print_plan(plan: &GenerationPlan, settings: &RunSettings, jobs: usize, output: &Path) {
    println!("\n⚙️  Execution");
    println!("  • Jobs: {jobs}");
    println!("  • Replicates: {} [-n, --num-rep]", plan.replicates);
    println!(
        "  • Generations: {} [-s, --gen-step] × {} [-t, --gen-time] = {}",
        plan.gen_step,
        plan.gen_time,
        plan.generations()
    );
    print_settings(settings);
    println!("  • Output: {}", output.display());
}

pub fn print_config_overview(configs: &[Config]) {
    let total_gen: usize = configs.iter().map(Config::num_gen).sum();
    println!("\n📋 Configurations");
    println!("  • Count: {}", configs.len());
    println!("  • Total Generations: {total_gen}");
    if let (Some(min), Some(max)) = (
        configs.iter().map(Config::size).min(),
        configs.iter().map(Config::size).max(),
    ) {
        println!("  • Population Sizes: {min}..={max}");
    }
}

fn print_settings(settings: &RunSettings) {
    println!("  • Threads: {} [-j, --threads]", settings.threads);
    match settings.seed {
        Some(seed) => println!("  • Random Seed: {seed} [--seed]"),
        None => println!("  • Random Seed: Random [--seed]"),
    }
    println!(
        "  • Max Pairs per Measurement: {} [--max-pairs]",
        settings.sampling.max_pairs
    );
}

pub fn print_summary(stats: &RecorderStats, output: &Path) {
    println!("\n✓ Simulation complete!");
    println!("  • Results: {}", stats.records_written);
    println!("  • Bytes Written: {}", stats.bytes_written);
    println!("  • Output: {}", output.display());
}
