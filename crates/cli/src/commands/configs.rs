use anyhow::{Context, Result};
use popsimu_sim::storage::write_config_set;
use popsimu_sim::sweep::ParameterSet;

use crate::args::ConfigsArgs;
use crate::printing::print_parameter_set;

pub fn create_configs(args: &ConfigsArgs) -> Result<()> {
    println!("🧬 popsimu - Generating Configurations");
    println!("======================================\n");

    let sets = ParameterSet::load_all(&args.input)
        .with_context(|| format!("Failed to load parameters from {}", args.input.display()))?;

    let mut configs = Vec::new();
    for (index, set) in sets.iter().enumerate() {
        print_parameter_set((sets.len() > 1).then_some(index), set);
        let expanded = set
            .expand_replicated(args.replicates)
            .with_context(|| format!("Invalid parameter block {index}"))?;
        configs.extend(expanded);
    }

    write_config_set(&args.output, &configs)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "\n✓ Wrote {} configuration(s) ({} block(s) × {} replicate(s)) to {}",
        configs.len(),
        sets.len(),
        args.replicates,
        args.output.display()
    );
    Ok(())
}
