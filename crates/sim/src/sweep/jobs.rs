//! Jobs: the unit of work handed to one worker.

use super::parameters::ParameterSet;
use crate::errors::ConfigError;
use crate::simulation::Config;

/// How long to run a job and when to measure it.
///
/// Every replicate starts from a fresh ancestor, runs `gen_time` chunks of
/// `gen_step` generations, and is measured after each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPlan {
    pub replicates: usize,
    pub gen_step: usize,
    pub gen_time: usize,
}

impl GenerationPlan {
    pub fn new(replicates: usize, gen_step: usize, gen_time: usize) -> Self {
        Self {
            replicates,
            gen_step,
            gen_time,
        }
    }

    /// One replicate, run for `num_gen` generations, measured once at the end.
    pub fn single_shot(num_gen: usize) -> Self {
        Self::new(1, num_gen, 1)
    }

    /// Generations simulated per replicate.
    pub fn generations(&self) -> usize {
        self.gen_step * self.gen_time
    }
}

impl Default for GenerationPlan {
    fn default() -> Self {
        Self::new(10, 1000, 1)
    }
}

/// One job: a set of populations simulated together.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    /// Position in submission order
    pub id: usize,
    /// One configuration per population; all share length and alphabet
    pub configs: Vec<Config>,
    pub plan: GenerationPlan,
}

impl Job {
    /// Create a job, checking that its populations can share an ancestor.
    pub fn new(id: usize, configs: Vec<Config>, plan: GenerationPlan) -> Result<Self, ConfigError> {
        let first = configs.first().ok_or(ConfigError::EmptyJob)?;
        if let Some(other) = configs.iter().find(|c| !first.is_compatible_with(c)) {
            return Err(ConfigError::IncompatiblePair {
                left: first.length(),
                right: other.length(),
            });
        }
        Ok(Self { id, configs, plan })
    }
}

/// Build the jobs of a parameter sweep.
///
/// With one parameter block every configuration is its own job. With several
/// blocks, every pair of blocks `i < j` contributes the Cartesian product of
/// their configurations as two-population jobs.
pub fn build_jobs(sets: &[ParameterSet], plan: GenerationPlan) -> Result<Vec<Job>, ConfigError> {
    let expanded = sets
        .iter()
        .map(ParameterSet::expand)
        .collect::<Result<Vec<_>, _>>()?;

    let groups: Vec<Vec<Config>> = match expanded.as_slice() {
        [] => return Err(ConfigError::EmptyJob),
        [single] => single.iter().map(|c| vec![c.clone()]).collect(),
        many => {
            let mut groups = Vec::new();
            for (i, left) in many.iter().enumerate() {
                for right in &many[i + 1..] {
                    for a in left {
                        for b in right {
                            groups.push(vec![a.clone(), b.clone()]);
                        }
                    }
                }
            }
            groups
        }
    };

    groups
        .into_iter()
        .enumerate()
        .map(|(id, configs)| Job::new(id, configs, plan))
        .collect()
}

/// One single-population job per configuration, each run for its own `NumGen`.
pub fn jobs_from_configs(configs: Vec<Config>) -> Vec<Job> {
    configs
        .into_iter()
        .enumerate()
        .map(|(id, config)| Job {
            id,
            plan: GenerationPlan::single_shot(config.num_gen()),
            configs: vec![config],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::parameters::Format;

    fn sets(yaml: &str) -> Vec<ParameterSet> {
        ParameterSet::parse_all(yaml, Format::Yaml).unwrap()
    }

    const BLOCK_A: &str = "
- Sizes: [5, 6]
  Lengths: [20]
  MutationRates: [0.01]
  TransferInRates: [0.0]
  TransferInFrags: [2]
  TransferOutRates: [0.01, 0.02]
  TransferOutFrags: [2]
";

    #[test]
    fn test_single_block_gives_single_population_jobs() {
        let jobs = build_jobs(&sets(BLOCK_A), GenerationPlan::default()).unwrap();
        assert_eq!(jobs.len(), 4);
        assert!(jobs.iter().all(|j| j.configs.len() == 1));
        assert_eq!(
            jobs.iter().map(|j| j.id).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_multiple_blocks_give_pairs() {
        let yaml = format!(
            "{BLOCK_A}{}{}",
            BLOCK_A.replace("Sizes: [5, 6]", "Sizes: [7]"),
            BLOCK_A.replace("Sizes: [5, 6]", "Sizes: [8]")
        );
        let sets = sets(&yaml);
        assert_eq!(sets.len(), 3);

        let jobs = build_jobs(&sets, GenerationPlan::new(2, 10, 3)).unwrap();
        // (0,1): 4 x 2, (0,2): 4 x 2, (1,2): 2 x 2
        assert_eq!(jobs.len(), 20);
        assert!(jobs.iter().all(|j| j.configs.len() == 2));
        assert!(jobs.iter().all(|j| j.plan.generations() == 30));
        assert_eq!(jobs[0].configs[1].size(), 7);
        assert_eq!(jobs[19].configs[0].size(), 7);
        assert_eq!(jobs[19].configs[1].size(), 8);
    }

    #[test]
    fn test_incompatible_pair_is_rejected() {
        let yaml = format!("{BLOCK_A}{}", BLOCK_A.replace("Lengths: [20]", "Lengths: [30]"));
        assert_eq!(
            build_jobs(&sets(&yaml), GenerationPlan::default()),
            Err(ConfigError::IncompatiblePair {
                left: 20,
                right: 30
            })
        );
    }

    #[test]
    fn test_jobs_from_configs_use_num_gen() {
        let configs = sets(BLOCK_A)[0].expand_replicated(2).unwrap();
        let jobs = jobs_from_configs(configs);
        assert_eq!(jobs.len(), 8);
        assert_eq!(jobs[0].plan, GenerationPlan::single_shot(250));
        assert_eq!(jobs[7].plan.generations(), 360);
    }

    #[test]
    fn test_job_new_rejects_empty() {
        assert_eq!(
            Job::new(0, Vec::new(), GenerationPlan::default()),
            Err(ConfigError::EmptyJob)
        );
    }
}
