//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use popsimu_sim::prelude::*;
//! use rand::SeedableRng;
//!
//! let config = Config::builder().size(10).length(50).mutation_rate(0.01).build().unwrap();
//! let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(1);
//! let mut process = MoranProcess::from_random_ancestor(&[config], &mut rng).unwrap();
//! process.run_for(100, &mut rng);
//! let stats = calc_ks(&process.populations()[0]);
//! assert!((0.0..=1.0).contains(&stats.ks));
//! ```

pub use crate::analysis::{calc_ks, cross_ks, DiversityStats, PairSampling};
pub use crate::base::{Alphabet, Sequence};
pub use crate::errors::{self, ConfigError, StorageError, SweepError};
pub use crate::evolution::{FragmentTransfer, MoranSelector, Operator, PointMutator};
pub use crate::simulation::{Config, MoranProcess, Population};
pub use crate::storage::ResultRecorder;
pub use crate::sweep::{
    build_jobs, jobs_from_configs, run_jobs, GenerationPlan, Job, JobResult, ParameterSet,
    RunSettings,
};
