//! Result records streamed by the worker pool.

use crate::analysis::{calc_ks_sampled, cross_ks_sampled, DiversityStats, PairSampling};
use crate::simulation::{Config, Population};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One diversity measurement.
///
/// `Index` holds one population index for a within-population statistic or
/// two for a cross-population statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalcRes {
    pub index: Vec<usize>,
    pub ks: f64,
    pub vd: f64,
    /// Generations simulated in the replicate when the measurement was taken
    pub num_gen: usize,
}

impl CalcRes {
    fn new(index: Vec<usize>, stats: DiversityStats, num_gen: usize) -> Self {
        Self {
            index,
            ks: stats.ks,
            vd: stats.vd,
            num_gen,
        }
    }
}

/// Everything produced by one job, identified by its configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobResult {
    pub pop_configs: Vec<Config>,
    pub calc_results: Vec<CalcRes>,
}

impl JobResult {
    pub fn new(pop_configs: Vec<Config>) -> Self {
        Self {
            pop_configs,
            calc_results: Vec::new(),
        }
    }
}

/// Measure every population, then every pair `i < j`.
///
/// Records are ordered `[0], [0,1], [0,2], ..., [1], [1,2], ...`.
pub fn snapshot<R: Rng + ?Sized>(
    populations: &[Population],
    num_gen: usize,
    sampling: PairSampling,
    rng: &mut R,
) -> Vec<CalcRes> {
    let mut records = Vec::new();
    for (i, pop) in populations.iter().enumerate() {
        let stats = calc_ks_sampled(pop, sampling, rng);
        records.push(CalcRes::new(vec![i], stats, num_gen));

        for (j, other) in populations.iter().enumerate().skip(i + 1) {
            let stats = cross_ks_sampled(pop, other, sampling, rng);
            records.push(CalcRes::new(vec![i, j], stats, num_gen));
        }
    }
    records
}
