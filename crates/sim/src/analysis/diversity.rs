//! Pairwise diversity statistics
//!
//! For a set of sequence pairs, each pair contributes its per-site difference
//! fraction `d / L`. `Ks` is the mean of these fractions and `Vd` their
//! bias-corrected sample variance.
//!
//! Within one population the pairs are the unordered pairs of distinct
//! individuals; across two populations they are the full cartesian product.
//! When the number of candidate pairs exceeds [`PairSampling::max_pairs`], a
//! fixed number of pairs is drawn uniformly with replacement instead.

use super::utils::{hamming_distance_fast, PairMoments};
use crate::simulation::Population;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default upper bound on the number of pairs measured per statistic.
///
/// Covers full enumeration for populations of up to 100 individuals.
pub const DEFAULT_MAX_PAIRS: usize = 5000;

/// Mean pairwise divergence and its variance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiversityStats {
    /// Mean per-site pairwise difference, in `[0, 1]`
    pub ks: f64,
    /// Bias-corrected variance of per-site pairwise difference, `>= 0`
    pub vd: f64,
}

impl DiversityStats {
    fn from_moments(moments: &PairMoments, length: usize) -> Self {
        Self {
            ks: moments.mean(length),
            vd: moments.variance(length),
        }
    }
}

/// Pair-sampling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSampling {
    /// Enumerate every pair when there are at most this many; otherwise
    /// sample exactly this many.
    pub max_pairs: usize,
}

impl PairSampling {
    pub fn new(max_pairs: usize) -> Self {
        Self { max_pairs }
    }

    /// Always enumerate every pair.
    pub fn exhaustive() -> Self {
        Self {
            max_pairs: usize::MAX,
        }
    }
}

impl Default for PairSampling {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAIRS)
    }
}

/// Ks/Vd over all unordered pairs of individuals in `population`.
///
/// A population of one, or of identical sequences, yields zero for both.
pub fn calc_ks(population: &Population) -> DiversityStats {
    let genomes = population.genomes();
    let n = genomes.len();

    let moments = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut local = PairMoments::default();
            for j in i + 1..n {
                local.add(hamming_distance_fast(
                    genomes[i].as_slice(),
                    genomes[j].as_slice(),
                ));
            }
            local
        })
        .reduce(PairMoments::default, PairMoments::merge);

    DiversityStats::from_moments(&moments, population.length())
}

/// Ks/Vd within `population`, sampling pairs when there are too many.
pub fn calc_ks_sampled<R: Rng + ?Sized>(
    population: &Population,
    sampling: PairSampling,
    rng: &mut R,
) -> DiversityStats {
    let n = population.size();
    let candidates = n.saturating_mul(n.saturating_sub(1)) / 2;
    if candidates <= sampling.max_pairs {
        return calc_ks(population);
    }

    // Draw indices sequentially so the result depends only on the generator.
    let pairs: Vec<(usize, usize)> = (0..sampling.max_pairs)
        .map(|_| {
            let i = rng.random_range(0..n);
            let mut j = rng.random_range(0..n - 1);
            if j >= i {
                j += 1;
            }
            (i, j)
        })
        .collect();

    let moments = measure_pairs(population, population, &pairs);
    DiversityStats::from_moments(&moments, population.length())
}

/// Ks/Vd over every (a, b) pair with `a` from `pop_a` and `b` from `pop_b`.
pub fn cross_ks(pop_a: &Population, pop_b: &Population) -> DiversityStats {
    let a = pop_a.genomes();
    let b = pop_b.genomes();

    let moments = a
        .par_iter()
        .map(|x| {
            let mut local = PairMoments::default();
            for y in b {
                local.add(hamming_distance_fast(x.as_slice(), y.as_slice()));
            }
            local
        })
        .reduce(PairMoments::default, PairMoments::merge);

    DiversityStats::from_moments(&moments, pop_a.length().min(pop_b.length()))
}

/// Ks/Vd across two populations, sampling pairs when there are too many.
pub fn cross_ks_sampled<R: Rng + ?Sized>(
    pop_a: &Population,
    pop_b: &Population,
    sampling: PairSampling,
    rng: &mut R,
) -> DiversityStats {
    let (n_a, n_b) = (pop_a.size(), pop_b.size());
    if n_a.saturating_mul(n_b) <= sampling.max_pairs {
        return cross_ks(pop_a, pop_b);
    }

    let pairs: Vec<(usize, usize)> = (0..sampling.max_pairs)
        .map(|_| (rng.random_range(0..n_a), rng.random_range(0..n_b)))
        .collect();

    let moments = measure_pairs(pop_a, pop_b, &pairs);
    DiversityStats::from_moments(&moments, pop_a.length().min(pop_b.length()))
}

/// Accumulate distances of the given `(index in a, index in b)` pairs.
fn measure_pairs(a: &Population, b: &Population, pairs: &[(usize, usize)]) -> PairMoments {
    pairs
        .par_iter()
        .fold(PairMoments::default, |mut acc, &(i, j)| {
            if let (Some(x), Some(y)) = (a.get(i), b.get(j)) {
                acc.add(hamming_distance_fast(x.as_slice(), y.as_slice()));
            }
            acc
        })
        .reduce(PairMoments::default, PairMoments::merge)
}
