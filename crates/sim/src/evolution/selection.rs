//! Neutral Moran selection.
//!
//! In the Moran model the population size is constant: at every step one
//! individual dies and is replaced by the offspring of another. Parent and
//! death slots are drawn independently and uniformly, so an individual may
//! replace itself (probability `1/N`), in which case the step changes nothing.

use super::Operator;
use crate::simulation::Population;
use rand::{Rng, RngCore};

/// One Moran birth-death step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoranSelector;

impl MoranSelector {
    pub fn new() -> Self {
        Self
    }

    /// Draw `(death, parent)` indices for a population of `size`.
    #[inline]
    pub fn draw<R: Rng + ?Sized>(size: usize, rng: &mut R) -> (usize, usize) {
        let death = rng.random_range(0..size);
        let parent = rng.random_range(0..size);
        (death, parent)
    }
}

impl Operator for MoranSelector {
    fn apply(&self, population: &mut Population, rng: &mut dyn RngCore) {
        if population.is_empty() {
            return;
        }
        let (death, parent) = Self::draw(population.size(), rng);
        population.replace_with_copy(death, parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Sequence;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::collections::HashSet;

    fn distinct_population(n: usize) -> Population {
        let genomes = (0..n)
            .map(|i| Sequence::from_symbols(vec![i as u8; 8]))
            .collect();
        Population::from_sequences(genomes).unwrap()
    }

    #[test]
    fn test_moran_preserves_shape() {
        let mut pop = distinct_population(10);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        for _ in 0..500 {
            MoranSelector.apply(&mut pop, &mut rng);
            assert_eq!(pop.size(), 10);
            assert!(pop.genomes().iter().all(|g| g.len() == 8));
        }
    }

    #[test]
    fn test_moran_only_copies_existing_genomes() {
        let original = distinct_population(6);
        let allowed: HashSet<_> = original.genomes().iter().cloned().collect();
        let mut pop = original.clone();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        for _ in 0..50 {
            MoranSelector.apply(&mut pop, &mut rng);
            assert!(pop.genomes().iter().all(|g| allowed.contains(g)));
        }
    }

    #[test]
    fn test_moran_drift_fixes_a_lineage() {
        // Without mutation a finite Moran population reaches fixation.
        let mut pop = distinct_population(5);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        for _ in 0..10_000 {
            MoranSelector.apply(&mut pop, &mut rng);
        }
        let first = pop.get(0).unwrap();
        assert!(pop.genomes().iter().all(|g| g == first));
    }

    #[test]
    fn test_moran_single_individual_is_noop() {
        let mut pop = distinct_population(1);
        let before = pop.clone();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(4);
        MoranSelector.apply(&mut pop, &mut rng);
        assert_eq!(pop, before);
    }

    #[test]
    fn test_moran_draw_allows_self_replacement() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let self_replacements = (0..10_000)
            .map(|_| MoranSelector::draw(4, &mut rng))
            .filter(|(d, p)| d == p)
            .count();
        // Expected 1/4 of draws.
        assert!(self_replacements > 2_200 && self_replacements < 2_800);
    }
}
