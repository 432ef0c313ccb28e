//! Point mutation.
//!
//! A single mutation event picks one individual and one site uniformly and
//! redraws that site from the alphabet. The redraw may return the symbol that
//! was already there, so a fraction `1/|alphabet|` of events is silent. This is
//! the standard neutral point-mutation model; with a 4-letter alphabet and
//! per-site rate `u` the substitution rate per site is `3u/4` (Jukes-Cantor).

use super::Operator;
use crate::base::Alphabet;
use crate::simulation::Population;
use rand::{Rng, RngCore};

/// Uniform point mutator over a fixed alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointMutator {
    alphabet: Alphabet,
}

impl PointMutator {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn mutate<R: Rng + ?Sized>(&self, population: &mut Population, rng: &mut R) {
        if population.is_empty() || population.length() == 0 {
            return;
        }
        let individual = rng.random_range(0..population.size());
        let site = rng.random_range(0..population.length());
        let symbol = self.alphabet.sample(rng);
        population.set_site(individual, site, symbol);
    }
}

impl Operator for PointMutator {
    fn apply(&self, population: &mut Population, rng: &mut dyn RngCore) {
        self.mutate(population, rng);
    }
}
