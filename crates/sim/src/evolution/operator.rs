use crate::simulation::Population;
use rand::RngCore;
use std::fmt;

/// A stochastic, state-mutating strategy over a population.
///
/// Operators are total over valid populations: they never fail and never
/// change the population size or the genome length. The random source is
/// always passed in, so one operator instance can be shared by every
/// replicate while each replicate keeps its own stream.
pub trait Operator: fmt::Debug + Send + Sync {
    /// Apply one event to `population`.
    fn apply(&self, population: &mut Population, rng: &mut dyn RngCore);

    /// Apply one event to `recipient` using genetic material from `donor`.
    ///
    /// Only operators that read a donor population need to override this;
    /// the default ignores `donor`.
    fn apply_from(&self, donor: &Population, recipient: &mut Population, rng: &mut dyn RngCore) {
        let _ = donor;
        self.apply(recipient, rng);
    }
}
