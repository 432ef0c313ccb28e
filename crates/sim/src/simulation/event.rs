//! Events and their sequential application.
//!
//! An [`Event`] binds a rate and an operator to a target population. [`emit`]
//! picks one event from a set of competing candidates with probability
//! proportional to rate; [`evolve`] applies a finite stream of events, one
//! after another, to the populations they target.

use super::Population;
use crate::evolution::Operator;
use rand::{Rng, RngCore};

/// Which population(s) an event acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Act on one population.
    Population(usize),
    /// Act on `recipient` using material from population `donor`.
    Between { donor: usize, recipient: usize },
}

/// A (rate, operator, target) triple.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Relative rate; zero-rate events are never emitted.
    pub rate: f64,
    /// The operator fired by this event.
    pub operator: &'a dyn Operator,
    /// Population(s) the operator is applied to.
    pub target: Target,
}

impl<'a> Event<'a> {
    pub fn new(rate: f64, operator: &'a dyn Operator, target: Target) -> Self {
        Self {
            rate,
            operator,
            target,
        }
    }

    /// Apply this event's operator to its target.
    ///
    /// Targets outside `populations` are ignored.
    pub fn fire<R: RngCore>(&self, populations: &mut [Population], rng: &mut R) {
        match self.target {
            Target::Population(i) => {
                if let Some(population) = populations.get_mut(i) {
                    self.operator.apply(population, rng);
                }
            }
            Target::Between { donor, recipient } if donor == recipient => {
                if let Some(population) = populations.get_mut(recipient) {
                    self.operator.apply(population, rng);
                }
            }
            Target::Between { donor, recipient } => {
                if donor >= populations.len() || recipient >= populations.len() {
                    return;
                }
                let (donor, recipient) = if donor < recipient {
                    let (left, right) = populations.split_at_mut(recipient);
                    (&left[donor], &mut right[0])
                } else {
                    let (left, right) = populations.split_at_mut(donor);
                    (&right[0], &mut left[recipient])
                };
                self.operator.apply_from(donor, recipient, rng);
            }
        }
    }
}

/// Pick one candidate with probability proportional to its rate.
///
/// Rates are normalized into a cumulative distribution and a single uniform
/// draw selects the interval it falls in. Returns `None` when no candidate
/// has a positive rate. Exactly one random number is consumed otherwise.
pub fn emit<'e, 'a, R: Rng + ?Sized>(
    candidates: &'e [Event<'a>],
    rng: &mut R,
) -> Option<&'e Event<'a>> {
    let total: f64 = candidates
        .iter()
        .filter(|e| e.rate > 0.0)
        .map(|e| e.rate)
        .sum();
    if !(total > 0.0) {
        return None;
    }

    let v = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last = None;
    for event in candidates.iter().filter(|e| e.rate > 0.0) {
        cumulative += event.rate;
        if v < cumulative {
            return Some(event);
        }
        last = Some(event);
    }
    // Rounding can leave `v` a hair above the final bound.
    last
}

/// Apply every event of `events`, in order, to `populations`.
///
/// This is a strictly sequential consumer: each event sees the state left by
/// the previous one. Returns the number of events applied.
pub fn evolve<'a, I, R>(populations: &mut [Population], events: I, rng: &mut R) -> usize
where
    I: IntoIterator<Item = Event<'a>>,
    R: RngCore,
{
    let mut applied = 0;
    for event in events {
        event.fire(populations, rng);
        applied += 1;
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Alphabet, Sequence};
    use crate::evolution::{FragmentTransfer, MoranSelector, PointMutator};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_emit_fairness() {
        let a = MoranSelector;
        let b = MoranSelector;
        let candidates = [
            Event::new(1.0, &a, Target::Population(0)),
            Event::new(3.0, &b, Target::Population(1)),
        ];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let trials = 100_000;
        let hits_a = (0..trials)
            .filter(|_| emit(&candidates, &mut rng).unwrap().target == Target::Population(0))
            .count();
        let freq = hits_a as f64 / trials as f64;
        // Expected 0.25, standard error ~0.0014.
        assert!((freq - 0.25).abs() < 0.01, "freq = {freq}");
    }

    #[test]
    fn test_emit_never_picks_zero_rate() {
        let op = MoranSelector;
        let candidates = [
            Event::new(0.0, &op, Target::Population(0)),
            Event::new(0.5, &op, Target::Population(1)),
            Event::new(0.0, &op, Target::Population(2)),
        ];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        for _ in 0..1000 {
            assert_eq!(
                emit(&candidates, &mut rng).unwrap().target,
                Target::Population(1)
            );
        }
    }

    #[test]
    fn test_emit_all_zero_or_empty() {
        let op = MoranSelector;
        let candidates = [Event::new(0.0, &op, Target::Population(0))];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        assert!(emit(&candidates, &mut rng).is_none());
        assert!(emit(&[], &mut rng).is_none());
    }

    #[test]
    fn test_evolve_is_deterministic() {
        let mutator = PointMutator::new(Alphabet::dna());
        let transfer = FragmentTransfer::new(4);
        let moran = MoranSelector;
        let operators: [&dyn Operator; 3] = [&moran, &mutator, &transfer];
        let events: Vec<Event> = (0..600)
            .map(|i| Event::new(1.0, operators[i % 3], Target::Population(0)))
            .collect();

        let run = || {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
            let mut pops = vec![Population::random(8, 32, &Alphabet::dna(), &mut rng)];
            let applied = evolve(&mut pops, events.iter().copied(), &mut rng);
            assert_eq!(applied, 600);
            pops
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_evolve_between_populations() {
        let transfer = FragmentTransfer::new(3);
        let mut pops = vec![
            Population::from_ancestor(&Sequence::from("AAAAAA"), 2),
            Population::from_ancestor(&Sequence::from("TTTTTT"), 2),
        ];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let events = [Event::new(
            1.0,
            &transfer,
            Target::Between {
                donor: 1,
                recipient: 0,
            },
        )];

        evolve(&mut pops, events, &mut rng);

        let moved: usize = pops[0]
            .genomes()
            .iter()
            .map(|g| g.as_slice().iter().filter(|&&s| s == b'T').count())
            .sum();
        assert_eq!(moved, 3);
        assert!(pops[1].genomes().iter().all(|g| g.to_string() == "TTTTTT"));
    }

    #[test]
    fn test_evolve_ignores_missing_target() {
        let moran = MoranSelector;
        let mut pops = vec![Population::from_ancestor(&Sequence::from("AC"), 2)];
        let before = pops.clone();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        evolve(
            &mut pops,
            [Event::new(1.0, &moran, Target::Population(5))],
            &mut rng,
        );
        assert_eq!(pops, before);
    }
}
