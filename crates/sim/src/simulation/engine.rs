//! Generation scheduler.
//!
//! Every generation, each population of a job receives one Moran birth-death
//! event followed by `k ~ Poisson(λ)` molecular events, where
//! `λ = L × (mutation + transfer-in + transfer-out)`. Each molecular event is
//! assigned a type by [`emit`] in proportion to the individual rates, so the
//! three processes are simulated from one combined Poisson count.
//!
//! The scheduled events are then applied in order by [`evolve`]; nothing
//! inside one job runs concurrently.

use super::event::{emit, evolve, Event, Target};
use super::{initialization, Config, Population};
use crate::errors::ConfigError;
use crate::evolution::{FragmentTransfer, MoranSelector, PointMutator};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Poisson};

/// Per-population operators and rates.
#[derive(Debug)]
struct Lane {
    selector: MoranSelector,
    mutator: PointMutator,
    transfer_in: FragmentTransfer,
    transfer_out: FragmentTransfer,
    mutation_rate: f64,
    in_rate: f64,
    out_rate: f64,
    /// Molecular-event count per generation; `None` when `λ == 0`.
    clock: Option<Poisson<f64>>,
    lambda: f64,
}

impl Lane {
    fn new(config: &Config, has_partner: bool) -> Self {
        let transfer = config.transfer();
        let mutation_rate = config.mutation().rate;
        let in_rate = transfer.inward.rate;
        // Without another population there is no donor for transfer-out.
        let out_rate = if has_partner {
            transfer.outward.rate
        } else {
            0.0
        };
        let lambda = config.length() as f64 * (mutation_rate + in_rate + out_rate);

        Self {
            selector: MoranSelector::new(),
            mutator: PointMutator::new(config.alphabet().clone()),
            transfer_in: FragmentTransfer::new(transfer.inward.fragment),
            transfer_out: FragmentTransfer::new(transfer.outward.fragment),
            mutation_rate,
            in_rate,
            out_rate,
            clock: Poisson::new(lambda).ok(),
            lambda,
        }
    }

    /// Competing molecular events for population `index`.
    ///
    /// The transfer-out donor is a placeholder, resolved once the event wins.
    fn candidates(&self, index: usize) -> [Event<'_>; 3] {
        [
            Event::new(self.mutation_rate, &self.mutator, Target::Population(index)),
            Event::new(self.in_rate, &self.transfer_in, Target::Population(index)),
            Event::new(
                self.out_rate,
                &self.transfer_out,
                Target::Between {
                    donor: index,
                    recipient: index,
                },
            ),
        ]
    }
}

/// The evolving populations of one job together with their operators.
#[derive(Debug)]
pub struct MoranProcess {
    lanes: Vec<Lane>,
    populations: Vec<Population>,
    generation: usize,
}

impl MoranProcess {
    /// Bind `configs[i]` to `populations[i]`.
    ///
    /// Each population must have the size and genome length of its
    /// configuration.
    pub fn new(configs: &[Config], populations: Vec<Population>) -> Result<Self, ConfigError> {
        if configs.is_empty() {
            return Err(ConfigError::EmptyJob);
        }
        if configs.len() != populations.len() {
            return Err(ConfigError::PopulationCount {
                expected: configs.len(),
                found: populations.len(),
            });
        }
        for (i, (config, population)) in configs.iter().zip(&populations).enumerate() {
            if config.size() != population.size() || config.length() != population.length() {
                return Err(ConfigError::PopulationMismatch(i));
            }
        }

        let has_partner = configs.len() > 1;
        let lanes = configs
            .iter()
            .map(|config| Lane::new(config, has_partner))
            .collect();

        Ok(Self {
            lanes,
            populations,
            generation: 0,
        })
    }

    /// Seed every population of the job from one fresh random ancestor.
    pub fn from_random_ancestor<R: Rng + ?Sized>(
        configs: &[Config],
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let populations = initialization::populations_from_common_ancestor(configs, rng)?;
        Self::new(configs, populations)
    }

    /// Get the populations.
    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    /// Consume the process and return its populations.
    pub fn into_populations(self) -> Vec<Population> {
        self.populations
    }

    /// Number of generations simulated so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Expected number of molecular events per generation for population `index`.
    pub fn event_rate(&self, index: usize) -> Option<f64> {
        self.lanes.get(index).map(|lane| lane.lambda)
    }

    /// Advance all populations by one generation.
    pub fn step<R: RngCore>(&mut self, rng: &mut R) {
        self.run_for(1, rng);
    }

    /// Advance all populations by `generations` generations.
    pub fn run_for<R: RngCore>(&mut self, generations: usize, rng: &mut R) {
        let mut events = Vec::new();
        for _ in 0..generations {
            schedule(&self.lanes, &mut events, rng);
            evolve(&mut self.populations, events.drain(..), rng);
            self.generation += 1;
        }
    }
}

/// Append one generation's events, population by population.
fn schedule<'a, R: Rng + ?Sized>(lanes: &'a [Lane], events: &mut Vec<Event<'a>>, rng: &mut R) {
    let count = lanes.len();
    for (i, lane) in lanes.iter().enumerate() {
        events.push(Event::new(1.0, &lane.selector, Target::Population(i)));

        let Some(clock) = &lane.clock else {
            continue;
        };
        let k = clock.sample(rng) as usize;
        if k == 0 {
            continue;
        }

        let candidates = lane.candidates(i);
        for _ in 0..k {
            let Some(chosen) = emit(&candidates, rng) else {
                break;
            };
            let mut event = *chosen;
            if let Target::Between { recipient, .. } = event.target {
                event.target = Target::Between {
                    donor: partner(recipient, count, rng),
                    recipient,
                };
            }
            events.push(event);
        }
    }
}

/// Uniformly choose a population other than `index` out of `count`.
fn partner<R: Rng + ?Sized>(index: usize, count: usize, rng: &mut R) -> usize {
    if count < 2 {
        return index;
    }
    let other = rng.random_range(0..count - 1);
    if other >= index {
        other + 1
    } else {
        other
    }
}
