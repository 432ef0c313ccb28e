//! Homologous horizontal transfer.
//!
//! A transfer copies a contiguous fragment of fixed length from a donor genome
//! into a recipient genome at the same (aligned) position, overwriting the
//! recipient's homologous segment. The start position is uniform over
//! `[0, L - f]`, so the fragment always fits.
//!
//! Within one population donor and recipient are distinct individuals; a
//! population of one cannot transfer and the event is a no-op. Between
//! populations (`Operator::apply_from`) the donor is drawn from the donor
//! population and the recipient from the target population.

use super::Operator;
use crate::simulation::Population;
use rand::{Rng, RngCore};

/// Fixed-length fragment transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentTransfer {
    fragment: usize,
}

impl FragmentTransfer {
    pub fn new(fragment: usize) -> Self {
        Self { fragment }
    }

    pub fn fragment(&self) -> usize {
        self.fragment
    }

    /// Draw an aligned start position for a genome of `length`.
    ///
    /// Returns `None` when no fragment can be placed.
    #[inline]
    fn draw_start<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Option<usize> {
        if self.fragment == 0 || self.fragment > length {
            return None;
        }
        Some(rng.random_range(0..=length - self.fragment))
    }
}

impl Operator for FragmentTransfer {
    fn apply(&self, population: &mut Population, rng: &mut dyn RngCore) {
        let n = population.size();
        if n < 2 {
            return;
        }
        let donor = rng.random_range(0..n);
        let mut recipient = rng.random_range(0..n - 1);
        if recipient >= donor {
            recipient += 1;
        }
        if let Some(start) = self.draw_start(population.length(), rng) {
            population.copy_segment(donor, recipient, start, self.fragment);
        }
    }

    fn apply_from(&self, donor: &Population, recipient: &mut Population, rng: &mut dyn RngCore) {
        if donor.is_empty() || recipient.is_empty() {
            return;
        }
        let d = rng.random_range(0..donor.size());
        let r = rng.random_range(0..recipient.size());
        let length = donor.length().min(recipient.length());
        if let (Some(start), Some(source)) = (self.draw_start(length, rng), donor.get(d)) {
            recipient
                .genome_mut(r)
                .copy_segment_from(source, start, self.fragment);
        }
    }
}
