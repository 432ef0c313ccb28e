//! Population management.
//!
//! A population is a fixed-size collection of equal-length haploid genomes.
//! Its size and genome length never change after construction; operators in
//! `crate::evolution` only rewrite symbol content.

use crate::base::{Alphabet, Sequence};
use crate::errors::ConfigError;
use rand::Rng;

/// A population of haploid individuals sharing one genome length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    /// The genomes in this population
    genomes: Vec<Sequence>,
    /// Common genome length
    length: usize,
}

impl Population {
    /// Create a population by copying `ancestor` `size` times.
    ///
    /// Used when several populations must start from one genetic background.
    pub fn from_ancestor(ancestor: &Sequence, size: usize) -> Self {
        Self {
            genomes: vec![ancestor.clone(); size],
            length: ancestor.len(),
        }
    }

    /// Create a population of `size` independent random genomes.
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        length: usize,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Self {
        let genomes = (0..size)
            .map(|_| Sequence::random(length, alphabet, rng))
            .collect();
        Self { genomes, length }
    }

    /// Create a population from explicit genomes.
    ///
    /// All genomes must have the same length and at least one is required.
    pub fn from_sequences(genomes: Vec<Sequence>) -> Result<Self, ConfigError> {
        let length = genomes
            .first()
            .map(Sequence::len)
            .ok_or(ConfigError::ZeroPopulationSize)?;
        if let Some(bad) = genomes.iter().find(|g| g.len() != length) {
            return Err(ConfigError::LengthMismatch {
                expected: length,
                found: bad.len(),
            });
        }
        Ok(Self { genomes, length })
    }

    /// Get the number of individuals in the population.
    #[inline]
    pub fn size(&self) -> usize {
        self.genomes.len()
    }

    /// Check if population is empty.
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Common genome length.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Get all genomes as a slice.
    pub fn genomes(&self) -> &[Sequence] {
        &self.genomes
    }

    /// Get a specific genome by index.
    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.genomes.get(index)
    }

    /// Overwrite the genome at `death` with a copy of the genome at `parent`.
    pub(crate) fn replace_with_copy(&mut self, death: usize, parent: usize) {
        if death == parent {
            return;
        }
        let (donor, recipient) = pair_mut(&mut self.genomes, parent, death);
        recipient.clone_from(donor);
    }

    /// Set a single site of one genome.
    pub(crate) fn set_site(&mut self, individual: usize, site: usize, symbol: u8) {
        if let Some(genome) = self.genomes.get_mut(individual) {
            // Site indices come from `0..length`, so this cannot fail.
            let _ = genome.set(site, symbol);
        }
    }

    /// Copy `[start, start + len)` of `donor` into the same range of `recipient`.
    pub(crate) fn copy_segment(&mut self, donor: usize, recipient: usize, start: usize, len: usize) {
        if donor == recipient {
            return;
        }
        let (donor, recipient) = pair_mut(&mut self.genomes, donor, recipient);
        recipient.copy_segment_from(donor, start, len);
    }

    /// Mutable access to one genome.
    pub(crate) fn genome_mut(&mut self, index: usize) -> &mut Sequence {
        &mut self.genomes[index]
    }
}

/// Borrow element `read` immutably and element `write` mutably. `read != write`.
fn pair_mut(items: &mut [Sequence], read: usize, write: usize) -> (&Sequence, &mut Sequence) {
    if read < write {
        let (left, right) = items.split_at_mut(write);
        (&left[read], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(read);
        (&right[0], &mut left[write])
    }
}
