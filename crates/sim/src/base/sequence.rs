use super::Alphabet;
use crate::errors::OutOfBounds;
use rand::Rng;
use std::fmt;

/// Mutable genome sequence backed by a vector of alphabet symbols.
///
/// `Sequence` is a plain value: cloning copies the symbols. Operators edit it
/// in place, either one site at a time or by overwriting a segment with the
/// homologous segment of a donor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence(Vec<u8>);

impl Sequence {
    /// Create a new, empty `Sequence`.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a `Sequence` from raw symbols.
    pub fn from_symbols(symbols: impl Into<Vec<u8>>) -> Self {
        Self(symbols.into())
    }

    /// Draw a sequence of `length` sites, each uniformly from `alphabet`.
    ///
    /// ```rust
    /// # use popsimu_sim::base::{Alphabet, Sequence};
    /// # use rand::SeedableRng;
    /// let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(1);
    /// let seq = Sequence::random(50, &Alphabet::dna(), &mut rng);
    /// assert_eq!(seq.len(), 50);
    /// ```
    pub fn random<R: Rng + ?Sized>(length: usize, alphabet: &Alphabet, rng: &mut R) -> Self {
        Self((0..length).map(|_| alphabet.sample(rng)).collect())
    }

    /// Return the length of the sequence in sites.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if the sequence contains no sites.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the symbol at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Set the symbol at `index`.
    ///
    /// Returns `OutOfBounds` if `index` is greater than or equal to the
    /// sequence length.
    #[inline]
    pub fn set(&mut self, index: usize, symbol: u8) -> Result<(), OutOfBounds> {
        let len = self.len();
        self.0
            .get_mut(index)
            .map(|slot| *slot = symbol)
            .ok_or(OutOfBounds { index, len })
    }

    /// Borrow the underlying symbol slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Overwrite `[start, start + len)` with the same range of `donor`.
    ///
    /// The range is clamped to the shorter of the two sequences.
    pub fn copy_segment_from(&mut self, donor: &Sequence, start: usize, len: usize) {
        let end = (start + len).min(self.len()).min(donor.len());
        if start < end {
            self.0[start..end].copy_from_slice(&donor.0[start..end]);
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in &self.0 {
            if symbol.is_ascii_graphic() {
                write!(f, "{}", symbol as char)?;
            } else {
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}
