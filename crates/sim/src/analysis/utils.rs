//! Utility functions for analysis module
//!
//! Shared helper functions used across analysis submodules.

/// Calculate mean of a slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate sample standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let mean_val = mean(values);
    let variance =
        values.iter().map(|v| (v - mean_val).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Optimized Hamming distance between two symbol slices
///
/// Only the common prefix is compared. This function is performance-critical:
/// it runs once per sampled pair in every diversity snapshot.
#[inline]
pub fn hamming_distance_fast(seq1: &[u8], seq2: &[u8]) -> usize {
    let len = seq1.len().min(seq2.len());
    let (a, b) = (&seq1[..len], &seq2[..len]);

    // Process in chunks of 8 for better CPU pipelining
    let mut distance = 0;
    let mut chunks_a = a.chunks_exact(8);
    let mut chunks_b = b.chunks_exact(8);
    for (x, y) in (&mut chunks_a).zip(&mut chunks_b) {
        distance += (x[0] != y[0]) as usize;
        distance += (x[1] != y[1]) as usize;
        distance += (x[2] != y[2]) as usize;
        distance += (x[3] != y[3]) as usize;
        distance += (x[4] != y[4]) as usize;
        distance += (x[5] != y[5]) as usize;
        distance += (x[6] != y[6]) as usize;
        distance += (x[7] != y[7]) as usize;
    }

    // Process remaining elements
    distance += chunks_a
        .remainder()
        .iter()
        .zip(chunks_b.remainder())
        .filter(|(x, y)| x != y)
        .count();

    distance
}

/// Running first and second moments of pairwise Hamming distances.
///
/// Sums are kept as integers so that partial results merged in any order
/// (e.g. by a rayon reduction) give bit-identical statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairMoments {
    /// Number of pairs seen (m)
    pub pairs: u64,
    /// Sum of distances (S1)
    pub sum: u128,
    /// Sum of squared distances (S2)
    pub sum_sq: u128,
}

impl PairMoments {
    /// Record one pairwise distance.
    #[inline]
    pub fn add(&mut self, distance: usize) {
        let d = distance as u128;
        self.pairs += 1;
        self.sum += d;
        self.sum_sq += d * d;
    }

    /// Combine two partial accumulations.
    pub fn merge(self, other: Self) -> Self {
        Self {
            pairs: self.pairs + other.pairs,
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
        }
    }

    /// Mean of `distance / length`.
    pub fn mean(&self, length: usize) -> f64 {
        if self.pairs == 0 || length == 0 {
            return 0.0;
        }
        self.sum as f64 / (self.pairs as f64 * length as f64)
    }

    /// Bias-corrected sample variance of `distance / length`.
    ///
    /// Zero when fewer than two pairs were seen.
    pub fn variance(&self, length: usize) -> f64 {
        if self.pairs < 2 || length == 0 {
            return 0.0;
        }
        let m = self.pairs as u128;
        // m * S2 >= S1^2 (Cauchy-Schwarz), so this never underflows.
        let numerator = m * self.sum_sq - self.sum * self.sum;
        let l = length as f64;
        numerator as f64 / ((m * (m - 1)) as f64 * l * l)
    }
}
