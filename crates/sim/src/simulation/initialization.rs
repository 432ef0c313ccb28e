//! Population initialization.
//!
//! Populations that are compared with each other must descend from the same
//! ancestor, so a job draws one random ancestor and copies it into every
//! population.

use super::{Config, Population};
use crate::base::Sequence;
use crate::errors::ConfigError;
use rand::Rng;

/// Draw an ancestor of the configured length, uniformly from the configured alphabet.
pub fn random_ancestor<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Sequence {
    Sequence::random(config.length(), config.alphabet(), rng)
}

/// Build one population per configuration, all copies of a single random ancestor.
///
/// All configurations must share length and alphabet.
pub fn populations_from_common_ancestor<R: Rng + ?Sized>(
    configs: &[Config],
    rng: &mut R,
) -> Result<Vec<Population>, ConfigError> {
    let first = configs.first().ok_or(ConfigError::EmptyJob)?;
    if let Some(other) = configs.iter().find(|c| !first.is_compatible_with(c)) {
        return Err(ConfigError::IncompatiblePair {
            left: first.length(),
            right: other.length(),
        });
    }

    let ancestor = random_ancestor(first, rng);
    Ok(configs
        .iter()
        .map(|config| Population::from_ancestor(&ancestor, config.size()))
        .collect())
}
