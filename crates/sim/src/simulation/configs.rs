//! Simulation parameters.
//!
//! A [`Config`] describes one population: its size, genome length, alphabet,
//! point-mutation rate and the two transfer processes. It is validated once,
//! when it is built or deserialized, and is immutable afterwards.

use crate::base::Alphabet;
use crate::errors::ConfigError;
use rand_distr::Poisson;
use serde::{Deserialize, Serialize};

/// Point-mutation parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MutationParams {
    /// Mutation events per site per generation
    pub rate: f64,
}

/// Parameters of one fragment-transfer process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FragmentParams {
    /// Transfer events per site per generation
    pub rate: f64,
    /// Length of the transferred fragment
    pub fragment: usize,
}

impl FragmentParams {
    pub fn new(rate: f64, fragment: usize) -> Self {
        Self { rate, fragment }
    }
}

/// Transfer parameters.
///
/// `inward` is transfer between members of the same population; `outward`
/// is transfer whose donor lives in another population of the same job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferParams {
    #[serde(rename = "In", default)]
    pub inward: FragmentParams,
    #[serde(rename = "Out", default)]
    pub outward: FragmentParams,
}

/// Immutable, validated parameters of one simulated population.
///
/// Serialized field names follow the parameter-file convention
/// (`Size`, `Length`, `Mutation.Rate`, `Transfer.In.Rate`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "ConfigRecord")]
pub struct Config {
    size: usize,
    length: usize,
    mutation: MutationParams,
    transfer: TransferParams,
    alphabet: Alphabet,
    num_gen: usize,
}

impl Config {
    /// Start building a configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Population size (N).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Genome length (L).
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn mutation(&self) -> MutationParams {
        self.mutation
    }

    pub fn transfer(&self) -> TransferParams {
        self.transfer
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of generations this configuration is meant to run for.
    pub fn num_gen(&self) -> usize {
        self.num_gen
    }

    /// Return a copy of this configuration with a different generation count.
    pub fn with_num_gen(&self, num_gen: usize) -> Self {
        Self {
            num_gen,
            ..self.clone()
        }
    }

    /// Whether two populations can be compared as descendants of one ancestor.
    pub fn is_compatible_with(&self, other: &Config) -> bool {
        self.length == other.length && self.alphabet == other.alphabet
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroPopulationSize);
        }
        if self.length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        check_rate("mutation", self.mutation.rate)?;
        check_transfer("in", "transfer-in", self.transfer.inward, self.length)?;
        check_transfer("out", "transfer-out", self.transfer.outward, self.length)?;
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }

        // Worst case: a job where transfer-out has a donor.
        let lambda = self.length as f64
            * (self.mutation.rate + self.transfer.inward.rate + self.transfer.outward.rate);
        if lambda > 0.0 && Poisson::new(lambda).is_err() {
            return Err(ConfigError::EventRateTooLarge { lambda });
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

fn check_transfer(
    direction: &'static str,
    name: &'static str,
    params: FragmentParams,
    length: usize,
) -> Result<(), ConfigError> {
    check_rate(name, params.rate)?;

    // A fragment must fit in the genome; a zero-length fragment is only
    // meaningful for a process that never fires.
    let too_short = params.fragment == 0 && params.rate > 0.0;
    if too_short || params.fragment > length {
        return Err(ConfigError::InvalidFragment {
            direction,
            fragment: params.fragment,
            length,
        });
    }
    Ok(())
}

/// Unvalidated wire form of [`Config`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ConfigRecord {
    size: usize,
    length: usize,
    #[serde(default)]
    mutation: MutationParams,
    #[serde(default)]
    transfer: TransferParams,
    #[serde(default)]
    alphabet: Alphabet,
    #[serde(default)]
    num_gen: usize,
}

impl TryFrom<ConfigRecord> for Config {
    type Error = ConfigError;

    fn try_from(record: ConfigRecord) -> Result<Self, Self::Error> {
        let config = Config {
            size: record.size,
            length: record.length,
            mutation: record.mutation,
            transfer: record.transfer,
            alphabet: record.alphabet,
            num_gen: record.num_gen,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Builder for [`Config`] with a fluent API.
///
/// # Examples
///
/// ```
/// use popsimu_sim::simulation::Config;
///
/// let config = Config::builder()
///     .size(100)
///     .length(1000)
///     .mutation_rate(1e-4)
///     .transfer_in(1e-4, 50)
///     .build()
///     .unwrap();
/// assert_eq!(config.size(), 100);
///
/// // A fragment longer than the genome is rejected up front.
/// assert!(Config::builder().size(10).length(5).transfer_in(0.1, 6).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    size: usize,
    length: usize,
    mutation_rate: f64,
    transfer_in: FragmentParams,
    transfer_out: FragmentParams,
    alphabet: Alphabet,
    num_gen: usize,
}

impl ConfigBuilder {
    /// Create a new builder. Size and length must be set before `build`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population size (required).
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the genome length (required).
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set the per-site point-mutation rate (default: 0.0).
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set within-population transfer (default: disabled).
    pub fn transfer_in(mut self, rate: f64, fragment: usize) -> Self {
        self.transfer_in = FragmentParams::new(rate, fragment);
        self
    }

    /// Set between-population transfer (default: disabled).
    pub fn transfer_out(mut self, rate: f64, fragment: usize) -> Self {
        self.transfer_out = FragmentParams::new(rate, fragment);
        self
    }

    /// Set the alphabet (default: DNA).
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Set the intended number of generations (default: 0).
    pub fn num_gen(mut self, num_gen: usize) -> Self {
        self.num_gen = num_gen;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let config = Config {
            size: self.size,
            length: self.length,
            mutation: MutationParams {
                rate: self.mutation_rate,
            },
            transfer: TransferParams {
                inward: self.transfer_in,
                outward: self.transfer_out,
            },
            alphabet: self.alphabet,
            num_gen: self.num_gen,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ConfigBuilder {
        Config::builder().size(10).length(100)
    }

    #[test]
    fn test_builder_defaults() {
        let config = base().build().unwrap();
        assert_eq!(config.mutation().rate, 0.0);
        assert_eq!(config.transfer(), TransferParams::default());
        assert_eq!(config.alphabet(), &Alphabet::dna());
        assert_eq!(config.num_gen(), 0);
    }

    #[test]
    fn test_rejects_zero_size_and_length() {
        assert_eq!(
            Config::builder().length(10).build(),
            Err(ConfigError::ZeroPopulationSize)
        );
        assert_eq!(
            Config::builder().size(10).build(),
            Err(ConfigError::ZeroLength)
        );
    }

    #[test]
    fn test_rejects_bad_rates() {
        assert!(matches!(
            base().mutation_rate(-0.1).build(),
            Err(ConfigError::InvalidRate { name: "mutation", .. })
        ));
        assert!(matches!(
            base().mutation_rate(f64::NAN).build(),
            Err(ConfigError::InvalidRate { .. })
        ));
        assert!(matches!(
            base().transfer_out(f64::INFINITY, 5).build(),
            Err(ConfigError::InvalidRate {
                name: "transfer-out",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_unsampleable_event_rate() {
        assert!(matches!(
            base().mutation_rate(1e18).build(),
            Err(ConfigError::EventRateTooLarge { .. })
        ));
        assert!(matches!(
            base().transfer_out(1e18, 10).build(),
            Err(ConfigError::EventRateTooLarge { .. })
        ));
        assert!(base().mutation_rate(1e3).build().is_ok());

        let record = r#"{"Size": 5, "Length": 100, "Mutation": {"Rate": 1e18}}"#;
        assert!(serde_json::from_str::<Config>(record).is_err());
    }

    #[test]
    fn test_rejects_bad_fragments() {
        assert_eq!(
            base().transfer_in(0.01, 101).build(),
            Err(ConfigError::InvalidFragment {
                direction: "in",
                fragment: 101,
                length: 100
            })
        );
        assert!(base().transfer_out(0.01, 0).build().is_err());
        // A disabled process may leave its fragment unset.
        assert!(base().transfer_in(0.0, 0).build().is_ok());
        assert!(base().transfer_in(0.01, 100).build().is_ok());
    }

    #[test]
    fn test_with_num_gen_keeps_other_fields() {
        let config = base().mutation_rate(0.01).build().unwrap();
        let longer = config.with_num_gen(500);
        assert_eq!(longer.num_gen(), 500);
        assert_eq!(longer.with_num_gen(0), config);
    }

    #[test]
    fn test_json_field_names() {
        let config = base()
            .mutation_rate(0.01)
            .transfer_in(0.001, 10)
            .transfer_out(0.002, 20)
            .num_gen(1000)
            .build()
            .unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["Size"], 10);
        assert_eq!(value["Length"], 100);
        assert_eq!(value["Mutation"]["Rate"], 0.01);
        assert_eq!(value["Transfer"]["In"]["Rate"], 0.001);
        assert_eq!(value["Transfer"]["In"]["Fragment"], 10);
        assert_eq!(value["Transfer"]["Out"]["Fragment"], 20);
        assert_eq!(value["Alphabet"], "ATGC");
        assert_eq!(value["NumGen"], 1000);

        let back: Config = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"Size": 10, "Length": 5, "Transfer": {"In": {"Rate": 0.1, "Fragment": 6}}}"#;
        let err = serde_json::from_str::<Config>(json).unwrap_err();
        assert!(err.to_string().contains("fragment length 6"));

        let json = r#"{"Size": 0, "Length": 5}"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_compatibility() {
        let a = base().build().unwrap();
        let b = Config::builder().size(50).length(100).build().unwrap();
        let c = Config::builder().size(10).length(99).build().unwrap();
        let d = base()
            .alphabet(Alphabet::new(b"01".to_vec()).unwrap())
            .build()
            .unwrap();
        assert!(a.is_compatible_with(&b));
        assert!(!a.is_compatible_with(&c));
        assert!(!a.is_compatible_with(&d));
    }
}
