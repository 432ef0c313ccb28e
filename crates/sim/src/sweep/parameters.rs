//! Parameter-sweep definitions.
//!
//! A [`ParameterSet`] lists candidate values for every axis of a [`Config`].
//! Its Cartesian product is the set of configurations to simulate. Files may
//! hold one block or an array of blocks, in JSON or YAML (chosen by file
//! extension).

use crate::base::Alphabet;
use crate::errors::ConfigError;
use crate::simulation::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Candidate values for each configuration axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterSet {
    pub sizes: Vec<usize>,
    pub lengths: Vec<usize>,
    pub mutation_rates: Vec<f64>,
    pub transfer_in_rates: Vec<f64>,
    pub transfer_in_frags: Vec<usize>,
    pub transfer_out_rates: Vec<f64>,
    pub transfer_out_frags: Vec<usize>,
    #[serde(default)]
    pub alphabet: Alphabet,
}

/// A file holds either one parameter block or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ParameterSet>),
    One(ParameterSet),
}

impl From<OneOrMany> for Vec<ParameterSet> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::Many(sets) => sets,
            OneOrMany::One(set) => vec![set],
        }
    }
}

/// Input encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.yaml`/`.yml` is YAML, anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

impl ParameterSet {
    /// Read every parameter block from `path`.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<ParameterSet>, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {e}", path.display())))?;
        Self::parse_all(&text, Format::from_path(path))
    }

    /// Parse every parameter block from `text`.
    pub fn parse_all(text: &str, format: Format) -> Result<Vec<ParameterSet>, ConfigError> {
        let parsed: OneOrMany = match format {
            Format::Json => {
                serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            Format::Yaml => {
                serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        };
        let sets: Vec<ParameterSet> = parsed.into();
        if sets.is_empty() {
            return Err(ConfigError::Parse("no parameter blocks found".into()));
        }
        Ok(sets)
    }

    /// Number of configurations the Cartesian product yields.
    pub fn combinations(&self) -> usize {
        [
            self.sizes.len(),
            self.lengths.len(),
            self.mutation_rates.len(),
            self.transfer_in_rates.len(),
            self.transfer_in_frags.len(),
            self.transfer_out_rates.len(),
            self.transfer_out_frags.len(),
        ]
        .iter()
        .product()
    }

    fn check_axes(&self) -> Result<(), ConfigError> {
        let axes: [(&'static str, bool); 7] = [
            ("Sizes", self.sizes.is_empty()),
            ("Lengths", self.lengths.is_empty()),
            ("MutationRates", self.mutation_rates.is_empty()),
            ("TransferInRates", self.transfer_in_rates.is_empty()),
            ("TransferInFrags", self.transfer_in_frags.is_empty()),
            ("TransferOutRates", self.transfer_out_rates.is_empty()),
            ("TransferOutFrags", self.transfer_out_frags.is_empty()),
        ];
        match axes.iter().find(|(_, empty)| *empty) {
            Some((name, _)) => Err(ConfigError::EmptyAxis(*name)),
            None => Ok(()),
        }
    }

    /// Expand the full Cartesian product into validated configurations.
    ///
    /// Axes vary in declaration order, the last axis fastest.
    pub fn expand(&self) -> Result<Vec<Config>, ConfigError> {
        self.check_axes()?;

        let mut configs = Vec::with_capacity(self.combinations());
        for &size in &self.sizes {
            for &length in &self.lengths {
                for &mutation in &self.mutation_rates {
                    for &in_rate in &self.transfer_in_rates {
                        for &in_frag in &self.transfer_in_frags {
                            for &out_rate in &self.transfer_out_rates {
                                for &out_frag in &self.transfer_out_frags {
                                    configs.push(
                                        Config::builder()
                                            .size(size)
                                            .length(length)
                                            .mutation_rate(mutation)
                                            .transfer_in(in_rate, in_frag)
                                            .transfer_out(out_rate, out_frag)
                                            .alphabet(self.alphabet.clone())
                                            .build()?,
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }
        Ok(configs)
    }

    /// Expand and repeat every configuration `replicates` times, each with
    /// `NumGen = 10 × Size²`.
    pub fn expand_replicated(&self, replicates: usize) -> Result<Vec<Config>, ConfigError> {
        let mut configs = Vec::new();
        for config in self.expand()? {
            let size = config.size();
            let num_gen = size
                .checked_mul(size)
                .and_then(|square| square.checked_mul(10))
                .ok_or(ConfigError::GenerationOverflow(size))?;
            configs.extend(std::iter::repeat(config.with_num_gen(num_gen)).take(replicates));
        }
        Ok(configs)
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sizes: {:?}", self.sizes)?;
        writeln!(f, "Lengths: {:?}", self.lengths)?;
        writeln!(f, "Mutation rates: {:?}", self.mutation_rates)?;
        writeln!(f, "Transfer in rates: {:?}", self.transfer_in_rates)?;
        writeln!(f, "Transfer in frags: {:?}", self.transfer_in_frags)?;
        writeln!(f, "Transfer out rates: {:?}", self.transfer_out_rates)?;
        writeln!(f, "Transfer out frags: {:?}", self.transfer_out_frags)?;
        write!(
            f,
            "Alphabet: {}",
            String::from_utf8_lossy(self.alphabet.symbols())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_BLOCK: &str = r#"{
        "Sizes": [10, 20],
        "Lengths": [100],
        "MutationRates": [0.001, 0.01],
        "TransferInRates": [0.0, 0.001],
        "TransferInFrags": [10],
        "TransferOutRates": [0.0],
        "TransferOutFrags": [10],
        "Alphabet": "ATGC"
    }"#;

    const YAML_BLOCKS: &str = "
- Sizes: [10]
  Lengths: [50]
  MutationRates: [0.01]
  TransferInRates: [0.0]
  TransferInFrags: [5]
  TransferOutRates: [0.001]
  TransferOutFrags: [5]
  Alphabet: [A, T, G, C]
- Sizes: [10, 30]
  Lengths: [50]
  MutationRates: [0.01]
  TransferInRates: [0.0]
  TransferInFrags: [5]
  TransferOutRates: [0.001]
  TransferOutFrags: [5]
";

    #[test]
    fn test_parse_single_json_block() {
        let sets = ParameterSet::parse_all(JSON_BLOCK, Format::Json).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].sizes, vec![10, 20]);
        assert_eq!(sets[0].combinations(), 8);
    }

    #[test]
    fn test_parse_yaml_blocks() {
        let sets = ParameterSet::parse_all(YAML_BLOCKS, Format::Yaml).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].alphabet, Alphabet::dna());
        // Missing alphabet falls back to DNA.
        assert_eq!(sets[1].alphabet, Alphabet::dna());
        assert_eq!(sets[1].sizes, vec![10, 30]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ParameterSet::parse_all("{not json", Format::Json),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ParameterSet::parse_all("[]", Format::Json),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ParameterSet::load_all("/nonexistent/params.json"),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/config.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("config.YML")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("config.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("config")), Format::Json);
    }

    #[test]
    fn test_expand_covers_product() {
        let set = &ParameterSet::parse_all(JSON_BLOCK, Format::Json).unwrap()[0];
        let configs = set.expand().unwrap();
        assert_eq!(configs.len(), 8);

        // Last axis varies fastest.
        assert_eq!(configs[0].transfer().inward.rate, 0.0);
        assert_eq!(configs[1].transfer().inward.rate, 0.001);
        assert_eq!(configs[0].size(), 10);
        assert_eq!(configs[7].size(), 20);
        assert!(configs.iter().all(|c| c.num_gen() == 0));
    }

    #[test]
    fn test_expand_rejects_empty_axis_and_bad_values() {
        let mut set = ParameterSet::parse_all(JSON_BLOCK, Format::Json).unwrap().remove(0);
        set.transfer_out_frags.clear();
        assert_eq!(
            set.expand(),
            Err(ConfigError::EmptyAxis("TransferOutFrags"))
        );

        set.transfer_out_frags = vec![101];
        assert!(matches!(
            set.expand(),
            Err(ConfigError::InvalidFragment { direction: "out", .. })
        ));
    }

    #[test]
    fn test_expand_replicated() {
        let set = &ParameterSet::parse_all(JSON_BLOCK, Format::Json).unwrap()[0];
        let configs = set.expand_replicated(3).unwrap();
        assert_eq!(configs.len(), 24);
        assert_eq!(configs[0], configs[2]);
        assert_eq!(configs[0].num_gen(), 1000);
        assert_eq!(configs[23].num_gen(), 4000);
        assert!(set.expand_replicated(0).unwrap().is_empty());
    }

    #[test]
    fn test_expand_replicated_rejects_num_gen_overflow() {
        let block = JSON_BLOCK.replace("[10, 20]", &format!("[{}]", usize::MAX / 2));
        let set = &ParameterSet::parse_all(&block, Format::Json).unwrap()[0];
        assert!(matches!(
            set.expand_replicated(1),
            Err(ConfigError::GenerationOverflow(_))
        ));
    }

    #[test]
    fn test_display_lists_axes() {
        let set = &ParameterSet::parse_all(JSON_BLOCK, Format::Json).unwrap()[0];
        let text = set.to_string();
        assert!(text.contains("Sizes: [10, 20]"));
        assert!(text.contains("Alphabet: ATGC"));
    }
}
