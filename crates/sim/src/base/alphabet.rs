use crate::errors::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared, immutable symbol set.
///
/// Symbols are raw bytes so that both text alphabets (`"ATGC"`) and numeric
/// ones (`[1, 2, 3, 4]`) can be expressed. Cloning only bumps a reference
/// count, so one instance is shared by every configuration and operator built
/// from the same parameter block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "AlphabetRepr", into = "AlphabetRepr")]
pub struct Alphabet {
    symbols: Arc<[u8]>,
}

impl Alphabet {
    /// Create a new alphabet from symbols.
    /// The order determines the index mapping.
    ///
    /// Fails on an empty symbol list or on duplicate symbols.
    pub fn new(symbols: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let symbols: Vec<u8> = symbols.into();
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        for (i, &s) in symbols.iter().enumerate() {
            if symbols[..i].contains(&s) {
                return Err(ConfigError::DuplicateSymbol(s as char));
            }
        }

        Ok(Self {
            symbols: symbols.into(),
        })
    }

    /// Standard DNA alphabet (A, T, G, C)
    pub fn dna() -> Self {
        Self {
            symbols: Arc::from(&b"ATGC"[..]),
        }
    }

    /// Get the number of symbols in this alphabet
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty (never true for a constructed alphabet)
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get symbol by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.symbols.get(index).copied()
    }

    /// Get all symbols as slice
    #[inline]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Check if symbol is in alphabet
    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Draw one symbol uniformly at random.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        self.symbols[rng.random_range(0..self.symbols.len())]
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::dna()
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.symbols, &other.symbols) || self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

/// Wire form of an alphabet: a string (`"ATGC"`), a list of one-character
/// strings (`["A", "T"]`) or a list of raw byte values (`[1, 2, 3, 4]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AlphabetRepr {
    Text(String),
    Bytes(Vec<u8>),
    Chars(Vec<char>),
}

impl TryFrom<AlphabetRepr> for Alphabet {
    type Error = ConfigError;

    fn try_from(repr: AlphabetRepr) -> Result<Self, Self::Error> {
        match repr {
            AlphabetRepr::Text(text) => Self::new(ascii_bytes(text.chars())?),
            AlphabetRepr::Chars(chars) => Self::new(ascii_bytes(chars.into_iter())?),
            AlphabetRepr::Bytes(bytes) => Self::new(bytes),
        }
    }
}

impl From<Alphabet> for AlphabetRepr {
    fn from(alphabet: Alphabet) -> Self {
        if alphabet.symbols.iter().all(|s| s.is_ascii_graphic()) {
            AlphabetRepr::Text(alphabet.symbols.iter().map(|&s| s as char).collect())
        } else {
            AlphabetRepr::Bytes(alphabet.symbols.to_vec())
        }
    }
}

fn ascii_bytes(chars: impl Iterator<Item = char>) -> Result<Vec<u8>, ConfigError> {
    chars
        .map(|c| {
            if c.is_ascii() {
                Ok(c as u8)
            } else {
                Err(ConfigError::NonAsciiSymbol(c))
            }
        })
        .collect()
}
