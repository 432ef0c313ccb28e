use std::error;
use std::fmt;
use thiserror::Error;

/// Error returned when an index is outside the valid range for a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    /// The index that was requested
    pub index: usize,

    /// The current length of the sequence (upper bound)
    pub len: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds (len = {})", self.index, self.len)
    }
}

impl error::Error for OutOfBounds {}

/// Errors raised while building or validating simulation parameters.
///
/// Every physically inconsistent parameter combination is rejected with one
/// of these variants before any population is created.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Population size must be at least 1")]
    ZeroPopulationSize,

    #[error("Sequence length must be at least 1")]
    ZeroLength,

    #[error("Invalid {name} rate: {value} (must be finite and non-negative)")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("Invalid transfer-{direction} fragment length {fragment} (must be between 1 and the sequence length {length})")]
    InvalidFragment {
        direction: &'static str,
        fragment: usize,
        length: usize,
    },

    #[error("Alphabet must contain at least one symbol")]
    EmptyAlphabet,

    #[error("Alphabet contains duplicate symbol {0:?}")]
    DuplicateSymbol(char),

    #[error("Alphabet symbol {0:?} is not a single ASCII character")]
    NonAsciiSymbol(char),

    #[error("Sequence length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Parameter set has no values for {0}")]
    EmptyAxis(&'static str),

    #[error("Expected molecular events per generation ({lambda:e}) exceed what can be sampled")]
    EventRateTooLarge { lambda: f64 },

    #[error("NumGen for population size {0} does not fit in usize")]
    GenerationOverflow(usize),

    #[error("A job needs at least one population configuration")]
    EmptyJob,

    #[error("Populations in one job must share sequence length and alphabet (length {left} vs {right})")]
    IncompatiblePair { left: usize, right: usize },

    #[error("Expected {expected} population(s), found {found}")]
    PopulationCount { expected: usize, found: usize },

    #[error("Population {0} does not match the size or length of its configuration")]
    PopulationMismatch(usize),

    #[error("Failed to read parameter file: {0}")]
    Read(String),

    #[error("Failed to parse parameter file: {0}")]
    Parse(String),
}

/// Errors raised by the durable result recorder.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by the worker pool itself.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Worker pool needs at least one thread")]
    NoWorkers,

    #[error("{0} worker thread(s) panicked; results may be incomplete")]
    WorkerPanicked(usize),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
