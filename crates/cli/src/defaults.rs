//! Shared default values for the command-line flags.

use popsimu_sim::analysis::DEFAULT_MAX_PAIRS;

pub const CONFIG_FILE: &str = "config.yaml";
pub const PREFIX: &str = "test";
pub const RESULT_SUFFIX: &str = "_res.json";

// Generation plan
pub const NUM_REP: usize = 10;
pub const GEN_STEP: usize = 1000;
pub const GEN_TIME: usize = 1;

pub const REPLICATES: usize = 1;

pub const MAX_PAIRS: usize = DEFAULT_MAX_PAIRS;
