//! Storage module for persisting simulation results.
//!
//! Results are appended as newline-delimited JSON and synced after every
//! record; generated configuration sets are written as one JSON array.

mod recorder;

pub use recorder::{
    read_config_set, read_results, write_config_set, RecorderStats, ResultRecorder,
};
