//! Parameter sweeps and their parallel execution.
//!
//! - `ParameterSet`: axes of a sweep, read from JSON or YAML.
//! - `Job` / `GenerationPlan`: one unit of work and how long to run it.
//! - `run_jobs`: the bounded worker pool that turns jobs into `JobResult`s.

pub mod jobs;
pub mod parameters;
pub mod results;
pub mod runner;

pub use jobs::{build_jobs, jobs_from_configs, GenerationPlan, Job};
pub use parameters::{Format, ParameterSet};
pub use results::{snapshot, CalcRes, JobResult};
pub use runner::{default_threads, run_job, run_jobs, RunSettings};
