//! Simulation engine and population management.
//!
//! The most commonly used types are re-exported here:
//!
//! - `Population`: fixed-size collection of equal-length genomes.
//! - `Config` / `ConfigBuilder`: validated per-population parameters.
//! - `Event`, `emit`, `evolve`: rate-weighted event selection and sequential
//!   application.
//! - `MoranProcess`: the Poisson-driven generation scheduler for one job.

pub mod configs;
pub mod engine;
pub mod event;
pub mod initialization;
pub mod population;

pub use configs::{Config, ConfigBuilder, FragmentParams, MutationParams, TransferParams};
pub use engine::MoranProcess;
pub use event::{emit, evolve, Event, Target};
pub use initialization::{populations_from_common_ancestor, random_ancestor};
pub use population::Population;
