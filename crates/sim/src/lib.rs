//! # Simulation Crate
//!
//! The `sim` crate provides the core logic for simulating microbial
//! populations under a Moran birth-death process with point mutation and
//! homologous horizontal transfer. It includes modules for sequences and
//! populations, the stochastic operators, the generation scheduler,
//! pairwise diversity statistics (Ks/Vd), parallel parameter sweeps and
//! durable result storage.

pub mod analysis;
pub mod base;
pub mod errors;
pub mod evolution;
pub mod prelude;
pub mod simulation;
pub mod storage;
pub mod sweep;

pub use base::{Alphabet, Sequence};
