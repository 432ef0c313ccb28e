//! Evolution module providing the stochastic operators.
//!
//! This module implements the three processes acting on a population:
//! - **Selection**: the Moran birth-death step
//! - **Mutation**: neutral point substitutions
//! - **Transfer**: homologous replacement of a fixed-length fragment

pub mod mutation;
pub mod operator;
pub mod selection;
pub mod transfer;

pub use mutation::PointMutator;
pub use operator::Operator;
pub use selection::MoranSelector;
pub use transfer::FragmentTransfer;
