//! Population diversity analysis
//!
//! - Within-population Ks/Vd (`calc_ks`, `calc_ks_sampled`)
//! - Cross-population Ks/Vd (`cross_ks`, `cross_ks_sampled`)
//! - Hamming distance and moment helpers

pub mod diversity;
pub mod utils;

pub use diversity::{
    calc_ks, calc_ks_sampled, cross_ks, cross_ks_sampled, DiversityStats, PairSampling,
    DEFAULT_MAX_PAIRS,
};
pub use utils::{hamming_distance_fast, mean, std_dev, PairMoments};
