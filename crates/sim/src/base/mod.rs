//! Base types for sequence representation.
//!
//! This module provides the foundational types for representing alphabets
//! and genome sequences in the popsimu library.

mod alphabet;
mod sequence;

pub use alphabet::Alphabet;
pub use sequence::Sequence;
