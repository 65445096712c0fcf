//! Sequence scoring: positional weight matrices and k-mer tables
//!
//! Scorers are pure and never look at genomic coordinates.

pub mod kmer;
pub mod pwm;

pub use kmer::KmerScores;
pub use pwm::PositionalWeightMatrix;
